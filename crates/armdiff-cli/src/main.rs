//! armdiff CLI
//!
//! Command-line interface for comparing two ARM templates

use armdiff_core::logging_facility::{init, Profile};
use clap::Parser;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "armdiff")]
#[command(about = "Compare two ARM templates by resource type and name", long_about = None)]
struct Cli {
    #[command(flatten)]
    compare: commands::compare::CompareArgs,

    /// Emit debug logs on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    init(if cli.verbose {
        Profile::Development
    } else {
        Profile::Cli
    });

    if let Err(e) = commands::compare::execute(cli.compare) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
