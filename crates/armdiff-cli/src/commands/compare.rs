//! Compare command
//!
//! Usage: armdiff --left <FILE> --right <FILE> --output <FILE> [--config <FILE>]

use armdiff_core::errors::{Result, TemplateError};
use armdiff_core::{
    compute_template_diff, load_config, load_document, log_op_end, log_op_error, log_op_start,
    render_report, write_report, CompareConfig,
};
use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Left ARM template JSON file
    #[arg(long)]
    pub left: PathBuf,

    /// Right ARM template JSON file
    #[arg(long)]
    pub right: PathBuf,

    /// Configuration YAML file (optional)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output Markdown file
    #[arg(long)]
    pub output: PathBuf,
}

/// Execute compare command
pub fn execute(args: CompareArgs) -> Result<()> {
    let start = std::time::Instant::now();
    log_op_start!("compare", output = %args.output.display());

    match run(&args) {
        Ok(()) => {
            log_op_end!("compare", duration_ms = start.elapsed().as_millis() as u64);
            println!("✓ Report written to {}", args.output.display());
            Ok(())
        }
        Err(e) => {
            log_op_error!("compare", &e, duration_ms = start.elapsed().as_millis() as u64);
            Err(e)
        }
    }
}

fn run(args: &CompareArgs) -> Result<()> {
    // Every input must exist before anything is parsed
    ensure_exists(&args.left, false)?;
    ensure_exists(&args.right, false)?;
    if let Some(config) = &args.config {
        ensure_exists(config, true)?;
    }

    let left = load_document(&args.left)?;
    let right = load_document(&args.right)?;
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => CompareConfig::default(),
    };

    let diff = compute_template_diff(&left, &right, &config)?;
    write_report(&args.output, &render_report(&diff))
}

fn ensure_exists(path: &Path, is_config: bool) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    let path = path.to_path_buf();
    Err(if is_config {
        TemplateError::ConfigNotFound { path }
    } else {
        TemplateError::FileNotFound { path }
    })
}
