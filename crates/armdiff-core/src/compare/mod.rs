//! Template comparison engine.
//!
//! Pairs the resources of two templates, compares each pair property by
//! property, and renders the result as a Markdown report.
//!
//! ## Entry point
//!
//! ```ignore
//! use armdiff_core::compare::{compute_template_diff, render_report};
//!
//! let diff = compute_template_diff(&left, &right, &config)?;
//! let report = render_report(&diff);
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce a byte-identical report.
//! - **No hidden state**: the ignored-properties set is part of the returned
//!   [`TemplateDiff`], not accumulated globally.
//! - **Soft skips**: resources without `type`/`name` never fail a run; they
//!   are left out of matching and of the unmatched tables.

pub mod comparator;
pub mod engine;
pub mod model;
pub mod report;

pub use comparator::Comparator;
pub use engine::compute_template_diff;
pub use model::{PropertyComparison, PropertyStatus, ResourceComparison, TemplateDiff};
pub use report::{render_report, write_report};
