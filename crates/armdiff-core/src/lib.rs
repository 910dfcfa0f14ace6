//! armdiff Core - field-by-field comparison of infrastructure templates
//!
//! This crate provides:
//! - Template loading and composite-key indexing of resources
//! - Flattening of nested resources into leaf property paths
//! - Resource pairing by explicit, prefix, and identical-key matching
//! - Glob-style ignore rules for property paths and resource types
//! - Per-property comparison with aggregate counts
//! - Markdown report rendering

pub mod compare;
pub mod config;
pub mod document;
pub mod errors;
pub mod flatten;
pub mod locate;
pub mod logging_facility;
pub mod matcher;
pub mod rules;

pub use armdiff_core_types::schema;

// Re-export commonly used types
pub use compare::{compute_template_diff, render_report, write_report, TemplateDiff};
pub use config::{load_config, CompareConfig, ResourceMapping};
pub use document::{load_document, Document, ResourceKey, ResourcePool};
pub use errors::{ExError, ExErrorKind, Result, TemplateError};
pub use rules::IgnoreRules;
