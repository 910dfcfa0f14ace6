//! Markdown report renderer for template diffs.

use crate::compare::model::{PropertyComparison, PropertyStatus, TemplateDiff};
use crate::document::ResourceKey;
use crate::errors::{Result, TemplateError};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;

/// Fail-column marker for a differing, non-ignored property.
pub const FAIL_MARKER: &str = "✗";
/// Fail-column marker for an ignored property.
pub const IGNORED_MARKER: &str = "Ignored";

/// Link target for a resource: `type-name`, whitespace turned into `-`,
/// everything outside `[A-Za-z0-9-]` dropped, lower-cased.
pub fn anchor_for(key: &ResourceKey) -> String {
    format!("{}-{}", key.resource_type, key.name)
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Anchors already handed out within one report.
///
/// Distinct resources can normalize to the same anchor; later ones get a
/// numeric suffix (`-2`, `-3`, ...) so every link has a single target.
#[derive(Debug, Default)]
pub struct AnchorSet {
    taken: BTreeSet<String>,
}

impl AnchorSet {
    pub fn claim(&mut self, base: String) -> String {
        if self.taken.insert(base.clone()) {
            return base;
        }
        let mut suffix = 2;
        loop {
            let candidate = format!("{}-{}", base, suffix);
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            suffix += 1;
        }
    }
}

/// Render a [`TemplateDiff`] as a Markdown report.
///
/// Layout: a summary (ignored properties, compared resources with links,
/// unmatched resources per side), a horizontal rule, then one detail table
/// per compared resource.
pub fn render_report(diff: &TemplateDiff) -> String {
    let mut out = String::new();

    out.push_str("# Summary\n\n");

    if !diff.ignored_properties.is_empty() {
        out.push_str("## Ignored Properties\n\n");
        out.push_str("The following properties were ignored during comparisons:\n\n");
        for path in &diff.ignored_properties {
            out.push_str(&format!("- {}\n", cell(path)));
        }
        out.push('\n');
    }

    out.push_str("## Compared Resources\n\n");
    out.push_str("| Resource Type | Name | Total Properties | Correct | Incorrect |\n");
    out.push_str("| --- | --- | --- | --- | --- |\n");
    for resource in &diff.compared {
        out.push_str(&format!(
            "| {} | [{}](#{}) | {} | {} | {} |\n",
            cell(&resource.key.resource_type),
            cell(&resource.key.name),
            resource.anchor,
            resource.total,
            resource.correct,
            resource.incorrect,
        ));
    }
    out.push('\n');

    render_unmatched(&mut out, "Left", &diff.unmatched_left);
    render_unmatched(&mut out, "Right", &diff.unmatched_right);

    out.push_str("---\n\n");

    for resource in &diff.compared {
        out.push_str(&format!("<a id=\"{}\"></a>\n", resource.anchor));
        out.push_str(&format!(
            "### Comparison for Resource: {}\n\n",
            cell(&resource.key.to_string())
        ));
        if resource.right_key != resource.key {
            out.push_str(&format!(
                "Matched with: {}\n\n",
                cell(&resource.right_key.to_string())
            ));
        }
        out.push_str("| Property Path | Left Value (Line No.) | Right Value (Line No.) | Fail |\n");
        out.push_str("| --- | --- | --- | --- |\n");
        for property in &resource.properties {
            render_property_row(&mut out, property);
        }
        out.push('\n');
    }

    out
}

/// Write a rendered report to `path` in one call.
///
/// # Errors
///
/// `WriteFailed` if the file cannot be written.
pub fn write_report(path: impl AsRef<Path>, report: &str) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, report).map_err(|e| TemplateError::WriteFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

fn render_unmatched(out: &mut String, side: &str, keys: &[ResourceKey]) {
    if keys.is_empty() {
        return;
    }
    out.push_str(&format!("## Unmatched Resources in {} Template\n\n", side));
    out.push_str("| Resource Type | Name |\n");
    out.push_str("| --- | --- |\n");
    for key in keys {
        out.push_str(&format!(
            "| {} | {} |\n",
            cell(&key.resource_type),
            cell(&key.name)
        ));
    }
    out.push('\n');
}

fn render_property_row(out: &mut String, property: &PropertyComparison) {
    let marker = match property.status() {
        PropertyStatus::Equal => "",
        PropertyStatus::Ignored => IGNORED_MARKER,
        PropertyStatus::Different => FAIL_MARKER,
    };
    out.push_str(&format!(
        "| {} | {} | {} | {} |\n",
        cell(&property.path),
        with_line(&property.left, property.left_line),
        with_line(&property.right, property.right_line),
        marker,
    ));
}

fn with_line(value: &Value, line: Option<usize>) -> String {
    let shown = cell(&display_value(value));
    match line {
        Some(line) => format!("{} ({})", shown, line),
        None => shown,
    }
}

/// Strings are shown raw; other scalars in their JSON spelling.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Keep a value inside its table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', "<br>")
}
