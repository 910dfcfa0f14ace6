//! Property-by-property comparison of one matched resource pair.

use crate::compare::model::{PropertyComparison, ResourceComparison};
use crate::compare::report::anchor_for;
use crate::flatten::flatten;
use crate::locate::{locate_properties, SourceLines};
use crate::matcher::MatchedPair;
use crate::rules::IgnoreRules;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Compares matched pairs under a fixed set of ignore rules.
#[derive(Debug, Clone, Copy)]
pub struct Comparator<'a> {
    rules: &'a IgnoreRules,
    sources: Option<(&'a SourceLines, &'a SourceLines)>,
}

impl<'a> Comparator<'a> {
    pub fn new(rules: &'a IgnoreRules) -> Self {
        Self {
            rules,
            sources: None,
        }
    }

    /// Attach the raw template text so rows carry source line numbers.
    pub fn with_sources(mut self, left: &'a SourceLines, right: &'a SourceLines) -> Self {
        self.sources = Some((left, right));
        self
    }

    /// Compare one pair.
    ///
    /// Returns `None` when the left resource type matches an ignore rule.
    /// Otherwise every path present on either side yields one row, in path
    /// order. A path missing on one side compares as the empty string, so an
    /// explicit `""` on the other side is equal. Numbers compare by value
    /// (`1` equals `1.0`); a number never equals a string or a boolean.
    pub fn compare(&self, pair: &MatchedPair) -> Option<ResourceComparison> {
        if self.rules.is_ignored_type(&pair.left_key.resource_type) {
            tracing::debug!(
                resource_type = %pair.left_key.resource_type,
                resource_name = %pair.left_key.name,
                "resource type ignored"
            );
            return None;
        }

        let left_flat = flatten(&pair.left);
        let right_flat = flatten(&pair.right);
        let (left_lines, right_lines) = match self.sources {
            Some((left_source, right_source)) => (
                locate_properties(&pair.left, &left_flat, left_source),
                locate_properties(&pair.right, &right_flat, right_source),
            ),
            None => (BTreeMap::new(), BTreeMap::new()),
        };

        let paths: BTreeSet<&String> = left_flat.keys().chain(right_flat.keys()).collect();
        let absent = Value::String(String::new());

        let mut properties = Vec::with_capacity(paths.len());
        let (mut correct, mut incorrect) = (0, 0);
        for path in paths {
            let left = left_flat.get(path).unwrap_or(&absent);
            let right = right_flat.get(path).unwrap_or(&absent);
            let ignored = self.rules.is_ignored_property(path);
            let equal = values_equal(left, right);

            if !ignored {
                if equal {
                    correct += 1;
                } else {
                    incorrect += 1;
                }
            }

            properties.push(PropertyComparison {
                path: path.clone(),
                left: left.clone(),
                right: right.clone(),
                left_line: left_lines.get(path).copied(),
                right_line: right_lines.get(path).copied(),
                ignored,
                equal,
            });
        }

        Some(ResourceComparison {
            anchor: anchor_for(&pair.left_key),
            key: pair.left_key.clone(),
            right_key: pair.right_key.clone(),
            total: properties.len(),
            correct,
            incorrect,
            properties,
        })
    }
}

/// Leaf equality: numbers by numeric value, everything else structurally.
fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => {
            if let (Some(l), Some(r)) = (l.as_i64(), r.as_i64()) {
                l == r
            } else if let (Some(l), Some(r)) = (l.as_u64(), r.as_u64()) {
                l == r
            } else {
                l.as_f64() == r.as_f64()
            }
        }
        _ => left == right,
    }
}
