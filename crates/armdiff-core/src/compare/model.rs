//! Template comparison output types.
//!
//! Collections are ordered (`BTreeSet`, sorted `Vec`) so that serializing or
//! rendering the same diff twice yields identical bytes.

use crate::document::ResourceKey;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;

/// Outcome of comparing one property path across a matched pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    /// Values are equal and the path is not ignored
    Equal,
    /// The path matched an ignore rule; equality does not count
    Ignored,
    /// Values differ and the path is not ignored
    Different,
}

/// One row of a resource's detail table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyComparison {
    /// Flattened property path (`a.b[2].c`)
    pub path: String,
    /// Left value; an absent path compares as the empty string
    pub left: Value,
    /// Right value; an absent path compares as the empty string
    pub right: Value,
    /// 1-based source line of the property in the left template, if found
    pub left_line: Option<usize>,
    /// 1-based source line of the property in the right template, if found
    pub right_line: Option<usize>,
    /// Whether the path matched an ignore rule
    pub ignored: bool,
    /// Whether the two values are exactly equal (type-sensitive)
    pub equal: bool,
}

impl PropertyComparison {
    pub fn status(&self) -> PropertyStatus {
        if self.ignored {
            PropertyStatus::Ignored
        } else if self.equal {
            PropertyStatus::Equal
        } else {
            PropertyStatus::Different
        }
    }
}

/// Comparison of one matched resource pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceComparison {
    /// Key of the left resource; the pair is reported under it
    pub key: ResourceKey,
    /// Key of the right resource it was paired with
    pub right_key: ResourceKey,
    /// Link target for the summary row
    pub anchor: String,
    /// One entry per path present on either side, sorted by path
    pub properties: Vec<PropertyComparison>,
    /// Number of properties, ignored ones included
    pub total: usize,
    /// Equal and not ignored
    pub correct: usize,
    /// Different and not ignored
    pub incorrect: usize,
}

impl ResourceComparison {
    pub fn ignored_count(&self) -> usize {
        self.total - self.correct - self.incorrect
    }

    /// Paths that matched an ignore rule.
    pub fn ignored_paths(&self) -> impl Iterator<Item = &str> {
        self.properties
            .iter()
            .filter(|p| p.ignored)
            .map(|p| p.path.as_str())
    }
}

/// The complete result of comparing two templates.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemplateDiff {
    /// Compared resources in matching order; ignored resource types are absent
    pub compared: Vec<ResourceComparison>,
    /// Every property path that matched an ignore rule in any comparison
    pub ignored_properties: BTreeSet<String>,
    /// Left resources with no counterpart, sorted by key
    pub unmatched_left: Vec<ResourceKey>,
    /// Right resources with no counterpart, sorted by key
    pub unmatched_right: Vec<ResourceKey>,
}
