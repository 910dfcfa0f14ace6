//! Best-effort source line lookup for flattened properties.
//!
//! Lines are found by text search, not by parsing with positions. The
//! resource block opens at the last `{` line at or before the first line
//! holding its quoted `name` value. Each field name of a property path is
//! then searched as a quoted key, in order, starting where the previous one
//! was found. Results only decorate the report.

use crate::flatten::FlatProperties;
use serde_json::Value;
use std::collections::BTreeMap;

/// Raw lines of a source document.
#[derive(Debug, Clone, Default)]
pub struct SourceLines {
    lines: Vec<String>,
}

impl SourceLines {
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 0-based index of the first line at or after `from` containing `needle`.
    fn find_from(&self, from: usize, needle: &str) -> Option<usize> {
        self.lines
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, line)| line.contains(needle))
            .map(|(index, _)| index)
    }

    /// 0-based index of the last line at or before `upto` opening a block.
    fn block_start(&self, upto: usize) -> Option<usize> {
        self.lines
            .iter()
            .take(upto + 1)
            .rposition(|line| line.trim_end().ends_with('{'))
    }
}

/// Field names of a flattened path, without array indices.
///
/// `properties.rules[1].port` → `properties`, `rules`, `port`.
fn field_names(path: &str) -> impl Iterator<Item = &str> {
    path.split('.')
        .map(|segment| segment.split('[').next().unwrap_or(segment))
        .filter(|field| !field.is_empty())
}

/// Map each flattened path of `resource` to its 1-based source line.
///
/// Paths whose field name cannot be found are omitted.
pub fn locate_properties(
    resource: &Value,
    flat: &FlatProperties,
    source: &SourceLines,
) -> BTreeMap<String, usize> {
    let mut lines = BTreeMap::new();
    if source.is_empty() {
        return lines;
    }

    let start = resource
        .get("name")
        .and_then(Value::as_str)
        .and_then(|name| source.find_from(0, &format!("\"{}\"", name)))
        .and_then(|name_line| source.block_start(name_line))
        .unwrap_or(0);

    for path in flat.keys() {
        let mut cursor = Some(start);
        let mut found = false;
        for field in field_names(path) {
            cursor = cursor.and_then(|from| source.find_from(from, &format!("\"{}\"", field)));
            found = true;
        }
        if let (true, Some(index)) = (found, cursor) {
            lines.insert(path.clone(), index + 1);
        }
    }
    lines
}
