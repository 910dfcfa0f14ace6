//! Template documents and the resources they declare.
//!
//! A template is a JSON object whose `resources` field holds an ordered
//! array of resource objects. Each resource is identified by its
//! [`ResourceKey`], the `(type, name)` pair.

use crate::errors::{Result, TemplateError};
use crate::locate::SourceLines;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Field holding the resource sequence in a template root.
pub const RESOURCES_FIELD: &str = "resources";

/// Composite key identifying a resource within one template.
///
/// Ordered by type, then name, so pools iterate deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ResourceKey {
    pub resource_type: String,
    pub name: String,
}

impl ResourceKey {
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
        }
    }

    /// Extract the key from a resource object.
    ///
    /// Returns `None` when `type` or `name` is absent, not a string, or empty.
    pub fn of(resource: &Value) -> Option<Self> {
        let resource_type = non_empty_str(resource, "type")?;
        let name = non_empty_str(resource, "name")?;
        Some(Self::new(resource_type, name))
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.resource_type, self.name)
    }
}

fn non_empty_str<'a>(resource: &'a Value, field: &str) -> Option<&'a str> {
    resource
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Resources of one template indexed by composite key.
pub type ResourcePool = BTreeMap<ResourceKey, Value>;

/// A parsed template plus the raw text it was parsed from.
#[derive(Debug, Clone, Default)]
pub struct Document {
    resources: Vec<Value>,
    source: SourceLines,
}

impl Document {
    /// Parse a template from its JSON text.
    ///
    /// `path` is used for error context only.
    ///
    /// # Errors
    ///
    /// - `InvalidJson` if the text is not JSON
    /// - `MalformedTemplate` if the root is not an object or `resources` is
    ///   present but not an array
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        let root: Value =
            serde_json::from_str(text).map_err(|e| TemplateError::InvalidJson {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let obj = root
            .as_object()
            .ok_or_else(|| TemplateError::MalformedTemplate {
                path: path.to_path_buf(),
                reason: "template root must be an object".to_string(),
            })?;

        let resources = match obj.get(RESOURCES_FIELD) {
            None => Vec::new(),
            Some(Value::Array(items)) => items.clone(),
            Some(_) => {
                return Err(TemplateError::MalformedTemplate {
                    path: path.to_path_buf(),
                    reason: format!("`{}` must be an array", RESOURCES_FIELD),
                })
            }
        };

        Ok(Self {
            resources,
            source: SourceLines::new(text),
        })
    }

    /// Build a document directly from a JSON value, without source text.
    pub fn from_value(root: &Value) -> Self {
        let resources = root
            .get(RESOURCES_FIELD)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        Self {
            resources,
            source: SourceLines::default(),
        }
    }

    /// Resources in document order.
    pub fn resources(&self) -> &[Value] {
        &self.resources
    }

    /// Raw source lines, for line lookup.
    pub fn source(&self) -> &SourceLines {
        &self.source
    }

    /// Index resources by composite key.
    ///
    /// Entries without a usable key are skipped. On a duplicate key the later
    /// entry replaces the earlier one.
    pub fn pool(&self) -> ResourcePool {
        let mut pool = ResourcePool::new();
        for (index, resource) in self.resources.iter().enumerate() {
            let Some(key) = ResourceKey::of(resource) else {
                tracing::debug!(index, "skipping resource without type/name");
                continue;
            };
            if pool.insert(key.clone(), resource.clone()).is_some() {
                tracing::warn!(
                    resource_type = %key.resource_type,
                    resource_name = %key.name,
                    "duplicate resource key; later entry wins"
                );
            }
        }
        pool
    }
}

/// Load and parse a template file.
///
/// # Errors
///
/// - `FileNotFound` if `path` does not exist
/// - `ReadFailed` if the file cannot be read
/// - `InvalidJson` / `MalformedTemplate` as for [`Document::parse`]
pub fn load_document(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(TemplateError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|e| TemplateError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    Document::parse(&text, path)
}
