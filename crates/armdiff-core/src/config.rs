//! Comparison configuration loaded from YAML.
//!
//! ```yaml
//! ignoreRules:
//!   - "properties.provisioningState"
//! resourceMappings:
//!   - leftResourceType: Microsoft.Web/sites
//!     leftResourceName: app-old
//!     rightResourceType: Microsoft.Web/sites
//!     rightResourceName: app-new
//!   - leftResourceTypePrefix: Microsoft.Sql/servers
//!     leftResourceNamePrefix: sql-dev-
//!     rightResourceTypePrefix: Microsoft.Sql/servers
//!     rightResourceNamePrefix: sql-prod-
//! ```

use crate::document::ResourceKey;
use crate::errors::{Result, TemplateError};
use crate::rules::IgnoreRules;
use serde::Deserialize;
use std::path::Path;

/// User-declared correspondence between left and right resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceMapping {
    /// Pair one fully-specified left key with one right key.
    Exact { left: ResourceKey, right: ResourceKey },
    /// Pair every left resource under the left prefixes with the right
    /// resource that carries the same remainders under the right prefixes.
    Prefix {
        left_type_prefix: String,
        left_name_prefix: String,
        right_type_prefix: String,
        right_name_prefix: String,
    },
}

/// Mapping declaration as written in the file, before shape validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawMapping {
    left_resource_type: Option<String>,
    left_resource_name: Option<String>,
    right_resource_type: Option<String>,
    right_resource_name: Option<String>,
    left_resource_type_prefix: Option<String>,
    left_resource_name_prefix: Option<String>,
    right_resource_type_prefix: Option<String>,
    right_resource_name_prefix: Option<String>,
}

impl RawMapping {
    fn into_mapping(self, index: usize) -> Result<ResourceMapping> {
        let exact = (
            self.left_resource_type,
            self.left_resource_name,
            self.right_resource_type,
            self.right_resource_name,
        );
        let prefix = (
            self.left_resource_type_prefix,
            self.left_resource_name_prefix,
            self.right_resource_type_prefix,
            self.right_resource_name_prefix,
        );

        match (exact, prefix) {
            ((Some(lt), Some(ln), Some(rt), Some(rn)), (None, None, None, None)) => {
                Ok(ResourceMapping::Exact {
                    left: ResourceKey::new(lt, ln),
                    right: ResourceKey::new(rt, rn),
                })
            }
            ((None, None, None, None), (Some(lt), Some(ln), Some(rt), Some(rn))) => {
                Ok(ResourceMapping::Prefix {
                    left_type_prefix: lt,
                    left_name_prefix: ln,
                    right_type_prefix: rt,
                    right_name_prefix: rn,
                })
            }
            _ => Err(TemplateError::InvalidMapping {
                index,
                reason: "expected either all of leftResourceType/leftResourceName/\
                         rightResourceType/rightResourceName or all of the four \
                         *Prefix fields"
                    .to_string(),
            }),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    ignore_rules: Vec<String>,
    #[serde(default)]
    resource_mappings: Vec<RawMapping>,
}

/// Validated comparison configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareConfig {
    /// Glob patterns for property paths and resource types to ignore.
    pub ignore_rules: Vec<String>,
    /// Mapping declarations, in file order.
    pub resource_mappings: Vec<ResourceMapping>,
}

impl CompareConfig {
    /// Parse configuration from YAML text. Empty text is the empty config.
    ///
    /// `path` is used for error context only.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if the text is not YAML of the expected shape
    /// - `InvalidMapping` if a mapping declaration is neither exact nor prefix
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: Option<RawConfig> =
            serde_yaml::from_str(text).map_err(|e| TemplateError::InvalidConfig {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        let raw = raw.unwrap_or_default();

        let resource_mappings = raw
            .resource_mappings
            .into_iter()
            .enumerate()
            .map(|(index, m)| m.into_mapping(index))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            ignore_rules: raw.ignore_rules,
            resource_mappings,
        })
    }

    /// Compile the effective ignore rules, implicit rules included.
    ///
    /// # Errors
    ///
    /// `InvalidPattern` if `glob` refuses a rule after rewriting.
    pub fn compile_rules(&self) -> Result<IgnoreRules> {
        IgnoreRules::new(&self.ignore_rules)
    }
}

/// Load configuration from a YAML file.
///
/// # Errors
///
/// - `ConfigNotFound` if `path` does not exist
/// - `ReadFailed` if the file cannot be read
/// - `InvalidConfig` / `InvalidMapping` as for [`CompareConfig::parse`]
pub fn load_config(path: impl AsRef<Path>) -> Result<CompareConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(TemplateError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|e| TemplateError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    CompareConfig::parse(&text, path)
}
