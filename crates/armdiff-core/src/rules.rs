//! Glob-style ignore rules for property paths and resource types.

use crate::errors::{Result, TemplateError};
use glob::Pattern;

/// Dependency-link field, ignored regardless of configuration.
pub const DEPENDS_ON: &str = "dependsOn";

/// Matches every entry of the dependency-link array (`dependsOn[0]`, ...).
const DEPENDS_ON_ENTRIES: &str = "dependsOn[[]*";

/// Compiled set of ignore patterns.
///
/// Each pattern is matched independently against full property paths and
/// resource type strings with shell-glob semantics (`*`, `?`, `[...]`).
/// Any text is a usable pattern: a run of `*` means one `*`, and a `[`
/// without a closing `]` matches itself.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    patterns: Vec<Pattern>,
}

impl IgnoreRules {
    /// Compile the user's patterns and add the implicit dependency-link rules.
    ///
    /// # Errors
    ///
    /// `InvalidPattern` if `glob` refuses a pattern after rewriting.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut sources: Vec<&str> = patterns.iter().map(|p| p.as_ref()).collect();
        for implicit in [DEPENDS_ON, DEPENDS_ON_ENTRIES] {
            if !sources.contains(&implicit) {
                sources.push(implicit);
            }
        }

        let patterns = sources
            .into_iter()
            .map(|source| {
                Pattern::new(&shell_glob(source)).map_err(|e| {
                    TemplateError::InvalidPattern {
                        pattern: source.to_string(),
                        reason: e.msg.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Whether `path` matches at least one rule.
    pub fn is_ignored_property(&self, path: &str) -> bool {
        self.matches(path)
    }

    /// Whether `resource_type` matches at least one rule.
    pub fn is_ignored_type(&self, resource_type: &str) -> bool {
        self.matches(resource_type)
    }

    /// The effective patterns, implicit rules included.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Pattern::as_str)
    }

    fn matches(&self, candidate: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(candidate))
    }
}

/// Rewrite a shell pattern into the dialect `glob::Pattern` accepts.
///
/// `*` already crosses `.` and `/` under the default match options, so a run
/// of stars collapses to one. A bracket class is kept verbatim when it
/// closes (a `]` right after `[` or `[!` belongs to the class); otherwise the
/// `[` becomes the literal class `[[]`.
fn shell_glob(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len());
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' => {
                out.push('*');
                while i < chars.len() && chars[i] == '*' {
                    i += 1;
                }
            }
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    out.extend(&chars[i..=end]);
                    i = end + 1;
                }
                None => {
                    out.push_str("[[]");
                    i += 1;
                }
            },
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

/// Index of the `]` closing the class opened at `open`, if any.
fn class_end(chars: &[char], open: usize) -> Option<usize> {
    let mut j = open + 1;
    if chars.get(j) == Some(&'!') {
        j += 1;
    }
    if chars.get(j) == Some(&']') {
        j += 1;
    }
    (j..chars.len()).find(|&k| chars[k] == ']')
}
