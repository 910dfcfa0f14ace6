use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using TemplateError
pub type Result<T> = std::result::Result<T, TemplateError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure is unrecoverable at the point of detection and ends the run.
/// Each kind maps to a stable error code that tests and wrappers can match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// A required input file does not exist
    InputMissing,
    /// A file exists but its content is not valid in its expected format
    ParseFailure,
    /// An ignore rule is not a valid glob pattern
    InvalidPattern,
    /// A resource mapping declaration has neither the exact nor the prefix shape
    InvalidMapping,
    /// The report could not be persisted
    WriteFailure,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InputMissing => "ERR_INPUT_MISSING",
            ExErrorKind::ParseFailure => "ERR_PARSE_FAILURE",
            ExErrorKind::InvalidPattern => "ERR_INVALID_PATTERN",
            ExErrorKind::InvalidMapping => "ERR_INVALID_MAPPING",
            ExErrorKind::WriteFailure => "ERR_WRITE_FAILURE",
        }
    }

    /// Whether this kind belongs to the Parse-Failure family
    ///
    /// Invalid patterns and malformed mappings are configuration content
    /// errors, so they count as parse failures for exit reporting.
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            ExErrorKind::ParseFailure | ExErrorKind::InvalidPattern | ExErrorKind::InvalidMapping
        )
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus the
/// operation and file context needed for a useful message on stderr.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<PathBuf>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add file path context
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the file path context, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for template comparison
#[derive(Error, Debug)]
pub enum TemplateError {
    // ===== Input-Missing =====
    /// A template file does not exist
    #[error("JSON file '{}' does not exist", path.display())]
    FileNotFound { path: PathBuf },

    /// The configuration file does not exist
    #[error("YAML config file '{}' does not exist", path.display())]
    ConfigNotFound { path: PathBuf },

    // ===== Parse-Failure =====
    /// The file exists but could not be read
    #[error("Failed to read file '{}': {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template is not valid JSON
    #[error("Failed to read JSON file '{}': {reason}", path.display())]
    InvalidJson { path: PathBuf, reason: String },

    /// A template root is not an object, or `resources` is not an array
    #[error("Template '{}' is malformed: {reason}", path.display())]
    MalformedTemplate { path: PathBuf, reason: String },

    /// The configuration is not valid YAML or has the wrong shape
    #[error("Failed to read YAML config file '{}': {reason}", path.display())]
    InvalidConfig { path: PathBuf, reason: String },

    /// An ignore rule is not a valid glob pattern
    #[error("Invalid ignore rule '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A resource mapping declaration is neither exact nor prefix-based
    #[error("Invalid resource mapping #{index}: {reason}")]
    InvalidMapping { index: usize, reason: String },

    // ===== Write-Failure =====
    /// The report could not be written
    #[error("Failed to write output file '{}': {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TemplateError {
    /// Operation in which this error is raised
    fn op(&self) -> &'static str {
        match self {
            TemplateError::FileNotFound { .. }
            | TemplateError::InvalidJson { .. }
            | TemplateError::MalformedTemplate { .. } => "load_document",
            TemplateError::ConfigNotFound { .. }
            | TemplateError::InvalidConfig { .. }
            | TemplateError::InvalidMapping { .. } => "load_config",
            TemplateError::ReadFailed { .. } => "read_file",
            TemplateError::InvalidPattern { .. } => "compile_ignore_rules",
            TemplateError::WriteFailed { .. } => "write_report",
        }
    }

    /// File the error refers to, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            TemplateError::FileNotFound { path }
            | TemplateError::ConfigNotFound { path }
            | TemplateError::ReadFailed { path, .. }
            | TemplateError::InvalidJson { path, .. }
            | TemplateError::MalformedTemplate { path, .. }
            | TemplateError::InvalidConfig { path, .. }
            | TemplateError::WriteFailed { path, .. } => Some(path),
            TemplateError::InvalidPattern { .. } | TemplateError::InvalidMapping { .. } => None,
        }
    }
}

impl From<&TemplateError> for ExErrorKind {
    fn from(err: &TemplateError) -> Self {
        match err {
            TemplateError::FileNotFound { .. } | TemplateError::ConfigNotFound { .. } => {
                ExErrorKind::InputMissing
            }
            TemplateError::ReadFailed { .. }
            | TemplateError::InvalidJson { .. }
            | TemplateError::MalformedTemplate { .. }
            | TemplateError::InvalidConfig { .. } => ExErrorKind::ParseFailure,
            TemplateError::InvalidPattern { .. } => ExErrorKind::InvalidPattern,
            TemplateError::InvalidMapping { .. } => ExErrorKind::InvalidMapping,
            TemplateError::WriteFailed { .. } => ExErrorKind::WriteFailure,
        }
    }
}

impl From<&TemplateError> for ExError {
    fn from(err: &TemplateError) -> Self {
        let ex = ExError::new(ExErrorKind::from(err))
            .with_op(err.op())
            .with_message(err.to_string());
        match err.path() {
            Some(path) => ex.with_path(path),
            None => ex,
        }
    }
}

impl From<TemplateError> for ExError {
    fn from(err: TemplateError) -> Self {
        ExError::from(&err)
    }
}
