//! Error types for curriculum loading and the tooling around it.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Category of a load pipeline failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// File missing or unreadable
    Io,
    /// File is not valid JSON or does not match the expected document shape
    Parse,
    /// A superblock or module names a block that was not loaded
    Reference,
    /// A value outside a fixed enumeration
    Enum,
    /// Structural problem in a challenge list
    Shape,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Io => write!(f, "io"),
            ErrorKind::Parse => write!(f, "parse"),
            ErrorKind::Reference => write!(f, "reference"),
            ErrorKind::Enum => write!(f, "enum"),
            ErrorKind::Shape => write!(f, "shape"),
        }
    }
}

/// A failure raised while reading, validating, or normalizing curriculum data.
///
/// Every pipeline phase reports through this type. It always names the file
/// that was being processed and, where it makes sense, the offending field
/// (for example `blockLayout` or `challengeOrder[2].id`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    /// Failure category
    pub kind: ErrorKind,
    /// Human-readable message
    pub message: String,
    /// File being processed when the failure occurred
    pub path: PathBuf,
    /// Offending field, if any
    pub field: Option<String>,
}

impl ValidationError {
    /// Create a new error without field context.
    pub fn new(kind: ErrorKind, message: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self {
            kind,
            message: message.into(),
            path: path.as_ref().to_path_buf(),
            field: None,
        }
    }

    /// Attach the offending field.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Wrap a filesystem failure.
    pub fn io(path: impl AsRef<Path>, err: &std::io::Error) -> Self {
        let path = path.as_ref();
        Self::new(
            ErrorKind::Io,
            format!("Failed to read {}: {}", path.display(), err),
            path,
        )
    }

    /// Wrap a JSON decoding failure.
    pub fn parse(path: impl AsRef<Path>, err: &serde_json::Error) -> Self {
        let path = path.as_ref();
        Self::new(
            ErrorKind::Parse,
            format!("Failed to parse {}: {}", path.display(), err),
            path,
        )
    }

    /// Multi-line description suitable for a terminal.
    pub fn report(&self) -> String {
        let mut out = format!("{}\n  file: {}", self.message, self.path.display());
        if let Some(field) = &self.field {
            out.push_str(&format!("\n  field: {}", field));
        }
        out
    }
}

/// Result type for the load pipeline.
pub type LoadResult<T> = std::result::Result<T, ValidationError>;

/// A raw string that does not name any member of a fixed enumeration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {kind} \"{value}\"; expected one of: {expected}")]
pub struct UnknownVariant {
    /// Name of the enumeration (e.g. "blockLayout")
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
    /// Comma-separated list of accepted literals
    pub expected: String,
}

/// The main error type for everything outside the load pipeline.
#[derive(Error, Debug)]
pub enum CurriculumError {
    /// Configuration-related error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Curriculum data failed to load
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for curriculum tooling.
pub type Result<T> = std::result::Result<T, CurriculumError>;

/// Helper macro to bail out with a CurriculumError
///
/// # Example
///
/// ```ignore
/// if !valid {
///     bail!(Config, "Invalid configuration: {}", reason);
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($variant:ident, $msg:expr) => {
        return Err($crate::CurriculumError::$variant($msg.to_string()))
    };
    ($variant:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::CurriculumError::$variant(format!($fmt, $($arg)*)))
    };
    ($msg:expr) => {
        return Err($crate::CurriculumError::Other($msg.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::CurriculumError::Other(format!($fmt, $($arg)*)))
    };
}
