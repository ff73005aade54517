//! kompare error types.
//!
//! This module provides error handling using `exn` for context-aware errors
//! while preserving stable `error_type()` strings.

use std::fmt;

/// Error kind enum for kompare operations.
///
/// Each variant corresponds to a specific error condition and maps to a
/// stable `error_type()` string.
#[derive(Debug, Clone)]
pub enum ErrorKind {
    /// The compared values diverge. Carries the rendered report.
    Divergent { count: usize, report: String },
    /// A map key could not be represented as a [`Key`](crate::Key).
    UnsupportedKey { found: String },
    /// A value could not be serialized into the value tree.
    Serialize { message: String },
    /// JSON parsing error.
    JsonError { message: String },
    /// YAML parsing error.
    YamlError { message: String },
    /// TOML parsing error.
    TomlError { message: String },
}

impl ErrorKind {
    /// Get the error type as a string.
    ///
    /// These strings are stable and must not change; fixtures match on them.
    pub fn error_type(&self) -> &'static str {
        match self {
            ErrorKind::Divergent { .. } => "divergent",
            ErrorKind::UnsupportedKey { .. } => "unsupported_key",
            ErrorKind::Serialize { .. } => "serialize",
            ErrorKind::JsonError { .. } => "json_error",
            ErrorKind::YamlError { .. } => "yaml_error",
            ErrorKind::TomlError { .. } => "toml_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // The report already starts with a newline and lists every divergence.
            ErrorKind::Divergent { report, .. } => f.write_str(report),
            ErrorKind::UnsupportedKey { found } => {
                write!(f, "unsupported map key: {} cannot be used as a key", found)
            }
            ErrorKind::Serialize { message } => write!(f, "serialize error: {}", message),
            ErrorKind::JsonError { message } => write!(f, "json error: {}", message),
            ErrorKind::YamlError { message } => write!(f, "yaml error: {}", message),
            ErrorKind::TomlError { message } => write!(f, "toml error: {}", message),
        }
    }
}

impl std::error::Error for ErrorKind {}

/// Main error type for kompare operations.
///
/// This wraps `exn::Exn<ErrorKind>` to provide context-aware error handling
/// while maintaining the stable `error_type()` interface.
#[derive(Debug)]
pub struct KompareError(exn::Exn<ErrorKind>);

impl KompareError {
    /// Create a new error from an error kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self(exn::Exn::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_error()
    }

    /// Get the error type as a string.
    pub fn error_type(&self) -> &'static str {
        self.kind().error_type()
    }

    // Convenience constructors for common error types

    /// Create a "divergent" error from a rendered report.
    pub fn divergent(count: usize, report: impl Into<String>) -> Self {
        Self::new(ErrorKind::Divergent {
            count,
            report: report.into(),
        })
    }

    /// Create an "unsupported key" error.
    pub fn unsupported_key(found: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedKey {
            found: found.into(),
        })
    }

    /// Create a "serialize" error.
    pub fn serialize(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialize {
            message: message.into(),
        })
    }

    /// Check if this is a Divergent error.
    pub fn is_divergent(&self) -> bool {
        matches!(self.kind(), ErrorKind::Divergent { .. })
    }

    /// Number of divergences, if this is a Divergent error.
    pub fn divergence_count(&self) -> Option<usize> {
        match self.kind() {
            ErrorKind::Divergent { count, .. } => Some(*count),
            _ => None,
        }
    }
}

impl fmt::Display for KompareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())
    }
}

impl std::error::Error for KompareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        // ErrorKind is the root cause, no further source
        None
    }
}

// Conversion from common error types

#[cfg(feature = "json")]
impl From<serde_json::Error> for KompareError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(ErrorKind::JsonError {
            message: e.to_string(),
        })
    }
}

#[cfg(feature = "yaml")]
impl From<serde_yaml::Error> for KompareError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::new(ErrorKind::YamlError {
            message: e.to_string(),
        })
    }
}

#[cfg(feature = "toml")]
impl From<toml::de::Error> for KompareError {
    fn from(e: toml::de::Error) -> Self {
        Self::new(ErrorKind::TomlError {
            message: e.to_string(),
        })
    }
}

#[cfg(feature = "serde")]
impl serde::ser::Error for KompareError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self::serialize(msg.to_string())
    }
}
