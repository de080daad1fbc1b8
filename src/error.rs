//! Error types for sep2
//!
//! Every decode failure is a typed, inspectable value. Field-level errors
//! carry the element path of the offending field so callers can report it.

use std::fmt;
use thiserror::Error;

/// Result type alias using the sep2 Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for sep2 operations
#[derive(Error, Debug)]
pub enum Error {
    /// A primitive value had the wrong length, charset or range
    #[error("malformed {kind} at '{path}': {reason} (got {value:?})")]
    MalformedPrimitive {
        /// Schema type name of the primitive (e.g. `HexBinary160`)
        kind: &'static str,
        /// The offending text
        value: String,
        /// Why decoding failed
        reason: String,
        /// Element path of the field, empty until attached
        path: String,
    },

    /// A required attribute or element was absent from the input
    #[error("missing required field '{field}' in '{path}'")]
    MissingRequiredField {
        /// Schema name of the missing attribute or element
        field: &'static str,
        /// Element path of the enclosing element
        path: String,
    },

    /// The document root (or a child) is not the element that was asked for
    #[error("expected element '{expected}', found '{found}'")]
    UnexpectedElement {
        /// Element name the caller asked for
        expected: String,
        /// Element name actually present
        found: String,
    },

    /// Reported by a schema oracle after projection
    #[error("schema violation: {0}")]
    SchemaViolation(#[from] SchemaViolation),

    /// Namespace error
    #[error("namespace error: {0}")]
    Namespace(String),

    /// XML syntax error from the reader or writer
    #[error("XML error: {0}")]
    Xml(String),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// URL parsing error
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Build a `MalformedPrimitive` without a path
    pub fn malformed(kind: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Error::MalformedPrimitive {
            kind,
            value: value.to_string(),
            reason: reason.into(),
            path: String::new(),
        }
    }

    /// Prefix the element path of a field-level error with `segment`.
    ///
    /// Errors without a path are returned unchanged.
    pub fn within(self, segment: &str) -> Self {
        match self {
            Error::MalformedPrimitive {
                kind,
                value,
                reason,
                path,
            } => Error::MalformedPrimitive {
                kind,
                value,
                reason,
                path: join_path(segment, &path),
            },
            Error::MissingRequiredField { field, path } => Error::MissingRequiredField {
                field,
                path: join_path(segment, &path),
            },
            other => other,
        }
    }

    /// The element path attached to a field-level error, if any
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::MalformedPrimitive { path, .. } | Error::MissingRequiredField { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }
}

fn join_path(segment: &str, rest: &str) -> String {
    if rest.is_empty() {
        segment.to_string()
    } else {
        format!("{}/{}", segment, rest)
    }
}

/// Diagnostic returned by a schema oracle for a document that fails validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Line of the first offending construct (1-based, 0 when unknown)
    pub line: usize,
    /// Validator message
    pub message: String,
    /// Element path, when the oracle can name one
    pub path: Option<String>,
}

impl SchemaViolation {
    /// Create a new violation
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
            path: None,
        }
    }

    /// Set the element path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)?;

        if let Some(ref path) = self.path {
            write!(f, " (at {})", path)?;
        }

        Ok(())
    }
}

impl std::error::Error for SchemaViolation {}
