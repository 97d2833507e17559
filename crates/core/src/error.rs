//! Boundary error type for Libris
//!
//! Every operation exposed to the front-end fails with an [`AppError`]: a
//! coarse [`ErrorKind`] the caller can branch on plus a descriptive message.
//! The stores keep their own richer error enums and convert into this one at
//! the operation boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error classification shared by all Libris crates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// A referenced book id or filesystem path is absent
    NotFound,
    /// Reading, writing or parsing a persisted document or ebook file failed
    IoFailure,
    /// Input was rejected before any state was changed
    ValidationFailure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::IoFailure => write!(f, "I/O failure"),
            Self::ValidationFailure => write!(f, "validation failure"),
        }
    }
}

/// Descriptive failure returned to the front-end
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    /// Creates an error of the given kind
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn io_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IoFailure, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ValidationFailure, message)
    }

    /// Returns the error classification
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the descriptive message
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    /// Returns a short message suitable for display in the UI
    pub fn user_message(&self) -> String {
        match self.kind {
            ErrorKind::NotFound => format!("Not found: {}", self.message),
            ErrorKind::IoFailure => {
                format!("A file operation failed: {}", self.message)
            }
            ErrorKind::ValidationFailure => format!("Invalid input: {}", self.message),
        }
    }
}

/// Convenience type alias for Results using AppError
pub type Result<T> = std::result::Result<T, AppError>;
