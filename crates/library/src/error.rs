//! Error types for library operations

use libris_config::ConfigError;
use libris_core::{AppError, ErrorKind};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Directory does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse library file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize library: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Scan of {} failed: {source}", .path.display())]
    Scan {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error(transparent)]
    Settings(#[from] ConfigError),

    #[error("The {0} store is unavailable after a panic in another caller")]
    LockPoisoned(&'static str),
}

impl LibraryError {
    /// Classifies the error for the operation boundary
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BookNotFound(_) | Self::FileNotFound(_) => ErrorKind::NotFound,
            Self::DirectoryNotFound(_) | Self::NotADirectory(_) => ErrorKind::ValidationFailure,
            Self::Settings(e) => e.kind(),
            _ => ErrorKind::IoFailure,
        }
    }
}

impl From<LibraryError> for AppError {
    fn from(err: LibraryError) -> Self {
        AppError::new(err.kind(), err.to_string())
    }
}

pub type LibraryResult<T> = std::result::Result<T, LibraryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            LibraryError::BookNotFound("x".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            LibraryError::FileNotFound(PathBuf::from("/a.pdf")).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            LibraryError::DirectoryNotFound(PathBuf::from("/nope")).kind(),
            ErrorKind::ValidationFailure
        );
        assert_eq!(
            LibraryError::LockPoisoned("library").kind(),
            ErrorKind::IoFailure
        );
        assert_eq!(
            LibraryError::Settings(ConfigError::ValidationError("bad".into())).kind(),
            ErrorKind::ValidationFailure
        );
    }

    #[test]
    fn test_into_app_error_keeps_message() {
        let err: AppError = LibraryError::FileNotFound(PathBuf::from("/books/a.pdf")).into();
        assert!(err.is_not_found());
        assert_eq!(err.message(), "File not found: /books/a.pdf");
    }
}
