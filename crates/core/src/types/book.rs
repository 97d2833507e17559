//! Book domain model

use crate::error::AppError;
use crate::types::{EbookFormat, Timestamp};
use serde::{Deserialize, Serialize, Serializer};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Unique identifier for a book
///
/// New ids are random UUIDs. Any non-empty string is accepted when reading an
/// existing library, so ids written by older versions keep resolving.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    /// Creates a new random BookId
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an existing identifier
    pub fn from_string(s: &str) -> Result<Self, AppError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AppError::validation("book id must not be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One tracked ebook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    /// Written as UTF-8; bytes that are not valid UTF-8 become U+FFFD
    #[serde(serialize_with = "serialize_path_lossy")]
    pub file_path: PathBuf,
    #[serde(default)]
    pub cover_path: String,
    #[serde(default)]
    pub description: String,
    /// Extension tag without the dot
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub added_at: Timestamp,
    /// Zero until the book is first opened
    #[serde(default)]
    pub last_opened_at: Timestamp,
}

impl Book {
    /// Creates a new book with a fresh id, stamped as added now
    pub fn new(title: String, file_path: PathBuf, format: String) -> Self {
        Self {
            id: BookId::new(),
            title,
            author: String::new(),
            file_path,
            cover_path: String::new(),
            description: String::new(),
            format,
            added_at: Timestamp::now(),
            last_opened_at: Timestamp::zero(),
        }
    }

    /// Creates a book for a file found on disk: title is the file name,
    /// format is the extension
    pub fn discovered(file_path: PathBuf, format: EbookFormat) -> Self {
        let title = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(title, file_path, format.extension().to_string())
    }

    /// Stamps the last-opened time
    pub fn mark_opened(&mut self) {
        self.last_opened_at = Timestamp::now();
    }

    pub fn has_been_opened(&self) -> bool {
        !self.last_opened_at.is_zero()
    }

    /// Parses the format tag, if it names a supported format
    pub fn ebook_format(&self) -> Option<EbookFormat> {
        EbookFormat::from_extension(&self.format)
    }
}

fn serialize_path_lossy<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

/// Caller-supplied fields for adding a book by hand
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub file_path: PathBuf,
    pub description: String,
    pub format: String,
}

impl NewBook {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Builds the record with a fresh id and creation time
    pub fn into_book(self) -> Book {
        let mut book = Book::new(self.title, self.file_path, self.format);
        book.author = self.author;
        book.description = self.description;
        book
    }
}
