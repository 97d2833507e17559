//! Domain types for Libris
//!
//! - `book`: Book records, identifiers and the add-book request
//! - `library`: The persisted collection of books
//! - `format`: Supported ebook formats and their MIME types
//! - `common`: The canonical timestamp

mod book;
mod common;
mod format;
mod library;

// Re-export all public types
pub use book::{Book, BookId, NewBook};
pub use common::Timestamp;
pub use format::{EbookFormat, DEFAULT_MIME_TYPE};
pub use library::Library;
