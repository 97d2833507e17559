//! Core domain types for Libris
//!
//! Everything the stores and the front-end agree on lives here: the book
//! record and its identifier, the persisted library document, the canonical
//! timestamp, the supported ebook formats, the wire shape handed to the
//! front-end and the boundary error type.

pub mod error;
pub mod presentation;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, ErrorKind, Result};
pub use presentation::BookView;
pub use types::{
    Book, BookId, EbookFormat, Library, NewBook, Timestamp, DEFAULT_MIME_TYPE,
};
