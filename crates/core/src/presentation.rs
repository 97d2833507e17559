//! Wire shape handed to the front-end
//!
//! Records are flattened to explicit camelCase fields and both timestamps are
//! rendered as RFC 3339 text, so the front-end never sees a native time value.

use crate::types::Book;
use serde::{Deserialize, Serialize};

/// A book as the front-end sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookView {
    pub id: String,
    pub title: String,
    pub author: String,
    pub file_path: String,
    pub cover_path: String,
    pub description: String,
    pub format: String,
    pub added_at: String,
    pub last_opened_at: String,
}

impl BookView {
    /// Shapes a sequence of books, keeping their order
    pub fn from_books<'a, I>(books: I) -> Vec<BookView>
    where
        I: IntoIterator<Item = &'a Book>,
    {
        books.into_iter().map(BookView::from).collect()
    }
}

impl From<&Book> for BookView {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.to_string(),
            title: book.title.clone(),
            author: book.author.clone(),
            file_path: book.file_path.to_string_lossy().into_owned(),
            cover_path: book.cover_path.clone(),
            description: book.description.clone(),
            format: book.format.clone(),
            added_at: book.added_at.to_rfc3339(),
            last_opened_at: book.last_opened_at.to_rfc3339(),
        }
    }
}

impl From<Book> for BookView {
    fn from(book: Book) -> Self {
        Self::from(&book)
    }
}
