//! The persisted book collection

use crate::types::{Book, BookId};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// All tracked books plus the root path hint
///
/// Books keep insertion order. The whole value is written to disk after
/// every mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Library {
    #[serde(default)]
    pub books: Vec<Book>,
    /// Default directory hint, empty when unset
    #[serde(default)]
    pub path: String,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn contains(&self, id: &BookId) -> bool {
        self.position(id).is_some()
    }

    /// Index of the first book with this id
    pub fn position(&self, id: &BookId) -> Option<usize> {
        self.books.iter().position(|b| &b.id == id)
    }

    pub fn get(&self, id: &BookId) -> Option<&Book> {
        self.books.iter().find(|b| &b.id == id)
    }

    pub fn get_mut(&mut self, id: &BookId) -> Option<&mut Book> {
        self.books.iter_mut().find(|b| &b.id == id)
    }

    /// Books that point at the given file
    pub fn find_by_path(&self, path: &Path) -> Vec<&Book> {
        self.books.iter().filter(|b| b.file_path == path).collect()
    }

    pub fn push(&mut self, book: Book) {
        self.books.push(book);
    }

    /// Removes the first book with this id
    pub fn remove(&mut self, id: &BookId) -> Option<Book> {
        self.position(id).map(|i| self.books.remove(i))
    }
}
