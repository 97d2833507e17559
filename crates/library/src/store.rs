//! The persisted book collection

use crate::error::{LibraryError, LibraryResult};
use crate::scanner::EbookScanner;
use libris_config::{backup_existing, write_atomic};
use libris_core::{Book, BookId, Library, NewBook};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Owns the [`Library`] and the JSON file it lives in
///
/// Every mutation is written back immediately. When the write fails the
/// in-memory change is undone, so memory and disk never disagree about a
/// successful operation.
#[derive(Debug)]
pub struct LibraryStore {
    library: Library,
    path: PathBuf,
    scanner: EbookScanner,
}

impl LibraryStore {
    /// Loads the library at `path`, creating an empty one if it is absent
    ///
    /// A file that exists but cannot be parsed is reported and left as is.
    pub fn open(path: impl Into<PathBuf>) -> LibraryResult<Self> {
        let path = path.into();

        if !path.exists() {
            info!("No library at {}, creating an empty one", path.display());
            let store = Self {
                library: Library::new(),
                path,
                scanner: EbookScanner::new(),
            };
            store.save()?;
            return Ok(store);
        }

        let contents = fs::read_to_string(&path).map_err(|e| LibraryError::Read {
            path: path.clone(),
            source: e,
        })?;
        let library: Library =
            serde_json::from_str(&contents).map_err(|e| LibraryError::Parse {
                path: path.clone(),
                source: e,
            })?;

        info!("Loaded {} books from {}", library.len(), path.display());
        Ok(Self {
            library,
            path,
            scanner: EbookScanner::new(),
        })
    }

    /// Replaces the scanner used by [`LibraryStore::scan_directory`]
    pub fn with_scanner(mut self, scanner: EbookScanner) -> Self {
        self.scanner = scanner;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    /// All books in insertion order
    pub fn books(&self) -> &[Book] {
        &self.library.books
    }

    pub fn get_book(&self, id: &BookId) -> LibraryResult<&Book> {
        self.library
            .get(id)
            .ok_or_else(|| LibraryError::BookNotFound(id.to_string()))
    }

    /// Books already tracking this file
    pub fn find_by_path(&self, path: &Path) -> Vec<&Book> {
        self.library.find_by_path(path)
    }

    /// Adds a book for an existing file
    pub fn add_book(&mut self, new_book: NewBook) -> LibraryResult<Book> {
        if !new_book.file_path.exists() {
            return Err(LibraryError::FileNotFound(new_book.file_path));
        }

        let mut book = new_book.into_book();
        while self.library.contains(&book.id) {
            book.id = BookId::new();
        }

        self.library.push(book.clone());
        if let Err(e) = self.save() {
            self.library.books.pop();
            return Err(e);
        }

        info!("Added book {} ({})", book.id, book.file_path.display());
        Ok(book)
    }

    /// Removes the first book with `id` and returns it
    pub fn remove_book(&mut self, id: &BookId) -> LibraryResult<Book> {
        let index = self
            .library
            .position(id)
            .ok_or_else(|| LibraryError::BookNotFound(id.to_string()))?;

        let removed = self.library.books.remove(index);
        if let Err(e) = self.save() {
            self.library.books.insert(index, removed);
            return Err(e);
        }

        info!("Removed book {}", id);
        Ok(removed)
    }

    /// Stamps the book as opened now and returns its file path
    pub fn open_book(&mut self, id: &BookId) -> LibraryResult<PathBuf> {
        let book = self
            .library
            .get_mut(id)
            .ok_or_else(|| LibraryError::BookNotFound(id.to_string()))?;

        let previous = book.last_opened_at;
        book.mark_opened();
        let file_path = book.file_path.clone();

        if let Err(e) = self.save() {
            if let Some(book) = self.library.get_mut(id) {
                book.last_opened_at = previous;
            }
            return Err(e);
        }

        debug!("Opened book {}", id);
        Ok(file_path)
    }

    /// Records the default library directory
    pub fn set_root_path(&mut self, path: &Path) -> LibraryResult<()> {
        ensure_directory(path)?;

        let previous = std::mem::replace(
            &mut self.library.path,
            path.to_string_lossy().into_owned(),
        );
        if let Err(e) = self.save() {
            self.library.path = previous;
            return Err(e);
        }

        info!("Library path set to {}", path.display());
        Ok(())
    }

    /// The default library directory, empty when never set
    pub fn root_path(&self) -> &str {
        &self.library.path
    }

    /// Adds every ebook under `dir` and returns only the new records
    ///
    /// Files already in the library are added again. If the walk fails
    /// nothing is added.
    pub fn scan_directory(&mut self, dir: &Path) -> LibraryResult<Vec<Book>> {
        ensure_directory(dir)?;

        let discovered = self.scanner.scan(dir)?;
        let mut added = Vec::with_capacity(discovered.len());
        for file in discovered {
            let mut book = Book::discovered(file.path, file.format);
            while self.library.contains(&book.id) || added.iter().any(|b: &Book| b.id == book.id)
            {
                book.id = BookId::new();
            }
            added.push(book);
        }

        if added.is_empty() {
            return Ok(added);
        }

        let original_len = self.library.len();
        self.library.books.extend(added.iter().cloned());
        if let Err(e) = self.save() {
            self.library.books.truncate(original_len);
            return Err(e);
        }

        info!("Scan of {} added {} books", dir.display(), added.len());
        Ok(added)
    }

    /// Writes the whole library to disk
    pub fn save(&self) -> LibraryResult<()> {
        let json = serde_json::to_string_pretty(&self.library)?;

        backup_existing(&self.path).map_err(|e| LibraryError::Write {
            path: self.path.clone(),
            source: e,
        })?;
        write_atomic(&self.path, json.as_bytes()).map_err(|e| LibraryError::Write {
            path: self.path.clone(),
            source: e,
        })?;

        debug!("Library saved to {}", self.path.display());
        Ok(())
    }
}

fn ensure_directory(path: &Path) -> LibraryResult<()> {
    if !path.exists() {
        return Err(LibraryError::DirectoryNotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(LibraryError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}
