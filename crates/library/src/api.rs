//! Operations exposed to the front-end
//!
//! [`LibrisApi`] owns both stores for the lifetime of the application. Each
//! call locks the store it touches, runs to completion including the disk
//! write, and returns either the wire-shaped result or an [`AppError`].

use crate::content;
use crate::dialogs::{DialogRequest, FileDialogs};
use crate::error::{LibraryError, LibraryResult};
use crate::fonts;
use crate::scanner::EbookScanner;
use crate::store::LibraryStore;
use libris_config::{Config, ScanConfig, SettingsStore};
use libris_core::{AppError, BookId, BookView, NewBook, Result};
use log::{debug, info};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Where the stores live and how scans behave
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiOptions {
    pub library_file: PathBuf,
    pub settings_file: PathBuf,
    pub scan: ScanConfig,
    /// Extra font directories searched before the platform ones
    pub font_dirs: Vec<PathBuf>,
}

impl ApiOptions {
    pub fn new(library_file: impl Into<PathBuf>, settings_file: impl Into<PathBuf>) -> Self {
        Self {
            library_file: library_file.into(),
            settings_file: settings_file.into(),
            scan: ScanConfig::default(),
            font_dirs: Vec::new(),
        }
    }

    /// Resolves the document paths of `config` against `data_dir`
    pub fn from_config(config: &Config, data_dir: &Path) -> Self {
        Self {
            library_file: config.app.library_path(data_dir),
            settings_file: config.app.settings_path(data_dir),
            scan: config.scan.clone(),
            font_dirs: Vec::new(),
        }
    }

    pub fn with_scan_config(mut self, scan: ScanConfig) -> Self {
        self.scan = scan;
        self
    }

    pub fn with_font_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.font_dirs.push(dir.into());
        self
    }
}

/// The operation-handling component
pub struct LibrisApi {
    library: Mutex<LibraryStore>,
    settings: Mutex<SettingsStore>,
    font_dirs: Vec<PathBuf>,
}

impl LibrisApi {
    /// Loads both stores, creating their files when absent
    pub fn open(options: ApiOptions) -> Result<Self> {
        let library = LibraryStore::open(&options.library_file)?
            .with_scanner(EbookScanner::from_config(&options.scan));
        let settings = SettingsStore::open(&options.settings_file).map_err(LibraryError::from)?;

        info!(
            "Libris ready: library {}, settings {}",
            options.library_file.display(),
            options.settings_file.display()
        );

        Ok(Self {
            library: Mutex::new(library),
            settings: Mutex::new(settings),
            font_dirs: options.font_dirs,
        })
    }

    fn library(&self) -> LibraryResult<MutexGuard<'_, LibraryStore>> {
        self.library
            .lock()
            .map_err(|_| LibraryError::LockPoisoned("library"))
    }

    fn settings_store(&self) -> LibraryResult<MutexGuard<'_, SettingsStore>> {
        self.settings
            .lock()
            .map_err(|_| LibraryError::LockPoisoned("settings"))
    }

    /// Every book, in the order it was added
    pub fn list_books(&self) -> Result<Vec<BookView>> {
        let store = self.library()?;
        Ok(BookView::from_books(store.books()))
    }

    /// Books already tracked for `path`
    pub fn find_by_path(&self, path: impl AsRef<Path>) -> Result<Vec<BookView>> {
        let store = self.library()?;
        Ok(store
            .find_by_path(path.as_ref())
            .into_iter()
            .map(BookView::from)
            .collect())
    }

    /// Adds a book for an existing file
    pub fn add_book(
        &self,
        title: &str,
        author: &str,
        path: impl AsRef<Path>,
        description: &str,
        format: &str,
    ) -> Result<BookView> {
        let new_book = NewBook::new(path)
            .with_title(title)
            .with_author(author)
            .with_description(description)
            .with_format(format);

        let book = self.library()?.add_book(new_book)?;
        Ok(BookView::from(book))
    }

    pub fn remove_book(&self, id: &str) -> Result<()> {
        let id = parse_id(id)?;
        self.library()?.remove_book(&id)?;
        Ok(())
    }

    /// Marks the book as opened and returns the file the front-end should open
    pub fn open_book(&self, id: &str) -> Result<PathBuf> {
        let id = parse_id(id)?;
        Ok(self.library()?.open_book(&id)?)
    }

    pub fn set_library_path(&self, path: impl AsRef<Path>) -> Result<()> {
        self.library()?.set_root_path(path.as_ref())?;
        Ok(())
    }

    /// The stored library directory, empty when never set
    pub fn library_path(&self) -> Result<String> {
        Ok(self.library()?.root_path().to_string())
    }

    /// Adds every ebook under `path`; returns only the books added by this scan
    pub fn scan_directory(&self, path: impl AsRef<Path>) -> Result<Vec<BookView>> {
        let added = self.library()?.scan_directory(path.as_ref())?;
        Ok(BookView::from_books(&added))
    }

    /// The file at `path` as a base64 data URI
    pub fn read_file_content(&self, path: impl AsRef<Path>) -> Result<String> {
        Ok(content::read_data_uri(path.as_ref())?)
    }

    /// All UI settings as a JSON tree
    pub fn settings(&self) -> Result<Value> {
        let store = self.settings_store()?;
        Ok(store.to_value().map_err(LibraryError::from)?)
    }

    /// Deep-merges `partial` into the UI settings
    pub fn update_settings(&self, partial: Value) -> Result<()> {
        let mut store = self.settings_store()?;
        store.update(partial).map_err(LibraryError::from)?;
        Ok(())
    }

    pub fn reset_settings(&self) -> Result<()> {
        let mut store = self.settings_store()?;
        store.reset().map_err(LibraryError::from)?;
        Ok(())
    }

    /// Installed font names, sorted
    pub fn list_system_fonts(&self) -> Result<Vec<String>> {
        let mut dirs = self.font_dirs.clone();
        dirs.extend(fonts::font_directories());
        Ok(fonts::list_fonts_in(&dirs))
    }

    /// Asks the host for one ebook file
    ///
    /// A picked file that is not a supported ebook is treated as a cancel.
    pub fn pick_file(&self, dialogs: &dyn FileDialogs) -> Result<Option<PathBuf>> {
        let request = self.with_library_start(DialogRequest::pick_ebook())?;
        let picked = dialogs
            .pick_file(&request)
            .filter(|path| request.accepts(path));
        debug!("Picked file: {:?}", picked);
        Ok(picked)
    }

    /// Asks the host for a directory to scan
    pub fn pick_directory(&self, dialogs: &dyn FileDialogs) -> Result<Option<PathBuf>> {
        let request = self.with_library_start(DialogRequest::pick_scan_directory())?;
        let picked = dialogs.pick_directory(&request);
        debug!("Picked directory: {:?}", picked);
        Ok(picked)
    }

    fn with_library_start(&self, request: DialogRequest) -> LibraryResult<DialogRequest> {
        let root = self.library()?.root_path().to_string();
        if root.is_empty() {
            Ok(request)
        } else {
            Ok(request.with_starting_directory(root))
        }
    }
}

/// Ids that cannot exist are reported as not found
fn parse_id(id: &str) -> std::result::Result<BookId, AppError> {
    BookId::from_string(id).map_err(|_| LibraryError::BookNotFound(id.to_string()).into())
}
