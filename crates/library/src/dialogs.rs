//! Native file and directory pickers
//!
//! Picking is delegated to the host through [`FileDialogs`]. The library only
//! describes what to ask for and checks what comes back.

use libris_core::EbookFormat;
use std::path::{Path, PathBuf};

/// Title of the pick-file dialog
pub const PICK_FILE_TITLE: &str = "Select an ebook file";
/// Title of the pick-directory dialog
pub const PICK_DIRECTORY_TITLE: &str = "Select a directory to scan for ebooks";

/// A named set of extensions offered by a file dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogFilter {
    pub name: String,
    /// Extensions without the leading dot
    pub extensions: Vec<String>,
}

impl DialogFilter {
    pub fn new(name: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            name: name.into(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// The five supported ebook formats
    pub fn ebooks() -> Self {
        let extensions: Vec<&str> = EbookFormat::all().iter().map(|f| f.extension()).collect();
        Self::new("Ebook files", &extensions)
    }

    /// Whether `path` has one of the filter's extensions, ignoring case
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|f| f.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}

/// What a dialog should show
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DialogRequest {
    pub title: String,
    pub filters: Vec<DialogFilter>,
    pub starting_directory: Option<PathBuf>,
}

impl DialogRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_filter(mut self, filter: DialogFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_starting_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.starting_directory = Some(dir.into());
        self
    }

    /// Request used when the user picks a single ebook
    pub fn pick_ebook() -> Self {
        Self::new(PICK_FILE_TITLE).with_filter(DialogFilter::ebooks())
    }

    /// Request used when the user picks a directory to scan
    pub fn pick_scan_directory() -> Self {
        Self::new(PICK_DIRECTORY_TITLE)
    }

    /// Whether `path` passes the filters; no filters accepts anything
    pub fn accepts(&self, path: &Path) -> bool {
        self.filters.is_empty() || self.filters.iter().any(|f| f.matches(path))
    }
}

/// Host-provided pickers
///
/// Both methods return `None` when the user cancels.
pub trait FileDialogs {
    fn pick_file(&self, request: &DialogRequest) -> Option<PathBuf>;

    fn pick_directory(&self, request: &DialogRequest) -> Option<PathBuf>;
}
