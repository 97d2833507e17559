//! Recursive discovery of ebook files

use crate::error::{LibraryError, LibraryResult};
use libris_config::ScanConfig;
use libris_core::EbookFormat;
use log::{debug, info};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A supported file found during a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub format: EbookFormat,
}

/// Walks a directory tree collecting ebook files
///
/// Extensions are matched case-sensitively, so `book.PDF` is skipped.
/// Entries are visited in file-name order.
#[derive(Debug, Clone, Default)]
pub struct EbookScanner {
    follow_symlinks: bool,
    max_depth: Option<usize>,
}

impl EbookScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self {
            follow_symlinks: config.follow_symlinks,
            max_depth: config.depth_limit(),
        }
    }

    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Limits recursion; files directly inside the root are at depth 1
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Scans `root` and returns every supported file beneath it
    ///
    /// Any walk error (unreadable directory, broken link when following
    /// links, ...) aborts the whole scan.
    pub fn scan(&self, root: &Path) -> LibraryResult<Vec<DiscoveredFile>> {
        info!("Scanning {} for ebooks", root.display());

        let mut walker = WalkDir::new(root)
            .follow_links(self.follow_symlinks)
            .sort_by_file_name();
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut found = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| LibraryError::Scan {
                path: e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf()),
                source: e,
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            match EbookFormat::from_path(entry.path()) {
                Some(format) => {
                    debug!("Found {} file: {}", format, entry.path().display());
                    found.push(DiscoveredFile {
                        path: entry.into_path(),
                        format,
                    });
                }
                None => debug!("Skipping {}", entry.path().display()),
            }
        }

        info!("Scan of {} found {} ebooks", root.display(), found.len());
        Ok(found)
    }
}
