//! Supported ebook formats

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// MIME type used for content whose extension is not in the format table
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Ebook container formats tracked by the library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EbookFormat {
    Pdf,
    Epub,
    Mobi,
    Azw,
    Azw3,
}

impl EbookFormat {
    /// Returns every supported format
    pub fn all() -> &'static [EbookFormat] {
        &[Self::Pdf, Self::Epub, Self::Mobi, Self::Azw, Self::Azw3]
    }

    /// File extension without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Epub => "epub",
            Self::Mobi => "mobi",
            Self::Azw => "azw",
            Self::Azw3 => "azw3",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Epub => "application/epub+zip",
            Self::Mobi => "application/x-mobipocket-ebook",
            Self::Azw | Self::Azw3 => "application/vnd.amazon.ebook",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Epub => "EPUB",
            Self::Mobi => "Mobipocket",
            Self::Azw => "Kindle (AZW)",
            Self::Azw3 => "Kindle (AZW3)",
        }
    }

    /// Matches an extension exactly; `"PDF"` is not a match
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.extension() == ext)
    }

    /// Matches an extension ignoring ASCII case
    pub fn from_extension_ignore_case(ext: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|f| f.extension().eq_ignore_ascii_case(ext))
    }

    /// Detects the format of a path by its (case-sensitive) extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// MIME type for a path, falling back to [`DEFAULT_MIME_TYPE`]
    ///
    /// Unlike [`EbookFormat::from_path`], the extension is compared without case.
    pub fn mime_type_for_path(path: &Path) -> &'static str {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension_ignore_case)
            .map(|f| f.mime_type())
            .unwrap_or(DEFAULT_MIME_TYPE)
    }
}

impl fmt::Display for EbookFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for EbookFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension_ignore_case(s.trim_start_matches('.'))
            .ok_or_else(|| format!("unsupported ebook format: {}", s))
    }
}
