//! Ebook file contents as data URIs

use crate::error::{LibraryError, LibraryResult};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use libris_core::EbookFormat;
use log::debug;
use std::fs;
use std::path::Path;

/// Reads a whole file and encodes it as `data:<mime>;base64,<payload>`
///
/// The MIME type comes from the extension, compared without case, and falls
/// back to `application/octet-stream`.
pub fn read_data_uri(path: &Path) -> LibraryResult<String> {
    if !path.exists() {
        return Err(LibraryError::FileNotFound(path.to_path_buf()));
    }

    let bytes = fs::read(path).map_err(|e| LibraryError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mime = EbookFormat::mime_type_for_path(path);
    debug!("Encoding {} ({} bytes, {})", path.display(), bytes.len(), mime);

    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_pdf_data_uri() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a.pdf");
        fs::write(&path, b"hello").unwrap();

        assert_eq!(
            read_data_uri(&path).unwrap(),
            "data:application/pdf;base64,aGVsbG8="
        );
    }

    #[test]
    fn test_uppercase_extension_still_gets_mime() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("A.EPUB");
        fs::write(&path, b"x").unwrap();

        assert!(read_data_uri(&path)
            .unwrap()
            .starts_with("data:application/epub+zip;base64,"));
    }

    #[test]
    fn test_unknown_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        fs::write(&path, b"").unwrap();

        assert_eq!(
            read_data_uri(&path).unwrap(),
            "data:application/octet-stream;base64,"
        );
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = read_data_uri(&temp_dir.path().join("gone.pdf"));
        assert!(matches!(result, Err(LibraryError::FileNotFound(_))));
    }

    #[test]
    fn test_directory_is_a_read_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = read_data_uri(temp_dir.path());
        assert!(matches!(result, Err(LibraryError::Read { .. })));
    }
}
