//! Integration tests for EbookScanner

use libris_config::ScanConfig;
use libris_core::EbookFormat;
use libris_library::{EbookScanner, LibraryError, LibraryStore};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

type Result<T> = std::result::Result<T, LibraryError>;

fn create_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"data").unwrap();
    path
}

#[test]
fn test_scanner_finds_every_supported_format() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    for format in EbookFormat::all() {
        create_file(temp_dir.path(), &format!("book.{}", format.extension()));
    }
    create_file(temp_dir.path(), "book.cbz");
    create_file(temp_dir.path(), "book.djvu");

    let files = EbookScanner::new().scan(temp_dir.path())?;
    assert_eq!(files.len(), EbookFormat::all().len());
    Ok(())
}

#[test]
fn test_scanner_includes_hidden_files() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    create_file(temp_dir.path(), "visible.pdf");
    create_file(temp_dir.path(), ".hidden.pdf");

    let files = EbookScanner::new().scan(temp_dir.path())?;
    assert_eq!(files.len(), 2);
    Ok(())
}

#[test]
fn test_scanner_deep_directory_structure() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();

    let mut current_dir = temp_dir.path().to_path_buf();
    for i in 0..5 {
        current_dir = current_dir.join(format!("level{}", i));
        fs::create_dir(&current_dir).unwrap();
        create_file(&current_dir, &format!("book{}.epub", i));
    }

    let unlimited = EbookScanner::from_config(&ScanConfig::default()).scan(temp_dir.path())?;
    assert_eq!(unlimited.len(), 5);

    let limited = EbookScanner::from_config(&ScanConfig {
        max_depth: 3,
        ..Default::default()
    })
    .scan(temp_dir.path())?;
    assert_eq!(limited.len(), 2);
    Ok(())
}

#[test]
fn test_scanner_no_extension_and_dotfiles() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    create_file(temp_dir.path(), "pdf");
    create_file(temp_dir.path(), ".pdf");
    create_file(temp_dir.path(), "archive.pdf.zip");

    let files = EbookScanner::new().scan(temp_dir.path())?;
    assert!(files.is_empty());
    Ok(())
}

#[test]
#[cfg(unix)]
fn test_scanner_symlinks() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let outside = temp_dir.path().join("outside");
    let root = temp_dir.path().join("root");
    fs::create_dir(&outside).unwrap();
    fs::create_dir(&root).unwrap();
    create_file(&outside, "linked.pdf");
    std::os::unix::fs::symlink(&outside, root.join("link")).unwrap();

    let without = EbookScanner::new().scan(&root)?;
    assert!(without.is_empty());

    let with = EbookScanner::new().with_follow_symlinks(true).scan(&root)?;
    assert_eq!(with.len(), 1);
    Ok(())
}

#[test]
fn test_store_scan_example_tree() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("library");
    fs::create_dir_all(root.join("sub")).unwrap();
    create_file(&root, "a.pdf");
    create_file(&root, "b.txt");
    create_file(&root.join("sub"), "c.epub");

    let mut store = LibraryStore::open(temp_dir.path().join("library.json"))?;
    let added = store.scan_directory(&root)?;

    assert_eq!(added.len(), 2);
    assert_eq!(store.books().len(), 2);
    assert_eq!(added[0].title, "a.pdf");
    assert_eq!(added[0].format, "pdf");
    assert_eq!(added[1].title, "c.epub");
    assert_eq!(added[1].file_path, root.join("sub").join("c.epub"));
    assert!(added.iter().all(|b| b.author.is_empty() && b.cover_path.is_empty()));
    Ok(())
}

#[test]
fn test_rescan_adds_duplicates() -> Result<()> {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("library");
    fs::create_dir(&root).unwrap();
    create_file(&root, "a.pdf");

    let mut store = LibraryStore::open(temp_dir.path().join("library.json"))?;
    store.scan_directory(&root)?;
    store.scan_directory(&root)?;

    assert_eq!(store.books().len(), 2);
    assert_ne!(store.books()[0].id, store.books()[1].id);
    assert_eq!(store.find_by_path(&root.join("a.pdf")).len(), 2);
    Ok(())
}
