//! Installed font discovery
//!
//! Fonts are found by walking the usual per-platform font directories. The
//! reported name is the file stem with `-` turned into a space, which is close
//! enough to the family name for a font picker.

use directories::BaseDirs;
use log::{debug, warn};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc"];

/// Font directories for the current platform, existing or not
pub fn font_directories() -> Vec<PathBuf> {
    let base = BaseDirs::new();
    let mut dirs = Vec::new();

    #[cfg(target_os = "macos")]
    {
        dirs.push(PathBuf::from("/System/Library/Fonts"));
        dirs.push(PathBuf::from("/Library/Fonts"));
        if let Some(base) = &base {
            dirs.push(base.home_dir().join("Library/Fonts"));
        }
    }

    #[cfg(target_os = "windows")]
    {
        let windir = std::env::var_os("WINDIR").unwrap_or_else(|| "C:\\Windows".into());
        dirs.push(PathBuf::from(windir).join("Fonts"));
        if let Some(base) = &base {
            dirs.push(base.data_local_dir().join("Microsoft\\Windows\\Fonts"));
        }
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        dirs.push(PathBuf::from("/usr/share/fonts"));
        dirs.push(PathBuf::from("/usr/local/share/fonts"));
        if let Some(base) = &base {
            dirs.push(base.data_dir().join("fonts"));
            dirs.push(base.home_dir().join(".fonts"));
        }
    }

    dirs
}

/// Sorted, de-duplicated names of the fonts installed on this machine
pub fn list_system_fonts() -> Vec<String> {
    list_fonts_in(&font_directories())
}

/// Sorted, de-duplicated names of the font files under `dirs`
///
/// Missing directories and unreadable entries are skipped.
pub fn list_fonts_in(dirs: &[PathBuf]) -> Vec<String> {
    let mut names = BTreeSet::new();

    for dir in dirs {
        if !dir.is_dir() {
            debug!("Font directory {} not present", dir.display());
            continue;
        }

        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable font entry: {}", e);
                    continue;
                }
            };
            if entry.file_type().is_file() {
                if let Some(name) = font_name(entry.path()) {
                    names.insert(name);
                }
            }
        }
    }

    names.into_iter().collect()
}

fn font_name(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?;
    if !FONT_EXTENSIONS.iter().any(|f| f.eq_ignore_ascii_case(ext)) {
        return None;
    }
    let stem = path.file_stem()?.to_string_lossy();
    Some(stem.replace('-', " "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_font_name() {
        assert_eq!(
            font_name(Path::new("/f/DejaVuSans-Bold.ttf")),
            Some("DejaVuSans Bold".to_string())
        );
        assert_eq!(
            font_name(Path::new("/f/Inter.OTF")),
            Some("Inter".to_string())
        );
        assert_eq!(font_name(Path::new("/f/fonts.conf")), None);
        assert_eq!(font_name(Path::new("/f/README")), None);
    }

    #[test]
    fn test_list_fonts_sorted_and_deduplicated() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        fs::create_dir(first.path().join("truetype")).unwrap();

        fs::write(first.path().join("truetype/Zilla-Slab.ttf"), b"").unwrap();
        fs::write(first.path().join("Arial.ttf"), b"").unwrap();
        fs::write(second.path().join("Arial.otf"), b"").unwrap();
        fs::write(second.path().join("Noto-Serif.ttc"), b"").unwrap();
        fs::write(second.path().join("license.txt"), b"").unwrap();

        let fonts = list_fonts_in(&[
            first.path().to_path_buf(),
            second.path().to_path_buf(),
            first.path().join("missing"),
        ]);
        assert_eq!(fonts, vec!["Arial", "Noto Serif", "Zilla Slab"]);
    }

    #[test]
    fn test_no_directories() {
        assert!(list_fonts_in(&[]).is_empty());
    }
}
