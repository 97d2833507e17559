//! File pickers for the command line

use clap::ArgMatches;
use console::{style, Term};
use libris_library::{DialogRequest, FileDialogs};
use std::path::PathBuf;

/// Prompts on the terminal for a path
///
/// Prompts go to stderr so `--json` output on stdout stays clean. An empty
/// answer cancels.
pub struct TerminalDialogs {
    term: Term,
}

impl TerminalDialogs {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    fn prompt(&self, request: &DialogRequest, kind: &str) -> Option<PathBuf> {
        let mut lines = vec![style(&request.title).bold().to_string()];
        for filter in &request.filters {
            lines.push(format!(
                "  {} (*.{})",
                filter.name,
                filter.extensions.join(", *.")
            ));
        }
        if let Some(dir) = &request.starting_directory {
            lines.push(format!("  Relative paths start at {}", dir.display()));
        }
        lines.push(format!("{} path (empty to cancel):", kind));

        for line in lines {
            if self.term.write_line(&line).is_err() {
                return None;
            }
        }

        let answer = match self.term.read_line() {
            Ok(answer) => answer,
            Err(e) => {
                log::warn!("Could not read from terminal: {}", e);
                return None;
            }
        };

        parse_answer(&answer).map(|path| match &request.starting_directory {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path,
        })
    }
}

impl Default for TerminalDialogs {
    fn default() -> Self {
        Self::new()
    }
}

impl FileDialogs for TerminalDialogs {
    fn pick_file(&self, request: &DialogRequest) -> Option<PathBuf> {
        let path = self.prompt(request, "File")?;
        if path.is_file() {
            Some(path)
        } else {
            eprintln!("{} Not a file: {}", style("✗").red().bold(), path.display());
            None
        }
    }

    fn pick_directory(&self, request: &DialogRequest) -> Option<PathBuf> {
        let path = self.prompt(request, "Directory")?;
        if path.is_dir() {
            Some(path)
        } else {
            eprintln!(
                "{} Not a directory: {}",
                style("✗").red().bold(),
                path.display()
            );
            None
        }
    }
}

/// Trims the answer and strips the quotes terminals add on drag-and-drop
pub fn parse_answer(input: &str) -> Option<PathBuf> {
    let trimmed = input.trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|q| {
            trimmed
                .strip_prefix(*q)
                .and_then(|rest| rest.strip_suffix(*q))
        })
        .unwrap_or(trimmed);

    if unquoted.is_empty() {
        None
    } else {
        Some(PathBuf::from(unquoted))
    }
}

#[cfg(feature = "native-dialogs")]
mod native {
    use libris_library::{DialogRequest, FileDialogs};
    use rfd::FileDialog;
    use std::path::PathBuf;

    /// The desktop's own pickers
    pub struct NativeDialogs;

    fn dialog(request: &DialogRequest) -> FileDialog {
        let mut dialog = FileDialog::new().set_title(&request.title);
        for filter in &request.filters {
            dialog = dialog.add_filter(&filter.name, filter.extensions.as_slice());
        }
        if let Some(dir) = &request.starting_directory {
            dialog = dialog.set_directory(dir);
        }
        dialog
    }

    impl FileDialogs for NativeDialogs {
        fn pick_file(&self, request: &DialogRequest) -> Option<PathBuf> {
            dialog(request).pick_file()
        }

        fn pick_directory(&self, request: &DialogRequest) -> Option<PathBuf> {
            dialog(request).pick_folder()
        }
    }
}

/// Chooses the pickers requested on the command line
#[cfg(feature = "native-dialogs")]
pub fn for_matches(matches: &ArgMatches) -> Box<dyn FileDialogs> {
    if matches.get_flag("native-dialogs") {
        Box::new(native::NativeDialogs)
    } else {
        Box::new(TerminalDialogs::new())
    }
}

/// Chooses the pickers requested on the command line
#[cfg(not(feature = "native-dialogs"))]
pub fn for_matches(_matches: &ArgMatches) -> Box<dyn FileDialogs> {
    Box::new(TerminalDialogs::new())
}
