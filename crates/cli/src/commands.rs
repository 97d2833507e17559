use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use console::style;
use libris_config::{Config, ConfigManager};
use libris_core::{BookView, EbookFormat, Timestamp};
use libris_library::{FileDialogs, LibrisApi};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

#[cfg(test)]
mod tests;

/// List all books in the library
pub fn list_books(api: &LibrisApi, json: bool) -> Result<()> {
    let books = api.list_books().context("Failed to list books")?;

    if json {
        return print_json(&books);
    }

    if books.is_empty() {
        println!("No books in library. Use 'add' or 'scan' to track ebooks.");
        return Ok(());
    }

    println!("\n{} Books in Library", style(books.len()).bold().cyan());
    println!("{}", "=".repeat(80));

    for book in &books {
        print_book_summary(book);
    }

    Ok(())
}

/// Add an ebook file to the library
pub fn add_book(api: &LibrisApi, matches: &ArgMatches, json: bool) -> Result<()> {
    let file_path = matches
        .get_one::<String>("path")
        .ok_or_else(|| anyhow::anyhow!("File path is required"))?;
    let path = absolute(Path::new(file_path));

    let title = matches
        .get_one::<String>("title")
        .cloned()
        .unwrap_or_else(|| default_title(&path));
    let format = matches
        .get_one::<String>("format")
        .cloned()
        .unwrap_or_else(|| infer_format(&path));
    let author = string_arg(matches, "author");
    let description = string_arg(matches, "description");

    let already_tracked = api.find_by_path(&path)?.len();

    let book = api
        .add_book(&title, &author, &path, &description, &format)
        .with_context(|| format!("Failed to add {}", file_path))?;

    if json {
        return print_json(&book);
    }

    println!("{} Book added successfully!", style("✓").green().bold());
    println!("  ID: {}", book.id);
    println!("  Title: {}", book.title);
    if !book.author.is_empty() {
        println!("  Author: {}", book.author);
    }
    println!("  Format: {}", book.format);
    println!("  File: {}", book.file_path);
    if already_tracked > 0 {
        println!(
            "  {}",
            style(format!(
                "This file was already in the library ({} entries)",
                already_tracked
            ))
            .yellow()
        );
    }

    Ok(())
}

/// Remove a book from the library
pub fn remove_book(api: &LibrisApi, matches: &ArgMatches, json: bool) -> Result<()> {
    let id = required(matches, "id")?;
    api.remove_book(id)
        .with_context(|| format!("Failed to remove book {}", id))?;

    if json {
        return print_json(&Value::Null);
    }
    println!("{} Book removed: {}", style("✓").green().bold(), id);
    Ok(())
}

/// Mark a book as opened and print where it lives
pub fn open_book(api: &LibrisApi, matches: &ArgMatches, json: bool) -> Result<()> {
    let id = required(matches, "id")?;
    let path = api
        .open_book(id)
        .with_context(|| format!("Failed to open book {}", id))?;

    if json {
        return print_json(&path);
    }
    println!("{}", path.display());
    Ok(())
}

/// Set the default library directory
pub fn set_library_path(api: &LibrisApi, matches: &ArgMatches, json: bool) -> Result<()> {
    let dir = absolute(Path::new(required(matches, "dir")?));
    api.set_library_path(&dir)
        .context("Failed to set library path")?;

    if json {
        return print_json(&Value::Null);
    }
    println!(
        "{} Library path set to {}",
        style("✓").green().bold(),
        dir.display()
    );
    Ok(())
}

/// Show the default library directory
pub fn show_library_path(api: &LibrisApi, json: bool) -> Result<()> {
    let path = api.library_path()?;

    if json {
        return print_json(&path);
    }
    if path.is_empty() {
        println!("No library path set. Use 'set-path' to choose one.");
    } else {
        println!("{}", path);
    }
    Ok(())
}

/// Add every ebook found under a directory
pub fn scan_directory(api: &LibrisApi, matches: &ArgMatches, json: bool) -> Result<()> {
    let dir = match matches.get_one::<String>("dir") {
        Some(dir) => absolute(Path::new(dir)),
        None => {
            let root = api.library_path()?;
            if root.is_empty() {
                bail!("No directory given and no library path set");
            }
            PathBuf::from(root)
        }
    };

    let added = api
        .scan_directory(&dir)
        .with_context(|| format!("Failed to scan {}", dir.display()))?;

    if json {
        return print_json(&added);
    }

    println!(
        "{} Added {} books from {}",
        style("✓").green().bold(),
        style(added.len()).bold(),
        dir.display()
    );
    for book in &added {
        print_book_summary(book);
    }
    Ok(())
}

/// Print a file as a data URI
pub fn read_file_content(api: &LibrisApi, matches: &ArgMatches) -> Result<()> {
    let path = required(matches, "path")?;
    let uri = api
        .read_file_content(path)
        .with_context(|| format!("Failed to read {}", path))?;
    println!("{}", uri);
    Ok(())
}

/// Show all settings, or the value under a dotted key
pub fn show_settings(api: &LibrisApi, matches: &ArgMatches, json: bool) -> Result<()> {
    let settings = api.settings()?;

    let value = match matches.get_one::<String>("key") {
        Some(key) => lookup_setting(&settings, key)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("No setting named '{}'", key))?,
        None => settings,
    };

    match (&value, json) {
        (Value::String(s), false) => println!("{}", s),
        _ => print_json(&value)?,
    }
    Ok(())
}

/// Deep-merge a JSON object into the settings
pub fn update_settings(api: &LibrisApi, matches: &ArgMatches, json: bool) -> Result<()> {
    let raw = required(matches, "patch")?;
    let partial: Value = serde_json::from_str(raw).context("Settings must be valid JSON")?;

    api.update_settings(partial)
        .context("Failed to update settings")?;

    if json {
        return print_json(&api.settings()?);
    }
    println!("{} Settings updated", style("✓").green().bold());
    Ok(())
}

/// Restore default settings
pub fn reset_settings(api: &LibrisApi, json: bool) -> Result<()> {
    api.reset_settings().context("Failed to reset settings")?;

    if json {
        return print_json(&api.settings()?);
    }
    println!("{} Settings reset to defaults", style("✓").green().bold());
    Ok(())
}

/// List installed fonts
pub fn list_fonts(api: &LibrisApi, json: bool) -> Result<()> {
    let fonts = api.list_system_fonts()?;

    if json {
        return print_json(&fonts);
    }
    if fonts.is_empty() {
        println!("No fonts found.");
    }
    for font in &fonts {
        println!("{}", font);
    }
    Ok(())
}

pub fn pick_file(api: &LibrisApi, dialogs: &dyn FileDialogs, json: bool) -> Result<()> {
    let picked = api.pick_file(dialogs)?;
    print_picked(picked, json)
}

pub fn pick_directory(api: &LibrisApi, dialogs: &dyn FileDialogs, json: bool) -> Result<()> {
    let picked = api.pick_directory(dialogs)?;
    print_picked(picked, json)
}

fn print_picked(picked: Option<PathBuf>, json: bool) -> Result<()> {
    if json {
        return print_json(&picked);
    }
    match picked {
        Some(path) => println!("{}", path.display()),
        None => println!("{}", style("Cancelled").dim()),
    }
    Ok(())
}

/// Show the effective config and where it came from
pub fn show_config(manager: &ConfigManager, config: &Config, json: bool) -> Result<()> {
    if json {
        return print_json(config);
    }

    println!("# {}", manager.config_path().display());
    let rendered = toml::to_string_pretty(config).context("Failed to render config")?;
    print!("{}", rendered);
    Ok(())
}

/// Write a default config file if none exists
pub fn init_config(manager: &ConfigManager, json: bool) -> Result<()> {
    let created = manager
        .initialize()
        .context("Failed to write default config")?;

    if json {
        return print_json(&created);
    }
    if created {
        println!(
            "{} Wrote {}",
            style("✓").green().bold(),
            manager.config_path().display()
        );
    } else {
        println!(
            "Config already exists at {}",
            manager.config_path().display()
        );
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render JSON")?;
    println!("{}", rendered);
    Ok(())
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(name)
        .map(|s| s.as_str())
        .ok_or_else(|| anyhow::anyhow!("{} is required", name))
}

fn string_arg(matches: &ArgMatches, name: &str) -> String {
    matches.get_one::<String>(name).cloned().unwrap_or_default()
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Title used when none is given: the file name without its extension
fn default_title(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Untitled".to_string())
}

/// Format tag used when none is given, `pdf` for unknown extensions
fn infer_format(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(EbookFormat::from_extension_ignore_case)
        .unwrap_or(EbookFormat::Pdf)
        .extension()
        .to_string()
}

/// Follows a dotted key such as `colorScheme.dark.primary`
fn lookup_setting<'a>(settings: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.')
        .filter(|part| !part.is_empty())
        .try_fold(settings, |node, part| node.get(part))
}

/// "never" for the zero timestamp, otherwise a short local date
fn display_time(rfc3339: &str) -> String {
    match Timestamp::parse(rfc3339) {
        Ok(ts) if ts.is_zero() => "never".to_string(),
        Ok(ts) => ts.as_datetime().format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => rfc3339.to_string(),
    }
}

fn print_book_summary(book: &BookView) {
    println!("\n{}", style(&book.title).bold());
    if !book.author.is_empty() {
        println!("  by {}", book.author);
    }
    println!("  {}", details_line(book));
    println!("  {}", style(&book.file_path).dim());
}

/// The id is printed whole so it can be pasted into `remove` and `open`
fn details_line(book: &BookView) -> String {
    format!(
        "ID: {} | Format: {} | Added: {} | Last opened: {}",
        book.id,
        book.format.to_uppercase(),
        display_time(&book.added_at),
        display_time(&book.last_opened_at)
    )
}
