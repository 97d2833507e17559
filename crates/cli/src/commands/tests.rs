use super::*;
use libris_library::{ApiOptions, DialogRequest};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn setup_api() -> (TempDir, LibrisApi) {
    let temp_dir = TempDir::new().unwrap();
    let api = LibrisApi::open(ApiOptions::new(
        temp_dir.path().join("library.json"),
        temp_dir.path().join("settings.json"),
    ))
    .unwrap();
    (temp_dir, api)
}

fn matches_for(args: &[&str]) -> ArgMatches {
    crate::build_cli().get_matches_from(args)
}

fn sub_matches<'a>(matches: &'a ArgMatches, name: &str) -> &'a ArgMatches {
    matches.subcommand_matches(name).unwrap()
}

struct Cancel;

impl FileDialogs for Cancel {
    fn pick_file(&self, _request: &DialogRequest) -> Option<PathBuf> {
        None
    }

    fn pick_directory(&self, _request: &DialogRequest) -> Option<PathBuf> {
        None
    }
}

#[test]
fn test_infer_format() {
    assert_eq!(infer_format(Path::new("/b/dune.epub")), "epub");
    assert_eq!(infer_format(Path::new("/b/DUNE.AZW3")), "azw3");
    assert_eq!(infer_format(Path::new("/b/notes.txt")), "pdf");
    assert_eq!(infer_format(Path::new("/b/README")), "pdf");
}

#[test]
fn test_default_title() {
    assert_eq!(default_title(Path::new("/b/The Hobbit.epub")), "The Hobbit");
    assert_eq!(default_title(Path::new("/b/archive.tar.pdf")), "archive.tar");
}

#[test]
fn test_listed_id_works_with_open() {
    let (temp_dir, api) = setup_api();
    let file = temp_dir.path().join("a.pdf");
    fs::write(&file, b"x").unwrap();
    let book = api.add_book("A", "", &file, "", "pdf").unwrap();

    let line = details_line(&book);
    let shown = line
        .strip_prefix("ID: ")
        .and_then(|rest| rest.split(" | ").next())
        .unwrap();
    assert_eq!(shown, book.id);

    let open = matches_for(&["libris", "open", shown]);
    open_book(&api, sub_matches(&open, "open"), true).unwrap();
}

#[test]
fn test_display_time() {
    assert_eq!(display_time("0001-01-01T00:00:00Z"), "never");
    assert_eq!(display_time("2024-03-05T08:09:10+02:00"), "2024-03-05 08:09");
    assert_eq!(display_time("garbage"), "garbage");
}

#[test]
fn test_lookup_setting() {
    let settings = json!({ "font": { "size": "14px" }, "theme": "light" });
    assert_eq!(lookup_setting(&settings, "font.size"), Some(&json!("14px")));
    assert_eq!(lookup_setting(&settings, "theme"), Some(&json!("light")));
    assert_eq!(lookup_setting(&settings, "font.weight"), None);
    assert_eq!(lookup_setting(&settings, ""), Some(&settings));
}

#[test]
fn test_cli_definition_is_valid() {
    crate::build_cli().debug_assert();
}

#[test]
fn test_add_infers_title_and_format() {
    let (temp_dir, api) = setup_api();
    let file = temp_dir.path().join("Dune.EPUB");
    fs::write(&file, b"x").unwrap();
    let file_arg = file.to_string_lossy().into_owned();

    let matches = matches_for(&["libris", "add", &file_arg, "--author", "Frank Herbert"]);
    add_book(&api, sub_matches(&matches, "add"), true).unwrap();

    let books = api.list_books().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Dune");
    assert_eq!(books[0].format, "epub");
    assert_eq!(books[0].author, "Frank Herbert");
}

#[test]
fn test_add_missing_file_fails() {
    let (temp_dir, api) = setup_api();
    let missing = temp_dir.path().join("missing.pdf");
    let missing_arg = missing.to_string_lossy().into_owned();

    let matches = matches_for(&["libris", "add", &missing_arg]);
    assert!(add_book(&api, sub_matches(&matches, "add"), false).is_err());
    assert!(api.list_books().unwrap().is_empty());
}

#[test]
fn test_remove_and_open_commands() {
    let (temp_dir, api) = setup_api();
    let file = temp_dir.path().join("a.pdf");
    fs::write(&file, b"x").unwrap();
    let book = api.add_book("A", "", &file, "", "pdf").unwrap();

    let open = matches_for(&["libris", "open", &book.id]);
    open_book(&api, sub_matches(&open, "open"), false).unwrap();
    assert_ne!(
        api.list_books().unwrap()[0].last_opened_at,
        "0001-01-01T00:00:00Z"
    );

    let remove = matches_for(&["libris", "remove", &book.id]);
    remove_book(&api, sub_matches(&remove, "remove"), true).unwrap();
    assert!(api.list_books().unwrap().is_empty());

    assert!(remove_book(&api, sub_matches(&remove, "remove"), true).is_err());
}

#[test]
fn test_scan_defaults_to_library_path() {
    let (temp_dir, api) = setup_api();
    let books = temp_dir.path().join("books");
    fs::create_dir(&books).unwrap();
    fs::write(books.join("a.mobi"), b"x").unwrap();

    let scan = matches_for(&["libris", "scan"]);
    assert!(scan_directory(&api, sub_matches(&scan, "scan"), false).is_err());

    api.set_library_path(&books).unwrap();
    scan_directory(&api, sub_matches(&scan, "scan"), true).unwrap();
    assert_eq!(api.list_books().unwrap().len(), 1);
}

#[test]
fn test_settings_commands() {
    let (_temp_dir, api) = setup_api();

    let set = matches_for(&["libris", "settings", "set", r#"{"theme":"dark"}"#]);
    let set_matches = sub_matches(sub_matches(&set, "settings"), "set");
    update_settings(&api, set_matches, false).unwrap();
    assert_eq!(api.settings().unwrap()["theme"], "dark");

    let bad = matches_for(&["libris", "settings", "set", "{not json"]);
    let bad_matches = sub_matches(sub_matches(&bad, "settings"), "set");
    assert!(update_settings(&api, bad_matches, false).is_err());

    let get = matches_for(&["libris", "settings", "get", "font.nope"]);
    let get_matches = sub_matches(sub_matches(&get, "settings"), "get");
    assert!(show_settings(&api, get_matches, false).is_err());

    reset_settings(&api, false).unwrap();
    assert_eq!(api.settings().unwrap()["theme"], "light");
}

#[test]
fn test_pick_cancelled() {
    let (_temp_dir, api) = setup_api();
    pick_file(&api, &Cancel, true).unwrap();
    pick_directory(&api, &Cancel, false).unwrap();
}

#[test]
fn test_config_commands() {
    let temp_dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_directory(temp_dir.path().to_path_buf()).unwrap();

    init_config(&manager, false).unwrap();
    assert!(manager.config_path().exists());
    init_config(&manager, true).unwrap();

    show_config(&manager, &manager.load().unwrap(), false).unwrap();
}

#[test]
fn test_list_books_renders() {
    let (temp_dir, api) = setup_api();
    list_books(&api, false).unwrap();

    let file = temp_dir.path().join("a.pdf");
    fs::write(&file, b"x").unwrap();
    api.add_book("A long enough title", "Someone", &file, "", "pdf")
        .unwrap();
    list_books(&api, false).unwrap();
    list_books(&api, true).unwrap();
}
