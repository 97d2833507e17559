use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use libris_config::{Config, ConfigManager};
use libris_library::{ApiOptions, LibrisApi};
use std::path::PathBuf;

mod commands;
mod dialogs;

fn build_cli() -> Command {
    let cli = Command::new("libris")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Libris Contributors")
        .about("Local ebook library manager")
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .value_name("DIR")
                .help("Directory holding library.json and settings.json")
                .global(true),
        )
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .value_name("DIR")
                .help("Directory holding config.toml")
                .global(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print results as JSON")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(Command::new("list").about("List all books in the library"))
        .subcommand(
            Command::new("add")
                .about("Add an ebook file to the library")
                .arg(
                    Arg::new("path")
                        .required(true)
                        .value_name("FILE")
                        .help("Path to the ebook file"),
                )
                .arg(
                    Arg::new("title")
                        .short('t')
                        .long("title")
                        .value_name("TITLE")
                        .help("Book title (defaults to the file name)"),
                )
                .arg(
                    Arg::new("author")
                        .short('a')
                        .long("author")
                        .value_name("AUTHOR")
                        .help("Book author"),
                )
                .arg(
                    Arg::new("description")
                        .short('d')
                        .long("description")
                        .value_name("TEXT")
                        .help("Short description"),
                )
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .value_name("FORMAT")
                        .help("Format tag (defaults to the file extension)"),
                ),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove a book from the library")
                .arg(
                    Arg::new("id")
                        .required(true)
                        .value_name("BOOK_ID")
                        .help("Book ID"),
                ),
        )
        .subcommand(
            Command::new("open")
                .about("Mark a book as opened and print its file path")
                .arg(
                    Arg::new("id")
                        .required(true)
                        .value_name("BOOK_ID")
                        .help("Book ID"),
                ),
        )
        .subcommand(
            Command::new("set-path")
                .about("Set the default library directory")
                .arg(
                    Arg::new("dir")
                        .required(true)
                        .value_name("DIR")
                        .help("Existing directory"),
                ),
        )
        .subcommand(
            Command::new("path")
                .about("Show the default library directory"),
        )
        .subcommand(
            Command::new("scan")
                .about("Add every ebook found under a directory")
                .arg(
                    Arg::new("dir")
                        .value_name("DIR")
                        .help("Directory to scan (defaults to the library directory)"),
                ),
        )
        .subcommand(
            Command::new("read")
                .about("Print a file as a base64 data URI")
                .arg(
                    Arg::new("path")
                        .required(true)
                        .value_name("FILE")
                        .help("File to read"),
                ),
        )
        .subcommand(
            Command::new("settings")
                .about("Show or change UI settings")
                .subcommand_required(true)
                .subcommand(
                    Command::new("get")
                        .about("Show settings")
                        .arg(
                            Arg::new("key")
                                .value_name("KEY")
                                .help("Dotted key, e.g. font.size"),
                        ),
                )
                .subcommand(
                    Command::new("set")
                        .about("Deep-merge a JSON object into the settings")
                        .arg(
                            Arg::new("patch")
                                .required(true)
                                .value_name("JSON")
                                .help(r#"Partial settings, e.g. '{"font":{"size":"16px"}}'"#),
                        ),
                )
                .subcommand(Command::new("reset").about("Restore default settings")),
        )
        .subcommand(Command::new("fonts").about("List installed fonts"))
        .subcommand(Command::new("pick-file").about("Pick an ebook file"))
        .subcommand(Command::new("pick-dir").about("Pick a directory to scan"))
        .subcommand(
            Command::new("config")
                .about("Inspect the application config")
                .subcommand_required(true)
                .subcommand(Command::new("show").about("Show the effective config"))
                .subcommand(
                    Command::new("init")
                        .about("Write a default config.toml if none exists"),
                ),
        );

    if cfg!(feature = "native-dialogs") {
        cli.arg(
            Arg::new("native-dialogs")
                .long("native-dialogs")
                .help("Use the desktop's file pickers")
                .action(ArgAction::SetTrue)
                .global(true),
        )
    } else {
        cli
    }
}

fn config_manager(matches: &ArgMatches) -> Result<ConfigManager> {
    let manager = match matches.get_one::<String>("config-dir") {
        Some(dir) => ConfigManager::with_directory(PathBuf::from(dir)),
        None => ConfigManager::new(),
    };
    manager.context("Failed to locate the config directory")
}

fn data_dir(matches: &ArgMatches) -> Result<PathBuf> {
    match matches.get_one::<String>("data-dir") {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => ConfigManager::default_data_dir().context("Failed to locate the data directory"),
    }
}

fn init_logging(config: &Config) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.app.log_level.to_string()),
    )
    .init();
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let json = matches.get_flag("json");

    let manager = config_manager(&matches)?;
    let config = manager
        .load_with_env_overrides()
        .with_context(|| format!("Failed to load {}", manager.config_path().display()))?;
    init_logging(&config);

    if let Some(("config", sub_matches)) = matches.subcommand() {
        return match sub_matches.subcommand() {
            Some(("show", _)) => commands::show_config(&manager, &config, json),
            Some(("init", _)) => commands::init_config(&manager, json),
            _ => Ok(()),
        };
    }

    let data_dir = data_dir(&matches)?;
    log::debug!("Using data directory {}", data_dir.display());
    let api = LibrisApi::open(ApiOptions::from_config(&config, &data_dir))
        .context("Failed to open the library")?;

    match matches.subcommand() {
        Some(("list", _)) => commands::list_books(&api, json),
        Some(("add", sub_matches)) => commands::add_book(&api, sub_matches, json),
        Some(("remove", sub_matches)) => commands::remove_book(&api, sub_matches, json),
        Some(("open", sub_matches)) => commands::open_book(&api, sub_matches, json),
        Some(("set-path", sub_matches)) => commands::set_library_path(&api, sub_matches, json),
        Some(("path", _)) => commands::show_library_path(&api, json),
        Some(("scan", sub_matches)) => commands::scan_directory(&api, sub_matches, json),
        Some(("read", sub_matches)) => commands::read_file_content(&api, sub_matches),
        Some(("settings", sub_matches)) => match sub_matches.subcommand() {
            Some(("get", get_matches)) => commands::show_settings(&api, get_matches, json),
            Some(("set", set_matches)) => commands::update_settings(&api, set_matches, json),
            Some(("reset", _)) => commands::reset_settings(&api, json),
            _ => Ok(()),
        },
        Some(("fonts", _)) => commands::list_fonts(&api, json),
        Some(("pick-file", _)) => {
            let dialogs = dialogs::for_matches(&matches);
            commands::pick_file(&api, dialogs.as_ref(), json)
        }
        Some(("pick-dir", _)) => {
            let dialogs = dialogs::for_matches(&matches);
            commands::pick_directory(&api, dialogs.as_ref(), json)
        }
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    }
}
