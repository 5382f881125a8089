//! Entry point: picks a front-end and opens the catalog.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

use stockroom::store::Store;

#[derive(Parser, Debug)]
#[command(version, about = "Local warehouse inventory manager", long_about = None)]
struct Args {
    /// Front-end to launch
    #[arg(long = "ui", value_enum, default_value = "console")]
    ui: UiMode,

    /// Path to the SQLite database file
    #[arg(short, long, default_value_t = default_db_path())]
    database: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum UiMode {
    /// Menu-driven text console
    Console,
    /// Keyboard-driven table browser window (falls back to the console
    /// menu when no window can be opened)
    Table,
    /// Management window (falls back to the console menu when no window
    /// can be opened)
    Gui,
}

fn default_db_path() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stockroom")
        .join("inventory.db")
        .to_string_lossy()
        .to_string()
}

fn open_store_or_exit(db_path: &Path) -> Store {
    match Store::open(db_path) {
        Ok(store) => store,
        Err(e) => {
            log::error!(
                "Failed to open inventory database {}: {}",
                db_path.display(),
                e
            );
            eprintln!(
                "Error: cannot open inventory database {}: {}",
                db_path.display(),
                e
            );
            std::process::exit(1);
        }
    }
}

fn run_console(db_path: &Path) {
    let store = open_store_or_exit(db_path);
    if let Err(e) = stockroom::console::run(&store) {
        log::error!("Console front-end error: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// A windowed front-end that cannot start (e.g. no display) drops the
/// user into the console menu instead of exiting.
fn fall_back_to_console(db_path: &Path, error: eframe::Error) {
    log::error!(
        "Windowed front-end failed: {}; falling back to the console menu",
        error
    );
    eprintln!(
        "Window unavailable ({}). Falling back to the console menu.",
        error
    );
    run_console(db_path);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let db_path = PathBuf::from(&args.database);
    log::info!("Starting stockroom with the {:?} front-end", args.ui);

    match args.ui {
        UiMode::Console => run_console(&db_path),
        UiMode::Table => {
            let store = open_store_or_exit(&db_path);
            if let Err(e) = stockroom::ui::launch_browser(store) {
                fall_back_to_console(&db_path, e);
            }
        }
        UiMode::Gui => {
            let store = open_store_or_exit(&db_path);
            if let Err(e) = stockroom::ui::launch_manager(store) {
                fall_back_to_console(&db_path, e);
            }
        }
    }
}
