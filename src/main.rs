mod analytics;
mod clock;
mod export;
mod filter;
mod models;
mod run;
mod store;
mod tracker;
mod ui;
mod validate;

use anyhow::{Context, Result};

use store::SqliteStore;
use tracker::ExpenseTracker;

/// Overrides the default database location.
const DB_PATH_ENV: &str = "EXPENSETUI_DB";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    let db_path = get_db_path()?;
    log::debug!("Using database at {}", db_path.display());
    let store = SqliteStore::open(&db_path)?;
    let mut tracker = ExpenseTracker::open(store);

    match args.len() {
        1 => run::as_tui(&mut tracker),
        _ => run::as_cli(&args, &mut tracker),
    }
}

fn get_db_path() -> Result<std::path::PathBuf> {
    if let Some(path) = std::env::var_os(DB_PATH_ENV) {
        return Ok(path.into());
    }

    let proj_dirs = directories::ProjectDirs::from("com", "expensetui", "ExpenseTUI")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("expensetui.db"))
}
