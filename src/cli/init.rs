use std::path::PathBuf;

use crate::error::Result;
use crate::settings::{default_data_dir, save_settings, Settings};
use crate::store::SqliteStore;

pub fn run(data_dir: Option<String>) -> Result<()> {
    let dir = data_dir.map(PathBuf::from).unwrap_or_else(default_data_dir);
    std::fs::create_dir_all(&dir)?;

    let settings = Settings {
        data_dir: dir.to_string_lossy().to_string(),
    };
    save_settings(&settings)?;

    // Creates the schema on first open.
    SqliteStore::open(&dir.join("penny.db"))?;

    println!("Initialized Penny data directory at {}", dir.display());
    Ok(())
}
