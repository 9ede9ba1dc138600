pub mod config;
mod entries;

pub use config::Config;
pub use entries::{EntryStore, JsonFileStore, MemoryStore, DEFAULT_ENTRIES_FILE};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns the application data directory, creating it if needed.
///
/// `MINDBLOOM_DATA_DIR` overrides the location. Otherwise this is
/// `~/.config/mindbloom[-dev]/`, with the `-dev` suffix when
/// `MINDBLOOM_ENV=dev`.
///
/// # Errors
/// Returns [`StorageError::NoDataDir`] if there is no override and no home
/// directory, or an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("MINDBLOOM_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .ok_or(StorageError::NoDataDir)?
                .join(".config");
            let env = std::env::var("MINDBLOOM_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("mindbloom-dev")
            } else {
                base_dir.join("mindbloom")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| StorageError::WriteFailed {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
