pub mod breathe;
pub mod checkin;
pub mod config;
pub mod entries;
pub mod garden;
pub mod stats;

use mindbloom_core::{Config, JsonFileStore, MoodGarden, Result};

/// Open the entry store named in the config on the system clock.
pub fn open_garden(config: &Config) -> Result<MoodGarden> {
    let store = JsonFileStore::in_data_dir(&config.storage.entries_file)?;
    tracing::debug!(path = %store.path().display(), "opening entry store");
    Ok(MoodGarden::with_system_clock(store, config))
}
