use crate::cli::Cli;
use crate::error::{MaptyError, Result};
use crate::storage::FileStorage;
use crate::store::WorkoutStore;
use std::path::PathBuf;

/// Settings resolved from flags, environment and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub zoom: u8,
}

impl Config {
    /// Fails when the storage key could not be used as a plain file name.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        check_storage_key(&cli.storage_key)?;
        Ok(Self {
            data_dir: cli.data_dir.clone(),
            storage_key: cli.storage_key.clone(),
            zoom: cli.zoom,
        })
    }

    pub fn open_store(&self) -> WorkoutStore<FileStorage> {
        WorkoutStore::with_key(FileStorage::new(&self.data_dir), self.storage_key.clone())
    }
}

/// Keys become file names, so only `[A-Za-z0-9_-]+` is accepted.
fn check_storage_key(key: &str) -> Result<()> {
    let ok = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if ok {
        Ok(())
    } else {
        Err(MaptyError::InvalidStorageKey {
            key: key.to_string(),
        })
    }
}
