//! Persisted best-score records.
//!
//! Each game key maps to one small file holding a plain base-10 integer
//! string. Reads fail closed: a missing or malformed record is treated as
//! "no record yet" rather than an error, so a damaged save can never keep
//! the game from starting.

use std::fs;
use std::path::{Path, PathBuf};

use bevy_ecs::prelude::*;
use tracing::{debug, warn};

use crate::error::StoreError;

/// Environment variable overriding where records are kept.
pub const DATA_DIR_ENV: &str = "TRANQUIL_RUN_DATA";

/// A tiny key-value store of monotonically improving integers.
#[derive(Debug, Clone)]
pub struct BestScoreStore {
    dir: PathBuf,
}

/// ECS wrapper so systems can reach the store.
#[derive(Resource, Debug)]
pub struct StoreResource(pub BestScoreStore);

impl BestScoreStore {
    /// Opens a store rooted at the given directory. The directory is created
    /// lazily on first write.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Opens the default store: `$TRANQUIL_RUN_DATA` if set, otherwise a
    /// `.tranquil-run` directory under the user's home (falling back to the
    /// current directory).
    pub fn open_default() -> Self {
        let dir = std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| Path::new(&home).join(".tranquil-run")))
            .unwrap_or_else(|| PathBuf::from(".tranquil-run"));
        debug!(dir = %dir.display(), "Opening best-score store");
        Self::open(dir)
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Reads the record for `key`. Missing and malformed values both read as
    /// zero.
    pub fn read(&self, key: &str) -> u32 {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => match contents.trim().parse::<u32>() {
                Ok(value) => value,
                Err(e) => {
                    warn!(key, error = %e, "Malformed best-score record, treating as absent");
                    0
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => {
                warn!(key, error = %e, "Failed to read best-score record, treating as absent");
                0
            }
        }
    }

    /// Overwrites the record for `key` with a plain base-10 integer string.
    pub fn write(&self, key: &str, value: u32) -> Result<(), StoreError> {
        if key.is_empty() || key.contains(['/', '\\']) {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value.to_string())?;
        debug!(key, value, "Best-score record written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_store(tag: &str) -> BestScoreStore {
        let dir = std::env::temp_dir().join(format!("tranquil-run-test-{}-{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        BestScoreStore::open(dir)
    }

    #[test]
    fn test_missing_record_reads_as_zero() {
        let store = scratch_store("missing");
        assert_eq!(store.read("tranquil-run-best"), 0);
    }

    #[test]
    fn test_round_trip() {
        let store = scratch_store("roundtrip");
        store.write("tranquil-run-best", 420).unwrap();
        assert_eq!(store.read("tranquil-run-best"), 420);
    }

    #[test]
    fn test_malformed_record_fails_closed() {
        let store = scratch_store("malformed");
        fs::create_dir_all(&store.dir).unwrap();
        fs::write(store.path_for("tranquil-run-best"), "not a number").unwrap();
        assert_eq!(store.read("tranquil-run-best"), 0);
    }

    #[test]
    fn test_value_is_a_plain_integer_string() {
        let store = scratch_store("format");
        store.write("tranquil-run-best", 1234).unwrap();
        let raw = fs::read_to_string(store.path_for("tranquil-run-best")).unwrap();
        assert_eq!(raw, "1234");
    }

    #[test]
    fn test_path_traversal_keys_are_rejected() {
        let store = scratch_store("traversal");
        assert!(store.write("../evil", 1).is_err());
        assert!(store.write("", 1).is_err());
    }
}
