//! File-backed repository with atomic JSON writes.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use tracing::{info, warn};

use crate::dao::{
    models::{Config, DrawState, LiveRoster, PrizeBook},
    storage::{StorageError, StorageResult},
};

const PRIZES_FILE: &str = "prizes.json";
const DRAW_STATE_FILE: &str = "draw-state.json";
const CONFIG_FILE: &str = "config.json";
const LIVE_POOL_FILE: &str = "live-pool.json";

/// Repository over the JSON documents in the data directory.
///
/// Every save serializes to a temp file and renames it into place, so readers
/// never observe a partially written document. Loads fall back to defaults on
/// missing or unreadable files; the next save repairs the file.
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `data_dir` (not created until the first write).
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Directory all documents live under.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Ensure the data directory exists and is writable.
    pub fn health_check(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.data_dir).map_err(|source| StorageError::Write {
            path: self.data_dir.clone(),
            source,
        })
    }

    /// Load the prize catalog.
    pub fn load_prizes(&self) -> PrizeBook {
        self.read_or_default(PRIZES_FILE)
    }

    /// Persist the prize catalog.
    pub fn save_prizes(&self, book: &PrizeBook) -> StorageResult<()> {
        self.write_atomic(PRIZES_FILE, book)
    }

    /// Load the draw ledger.
    pub fn load_draw_state(&self) -> DrawState {
        self.read_or_default(DRAW_STATE_FILE)
    }

    /// Persist the draw ledger.
    pub fn save_draw_state(&self, state: &DrawState) -> StorageResult<()> {
        self.write_atomic(DRAW_STATE_FILE, state)
    }

    /// Load the configuration, migrating legacy shapes.
    pub fn load_config(&self) -> Config {
        self.read_or_default::<Config>(CONFIG_FILE).migrate()
    }

    /// Persist the configuration.
    pub fn save_config(&self, config: &Config) -> StorageResult<()> {
        self.write_atomic(CONFIG_FILE, config)
    }

    /// Load the live check-in roster.
    pub fn load_roster(&self) -> LiveRoster {
        self.read_or_default(LIVE_POOL_FILE)
    }

    /// Persist the live check-in roster.
    pub fn save_roster(&self, roster: &LiveRoster) -> StorageResult<()> {
        self.write_atomic(LIVE_POOL_FILE, roster)
    }

    fn read_or_default<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.data_dir.join(name);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "document not found; using defaults");
                return T::default();
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read document; using defaults");
                return T::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(value) => value,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to parse document; using defaults");
                T::default()
            }
        }
    }

    fn write_atomic<T: Serialize>(&self, name: &str, value: &T) -> StorageResult<()> {
        let path = self.data_dir.join(name);
        let payload =
            serde_json::to_string_pretty(value).map_err(|source| StorageError::Serialize {
                path: path.clone(),
                source,
            })?;

        fs::create_dir_all(&self.data_dir).map_err(|source| StorageError::Write {
            path: path.clone(),
            source,
        })?;

        let temp_path = path.with_extension("json.tmp");
        let result = fs::write(&temp_path, payload).and_then(|()| fs::rename(&temp_path, &path));

        if let Err(source) = result {
            // Leave no stray temp file behind on failure.
            let _ = fs::remove_file(&temp_path);
            return Err(StorageError::Write { path, source });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::models::{PoolType, Prize, Round};

    fn temp_store() -> FileStore {
        let dir = std::env::temp_dir().join(format!("lucky-draw-test-{}", uuid::Uuid::new_v4()));
        FileStore::new(dir)
    }

    #[test]
    fn missing_documents_load_defaults() {
        let store = temp_store();
        assert!(store.load_prizes().rounds.is_empty());
        assert!(store.load_draw_state().number_pool.is_empty());
        assert!(!store.load_roster().is_open);
        assert_eq!(store.load_config().numbers_per_row, 10);
    }

    #[test]
    fn prize_book_round_trips() {
        let store = temp_store();
        let book = PrizeBook {
            rounds: vec![Round {
                id: 1,
                name: "Opening".into(),
                pool_type: PoolType::Preset,
                prizes: vec![Prize {
                    id: "1-1".into(),
                    level: "First Prize".into(),
                    name: "Laptop".into(),
                    quantity: 2,
                    color: "#FFD700".into(),
                    sponsor: String::new(),
                    image: None,
                }],
            }],
        };

        store.save_prizes(&book).unwrap();
        assert_eq!(store.load_prizes(), book);

        let _ = fs::remove_dir_all(store.data_dir());
    }

    #[test]
    fn draw_state_round_trips() {
        let store = temp_store();
        let mut state = DrawState::default();
        state.number_pool = vec!["001".into(), "002".into()];
        state.prize_remaining.insert("1-1".into(), 2);
        state.all_winners.push("003".into());

        store.save_draw_state(&state).unwrap();
        assert_eq!(store.load_draw_state(), state);

        let _ = fs::remove_dir_all(store.data_dir());
    }

    #[test]
    fn corrupt_document_falls_back_to_defaults() {
        let store = temp_store();
        store.health_check().unwrap();
        fs::write(store.data_dir().join("config.json"), "{not json").unwrap();
        assert_eq!(store.load_config().numbers_per_row, 10);

        let _ = fs::remove_dir_all(store.data_dir());
    }
}
