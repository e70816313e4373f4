use crate::core::bank::RateTable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors arising when persisting the rate table.
///
/// Loading never surfaces these: a missing or malformed file falls
/// back to [`RateTable::defaults`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write rates file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize rate table: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The on-disk document: the edited bank list plus when it was saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedRates {
    pub banks: RateTable,
    pub updated_at: DateTime<Utc>,
}

/// File-backed JSON store for the edited rate table.
///
/// A thin key-value boundary: one path, one document. The engine never
/// touches it; the CLI loads a table here, hands it to the engine, and
/// saves edits back.
///
/// # Examples
///
/// ```no_run
/// use payout_engine::core::bank::RateTable;
/// use payout_engine::store::rates_store::RatesStore;
///
/// let store = RatesStore::new("rates.json");
/// let table = store.load(); // defaults if the file is absent
/// store.save(&table).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct RatesStore {
    path: PathBuf,
}

impl RatesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved rate table, falling back to the defaults when the
    /// file is absent or unreadable. Malformed JSON is logged and
    /// swallowed, never propagated.
    pub fn load(&self) -> RateTable {
        self.load_saved()
            .map(|saved| saved.banks)
            .unwrap_or_else(RateTable::defaults)
    }

    /// Load the saved document including its timestamp, if one exists.
    pub fn load_saved(&self) -> Option<SavedRates> {
        let content = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&content) {
            Ok(saved) => Some(saved),
            Err(e) => {
                log::warn!(
                    "ignoring malformed rates file {}: {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    /// Persist the rate table with the current timestamp.
    pub fn save(&self, banks: &RateTable) -> Result<(), StoreError> {
        let saved = SavedRates {
            banks: banks.clone(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&saved)?;
        fs::write(&self.path, json).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Remove the saved table so the next load returns the defaults.
    pub fn reset(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Write {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
