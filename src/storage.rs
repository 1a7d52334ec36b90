//! Storage layer for checklist
//!
//! All state lives in one data directory:
//!
//! ```text
//! <data dir>/
//!   items.json       # {"<decimal id>": {"title", "tags", "status"}, ...}
//!   counter.txt      # next id to assign, bare decimal
//!   checklist.lock   # advisory lock held for a command's duration
//! ```
//!
//! `save` writes the counter first, then the items. Each file is replaced
//! atomically, but the pair is not: a crash between the two writes can leave
//! them out of step. [`Store::from_parts`] raises a counter that lags behind
//! the stored ids on the next load.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::item::{Item, RawItem};
use crate::lock::{self, DataLock, DEFAULT_LOCK_TIMEOUT_MS};
use crate::store::Store;

pub const ITEMS_FILE: &str = "items.json";
pub const COUNTER_FILE: &str = "counter.txt";
pub const LOCK_FILE: &str = "checklist.lock";

/// Storage manager for the checklist data directory
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
    lock_timeout_ms: u64,
}

impl Storage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock_timeout_ms: DEFAULT_LOCK_TIMEOUT_MS,
        }
    }

    pub fn with_lock_timeout(mut self, timeout_ms: u64) -> Self {
        self.lock_timeout_ms = timeout_ms;
        self
    }

    // =========================================================================
    // Path accessors
    // =========================================================================

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn items_file(&self) -> PathBuf {
        self.dir.join(ITEMS_FILE)
    }

    pub fn counter_file(&self) -> PathBuf {
        self.dir.join(COUNTER_FILE)
    }

    pub fn lock_file(&self) -> PathBuf {
        self.dir.join(LOCK_FILE)
    }

    // =========================================================================
    // Load / save
    // =========================================================================

    /// Read the full store from disk.
    ///
    /// Missing or empty files mean an empty store; a missing or unparseable
    /// counter means `0`. A malformed items document is an error.
    pub fn load(&self) -> Result<Store> {
        let items_path = self.items_file();
        let items = match read_optional(&items_path)? {
            Some(text) => parse_items(&text, &items_path)?,
            None => BTreeMap::new(),
        };

        let counter = read_optional(&self.counter_file())?
            .map(|text| parse_counter(&text))
            .unwrap_or(0);

        let store = Store::from_parts(items, counter);
        tracing::debug!(
            dir = %self.dir.display(),
            items = store.len(),
            counter = store.counter(),
            "store loaded"
        );
        Ok(store)
    }

    /// Write the counter, then the items document.
    pub fn save(&self, store: &Store) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        lock::write_atomic(self.counter_file(), store.counter().to_string().as_bytes())?;

        let json = serde_json::to_string_pretty(store.items())?;
        lock::write_atomic(self.items_file(), json.as_bytes())?;

        tracing::debug!(
            dir = %self.dir.display(),
            items = store.len(),
            counter = store.counter(),
            "store saved"
        );
        Ok(())
    }

    /// Run a read-only query against a freshly loaded store.
    pub fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Store) -> Result<T>,
    {
        let _lock = DataLock::acquire(self.lock_file(), self.lock_timeout_ms)?;
        let store = self.load()?;
        f(&store)
    }

    /// Load, mutate and save while holding the data directory lock.
    ///
    /// The store is saved whenever `f` succeeds, even if it changed nothing.
    pub fn update<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Store) -> Result<T>,
    {
        let _lock = DataLock::acquire(self.lock_file(), self.lock_timeout_ms)?;
        let mut store = self.load()?;
        let result = f(&mut store)?;
        self.save(&store)?;
        Ok(result)
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(Error::Io(err)),
    }
}

/// Parse and validate the items document.
fn parse_items(text: &str, path: &Path) -> Result<BTreeMap<u64, Item>> {
    if text.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let raw: BTreeMap<String, RawItem> = serde_json::from_str(text)?;
    let mut items = BTreeMap::new();
    for (key, entry) in raw {
        let id: u64 = key.trim().parse().map_err(|_| Error::InvalidData {
            path: path.to_path_buf(),
            message: format!("item key '{key}' is not a non-negative integer"),
        })?;
        let item = Item::from_raw(entry).ok_or_else(|| Error::InvalidData {
            path: path.to_path_buf(),
            message: format!("item '{key}' has no title"),
        })?;
        if items.insert(id, item).is_some() {
            return Err(Error::InvalidData {
                path: path.to_path_buf(),
                message: format!("item id {id} appears more than once"),
            });
        }
    }
    Ok(items)
}

/// Parse the counter file, falling back to `0` on anything unreadable.
fn parse_counter(text: &str) -> u64 {
    let trimmed = text.trim();
    if let Ok(value) = trimmed.parse::<u64>() {
        return value;
    }
    // Older files may hold a float rendering such as "3.0". Only whole values
    // that fit in a u64 are taken; 2^64 is the first float past u64::MAX.
    match trimmed.parse::<f64>() {
        Ok(value) if value >= 0.0 && value.fract() == 0.0 && value < 18_446_744_073_709_551_616.0 => {
            value as u64
        }
        _ => 0,
    }
}
