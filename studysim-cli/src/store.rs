//! Local key-value store for the plan, subjects and the last saved result.
//!
//! Reads for display are best effort, like a browser's local storage: a
//! missing or corrupt value reads back as the caller's default. Reads that
//! feed a write use [`load_existing`] so a corrupt record is never replaced.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};

pub const STUDY_PLAN_KEY: &str = "studyPlan";
pub const SUBJECTS_KEY: &str = "subjects";
pub const SAVED_SIMULATION_KEY: &str = "savedSimulation";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// One `<key>.json` file per key under `<home>/store`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(home: &Path) -> Result<Self> {
        let dir = home.join("store");
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub(crate) fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Last write time of a key, for noticing changes made elsewhere.
    pub fn modified(&self, key: &str) -> Option<SystemTime> {
        fs::metadata(self.path_for(key))
            .and_then(|m| m.modified())
            .ok()
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let p = self.path_for(key);
        match fs::read_to_string(&p) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("read {}", p.display())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let p = self.path_for(key);
        // Readers never see a partially written record.
        let tmp = p.with_extension("json.tmp");
        fs::write(&tmp, value).with_context(|| format!("write {}", tmp.display()))?;
        fs::rename(&tmp, &p).with_context(|| format!("rename to {}", p.display()))?;
        debug!(key, path = %p.display(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let p = self.path_for(key);
        match fs::remove_file(&p) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("remove {}", p.display())),
        }
    }
}

/// Read and decode `key`, falling back to `default` on any failure.
pub fn load_or<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str, default: T) -> T {
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "stored value is corrupt, using default");
                default
            }
        },
        Ok(None) => default,
        Err(e) => {
            warn!(key, error = %e, "could not read stored value, using default");
            default
        }
    }
}

/// Read and decode `key`; `None` when absent, an error when corrupt.
pub fn load_existing<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).with_context(|| {
        format!("stored {key} is corrupt; fix or delete it before changing it")
    })?;
    Ok(Some(value))
}

pub fn save<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).with_context(|| format!("serialize {key}"))?;
    store.set(key, &json)
}
