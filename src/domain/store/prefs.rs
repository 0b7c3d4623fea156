use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::fs;

use crate::domain::store::PreferenceStore;
use crate::error::Result;

/// Purely in-memory preferences, for tests and embedded use.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.inner.read().expect("RwLock poisoned").get(key).cloned())
    }

    async fn store(&self, key: &str, value: &str) -> Result<()> {
        self.inner.write().expect("RwLock poisoned").insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences persisted as a flat JSON object in one file, used by the
/// CLI to remember last-used filters between runs.
///
/// The file is rewritten on every store; preference volume is a handful
/// of keys, so no incremental writing is needed.
#[derive(Debug, Clone)]
pub struct JsonPreferenceStore {
    path: PathBuf,
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl JsonPreferenceStore {
    /// Opens (or initializes) the preference file at `path`. A missing
    /// file starts empty; an unreadable one is logged and starts empty
    /// rather than failing startup.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let initial = match fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str::<HashMap<String, String>>(&data).unwrap_or_else(|e| {
                log::warn!("Preference file '{}' is malformed ({}), starting empty", path.display(), e);
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };

        JsonPreferenceStore { path, inner: Arc::new(RwLock::new(initial)) }
    }

    fn flush(&self) -> Result<()> {
        let guard = self.inner.read().expect("RwLock poisoned");
        let data = serde_json::to_string_pretty(&*guard)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for JsonPreferenceStore {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.inner.read().expect("RwLock poisoned").get(key).cloned())
    }

    async fn store(&self, key: &str, value: &str) -> Result<()> {
        self.inner.write().expect("RwLock poisoned").insert(key.to_string(), value.to_string());
        self.flush()
    }
}
