use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::error::{CoreError, Result};
use crate::services::persist::write_atomic;

/// Word → translation. Keys are unique; ordering is only for stable output.
pub type Dictionary = BTreeMap<String, String>;

/// Whole-document persistence for the translation dictionary.
pub trait DictionaryStore {
    fn read(&self) -> Result<Dictionary>;
    fn write(&self, dict: &Dictionary) -> Result<()>;
}

impl<S: DictionaryStore + ?Sized> DictionaryStore for &S {
    fn read(&self) -> Result<Dictionary> {
        (**self).read()
    }

    fn write(&self, dict: &Dictionary) -> Result<()> {
        (**self).write(dict)
    }
}

/// Dictionary kept as a single pretty-printed JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DictionaryStore for JsonFileStore {
    fn read(&self) -> Result<Dictionary> {
        if !self.path.exists() {
            return Ok(Dictionary::new());
        }

        let data = fs::read_to_string(&self.path)
            .map_err(|e| CoreError::persistence(self.path.clone(), e.to_string()))?;

        serde_json::from_str(&data).map_err(|e| {
            CoreError::persistence(self.path.clone(), format!("corrupt dictionary: {e}"))
        })
    }

    fn write(&self, dict: &Dictionary) -> Result<()> {
        let json = serde_json::to_string_pretty(dict)?;
        write_atomic(&self.path, json.as_bytes())
    }
}

/// In-process store, mostly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Dictionary>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let dict = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            inner: Mutex::new(dict),
        }
    }
}

impl DictionaryStore for MemoryStore {
    fn read(&self) -> Result<Dictionary> {
        self.inner
            .lock()
            .map(|d| d.clone())
            .map_err(|_| CoreError::persistence(None, "memory store poisoned"))
    }

    fn write(&self, dict: &Dictionary) -> Result<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| CoreError::persistence(None, "memory store poisoned"))?;
        *guard = dict.clone();
        Ok(())
    }
}
