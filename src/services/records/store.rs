use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{CoreError, Result};
use crate::services::persist::write_atomic;

/// A JSON array of records in one file, loaded and saved as a whole.
#[derive(Debug, Clone)]
pub struct JsonArrayStore<T> {
    path: PathBuf,
    _record: PhantomData<T>,
}

impl<T: Serialize + DeserializeOwned> JsonArrayStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<T>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let data = fs::read_to_string(&self.path)
            .map_err(|e| CoreError::persistence(self.path.clone(), e.to_string()))?;

        if data.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&data)
            .map_err(|e| CoreError::persistence(self.path.clone(), format!("corrupt records: {e}")))
    }

    pub fn save(&self, records: &[T]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        write_atomic(&self.path, json.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_blank_files_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonArrayStore<String> = JsonArrayStore::new(dir.path().join("x.json"));
        assert!(store.load().unwrap().is_empty());

        fs::write(store.path(), "  \n").unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonArrayStore<String> = JsonArrayStore::new(dir.path().join("x.json"));
        fs::write(store.path(), "{}").unwrap();
        assert_eq!(store.load().unwrap_err().kind(), "persistence");
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store: JsonArrayStore<String> = JsonArrayStore::new(dir.path().join("x.json"));
        store.save(&["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(store.load().unwrap(), vec!["a", "b"]);
    }
}
