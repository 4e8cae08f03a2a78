use serde::Serialize;

use super::store::{Dictionary, DictionaryStore};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lookup {
    pub translation: Option<String>,
    #[serde(rename = "fromCache")]
    pub from_cache: bool,
}

impl Lookup {
    pub fn hit(translation: String) -> Self {
        Self {
            translation: Some(translation),
            from_cache: true,
        }
    }

    pub fn miss() -> Self {
        Self {
            translation: None,
            from_cache: false,
        }
    }
}

/// Cache in front of an external translation capability.
///
/// The gate does not serialize access to its store: two concurrent
/// [`record`](Self::record) calls each rewrite the whole dictionary and the
/// later write wins.
pub struct TranslationGate<S> {
    store: S,
}

impl<S: DictionaryStore> TranslationGate<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// An unreadable dictionary counts as empty, so this can only miss, never
    /// return a wrong mapping.
    pub fn lookup(&self, word: &str) -> Lookup {
        let dict = match self.store.read() {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!(error = %e, "translation dictionary unreadable, treating as empty");
                return Lookup::miss();
            }
        };

        match dict.get(word) {
            Some(t) => {
                tracing::debug!(word, translation = %t, "translation cache hit");
                Lookup::hit(t.clone())
            }
            None => {
                tracing::debug!(word, "translation cache miss");
                Lookup::miss()
            }
        }
    }

    /// Inserts or overwrites `word` and persists the full dictionary.
    ///
    /// A failed read aborts before writing so an unreadable file is left as is.
    pub fn record(&self, word: &str, translation: &str) -> Result<()> {
        let mut dict = self.store.read()?;
        dict.insert(word.to_string(), translation.to_string());
        self.store.write(&dict)?;
        tracing::debug!(word, translation, "translation cached");
        Ok(())
    }

    pub fn dictionary(&self) -> Result<Dictionary> {
        self.store.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::services::translation_cache::store::{JsonFileStore, MemoryStore};
    use std::sync::{Arc, Barrier};
    use std::thread;

    struct BrokenStore;

    impl DictionaryStore for BrokenStore {
        fn read(&self) -> Result<Dictionary> {
            Err(CoreError::persistence(None, "disk on fire"))
        }
        fn write(&self, _dict: &Dictionary) -> Result<()> {
            panic!("must not write after a failed read");
        }
    }

    #[test]
    fn unknown_word_misses() {
        let gate = TranslationGate::new(MemoryStore::new());
        assert_eq!(gate.lookup("夢"), Lookup::miss());
    }

    #[test]
    fn recorded_word_hits() {
        let gate = TranslationGate::new(MemoryStore::new());
        gate.record("夢", "꿈").unwrap();

        let hit = gate.lookup("夢");
        assert_eq!(hit.translation.as_deref(), Some("꿈"));
        assert!(hit.from_cache);
        assert_eq!(gate.lookup("愛"), Lookup::miss());
    }

    #[test]
    fn record_overwrites() {
        let gate = TranslationGate::new(MemoryStore::with_entries([("夢", "old")]));
        gate.record("夢", "꿈").unwrap();
        assert_eq!(gate.lookup("夢"), Lookup::hit("꿈".into()));
    }

    #[test]
    fn survives_reopening_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translations.json");

        TranslationGate::new(JsonFileStore::new(&path))
            .record("見る", "보다")
            .unwrap();

        let reopened = TranslationGate::new(JsonFileStore::new(&path));
        assert_eq!(reopened.lookup("見る"), Lookup::hit("보다".into()));
    }

    #[test]
    fn unreadable_dictionary_always_misses_and_is_not_clobbered() {
        let gate = TranslationGate::new(BrokenStore);
        assert_eq!(gate.lookup("夢"), Lookup::miss());

        let err = gate.record("夢", "꿈").unwrap_err();
        assert_eq!(err.kind(), "persistence");
    }

    #[test]
    fn corrupt_file_is_kept_on_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translations.json");
        std::fs::write(&path, "{ broken").unwrap();

        let gate = TranslationGate::new(JsonFileStore::new(&path));
        assert_eq!(gate.lookup("夢"), Lookup::miss());
        assert!(gate.record("夢", "꿈").is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ broken");
    }

    #[test]
    fn lookup_serializes_with_front_end_field_names() {
        let v = serde_json::to_value(Lookup::miss()).unwrap();
        assert_eq!(v, serde_json::json!({ "translation": null, "fromCache": false }));
    }

    /// Holds both readers until each has taken its snapshot, forcing the
    /// read-read-write-write interleaving.
    struct InterleavingStore {
        inner: MemoryStore,
        barrier: Barrier,
    }

    impl DictionaryStore for InterleavingStore {
        fn read(&self) -> Result<Dictionary> {
            let snapshot = self.inner.read();
            self.barrier.wait();
            snapshot
        }
        fn write(&self, dict: &Dictionary) -> Result<()> {
            self.inner.write(dict)
        }
    }

    #[test]
    fn concurrent_records_for_disjoint_keys_lose_an_update() {
        let store = Arc::new(InterleavingStore {
            inner: MemoryStore::new(),
            barrier: Barrier::new(2),
        });

        let handles: Vec<_> = [("夢", "꿈"), ("愛", "사랑")]
            .into_iter()
            .map(|(word, translation)| {
                let store = Arc::clone(&store);
                thread::spawn(move || TranslationGate::new(&*store).record(word, translation))
            })
            .collect();

        for h in handles {
            h.join().unwrap().unwrap();
        }

        let dict = store.inner.read().unwrap();
        assert_eq!(dict.len(), 1, "one of the two updates is overwritten");
    }

    #[test]
    fn serialized_records_keep_both_updates() {
        let gate = TranslationGate::new(MemoryStore::new());
        gate.record("夢", "꿈").unwrap();
        gate.record("愛", "사랑").unwrap();
        assert_eq!(gate.dictionary().unwrap().len(), 2);
    }
}
