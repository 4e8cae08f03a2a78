use serde::Serialize;

use crate::error::{CoreError, Result};
use crate::services::ai::TranslationProvider;
use crate::services::translation_cache::{DictionaryStore, TranslationGate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordTranslation {
    pub translation: String,
    #[serde(rename = "fromCache")]
    pub from_cache: bool,
}

/// Cache first, provider on a miss, then remember the answer.
///
/// Provider and configuration errors are returned unchanged. A failed cache
/// write does not fail the call; the word simply misses again next time.
pub fn translate_word<S, P>(
    gate: &TranslationGate<S>,
    provider: &P,
    word: &str,
) -> Result<WordTranslation>
where
    S: DictionaryStore,
    P: TranslationProvider + ?Sized,
{
    let word = word.trim();
    if word.is_empty() {
        return Err(CoreError::InvalidRequest("text is required".into()));
    }

    let cached = gate.lookup(word);
    if let (true, Some(translation)) = (cached.from_cache, cached.translation) {
        return Ok(WordTranslation {
            translation,
            from_cache: true,
        });
    }

    tracing::debug!(word, "asking provider for translation");
    let translation = provider.translate(word)?;

    if let Err(e) = gate.record(word, &translation) {
        tracing::warn!(word, error = %e, "translation not cached");
    }

    Ok(WordTranslation {
        translation,
        from_cache: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::translation_cache::{Dictionary, MemoryStore};
    use std::cell::{Cell, RefCell};

    struct FakeProvider {
        calls: Cell<usize>,
        answers: RefCell<Vec<Result<String>>>,
    }

    impl FakeProvider {
        fn answering(answers: Vec<Result<String>>) -> Self {
            Self {
                calls: Cell::new(0),
                answers: RefCell::new(answers),
            }
        }
    }

    impl TranslationProvider for FakeProvider {
        fn translate(&self, _word: &str) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            self.answers.borrow_mut().remove(0)
        }
    }

    /// Reads fine, refuses every write.
    struct ReadOnlyStore(MemoryStore);

    impl DictionaryStore for ReadOnlyStore {
        fn read(&self) -> Result<Dictionary> {
            self.0.read()
        }
        fn write(&self, _dict: &Dictionary) -> Result<()> {
            Err(CoreError::persistence(None, "read-only"))
        }
    }

    #[test]
    fn provider_is_called_once_per_word() {
        let gate = TranslationGate::new(MemoryStore::new());
        let provider = FakeProvider::answering(vec![Ok("꿈".into()), Ok("different".into())]);

        let first = translate_word(&gate, &provider, "夢").unwrap();
        assert_eq!(first, WordTranslation { translation: "꿈".into(), from_cache: false });

        let second = translate_word(&gate, &provider, " 夢 ").unwrap();
        assert_eq!(second, WordTranslation { translation: "꿈".into(), from_cache: true });

        assert_eq!(provider.calls.get(), 1);
        assert_eq!(gate.dictionary().unwrap().get("夢").map(String::as_str), Some("꿈"));
    }

    #[test]
    fn provider_errors_propagate_and_nothing_is_cached() {
        let gate = TranslationGate::new(MemoryStore::new());
        let provider =
            FakeProvider::answering(vec![Err(CoreError::provider_status(503, "overloaded"))]);

        let err = translate_word(&gate, &provider, "夢").unwrap_err();
        assert_eq!(err.kind(), "provider");
        assert!(gate.dictionary().unwrap().is_empty());
    }

    #[test]
    fn config_errors_propagate_unchanged() {
        let gate = TranslationGate::new(MemoryStore::new());
        let missing_key = CoreError::config("GEMINI_API_KEY is not set", "set it");
        let provider = FakeProvider::answering(vec![Err(missing_key)]);
        assert_eq!(translate_word(&gate, &provider, "夢").unwrap_err().kind(), "config");
    }

    #[test]
    fn failed_cache_write_still_returns_translation() {
        let gate = TranslationGate::new(ReadOnlyStore(MemoryStore::new()));
        let provider = FakeProvider::answering(vec![Ok("꿈".into()), Ok("꿈".into())]);

        let first = translate_word(&gate, &provider, "夢").unwrap();
        assert_eq!(first.translation, "꿈");
        assert!(!first.from_cache);

        let second = translate_word(&gate, &provider, "夢").unwrap();
        assert!(!second.from_cache);
        assert_eq!(provider.calls.get(), 2);
    }

    #[test]
    fn cached_entries_are_never_rewritten_by_the_flow() {
        let gate = TranslationGate::new(MemoryStore::with_entries([("夢", "꿈")]));
        let provider = FakeProvider::answering(vec![]);

        for _ in 0..3 {
            let t = translate_word(&gate, &provider, "夢").unwrap();
            assert_eq!(t.translation, "꿈");
        }
        assert_eq!(provider.calls.get(), 0);
        assert_eq!(gate.dictionary().unwrap().len(), 1);
    }

    #[test]
    fn blank_word_is_rejected_before_lookup() {
        let gate = TranslationGate::new(MemoryStore::new());
        let provider = FakeProvider::answering(vec![]);
        assert_eq!(translate_word(&gate, &provider, "  ").unwrap_err().kind(), "invalid_request");
    }
}
