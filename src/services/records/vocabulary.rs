use chrono::{DateTime, Utc};

use super::id::new_id;
use super::store::JsonArrayStore;
use crate::error::{CoreError, Result};
use crate::model::records::VocabularyWord;
use crate::model::song::SongRef;
use crate::model::token::Token;

pub struct Vocabulary {
    store: JsonArrayStore<VocabularyWord>,
}

impl Vocabulary {
    pub fn new(store: JsonArrayStore<VocabularyWord>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<VocabularyWord>> {
        self.store.load()
    }

    /// Appends a word taken from a tokenized lyric line.
    pub fn add_word(
        &self,
        token: &Token,
        meaning: Option<String>,
        song: &SongRef,
        now: DateTime<Utc>,
    ) -> Result<VocabularyWord> {
        if token.text.trim().is_empty() {
            return Err(CoreError::InvalidRequest("word text is required".into()));
        }

        let mut words = self.store.load()?;
        let word = VocabularyWord {
            id: new_id(&token.text, now),
            text: token.text.clone(),
            reading: token.reading.clone(),
            base_form: token.base_form.clone(),
            pos: token.pos.clone(),
            meaning,
            song_title: song.title.clone(),
            song_artist: song.artist.clone(),
            added_at: now,
        };
        words.push(word.clone());
        self.store.save(&words)?;

        tracing::debug!(id = %word.id, text = %word.text, "vocabulary word saved");
        Ok(word)
    }

    /// Returns whether a word with that id existed.
    pub fn remove_word(&self, id: &str) -> Result<bool> {
        let mut words = self.store.load()?;
        let before = words.len();
        words.retain(|w| w.id != id);
        if words.len() == before {
            return Ok(false);
        }
        self.store.save(&words)?;
        Ok(true)
    }

    pub fn is_word_saved(&self, text: &str) -> Result<bool> {
        Ok(self.store.load()?.iter().any(|w| w.text == text))
    }
}
