use std::collections::BTreeSet;

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;

use super::id::new_id;
use super::store::JsonArrayStore;
use crate::error::Result;
use crate::model::records::StudyRecord;
use crate::model::song::SongRef;

const RECENT_STUDIES: usize = 10;

/// Aggregates shown on the learner's statistics screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyStats {
    pub total_songs: usize,
    pub total_translations: usize,
    pub total_words: usize,
    pub streak: u32,
    pub recent: Vec<StudyRecord>,
}

pub struct StudyHistory {
    store: JsonArrayStore<StudyRecord>,
}

impl StudyHistory {
    pub fn new(store: JsonArrayStore<StudyRecord>) -> Self {
        Self { store }
    }

    /// Newest first.
    pub fn list(&self) -> Result<Vec<StudyRecord>> {
        self.store.load()
    }

    pub fn add(
        &self,
        song: &SongRef,
        translation_count: usize,
        now: DateTime<Utc>,
    ) -> Result<StudyRecord> {
        let mut records = self.store.load()?;
        let record = StudyRecord {
            id: new_id(&format!("{}\u{1f}{}", song.title, song.artist), now),
            song_title: song.title.clone(),
            song_artist: song.artist.clone(),
            translation_count,
            date: now,
        };
        records.insert(0, record.clone());
        self.store.save(&records)?;
        Ok(record)
    }

    pub fn streak(&self, today: NaiveDate) -> Result<u32> {
        Ok(study_streak(&self.store.load()?, today))
    }

    pub fn stats(&self, total_words: usize, today: NaiveDate) -> Result<StudyStats> {
        Ok(study_stats(&self.store.load()?, total_words, today))
    }
}

/// `records` is newest first, so `recent` keeps the first ten.
pub fn study_stats(records: &[StudyRecord], total_words: usize, today: NaiveDate) -> StudyStats {
    StudyStats {
        total_songs: records.len(),
        total_translations: records.iter().map(|r| r.translation_count).sum(),
        total_words,
        streak: study_streak(records, today),
        recent: records.iter().take(RECENT_STUDIES).cloned().collect(),
    }
}

/// Consecutive days, ending today, with at least one study record (UTC days).
pub fn study_streak(records: &[StudyRecord], today: NaiveDate) -> u32 {
    let days: BTreeSet<NaiveDate> = records.iter().map(|r| r.date.date_naive()).collect();

    let mut streak = 0u32;
    let mut day = today;
    while days.contains(&day) {
        streak += 1;
        day = match day.checked_sub_days(Days::new(1)) {
            Some(d) => d,
            None => break,
        };
    }
    streak
}
