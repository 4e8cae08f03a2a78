use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use super::id::new_id;
use super::store::JsonArrayStore;
use crate::error::Result;
use crate::model::records::EvaluationRecord;
use crate::model::song::SongRef;
use crate::services::ai_types::Evaluation;

/// Evaluations older than this are dropped when the history is listed.
pub const RETENTION_DAYS: i64 = 7;

pub struct EvaluationHistory {
    store: JsonArrayStore<EvaluationRecord>,
}

impl EvaluationHistory {
    pub fn new(store: JsonArrayStore<EvaluationRecord>) -> Self {
        Self { store }
    }

    /// Newest first, with expired records pruned from disk.
    pub fn list(&self, now: DateTime<Utc>) -> Result<Vec<EvaluationRecord>> {
        let records = self.store.load()?;
        let before = records.len();
        let kept = prune_expired(records, now);

        if kept.len() != before {
            tracing::debug!(removed = before - kept.len(), "pruned expired evaluations");
            self.store.save(&kept)?;
        }

        Ok(kept)
    }

    pub fn add(
        &self,
        song: &SongRef,
        translations: BTreeMap<usize, String>,
        evaluation: Evaluation,
        now: DateTime<Utc>,
    ) -> Result<EvaluationRecord> {
        let mut records = self.store.load()?;
        let record = EvaluationRecord {
            id: new_id(&evaluation.evaluation, now),
            song_title: song.title.clone(),
            song_artist: song.artist.clone(),
            translations,
            evaluation: evaluation.evaluation,
            score: evaluation.score,
            date: now,
        };
        records.insert(0, record.clone());
        self.store.save(&records)?;
        Ok(record)
    }

    pub fn remove(&self, id: &str) -> Result<bool> {
        let mut records = self.store.load()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Ok(false);
        }
        self.store.save(&records)?;
        Ok(true)
    }
}

pub fn prune_expired(records: Vec<EvaluationRecord>, now: DateTime<Utc>) -> Vec<EvaluationRecord> {
    let cutoff = now - Duration::days(RETENTION_DAYS);
    records.into_iter().filter(|r| r.date > cutoff).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song() -> SongRef {
        SongRef { title: "Lemon".into(), artist: "米津玄師".into() }
    }

    fn evaluation(score: Option<u32>) -> Evaluation {
        Evaluation { evaluation: "Score: 80/100".into(), score }
    }

    #[test]
    fn old_records_are_pruned_on_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("evaluation_history.json");
        let history = EvaluationHistory::new(JsonArrayStore::new(&path));
        let now = Utc::now();

        let stale_at = now - Duration::days(8);
        history.add(&song(), BTreeMap::new(), evaluation(Some(80)), stale_at).unwrap();

        let translations = BTreeMap::from([(0, "꿈이라면".to_string())]);
        let fresh = history
            .add(&song(), translations, evaluation(None), now - Duration::days(1))
            .unwrap();

        let listed = history.list(now).unwrap();
        assert_eq!(listed, vec![fresh.clone()]);

        let on_disk: JsonArrayStore<EvaluationRecord> = JsonArrayStore::new(&path);
        let stored = on_disk.load().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].translations.get(&0).map(String::as_str), Some("꿈이라면"));
    }

    #[test]
    fn remove_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let history = EvaluationHistory::new(JsonArrayStore::new(dir.path().join("e.json")));
        let now = Utc::now();
        let rec = history.add(&song(), BTreeMap::new(), evaluation(Some(90)), now).unwrap();

        assert!(history.remove(&rec.id).unwrap());
        assert!(!history.remove(&rec.id).unwrap());
        assert!(history.list(now).unwrap().is_empty());
    }

    #[test]
    fn exactly_seven_days_old_is_expired() {
        let now = Utc::now();
        let rec = EvaluationRecord {
            id: "a".into(),
            song_title: String::new(),
            song_artist: String::new(),
            translations: BTreeMap::new(),
            evaluation: String::new(),
            score: None,
            date: now - Duration::days(RETENTION_DAYS),
        };
        assert!(prune_expired(vec![rec], now).is_empty());
    }
}
