//! Learner-side records: saved words, study sessions and AI evaluations.

pub mod evaluations;
pub mod id;
pub mod store;
pub mod study;
pub mod vocabulary;

use crate::config::Config;

pub use evaluations::EvaluationHistory;
pub use store::JsonArrayStore;
pub use study::StudyHistory;
pub use vocabulary::Vocabulary;

pub struct Records {
    pub vocabulary: Vocabulary,
    pub study: StudyHistory,
    pub evaluations: EvaluationHistory,
}

impl Records {
    pub fn open(config: &Config) -> Self {
        Self {
            vocabulary: Vocabulary::new(JsonArrayStore::new(config.vocabulary_path())),
            study: StudyHistory::new(JsonArrayStore::new(config.study_history_path())),
            evaluations: EvaluationHistory::new(JsonArrayStore::new(
                config.evaluation_history_path(),
            )),
        }
    }
}
