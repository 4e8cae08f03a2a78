#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    LyricsClean,
    LyricsClassify,
    LyricsFetch,
    LyricsImport,
    EncodingDetect,
    SongsSearch,
    Tokenize,
    Translate,
    TranslateLookup,
    TranslateRecord,
    TranslateDictionary,
    Evaluate,
    VideoSearch,
    VocabularyList,
    VocabularyAdd,
    VocabularyRemove,
    VocabularyContains,
    HistoryList,
    HistoryAdd,
    HistoryStreak,
    HistoryStats,
    EvaluationsList,
    EvaluationsAdd,
    EvaluationsRemove,
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "ping" => Command::Ping,
            "lyrics.clean" => Command::LyricsClean,
            "lyrics.classify" => Command::LyricsClassify,
            "lyrics.fetch" => Command::LyricsFetch,
            "lyrics.import" => Command::LyricsImport,
            "encoding.detect" => Command::EncodingDetect,
            "songs.search" => Command::SongsSearch,
            "tokenize" => Command::Tokenize,
            "translate" => Command::Translate,
            "translate.lookup" => Command::TranslateLookup,
            "translate.record" => Command::TranslateRecord,
            "translate.dictionary" => Command::TranslateDictionary,
            "evaluate" => Command::Evaluate,
            "video.search" => Command::VideoSearch,
            "vocabulary.list" => Command::VocabularyList,
            "vocabulary.add" => Command::VocabularyAdd,
            "vocabulary.remove" => Command::VocabularyRemove,
            "vocabulary.contains" => Command::VocabularyContains,
            "history.list" => Command::HistoryList,
            "history.add" => Command::HistoryAdd,
            "history.streak" => Command::HistoryStreak,
            "history.stats" => Command::HistoryStats,
            "evaluations.list" => Command::EvaluationsList,
            "evaluations.add" => Command::EvaluationsAdd,
            "evaluations.remove" => Command::EvaluationsRemove,
            _ => Command::Unknown,
        }
    }
}
