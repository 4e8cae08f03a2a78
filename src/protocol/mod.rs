//! Line-delimited JSON protocol.
//!
//! Request: `{"id": .., "cmd": "..", "payload": {..}}`. Every request gets
//! exactly one response line carrying the same `id`.

use std::path::PathBuf;

use chrono::Utc;
use serde_json::{json, Value};

use crate::config::Config;
use crate::error::{CoreError, Result};
use crate::model::song::SongRef;
use crate::services::ai::{extract_score, Evaluator, GeminiClient, TranslationProvider};
use crate::services::ai_types::Evaluation;
use crate::services::genius::{GeniusClient, LyricsProvider, SongSearch};
use crate::services::lyrics::{self, classify, CleanedLyrics};
use crate::services::records::Records;
use crate::services::tokenizer::{self, Tokenizer};
use crate::services::translation_cache::{JsonFileStore, TranslationGate};
use crate::services::youtube::{VideoSearch, YouTubeClient};
use crate::services::{encoding, pipeline};

mod command;
mod payload;

use command::Command;

/// Everything a request may touch, wired once at startup.
pub struct Core {
    pub gate: TranslationGate<JsonFileStore>,
    pub songs: Box<dyn SongSearch>,
    pub lyrics: Box<dyn LyricsProvider>,
    pub translator: Box<dyn TranslationProvider>,
    pub evaluator: Box<dyn Evaluator>,
    pub videos: Box<dyn VideoSearch>,
    pub tokenizer: Box<dyn Tokenizer>,
    pub records: Records,
}

impl Core {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            gate: TranslationGate::new(JsonFileStore::new(config.dictionary_path())),
            songs: Box::new(GeniusClient::new(config)?),
            lyrics: Box::new(GeniusClient::new(config)?),
            translator: Box::new(GeminiClient::new(config)?),
            evaluator: Box::new(GeminiClient::new(config)?),
            videos: Box::new(YouTubeClient::new(config)?),
            tokenizer: tokenizer::default_tokenizer(),
            records: Records::open(config),
        })
    }
}

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload(req: &Value) -> &Value {
    static EMPTY: Value = Value::Null;
    req.get("payload").unwrap_or(&EMPTY)
}

fn ok(id: Value, payload: Value) -> String {
    json!({
        "id": id,
        "status": "ok",
        "payload": payload
    })
    .to_string()
}

fn err(id: Value, e: &CoreError) -> String {
    json!({
        "id": id,
        "status": "error",
        "kind": e.kind(),
        "message": e.to_string()
    })
    .to_string()
}

fn lyrics_payload(cleaned: &CleanedLyrics) -> Value {
    let lines: Vec<&str> = cleaned.lines().collect();
    json!({ "lyrics": cleaned, "lines": lines })
}

/// Parses one request line and renders exactly one response line. Never
/// fails: bad JSON and command errors both become `"status": "error"`.
pub fn handle(core: &Core, input: &str) -> String {
    let req: Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(_) => {
            return json!({
                "status": "error",
                "message": "invalid json"
            })
            .to_string();
        }
    };

    let id = get_id(&req);
    let cmd_str = get_cmd(&req);
    let payload = get_payload(&req);

    tracing::debug!(cmd = cmd_str, "request");

    match dispatch(core, Command::from(cmd_str), payload) {
        Ok(v) => ok(id, v),
        Err(e) => {
            tracing::warn!(cmd = cmd_str, kind = e.kind(), error = %e, "request failed");
            err(id, &e)
        }
    }
}

/// Owns payload decoding and the call into the service for each command;
/// the returned value becomes the response `payload`.
fn dispatch(core: &Core, cmd: Command, payload: &Value) -> Result<Value> {
    match cmd {
        Command::Ping => Ok(json!({ "message": "kashi-core alive" })),

        Command::LyricsClean => {
            let p: payload::Text = payload::parse(payload)?;
            Ok(lyrics_payload(&lyrics::normalize(&p.text)))
        }

        Command::LyricsClassify => {
            let p: payload::Line = payload::parse(payload)?;
            let reason = classify::classify(&p.line);
            Ok(json!({ "keep": reason.is_none(), "reason": reason }))
        }

        Command::LyricsFetch => {
            let p: payload::Song = payload::parse(payload)?;
            let raw = core.lyrics.fetch_lyrics(&p.title, &p.artist)?;
            Ok(lyrics_payload(&lyrics::normalize(&raw)))
        }

        Command::LyricsImport => {
            let p: payload::FilePath = payload::parse(payload)?;
            let decoded = encoding::decode_lyrics_file(&PathBuf::from(p.path))?;
            let cleaned = lyrics::normalize(&decoded.text);
            let mut out = lyrics_payload(&cleaned);
            out["encoding"] = json!(decoded.encoding);
            out["lossy"] = json!(decoded.lossy);
            Ok(out)
        }

        Command::EncodingDetect => {
            let p: payload::FilePath = payload::parse(payload)?;
            let result = encoding::detect_from_file(&PathBuf::from(p.path))?;
            Ok(serde_json::to_value(result)?)
        }

        Command::SongsSearch => {
            let p: payload::Search = payload::parse(payload)?;
            Ok(serde_json::to_value(core.songs.search(&p.q, p.page)?)?)
        }

        Command::Tokenize => {
            let p: payload::Text = payload::parse(payload)?;
            let cleaned = lyrics::normalize(&p.text);
            let lines = tokenizer::tokenize_lyrics(core.tokenizer.as_ref(), &cleaned);
            Ok(json!({ "lines": lines }))
        }

        Command::Translate => {
            let p: payload::Text = payload::parse(payload)?;
            let t = pipeline::translate_word(&core.gate, core.translator.as_ref(), &p.text)?;
            Ok(serde_json::to_value(t)?)
        }

        Command::TranslateLookup => {
            let p: payload::Text = payload::parse(payload)?;
            Ok(serde_json::to_value(core.gate.lookup(p.text.trim()))?)
        }

        Command::TranslateRecord => {
            let p: payload::Record = payload::parse(payload)?;
            let word = p.text.trim();
            if word.is_empty() || p.translation.trim().is_empty() {
                return Err(CoreError::InvalidRequest(
                    "text and translation are required".into(),
                ));
            }
            core.gate.record(word, p.translation.trim())?;
            Ok(json!({}))
        }

        Command::TranslateDictionary => {
            let translations = core.gate.dictionary()?;
            let count = translations.len();
            Ok(json!({ "translations": translations, "count": count }))
        }

        Command::Evaluate => {
            let p: payload::Evaluate = payload::parse(payload)?;
            let lines = p.lyrics.into_lines();
            Ok(serde_json::to_value(core.evaluator.evaluate(&lines, &p.translations)?)?)
        }

        Command::VideoSearch => {
            let p: payload::Song = payload::parse(payload)?;
            // A missing video never fails the request; the caller just shows no player.
            match core.videos.search_video(&p.title, &p.artist) {
                Ok(Some(hit)) => Ok(serde_json::to_value(hit)?),
                Ok(None) => Ok(json!({ "videoId": null, "error": "video not found" })),
                Err(e) => {
                    tracing::warn!(error = %e, "video search failed");
                    Ok(json!({ "videoId": null, "error": e.to_string() }))
                }
            }
        }

        Command::VocabularyList => Ok(json!({ "words": core.records.vocabulary.list()? })),

        Command::VocabularyAdd => {
            let p: payload::AddWord = payload::parse(payload)?;
            let song = SongRef { title: p.title, artist: p.artist };
            let word = core.records.vocabulary.add_word(&p.token, p.meaning, &song, Utc::now())?;
            Ok(json!({ "word": word }))
        }

        Command::VocabularyRemove => {
            let p: payload::Id = payload::parse(payload)?;
            Ok(json!({ "removed": core.records.vocabulary.remove_word(&p.id)? }))
        }

        Command::VocabularyContains => {
            let p: payload::Text = payload::parse(payload)?;
            Ok(json!({ "saved": core.records.vocabulary.is_word_saved(&p.text)? }))
        }

        Command::HistoryList => Ok(json!({ "records": core.records.study.list()? })),

        Command::HistoryAdd => {
            let p: payload::AddStudy = payload::parse(payload)?;
            let song = SongRef { title: p.title, artist: p.artist };
            let record = core.records.study.add(&song, p.translation_count, Utc::now())?;
            Ok(json!({ "record": record }))
        }

        Command::HistoryStreak => {
            let streak = core.records.study.streak(Utc::now().date_naive())?;
            Ok(json!({ "streak": streak }))
        }

        Command::HistoryStats => {
            let total_words = core.records.vocabulary.list()?.len();
            let stats = core.records.study.stats(total_words, Utc::now().date_naive())?;
            Ok(serde_json::to_value(stats)?)
        }

        Command::EvaluationsList => {
            let records = core.records.evaluations.list(Utc::now())?;
            Ok(json!({ "records": records }))
        }

        Command::EvaluationsAdd => {
            let p: payload::AddEvaluation = payload::parse(payload)?;
            let song = SongRef { title: p.title, artist: p.artist };
            let score = p.score.or_else(|| extract_score(&p.evaluation));
            let evaluation = Evaluation { evaluation: p.evaluation, score };
            let record =
                core.records.evaluations.add(&song, p.translations, evaluation, Utc::now())?;
            Ok(json!({ "record": record }))
        }

        Command::EvaluationsRemove => {
            let p: payload::Id = payload::parse(payload)?;
            Ok(json!({ "removed": core.records.evaluations.remove(&p.id)? }))
        }

        Command::Unknown => Err(CoreError::InvalidRequest("unknown command".into())),
    }
}
