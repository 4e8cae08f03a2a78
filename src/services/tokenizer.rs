//! Splitting lyric lines into words.
//!
//! [`DictionaryTokenizer`] runs morphological analysis over the IPADIC
//! dictionary and is what the core uses. [`ScriptTokenizer`] needs no
//! dictionary: it cuts a line wherever the script changes and only serves
//! as a fallback when the dictionary cannot be loaded.

use lindera::{DictionaryConfig, DictionaryKind, Mode, TokenizerConfig};

use crate::error::{CoreError, Result};
use crate::model::token::Token;
use crate::services::lyrics::CleanedLyrics;
use crate::services::script::{self, Script};

pub trait Tokenizer {
    fn tokenize(&self, line: &str) -> Vec<Token>;
}

// IPADIC feature columns.
const POS: usize = 0;
const POS_DETAIL: usize = 1;
const BASE_FORM: usize = 6;
const READING: usize = 7;

pub struct DictionaryTokenizer {
    inner: lindera::Tokenizer,
}

impl DictionaryTokenizer {
    /// Loads the IPADIC dictionary embedded in the binary.
    pub fn new() -> Result<Self> {
        let config = TokenizerConfig {
            dictionary: DictionaryConfig {
                kind: Some(DictionaryKind::IPADIC),
                path: None,
            },
            user_dictionary: None,
            mode: Mode::Normal,
        };

        let inner = lindera::Tokenizer::from_config(config).map_err(|e| {
            CoreError::config(
                format!("cannot load the IPADIC dictionary: {e}"),
                "Rebuild with the lindera `ipadic` feature enabled",
            )
        })?;

        Ok(Self { inner })
    }
}

impl Tokenizer for DictionaryTokenizer {
    fn tokenize(&self, line: &str) -> Vec<Token> {
        let mut analyzed = match self.inner.tokenize(line) {
            Ok(tokens) => tokens,
            Err(e) => {
                tracing::warn!(error = %e, "morphological analysis failed; splitting by script");
                return ScriptTokenizer.tokenize(line);
            }
        };

        let mut tokens = Vec::with_capacity(analyzed.len());
        for token in analyzed.iter_mut() {
            let text = token.text.to_string();
            if text.trim().is_empty() {
                continue;
            }

            let details = token.get_details().unwrap_or_default();
            let field = |i: usize| {
                details
                    .get(i)
                    .copied()
                    .filter(|v| !v.is_empty() && *v != "*" && *v != "UNK")
            };

            // Unknown words carry no reading; fall back to the surface form.
            let reading = field(READING).map_or_else(|| text.clone(), str::to_string);
            let base_form = field(BASE_FORM).map_or_else(|| text.clone(), str::to_string);

            tokens.push(Token {
                pos: field(POS).unwrap_or("*").to_string(),
                pos_detail: field(POS_DETAIL).unwrap_or("*").to_string(),
                text,
                reading,
                base_form,
            });
        }
        tokens
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptTokenizer;

impl Tokenizer for ScriptTokenizer {
    fn tokenize(&self, line: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut run = String::new();
        let mut run_script: Option<Script> = None;

        for ch in line.chars() {
            let s = Script::of(ch);
            if run_script != Some(s) {
                if let Some(prev) = run_script.take() {
                    push_run(&mut tokens, std::mem::take(&mut run), prev);
                }
                run_script = Some(s);
            }
            run.push(ch);
        }

        if let Some(prev) = run_script {
            push_run(&mut tokens, run, prev);
        }

        tokens
    }
}

fn push_run(tokens: &mut Vec<Token>, text: String, s: Script) {
    if s == Script::Whitespace {
        return;
    }

    let reading = match s {
        Script::Hiragana => script::to_katakana(&text),
        _ => text.clone(),
    };

    tokens.push(Token {
        base_form: text.clone(),
        text,
        reading,
        pos: s.as_str().to_string(),
        pos_detail: "*".to_string(),
    });
}

/// The dictionary tokenizer, or the script splitter if the dictionary
/// cannot be loaded.
pub fn default_tokenizer() -> Box<dyn Tokenizer> {
    match DictionaryTokenizer::new() {
        Ok(t) => Box::new(t),
        Err(e) => {
            tracing::warn!(error = %e, "falling back to script-run tokenization");
            Box::new(ScriptTokenizer)
        }
    }
}

/// Tokenizes every line of an already-cleaned lyric.
pub fn tokenize_lyrics<T: Tokenizer + ?Sized>(
    tokenizer: &T,
    lyrics: &CleanedLyrics,
) -> Vec<Vec<Token>> {
    lyrics.lines().map(|line| tokenizer.tokenize(line)).collect()
}
