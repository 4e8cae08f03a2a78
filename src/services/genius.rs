//! Song search and lyrics lookup against the Genius API and song pages.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::Config;
use crate::error::{CoreError, Result};
use crate::model::song::{SearchPage, SongSummary};

const API_BASE: &str = "https://api.genius.com";
const MAX_HITS: usize = 50;
pub const PAGE_SIZE: usize = 8;

pub trait SongSearch {
    fn search(&self, query: &str, page: usize) -> Result<SearchPage>;
}

/// Returns the raw, uncleaned lyrics document for a song.
pub trait LyricsProvider {
    fn fetch_lyrics(&self, title: &str, artist: &str) -> Result<String>;
}

pub struct GeniusClient {
    client: Client,
    token: Option<String>,
}

impl GeniusClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            token: config.genius_token.clone(),
        })
    }

    fn token(&self) -> Result<&str> {
        self.token.as_deref().ok_or_else(|| {
            CoreError::config(
                "GENIUS_ACCESS_TOKEN is not set",
                "Create a Genius API client and export its access token",
            )
        })
    }

    fn search_hits(&self, query: &str) -> Result<Vec<SongSummary>> {
        let token = self.token()?;
        let per_page = MAX_HITS.to_string();

        tracing::debug!(query, "genius search");

        let resp = self
            .client
            .get(format!("{API_BASE}/search"))
            .bearer_auth(token)
            .query(&[("q", query), ("per_page", per_page.as_str())])
            .send()?;

        let status = resp.status();
        let body = resp.text()?;
        if !status.is_success() {
            return Err(CoreError::provider_status(
                status.as_u16(),
                format!("genius search failed: {}", body.trim()),
            ));
        }

        parse_search_hits(&body)
    }
}

impl SongSearch for GeniusClient {
    fn search(&self, query: &str, page: usize) -> Result<SearchPage> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CoreError::InvalidRequest("query is required".into()));
        }

        let songs = self.search_hits(query)?;
        if songs.is_empty() {
            return Err(CoreError::NotFound(format!("no songs match {query:?}")));
        }

        Ok(paginate(songs, page))
    }
}

impl LyricsProvider for GeniusClient {
    fn fetch_lyrics(&self, title: &str, artist: &str) -> Result<String> {
        let query = optimize_query(title, artist);
        let hit = self
            .search_hits(&query)?
            .into_iter()
            .next()
            .ok_or_else(|| CoreError::NotFound(format!("lyrics for {title:?} by {artist:?}")))?;

        tracing::debug!(url = %hit.url, "fetching lyrics page");

        let resp = self.client.get(&hit.url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::provider_status(
                status.as_u16(),
                format!("lyrics page {} unavailable", hit.url),
            ));
        }

        let html = resp.text()?;
        extract_lyrics(&html)
            .ok_or_else(|| CoreError::NotFound(format!("no lyrics on {}", hit.url)))
    }
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    response: SearchResponse,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    result: HitResult,
}

#[derive(Debug, Deserialize)]
struct HitResult {
    id: u64,
    title: String,
    url: String,
    #[serde(default)]
    path: String,
    song_art_image_thumbnail_url: Option<String>,
    primary_artist: Artist,
}

#[derive(Debug, Deserialize)]
struct Artist {
    name: String,
}

pub fn parse_search_hits(body: &str) -> Result<Vec<SongSummary>> {
    let envelope: SearchEnvelope = serde_json::from_str(body)
        .map_err(|e| CoreError::provider(format!("invalid genius search payload: {e}")))?;

    Ok(envelope
        .response
        .hits
        .into_iter()
        .map(|h| SongSummary {
            id: h.result.id,
            title: h.result.title,
            artist: h.result.primary_artist.name,
            album_art: h.result.song_art_image_thumbnail_url,
            url: h.result.url,
            path: h.result.path,
        })
        .collect())
}

/// Slices one page out of the full hit list; pages start at 1.
pub fn paginate(songs: Vec<SongSummary>, page: usize) -> SearchPage {
    let page = page.max(1);
    let total_songs = songs.len();
    let total_pages = total_songs.div_ceil(PAGE_SIZE);

    let songs = songs
        .into_iter()
        .skip(page.saturating_sub(1).saturating_mul(PAGE_SIZE))
        .take(PAGE_SIZE)
        .collect();

    SearchPage {
        songs,
        current_page: page,
        total_pages,
        total_songs,
    }
}

static PARENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\([^)]*\)\s*").unwrap());
static BRACKETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\[[^\]]*\]").unwrap());
static FEAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(feat|ft)\.").unwrap());
static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Search text that matches Genius better than the raw title: lowercased,
/// without bracketed annotations or featuring markers.
pub fn optimize_query(title: &str, artist: &str) -> String {
    let q = format!("{title} {artist}").to_lowercase();
    let q = PARENS.replace_all(&q, " ");
    let q = BRACKETS.replace_all(&q, "");
    let q = FEAT.replace_all(&q, "");
    SPACES.replace_all(&q, " ").trim().to_string()
}

static CONTAINER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<div[^>]*data-lyrics-container="true"[^>]*>"#).unwrap());
static DIV_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<(/?)div\b[^>]*>").unwrap());
static BR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").unwrap());

/// Text of every lyrics container on a song page, joined by newlines.
pub fn extract_lyrics(html: &str) -> Option<String> {
    let mut blocks: Vec<String> = Vec::new();
    let mut from = 0usize;

    while let Some(open) = CONTAINER.find_at(html, from) {
        let inner_start = open.end();
        let mut depth = 1usize;
        let mut inner_end = html.len();

        for tag in DIV_TAG.captures_iter(&html[inner_start..]) {
            let (Some(whole), Some(slash)) = (tag.get(0), tag.get(1)) else {
                continue;
            };
            if slash.as_str().is_empty() {
                depth += 1;
            } else {
                depth -= 1;
                if depth == 0 {
                    inner_end = inner_start + whole.start();
                    break;
                }
            }
        }

        blocks.push(html_to_text(&html[inner_start..inner_end]));
        from = inner_end;
    }

    let text = blocks.join("\n");
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn html_to_text(fragment: &str) -> String {
    let with_breaks = BR.replace_all(fragment, "\n");
    let stripped = TAG.replace_all(&with_breaks, "");
    decode_entities(&stripped)
}

fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &regex::Captures| {
            let name = &caps[1];
            let hex = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X"));
            let decoded = if let Some(hex) = hex {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match name {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some(' '),
                    _ => None,
                }
            };
            match decoded {
                Some(ch) => ch.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
