use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::Config;
use crate::error::{CoreError, Result};
use crate::model::song::VideoHit;

const SEARCH_URL: &str = "https://www.googleapis.com/youtube/v3/search";

pub trait VideoSearch {
    /// Best matching video for a song; `Ok(None)` when nothing matched.
    fn search_video(&self, title: &str, artist: &str) -> Result<Option<VideoHit>>;
}

pub struct YouTubeClient {
    client: Client,
    api_key: Option<String>,
}

impl YouTubeClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.youtube_api_key.clone(),
        })
    }
}

impl VideoSearch for YouTubeClient {
    fn search_video(&self, title: &str, artist: &str) -> Result<Option<VideoHit>> {
        let key = self.api_key.as_deref().ok_or_else(|| {
            CoreError::config(
                "YOUTUBE_API_KEY is not set",
                "Enable the YouTube Data API and export its key",
            )
        })?;

        let query = video_query(title, artist);
        tracing::debug!(query = %query, "youtube search");

        let resp = self
            .client
            .get(SEARCH_URL)
            .query(&[
                ("part", "snippet"),
                ("q", query.as_str()),
                ("type", "video"),
                ("maxResults", "1"),
                ("key", key),
            ])
            .send()?;

        let status = resp.status();
        let body = resp.text()?;
        if !status.is_success() {
            return Err(CoreError::provider_status(
                status.as_u16(),
                "YouTube API request failed",
            ));
        }

        parse_search(&body)
    }
}

pub fn video_query(title: &str, artist: &str) -> String {
    format!("{} {} official audio", title.trim(), artist.trim())
}

#[derive(Debug, Deserialize)]
struct SearchList {
    #[serde(default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    id: ItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

pub fn parse_search(body: &str) -> Result<Option<VideoHit>> {
    let list: SearchList = serde_json::from_str(body)
        .map_err(|e| CoreError::provider(format!("invalid YouTube payload: {e}")))?;

    Ok(list.items.into_iter().find_map(|item| {
        Some(VideoHit {
            video_id: item.id.video_id?,
            title: item.snippet.title,
            thumbnail: item.snippet.thumbnails.default.map(|t| t.url),
        })
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_first_video() {
        let body = r#"{
            "kind": "youtube#searchListResponse",
            "items": [{
                "id": {"kind": "youtube#video", "videoId": "SX_ViT4Ra7k"},
                "snippet": {
                    "title": "米津玄師 MV「Lemon」",
                    "thumbnails": {"default": {"url": "https://i.ytimg.com/vi/SX_ViT4Ra7k/default.jpg"}}
                }
            }]
        }"#;

        let hit = parse_search(body).unwrap().unwrap();
        assert_eq!(hit.video_id, "SX_ViT4Ra7k");
        assert_eq!(hit.title, "米津玄師 MV「Lemon」");
        assert!(hit.thumbnail.unwrap().ends_with("default.jpg"));
    }

    #[test]
    fn no_items_is_none() {
        assert_eq!(parse_search(r#"{"items": []}"#).unwrap(), None);
        assert_eq!(parse_search(r#"{}"#).unwrap(), None);
    }

    #[test]
    fn query_asks_for_official_audio() {
        assert_eq!(video_query(" Lemon ", "米津玄師"), "Lemon 米津玄師 official audio");
    }

    #[test]
    fn missing_key_is_a_config_error() {
        let client = YouTubeClient::new(&Config::default()).unwrap();
        assert_eq!(client.search_video("Lemon", "x").unwrap_err().kind(), "config");
    }
}
