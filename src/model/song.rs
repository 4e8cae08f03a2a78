use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SongSummary {
    pub id: u64,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub album_art: Option<String>,
    pub url: String,
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub songs: Vec<SongSummary>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_songs: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VideoHit {
    pub video_id: String,
    pub title: String,
    pub thumbnail: Option<String>,
}

/// Title/artist pair attached to saved words and history records.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SongRef {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
}
