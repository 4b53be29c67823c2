// Shikimori REST API models
// Only the fields the feed renders; unknown fields are ignored.

use serde::{Deserialize, Serialize};

/// `GET /api/animes` returns a bare JSON array of these
pub type ShikimoriAnimeList = Vec<ShikimoriAnime>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShikimoriAnime {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub russian: Option<String>,
    #[serde(default)]
    pub image: Option<ShikimoriImage>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    /// Sent as a decimal string, e.g. `"8.71"`
    #[serde(default)]
    pub score: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub episodes: Option<u32>,
    #[serde(default)]
    pub episodes_aired: Option<u32>,
    #[serde(default)]
    pub aired_on: Option<String>,
    #[serde(default)]
    pub released_on: Option<String>,
}

/// Image paths are site-relative (`/system/animes/original/1.jpg`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShikimoriImage {
    #[serde(default)]
    pub original: Option<String>,
    #[serde(default)]
    pub preview: Option<String>,
    #[serde(default)]
    pub x96: Option<String>,
    #[serde(default)]
    pub x48: Option<String>,
}
