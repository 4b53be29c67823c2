use serde::{Deserialize, Serialize};

/// Identifier assigned by the remote catalogue. Used verbatim as the render key.
pub type AnimeId = u64;

/// One title as returned by the catalogue, after DTO mapping.
///
/// Only `id` is guaranteed; every display field may be absent and the card
/// falls back to placeholder text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeRecord {
    pub id: AnimeId,
    pub name: Option<String>,
    pub russian: Option<String>,
    pub image: Option<AnimeImage>,
    pub url: Option<String>,
    pub kind: Option<String>,
    pub score: Option<f32>,
    pub status: Option<String>,
    pub episodes: Option<u32>,
    pub episodes_aired: Option<u32>,
    pub aired_on: Option<String>,
    pub released_on: Option<String>,
}

/// Poster variants. Paths are absolute URLs once the mapper has run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimeImage {
    pub original: Option<String>,
    pub preview: Option<String>,
    pub x96: Option<String>,
    pub x48: Option<String>,
}

impl AnimeRecord {
    /// Minimal record carrying only an id
    pub fn new(id: AnimeId) -> Self {
        Self {
            id,
            name: None,
            russian: None,
            image: None,
            url: None,
            kind: None,
            score: None,
            status: None,
            episodes: None,
            episodes_aired: None,
            aired_on: None,
            released_on: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Title shown on the card, preferring the romanised name
    pub fn display_title(&self) -> &str {
        self.name
            .as_deref()
            .or(self.russian.as_deref())
            .filter(|t| !t.trim().is_empty())
            .unwrap_or("Untitled")
    }

    /// Largest available poster
    pub fn poster_url(&self) -> Option<&str> {
        let image = self.image.as_ref()?;
        image
            .original
            .as_deref()
            .or(image.preview.as_deref())
            .or(image.x96.as_deref())
            .or(image.x48.as_deref())
    }

    /// Episode count as shown on the card. Ongoing titles report aired episodes.
    pub fn episodes_label(&self) -> String {
        let count = match self.episodes {
            Some(0) | None => self.episodes_aired.filter(|n| *n > 0),
            some => some,
        };
        count.map_or_else(|| "?".to_string(), |n| n.to_string())
    }

    pub fn kind_label(&self) -> &str {
        self.kind.as_deref().unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_title_fallbacks() {
        assert_eq!(AnimeRecord::new(1).display_title(), "Untitled");

        let mut record = AnimeRecord::new(2);
        record.russian = Some("Стальной алхимик".to_string());
        assert_eq!(record.display_title(), "Стальной алхимик");

        let record = record.with_name("Fullmetal Alchemist");
        assert_eq!(record.display_title(), "Fullmetal Alchemist");
    }

    #[test]
    fn test_poster_prefers_original() {
        let mut record = AnimeRecord::new(3);
        assert!(record.poster_url().is_none());

        record.image = Some(AnimeImage {
            preview: Some("https://example.test/preview.jpg".to_string()),
            x48: Some("https://example.test/x48.jpg".to_string()),
            ..Default::default()
        });
        assert_eq!(record.poster_url(), Some("https://example.test/preview.jpg"));
    }

    #[test]
    fn test_episodes_label() {
        let mut record = AnimeRecord::new(4);
        assert_eq!(record.episodes_label(), "?");

        record.episodes = Some(0);
        record.episodes_aired = Some(7);
        assert_eq!(record.episodes_label(), "7");

        record.episodes = Some(24);
        assert_eq!(record.episodes_label(), "24");
    }
}
