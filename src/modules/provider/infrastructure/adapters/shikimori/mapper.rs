use super::models::*;
use crate::modules::anime::{AnimeImage, AnimeRecord};

/// Converts provider-specific payloads into domain records
pub trait RecordMapper<T> {
    fn map_to_record(&self, source: T) -> AnimeRecord;

    /// Map a whole page, preserving order
    fn map_to_records(&self, sources: Vec<T>) -> Vec<AnimeRecord> {
        sources
            .into_iter()
            .map(|source| self.map_to_record(source))
            .collect()
    }
}

/// Shikimori specific mapper implementation
#[derive(Debug, Clone)]
pub struct ShikimoriMapper {
    base_url: String,
}

impl ShikimoriMapper {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Site-relative paths are joined onto the base URL; absolute ones pass through
    fn absolutize(&self, path: Option<String>) -> Option<String> {
        let path = path.filter(|p| !p.trim().is_empty())?;
        if path.starts_with("http://") || path.starts_with("https://") {
            Some(path)
        } else if path.starts_with('/') {
            Some(format!("{}{}", self.base_url, path))
        } else {
            Some(format!("{}/{}", self.base_url, path))
        }
    }

    /// Shikimori reports unrated titles as "0.0"
    fn parse_score(score: Option<&str>) -> Option<f32> {
        score
            .and_then(|s| s.trim().parse::<f32>().ok())
            .filter(|s| *s > 0.0)
    }

    fn map_image(&self, image: ShikimoriImage) -> AnimeImage {
        AnimeImage {
            original: self.absolutize(image.original),
            preview: self.absolutize(image.preview),
            x96: self.absolutize(image.x96),
            x48: self.absolutize(image.x48),
        }
    }
}

impl RecordMapper<ShikimoriAnime> for ShikimoriMapper {
    fn map_to_record(&self, source: ShikimoriAnime) -> AnimeRecord {
        let score = Self::parse_score(source.score.as_deref());
        AnimeRecord {
            id: source.id,
            name: source.name,
            russian: source.russian,
            image: source.image.map(|image| self.map_image(image)),
            url: self.absolutize(source.url),
            kind: source.kind,
            score,
            status: source.status,
            episodes: source.episodes,
            episodes_aired: source.episodes_aired,
            aired_on: source.aired_on,
            released_on: source.released_on,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(id: u64) -> ShikimoriAnime {
        serde_json::from_value(serde_json::json!({ "id": id })).unwrap()
    }

    #[test]
    fn test_id_is_untouched() {
        let mapper = ShikimoriMapper::new("https://shikimori.one");
        let record = mapper.map_to_record(dto(5114));
        assert_eq!(record.id, 5114);
        assert!(record.image.is_none());
    }

    #[test]
    fn test_relative_paths_are_resolved() {
        let mapper = ShikimoriMapper::new("https://shikimori.one/");
        let mut source = dto(1);
        source.url = Some("/animes/1-cowboy-bebop".to_string());
        source.image = Some(ShikimoriImage {
            original: Some("/system/animes/original/1.jpg".to_string()),
            preview: Some("https://cdn.test/preview/1.jpg".to_string()),
            x96: Some(String::new()),
            x48: None,
        });

        let record = mapper.map_to_record(source);
        let image = record.image.unwrap();
        assert_eq!(
            image.original.as_deref(),
            Some("https://shikimori.one/system/animes/original/1.jpg")
        );
        assert_eq!(image.preview.as_deref(), Some("https://cdn.test/preview/1.jpg"));
        assert_eq!(image.x96, None);
        assert_eq!(
            record.url.as_deref(),
            Some("https://shikimori.one/animes/1-cowboy-bebop")
        );
    }

    #[test]
    fn test_score_parsing() {
        assert_eq!(ShikimoriMapper::parse_score(Some("8.75")), Some(8.75));
        assert_eq!(ShikimoriMapper::parse_score(Some("0.0")), None);
        assert_eq!(ShikimoriMapper::parse_score(Some("n/a")), None);
        assert_eq!(ShikimoriMapper::parse_score(None), None);
    }

    #[test]
    fn test_list_order_is_preserved() {
        let mapper = ShikimoriMapper::new("https://shikimori.one");
        let ids: Vec<u64> = mapper
            .map_to_records(vec![dto(3), dto(1), dto(2)])
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
