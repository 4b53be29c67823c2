use crate::modules::provider::PageSource;
use crate::modules::render::AnimeCard;
use crate::shared::errors::AppResult;
use crate::shared::utils::TimedOperation;
use std::sync::Arc;

/// Cards produced by one page request, in API order
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub page: i64,
    pub cards: Vec<AnimeCard>,
}

/// Turns a page number into renderable cards
pub struct PageFetcher {
    source: Arc<dyn PageSource>,
}

impl PageFetcher {
    pub fn new(source: Arc<dyn PageSource>) -> Self {
        Self { source }
    }

    /// One request per call; errors are returned untouched
    pub async fn fetch_page(&self, page: i64) -> AppResult<Batch> {
        let timer = TimedOperation::new(&format!(
            "{} page {}",
            self.source.source_name(),
            page
        ));
        let records = self.source.fetch_records(page).await?;
        let cards = AnimeCard::from_batch(records);
        timer.finish_with_info(&format!("{} cards", cards.len()));

        Ok(Batch { page, cards })
    }
}
