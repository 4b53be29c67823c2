/// Hand-written page sources for integration tests
use anime_scroll_lib::modules::anime::AnimeRecord;
use anime_scroll_lib::modules::provider::PageSource;
use anime_scroll_lib::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

pub fn records(ids: impl IntoIterator<Item = u64>) -> Vec<AnimeRecord> {
    ids.into_iter()
        .map(|id| AnimeRecord::new(id).with_name(format!("Anime {}", id)))
        .collect()
}

/// Serves fixed pages; unknown pages come back empty. Records every request.
pub struct FixedPages {
    pages: HashMap<i64, Vec<AnimeRecord>>,
    pub requests: Arc<Mutex<Vec<i64>>>,
}

impl FixedPages {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn page(mut self, page: i64, ids: impl IntoIterator<Item = u64>) -> Self {
        self.pages.insert(page, records(ids));
        self
    }

    pub fn requested(&self) -> Vec<i64> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for FixedPages {
    fn source_name(&self) -> &'static str {
        "fixed"
    }

    async fn fetch_records(&self, page: i64) -> AppResult<Vec<AnimeRecord>> {
        self.requests.lock().unwrap().push(page);
        Ok(self.pages.get(&page).cloned().unwrap_or_default())
    }
}

/// Each page blocks until the test releases it
pub struct GatedPages {
    gates: Mutex<HashMap<i64, oneshot::Receiver<AppResult<Vec<AnimeRecord>>>>>,
}

pub struct Gates {
    senders: HashMap<i64, oneshot::Sender<AppResult<Vec<AnimeRecord>>>>,
}

impl Gates {
    pub fn release(&mut self, page: i64, ids: impl IntoIterator<Item = u64>) {
        let sender = self.senders.remove(&page).expect("page gate already used");
        let _ = sender.send(Ok(records(ids)));
    }

    pub fn fail(&mut self, page: i64, error: AppError) {
        let sender = self.senders.remove(&page).expect("page gate already used");
        let _ = sender.send(Err(error));
    }
}

impl GatedPages {
    pub fn new(pages: impl IntoIterator<Item = i64>) -> (Self, Gates) {
        let mut receivers = HashMap::new();
        let mut senders = HashMap::new();
        for page in pages {
            let (tx, rx) = oneshot::channel();
            senders.insert(page, tx);
            receivers.insert(page, rx);
        }
        (
            Self {
                gates: Mutex::new(receivers),
            },
            Gates { senders },
        )
    }
}

#[async_trait]
impl PageSource for GatedPages {
    fn source_name(&self) -> &'static str {
        "gated"
    }

    async fn fetch_records(&self, page: i64) -> AppResult<Vec<AnimeRecord>> {
        let gate = self.gates.lock().unwrap().remove(&page);
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(AppError::InternalError("gate dropped".to_string()))),
            None => Err(AppError::NotFound(format!("no gate for page {}", page))),
        }
    }
}
