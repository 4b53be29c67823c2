/// Drives a [`ListController`] from a visibility source and a page fetcher.
///
/// Each page fetch runs as its own task. Nothing orders them: when the cursor
/// moves again before an earlier fetch lands, both race and the grid receives
/// batches in completion order.
use super::page_fetcher::PageFetcher;
use crate::modules::feed::domain::{
    FeedOptions, FeedSnapshot, ListController, VisibilityEvent, VisibilitySource,
};
use crate::modules::provider::PageSource;
use crate::shared::errors::AppError;
use crate::{log_debug, log_error, log_info};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinSet;

pub struct FeedService {
    controller: Arc<Mutex<ListController>>,
    fetcher: Arc<PageFetcher>,
    updates: Arc<watch::Sender<FeedSnapshot>>,
    tasks: JoinSet<()>,
}

impl FeedService {
    pub fn new(source: Arc<dyn PageSource>, options: FeedOptions) -> Self {
        let controller = ListController::new(options);
        let (updates, _) = watch::channel(controller.snapshot());

        Self {
            controller: Arc::new(Mutex::new(controller)),
            fetcher: Arc::new(PageFetcher::new(source)),
            updates: Arc::new(updates),
            tasks: JoinSet::new(),
        }
    }

    /// Receives a fresh snapshot after every append
    pub fn subscribe(&self) -> watch::Receiver<FeedSnapshot> {
        self.updates.subscribe()
    }

    /// Shared handle to the controller, for inspection
    pub fn controller(&self) -> Arc<Mutex<ListController>> {
        Arc::clone(&self.controller)
    }

    /// Issue the initial page load
    pub async fn mount(&mut self) {
        let page = self.controller.lock().await.mount();
        if let Some(page) = page {
            self.spawn_fetch(page);
        }
    }

    /// Handle one visibility report. Returns the page whose fetch was started.
    pub async fn handle_event(&mut self, event: VisibilityEvent) -> Option<i64> {
        let page = self.controller.lock().await.on_visibility(event);
        if let Some(page) = page {
            self.spawn_fetch(page);
        }
        page
    }

    /// Wait for every fetch started so far
    pub async fn settle(&mut self) {
        while let Some(joined) = self.tasks.join_next().await {
            if let Err(e) = joined {
                log_error!("{}", AppError::from(e));
            }
        }
    }

    /// Mount, consume events until the source ends or the sentinel is no
    /// longer observed, then wait for outstanding fetches.
    pub async fn run<S>(&mut self, source: &mut S) -> FeedSnapshot
    where
        S: VisibilitySource + ?Sized,
    {
        let mut updates = self.subscribe();
        self.mount().await;

        loop {
            if !self.controller.lock().await.is_observing() {
                log_info!("Feed: sentinel no longer observed, stopping");
                break;
            }
            // A landed batch may end observation while the source is idle
            tokio::select! {
                event = source.next_event() => match event {
                    Some(event) => {
                        self.handle_event(event).await;
                    }
                    None => break,
                },
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        self.settle().await;
        self.snapshot().await
    }

    /// Stop accepting results. Fetches still running are left to finish and
    /// their batches are dropped.
    pub async fn unmount(&mut self) {
        self.controller.lock().await.unmount();
        self.tasks.detach_all();
    }

    pub async fn snapshot(&self) -> FeedSnapshot {
        self.controller.lock().await.snapshot()
    }

    fn spawn_fetch(&mut self, page: i64) {
        let controller = Arc::clone(&self.controller);
        let fetcher = Arc::clone(&self.fetcher);
        let updates = Arc::clone(&self.updates);

        log_debug!("Feed: fetching page {}", page);
        self.tasks.spawn(async move {
            let result = fetcher.fetch_page(page).await;
            let snapshot = {
                let mut controller = controller.lock().await;
                match result {
                    Ok(batch) => {
                        controller.on_page_fetched(batch.page, batch.cards);
                    }
                    Err(e) => {
                        controller.on_page_failed(page, &e);
                    }
                }
                controller.snapshot()
            };
            updates.send_replace(snapshot);
        });
    }
}
