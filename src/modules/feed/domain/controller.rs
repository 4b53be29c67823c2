//! Incremental list controller
//!
//! Owns the page cursor and the accumulated cards. It performs no I/O: the
//! caller asks it which page to fetch and reports back when a fetch lands.

use super::visibility::{VisibilityEvent, DEFAULT_THRESHOLD};
use crate::modules::render::AnimeCard;
use crate::shared::application::PageCursor;
use crate::shared::config::AppConfig;
use crate::shared::errors::AppError;
use crate::shared::utils::LogContext;
use crate::{log_debug, log_warn};
use serde::Serialize;

/// What to do with a visibility crossing while fetches are still in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AdvancePolicy {
    /// Advance on every crossing. Overlapping fetches race.
    #[default]
    Unguarded,
    /// Ignore crossings until nothing is in flight
    WhileIdle,
}

/// What an empty batch means
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum EndOfData {
    /// Append nothing and keep observing the sentinel
    #[default]
    KeepObserving,
    /// Treat the first empty batch as exhaustion and stop observing
    StopOnEmptyBatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeedOptions {
    pub advance: AdvancePolicy,
    pub end_of_data: EndOfData,
    pub threshold: f64,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            advance: AdvancePolicy::default(),
            end_of_data: EndOfData::default(),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl From<&AppConfig> for FeedOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            advance: if config.guard_in_flight {
                AdvancePolicy::WhileIdle
            } else {
                AdvancePolicy::Unguarded
            },
            end_of_data: if config.stop_on_empty {
                EndOfData::StopOnEmptyBatch
            } else {
                EndOfData::KeepObserving
            },
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FeedPhase {
    Idle,
    Loading { in_flight: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Appended { count: usize, total: usize },
    /// The controller was unmounted before the fetch landed
    Discarded,
}

/// Point-in-time copy of the controller, for rendering and assertions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedSnapshot {
    pub page: i64,
    pub cards: Vec<AnimeCard>,
    pub observing: bool,
    pub phase: FeedPhase,
}

impl FeedSnapshot {
    pub fn keys(&self) -> Vec<u64> {
        self.cards.iter().map(|c| c.key).collect()
    }
}

#[derive(Debug, Clone)]
pub struct ListController {
    cursor: PageCursor,
    cards: Vec<AnimeCard>,
    in_flight: usize,
    started: bool,
    mounted: bool,
    observing: bool,
    options: FeedOptions,
}

impl Default for ListController {
    fn default() -> Self {
        Self::new(FeedOptions::default())
    }
}

impl ListController {
    pub fn new(options: FeedOptions) -> Self {
        Self {
            cursor: PageCursor::new(),
            cards: Vec::new(),
            in_flight: 0,
            started: false,
            mounted: true,
            observing: true,
            options,
        }
    }

    /// First page to load. Returns `None` once the initial load was issued.
    pub fn mount(&mut self) -> Option<i64> {
        if self.started || !self.mounted {
            return None;
        }
        self.started = true;
        self.in_flight += 1;
        Some(self.cursor.current())
    }

    /// Feed a visibility report; returns the page to fetch if it counts as a crossing
    pub fn on_visibility(&mut self, event: VisibilityEvent) -> Option<i64> {
        let crossed = event.crosses(self.options.threshold);
        LogContext::intersection(event.intersection_ratio, self.options.threshold, crossed);
        if crossed {
            self.advance_page()
        } else {
            None
        }
    }

    /// Move the cursor forward by one and return the page to fetch
    pub fn advance_page(&mut self) -> Option<i64> {
        if !self.mounted || !self.observing {
            return None;
        }
        if self.options.advance == AdvancePolicy::WhileIdle && self.in_flight > 0 {
            log_debug!(
                "Feed: ignoring advance, {} fetch(es) still in flight",
                self.in_flight
            );
            return None;
        }
        let page = self.cursor.advance();
        self.in_flight += 1;
        Some(page)
    }

    /// Append a fetched batch. Empty batches are appended as a no-op.
    pub fn on_page_fetched(&mut self, page: i64, batch: Vec<AnimeCard>) -> AppendOutcome {
        if !self.mounted {
            log_debug!("Feed: discarding page {} after unmount", page);
            return AppendOutcome::Discarded;
        }
        self.in_flight = self.in_flight.saturating_sub(1);

        if batch.is_empty() && self.options.end_of_data == EndOfData::StopOnEmptyBatch {
            log_warn!("Feed: page {} is empty, no longer observing the sentinel", page);
            self.observing = false;
        }

        let count = batch.len();
        self.cards.extend(batch);
        LogContext::batch_appended(page, count, self.cards.len());

        AppendOutcome::Appended {
            count,
            total: self.cards.len(),
        }
    }

    /// A fetch failed. The cursor stays where it is and nothing is appended.
    pub fn on_page_failed(&mut self, page: i64, error: &AppError) -> AppendOutcome {
        if !self.mounted {
            log_debug!("Feed: discarding failure of page {} after unmount", page);
            return AppendOutcome::Discarded;
        }
        self.in_flight = self.in_flight.saturating_sub(1);
        LogContext::error_with_context(error, &format!("Failed to load page {}", page));

        AppendOutcome::Appended {
            count: 0,
            total: self.cards.len(),
        }
    }

    /// Later completions become no-ops
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    pub fn phase(&self) -> FeedPhase {
        match self.in_flight {
            0 => FeedPhase::Idle,
            in_flight => FeedPhase::Loading { in_flight },
        }
    }

    pub fn page(&self) -> i64 {
        self.cursor.current()
    }

    pub fn cards(&self) -> &[AnimeCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_observing(&self) -> bool {
        self.observing && self.mounted
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            page: self.page(),
            cards: self.cards.clone(),
            observing: self.observing,
            phase: self.phase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::anime::AnimeRecord;

    fn batch(ids: std::ops::RangeInclusive<u64>) -> Vec<AnimeCard> {
        AnimeCard::from_batch(ids.map(AnimeRecord::new).collect())
    }

    #[test]
    fn test_mount_requests_first_page_once() {
        let mut controller = ListController::default();
        assert_eq!(controller.phase(), FeedPhase::Idle);
        assert_eq!(controller.mount(), Some(1));
        assert_eq!(controller.mount(), None);
        assert_eq!(controller.phase(), FeedPhase::Loading { in_flight: 1 });
    }

    #[test]
    fn test_two_pages_accumulate_in_order() {
        let mut controller = ListController::default();
        let first = controller.mount().unwrap();
        controller.on_page_fetched(first, batch(1..=8));

        let second = controller.on_visibility(VisibilityEvent::fully_visible());
        assert_eq!(second, Some(2));
        controller.on_page_fetched(2, batch(9..=16));

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.keys(), (1..=16).collect::<Vec<_>>());
        assert_eq!(snapshot.phase, FeedPhase::Idle);
        assert!(snapshot.observing);
    }

    #[test]
    fn test_partial_visibility_does_not_advance() {
        let mut controller = ListController::default();
        controller.mount();
        assert_eq!(
            controller.on_visibility(VisibilityEvent::partial(0.6)),
            None
        );
        assert_eq!(controller.page(), 1);
    }

    #[test]
    fn test_unguarded_advance_while_loading() {
        let mut controller = ListController::default();
        controller.mount();
        assert_eq!(controller.advance_page(), Some(2));
        assert_eq!(controller.advance_page(), Some(3));
        assert_eq!(controller.phase(), FeedPhase::Loading { in_flight: 3 });
    }

    #[test]
    fn test_guarded_advance_waits_for_idle() {
        let mut controller = ListController::new(FeedOptions {
            advance: AdvancePolicy::WhileIdle,
            ..Default::default()
        });
        controller.mount();
        assert_eq!(controller.advance_page(), None);

        controller.on_page_fetched(1, batch(1..=8));
        assert_eq!(controller.advance_page(), Some(2));
        assert_eq!(controller.advance_page(), None);
    }

    #[test]
    fn test_empty_batch_keeps_observing_by_default() {
        let mut controller = ListController::default();
        controller.mount();
        let outcome = controller.on_page_fetched(1, Vec::new());

        assert_eq!(outcome, AppendOutcome::Appended { count: 0, total: 0 });
        assert!(controller.is_empty());
        assert!(controller.is_observing());
        assert_eq!(controller.advance_page(), Some(2));
    }

    #[test]
    fn test_empty_batch_can_stop_observation() {
        let mut controller = ListController::new(FeedOptions {
            end_of_data: EndOfData::StopOnEmptyBatch,
            ..Default::default()
        });
        controller.mount();
        controller.on_page_fetched(1, Vec::new());

        assert!(!controller.is_observing());
        assert_eq!(controller.advance_page(), None);
    }

    #[test]
    fn test_same_page_twice_is_not_deduplicated() {
        let mut controller = ListController::default();
        controller.mount();
        controller.on_page_fetched(1, batch(1..=8));
        controller.on_page_fetched(1, batch(1..=8));

        assert_eq!(controller.len(), 16);
        assert_eq!(controller.cards()[0].key, controller.cards()[8].key);
    }

    #[test]
    fn test_failure_keeps_cursor_and_list() {
        let mut controller = ListController::default();
        controller.mount();
        controller.on_page_fetched(1, batch(1..=8));
        let page = controller.advance_page().unwrap();

        let outcome = controller.on_page_failed(page, &AppError::ApiError("HTTP 502".to_string()));
        assert_eq!(outcome, AppendOutcome::Appended { count: 0, total: 8 });
        assert_eq!(controller.page(), 2);
        assert_eq!(controller.len(), 8);
        assert_eq!(controller.phase(), FeedPhase::Idle);
    }

    #[test]
    fn test_results_after_unmount_are_discarded() {
        let mut controller = ListController::default();
        controller.mount();
        controller.unmount();

        assert_eq!(
            controller.on_page_fetched(1, batch(1..=8)),
            AppendOutcome::Discarded
        );
        assert!(controller.is_empty());
        assert!(!controller.is_observing());
        assert_eq!(controller.advance_page(), None);
    }

    #[test]
    fn test_failures_after_unmount_are_discarded() {
        let mut controller = ListController::default();
        controller.mount();
        controller.unmount();

        let outcome =
            controller.on_page_failed(1, &AppError::ExternalServiceError("Request timeout".into()));
        assert_eq!(outcome, AppendOutcome::Discarded);
        // The in-flight count is frozen at unmount, same as for successful pages
        assert_eq!(controller.phase(), FeedPhase::Loading { in_flight: 1 });
        assert_eq!(
            controller.on_page_fetched(1, batch(1..=8)),
            AppendOutcome::Discarded
        );
        assert_eq!(controller.phase(), FeedPhase::Loading { in_flight: 1 });
    }

    #[test]
    fn test_options_from_config() {
        let config = AppConfig {
            guard_in_flight: true,
            stop_on_empty: true,
            ..Default::default()
        };
        let options = FeedOptions::from(&config);
        assert_eq!(options.advance, AdvancePolicy::WhileIdle);
        assert_eq!(options.end_of_data, EndOfData::StopOnEmptyBatch);
        assert_eq!(FeedOptions::from(&AppConfig::default()), FeedOptions::default());
    }
}
