//! One rendered anime card.
//!
//! A card is a pure function of `(record, index)`. The index is the record's
//! position inside its fetch batch, so every batch restarts the fade stagger.

use crate::modules::anime::{AnimeId, AnimeRecord};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delay added per batch position
pub const STAGGER_STEP: Duration = Duration::from_millis(250);

/// Length of the opacity transition itself
pub const FADE_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    EaseInOut,
}

impl Easing {
    /// Map linear progress in `[0, 1]` onto the curve
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }

    pub fn css_name(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseInOut => "ease-in-out",
        }
    }
}

/// Opacity 0 → 1 entrance transition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FadeIn {
    pub delay: Duration,
    pub duration: Duration,
    pub easing: Easing,
}

impl FadeIn {
    pub fn for_index(index: usize) -> Self {
        Self {
            delay: STAGGER_STEP * index as u32,
            duration: FADE_DURATION,
            easing: Easing::EaseInOut,
        }
    }

    /// Opacity `elapsed` after the card was mounted
    pub fn opacity_at(&self, elapsed: Duration) -> f64 {
        if elapsed <= self.delay {
            return 0.0;
        }
        if self.duration.is_zero() {
            return 1.0;
        }
        let progress = (elapsed - self.delay).as_secs_f64() / self.duration.as_secs_f64();
        self.easing.apply(progress)
    }

    /// Time until the card is fully opaque
    pub fn settles_after(&self) -> Duration {
        self.delay + self.duration
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeCard {
    /// Render key, always the source record id
    pub key: AnimeId,
    pub index: usize,
    pub record: AnimeRecord,
    pub transition: FadeIn,
}

impl AnimeCard {
    pub fn new(record: AnimeRecord, index: usize) -> Self {
        Self {
            key: record.id,
            index,
            transition: FadeIn::for_index(index),
            record,
        }
    }

    /// Cards for one batch, tagged with their batch positions
    pub fn from_batch(records: Vec<AnimeRecord>) -> Vec<Self> {
        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| Self::new(record, index))
            .collect()
    }

    pub fn title(&self) -> &str {
        self.record.display_title()
    }

    /// Short caption line: kind, episodes and score when known
    pub fn caption(&self) -> String {
        let mut caption = format!(
            "{} · {} ep",
            self.record.kind_label(),
            self.record.episodes_label()
        );
        if let Some(score) = self.record.score {
            caption.push_str(&format!(" · ★ {:.2}", score));
        }
        caption
    }
}
