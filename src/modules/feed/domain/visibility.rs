//! Sources of sentinel visibility reports.
//!
//! The feed never talks to a viewport directly; it pulls events from a
//! [`VisibilitySource`]. A source returning `None` ends the session.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::mpsc;

/// Fraction of the sentinel that must be visible for a crossing to count
pub const DEFAULT_THRESHOLD: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibilityEvent {
    /// Visible fraction of the sentinel, `0.0..=1.0`
    pub intersection_ratio: f64,
}

impl VisibilityEvent {
    pub fn fully_visible() -> Self {
        Self {
            intersection_ratio: 1.0,
        }
    }

    pub fn partial(ratio: f64) -> Self {
        Self {
            intersection_ratio: ratio.clamp(0.0, 1.0),
        }
    }

    pub fn crosses(&self, threshold: f64) -> bool {
        self.intersection_ratio >= threshold
    }
}

#[async_trait]
pub trait VisibilitySource: Send {
    async fn next_event(&mut self) -> Option<VisibilityEvent>;
}

/// Replays a fixed list of events
#[derive(Debug, Clone, Default)]
pub struct ScriptedVisibility {
    events: VecDeque<VisibilityEvent>,
}

impl ScriptedVisibility {
    pub fn new(events: impl IntoIterator<Item = VisibilityEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// `count` full-visibility crossings
    pub fn scrolls(count: usize) -> Self {
        Self::new(std::iter::repeat(VisibilityEvent::fully_visible()).take(count))
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

#[async_trait]
impl VisibilitySource for ScriptedVisibility {
    async fn next_event(&mut self) -> Option<VisibilityEvent> {
        self.events.pop_front()
    }
}

/// Events pushed from elsewhere through an mpsc channel.
/// The session ends when every sender is dropped.
pub struct ChannelVisibility {
    rx: mpsc::Receiver<VisibilityEvent>,
}

impl ChannelVisibility {
    pub fn channel(buffer: usize) -> (mpsc::Sender<VisibilityEvent>, Self) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (tx, Self { rx })
    }
}

#[async_trait]
impl VisibilitySource for ChannelVisibility {
    async fn next_event(&mut self) -> Option<VisibilityEvent> {
        self.rx.recv().await
    }
}

/// Each input line is one "scrolled to the bottom" report.
/// EOF or a line reading `q` ends the session. Reads are cancel-safe, so a
/// pending read may be dropped and restarted without losing input.
pub struct LineVisibility<R> {
    lines: Lines<R>,
}

impl<R> LineVisibility<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

#[async_trait]
impl<R> VisibilitySource for LineVisibility<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn next_event(&mut self) -> Option<VisibilityEvent> {
        match self.lines.next_line().await {
            Ok(None) => None,
            Ok(Some(line)) if line.trim().eq_ignore_ascii_case("q") => None,
            Ok(Some(_)) => Some(VisibilityEvent::fully_visible()),
            Err(e) => {
                log::warn!("Visibility input closed: {}", e);
                None
            }
        }
    }
}
