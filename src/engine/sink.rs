//! Display sinks the countdown engine reports to.
//!
//! The engine never touches a screen directly. Every visible change goes
//! through a [`DisplaySink`], so hosts (terminal, channel, test recorder)
//! are interchangeable.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

// ============================================================================
// DisplayEvent
// ============================================================================

/// A single notification emitted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DisplayEvent {
    /// Remaining time changed (`MM:SS`)
    Time {
        /// Formatted remaining time
        text: String,
    },
    /// Task progress changed (`N/4`)
    Progress {
        /// Formatted progress
        text: String,
    },
    /// Four work sessions completed under one task
    CycleComplete,
}

// ============================================================================
// DisplaySink
// ============================================================================

/// Capability the engine uses to report to its host.
///
/// Calls are made synchronously from inside engine operations and must not
/// block.
pub trait DisplaySink {
    /// Shows the remaining time.
    fn display_time(&mut self, text: &str);

    /// Shows the task progress.
    fn display_progress(&mut self, text: &str);

    /// Signals that a full four-session cycle has completed.
    fn notify_cycle_complete(&mut self);

    /// Dispatches a [`DisplayEvent`] to the matching method.
    fn emit(&mut self, event: DisplayEvent) {
        match event {
            DisplayEvent::Time { text } => self.display_time(&text),
            DisplayEvent::Progress { text } => self.display_progress(&text),
            DisplayEvent::CycleComplete => self.notify_cycle_complete(),
        }
    }
}

impl<S: DisplaySink + ?Sized> DisplaySink for &mut S {
    fn display_time(&mut self, text: &str) {
        (**self).display_time(text)
    }

    fn display_progress(&mut self, text: &str) {
        (**self).display_progress(text)
    }

    fn notify_cycle_complete(&mut self) {
        (**self).notify_cycle_complete()
    }
}

// ============================================================================
// ChannelSink
// ============================================================================

/// Sink that forwards events over a tokio channel.
///
/// A closed receiver is logged and otherwise ignored; the engine keeps
/// running.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<DisplayEvent>,
}

impl ChannelSink {
    /// Creates a sink sending into `tx`.
    pub fn new(tx: mpsc::UnboundedSender<DisplayEvent>) -> Self {
        Self { tx }
    }

    /// Creates a sink together with its receiving end.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<DisplayEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    fn send(&self, event: DisplayEvent) {
        if let Err(e) = self.tx.send(event) {
            tracing::warn!(event = ?e.0, "表示イベントの受信側が切断されました");
        }
    }
}

impl DisplaySink for ChannelSink {
    fn display_time(&mut self, text: &str) {
        self.send(DisplayEvent::Time {
            text: text.to_string(),
        });
    }

    fn display_progress(&mut self, text: &str) {
        self.send(DisplayEvent::Progress {
            text: text.to_string(),
        });
    }

    fn notify_cycle_complete(&mut self) {
        self.send(DisplayEvent::CycleComplete);
    }
}

// ============================================================================
// RecordingSink
// ============================================================================

/// Sink that records every event in memory, for tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    events: Vec<DisplayEvent>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all recorded events in order.
    #[must_use]
    pub fn events(&self) -> &[DisplayEvent] {
        &self.events
    }

    /// Returns the most recent time text.
    #[must_use]
    pub fn last_time(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            DisplayEvent::Time { text } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Returns the most recent progress text.
    #[must_use]
    pub fn last_progress(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            DisplayEvent::Progress { text } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Returns how many cycle-complete notifications were seen.
    #[must_use]
    pub fn cycle_complete_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, DisplayEvent::CycleComplete))
            .count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl DisplaySink for RecordingSink {
    fn display_time(&mut self, text: &str) {
        self.events.push(DisplayEvent::Time {
            text: text.to_string(),
        });
    }

    fn display_progress(&mut self, text: &str) {
        self.events.push(DisplayEvent::Progress {
            text: text.to_string(),
        });
    }

    fn notify_cycle_complete(&mut self) {
        self.events.push(DisplayEvent::CycleComplete);
    }
}

// ============================================================================
// Tests
// ============================================================================
