//! Core data types for the countdown engine.
//!
//! This module defines the data structures used for:
//! - Timer modes and their default durations
//! - Countdown and task-cycle state
//! - Status snapshots for display and JSON output

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of completed work sessions in one full cycle.
pub const SESSIONS_PER_CYCLE: u32 = 4;

/// Largest duration (in minutes) a mode may be configured with.
///
/// Keeps the minutes field of `MM:SS` at two digits.
pub const MAX_MODE_MINUTES: u32 = 99;

// ============================================================================
// Mode
// ============================================================================

/// The countdown configuration currently selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Focused work session (a "pomodoro")
    Work,
    /// Short break between work sessions
    ShortBreak,
    /// Long break after a full cycle
    LongBreak,
}

impl Mode {
    /// All modes, in tab order.
    pub const ALL: [Mode; 3] = [Mode::Work, Mode::ShortBreak, Mode::LongBreak];

    /// Returns the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Work => "work",
            Mode::ShortBreak => "short_break",
            Mode::LongBreak => "long_break",
        }
    }

    /// Returns the label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Work => "ポモドーロ",
            Mode::ShortBreak => "短い休憩",
            Mode::LongBreak => "長い休憩",
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Work
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a mode name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("不明なモードです: {0}")]
pub struct ParseModeError(pub String);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "work" | "pomodoro" => Ok(Mode::Work),
            "short" | "short-break" | "short_break" => Ok(Mode::ShortBreak),
            "long" | "long-break" | "long_break" => Ok(Mode::LongBreak),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

// ============================================================================
// DurationTable
// ============================================================================

/// Read-only lookup table from [`Mode`] to its default duration in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationTable {
    /// Work session length in seconds
    pub work_seconds: u32,
    /// Short break length in seconds
    pub short_break_seconds: u32,
    /// Long break length in seconds
    pub long_break_seconds: u32,
}

/// Error returned when a duration table is out of range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A mode's duration is zero or too long for `MM:SS`.
    #[error("{mode}の時間は1-{max}分の範囲で指定してください (指定値: {seconds}秒)", max = MAX_MODE_MINUTES)]
    DurationOutOfRange {
        /// Offending mode
        mode: Mode,
        /// Offending value in seconds
        seconds: u32,
    },
}

impl DurationTable {
    /// The standard table: 25 / 5 / 15 minutes.
    pub const STANDARD: DurationTable = DurationTable {
        work_seconds: 1500,
        short_break_seconds: 300,
        long_break_seconds: 900,
    };

    /// Builds a table from whole minutes.
    pub fn from_minutes(work: u32, short_break: u32, long_break: u32) -> Self {
        Self {
            work_seconds: work.saturating_mul(60),
            short_break_seconds: short_break.saturating_mul(60),
            long_break_seconds: long_break.saturating_mul(60),
        }
    }

    /// Returns the default duration of `mode` in seconds.
    pub fn seconds_for(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Work => self.work_seconds,
            Mode::ShortBreak => self.short_break_seconds,
            Mode::LongBreak => self.long_break_seconds,
        }
    }

    /// Validates every entry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DurationOutOfRange`] for the first mode whose
    /// duration is zero or exceeds [`MAX_MODE_MINUTES`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        for mode in Mode::ALL {
            let seconds = self.seconds_for(mode);
            if seconds == 0 || seconds > MAX_MODE_MINUTES * 60 {
                return Err(ConfigError::DurationOutOfRange { mode, seconds });
            }
        }
        Ok(())
    }
}

impl Default for DurationTable {
    fn default() -> Self {
        Self::STANDARD
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// State of the single countdown clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Seconds left in the active mode
    pub remaining_seconds: u32,
    /// Whether ticks are being delivered
    pub running: bool,
    /// Currently selected mode
    pub active_mode: Mode,
}

impl TimerState {
    /// Creates a stopped state loaded with `mode`'s duration from `table`.
    pub fn new(mode: Mode, table: &DurationTable) -> Self {
        Self {
            remaining_seconds: table.seconds_for(mode),
            running: false,
            active_mode: mode,
        }
    }

    /// Decrements the clock by one second, floored at zero.
    ///
    /// Returns true if this call brought the clock to zero.
    pub fn tick(&mut self) -> bool {
        if self.remaining_seconds == 0 {
            return false;
        }
        self.remaining_seconds -= 1;
        self.remaining_seconds == 0
    }

    /// Returns true if the clock has run out.
    pub fn is_expired(&self) -> bool {
        self.remaining_seconds == 0
    }
}

// ============================================================================
// TaskProgress
// ============================================================================

/// Progress of the current task through a four-session cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskProgress {
    /// Name of the registered task, if any
    pub task_name: Option<String>,
    /// Completed work sessions in the current cycle (0..=4)
    pub completed_count: u32,
}

impl TaskProgress {
    /// Returns true if a task is registered.
    pub fn is_task_set(&self) -> bool {
        self.task_name.is_some()
    }

    /// Records one completed work session.
    ///
    /// Returns true if the session closed a full cycle; the counter is then
    /// back at zero.
    pub fn record_completion(&mut self) -> bool {
        self.completed_count += 1;
        if self.completed_count >= SESSIONS_PER_CYCLE {
            self.completed_count = 0;
            true
        } else {
            false
        }
    }

    /// Returns the progress text, e.g. `"2/4"`.
    pub fn progress_text(&self) -> String {
        format!("{}/{}", self.completed_count, SESSIONS_PER_CYCLE)
    }
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// Read-only view of the engine used for status output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    /// Active mode
    pub mode: Mode,
    /// Seconds left
    #[serde(rename = "remainingSeconds")]
    pub remaining_seconds: u32,
    /// Seconds left as `MM:SS`
    pub remaining: String,
    /// Whether the clock is running
    pub running: bool,
    /// Registered task, if any
    #[serde(rename = "taskName", skip_serializing_if = "Option::is_none")]
    pub task_name: Option<String>,
    /// Completed work sessions in the current cycle
    #[serde(rename = "completedCount")]
    pub completed_count: u32,
}

/// Formats seconds as zero-padded `MM:SS`.
pub fn format_remaining(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

// ============================================================================
// Tests
// ============================================================================
