//! Pomodoro Countdown Library
//!
//! This library provides the countdown core of a Pomodoro timer and a
//! terminal host around it.
//! It includes:
//! - Countdown engine with work / short break / long break modes
//! - Task-cycle bookkeeping (a long break after four work sessions)
//! - Display sinks the engine reports to
//! - A tokio tick driver delivering one tick per second
//! - CLI command parsing, interactive sessions and display utilities

pub mod cli;
pub mod engine;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    format_remaining, ConfigError, DurationTable, Mode, TaskProgress, TimerSnapshot, TimerState,
};

// Re-export engine types
pub use engine::{
    ChannelSink, Command, CountdownEngine, DisplayEvent, DisplaySink, DriverError, DriverHandle,
    RecordingSink, TimerDriver,
};
