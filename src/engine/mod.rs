//! Engine module for the Pomodoro Timer.
//!
//! This module contains the countdown core and what drives it:
//! - `countdown`: single-clock state machine with task-cycle bookkeeping
//! - `sink`: display capability the engine reports to
//! - `command`: host actions mapped onto engine operations
//! - `driver`: tokio task delivering one tick per second

pub mod command;
pub mod countdown;
pub mod driver;
pub mod error;
pub mod sink;

pub use command::Command;
pub use countdown::CountdownEngine;
pub use driver::{DriverHandle, Request, TimerDriver};
pub use error::DriverError;
pub use sink::{ChannelSink, DisplayEvent, DisplaySink, RecordingSink};
