//! Host commands mapped 1:1 onto engine operations.

use std::fmt;

use crate::types::Mode;

/// A user action forwarded from the host to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the countdown
    Start,
    /// Stop the countdown
    Stop,
    /// Reload the active mode's duration
    Reset,
    /// Select another mode
    SwitchMode(Mode),
    /// Register the current task
    SetTask(String),
    /// Drop the current task
    ClearTask,
    /// End the session
    Quit,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Start => write!(f, "start"),
            Command::Stop => write!(f, "stop"),
            Command::Reset => write!(f, "reset"),
            Command::SwitchMode(mode) => write!(f, "mode {}", mode),
            Command::SetTask(name) => write!(f, "task {}", name),
            Command::ClearTask => write!(f, "clear"),
            Command::Quit => write!(f, "quit"),
        }
    }
}
