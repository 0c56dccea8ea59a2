//! CLI module for the Pomodoro Timer.
//!
//! This module provides the terminal host around the engine:
//! - `commands`: Command definitions using clap derive
//! - `config`: Session configuration built from arguments
//! - `input`: Line parsing for interactive sessions
//! - `session`: Interactive session loop
//! - `display`: Output formatting and the terminal display sink

pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod session;

pub use commands::{Cli, Commands, RunArgs};
pub use config::{OutputFormat, SessionConfig};
pub use display::{Display, TerminalDisplay};
pub use error::InputError;
pub use input::{parse_line, validate_task_name, InputLine};
pub use session::run_session;
