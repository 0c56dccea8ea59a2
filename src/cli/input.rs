//! Line-oriented input for the interactive session.
//!
//! Each line maps 1:1 onto an engine command or a host-only request
//! (`status`, `help`).

use crate::engine::Command;
use crate::types::Mode;

use super::error::InputError;

/// Maximum task name length in characters.
pub const MAX_TASK_NAME_CHARS: usize = 100;

/// A parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLine {
    /// Forward to the engine
    Command(Command),
    /// Show the current snapshot
    Status,
    /// Show the command list
    Help,
}

/// Validates a task name.
///
/// - Surrounding whitespace is trimmed
/// - Must not be empty
/// - Must not exceed [`MAX_TASK_NAME_CHARS`] characters
pub fn validate_task_name(s: &str) -> Result<String, InputError> {
    let name = s.trim();
    if name.is_empty() {
        return Err(InputError::EmptyTaskName);
    }
    if name.chars().count() > MAX_TASK_NAME_CHARS {
        return Err(InputError::TaskNameTooLong);
    }
    Ok(name.to_string())
}

/// Parses one line of input.
pub fn parse_line(line: &str) -> Result<InputLine, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(InputError::Empty);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "start" => Command::Start,
        "stop" => Command::Stop,
        "reset" => Command::Reset,
        "clear" => Command::ClearTask,
        "quit" | "exit" => Command::Quit,
        "status" => return Ok(InputLine::Status),
        "help" | "?" => return Ok(InputLine::Help),
        "mode" => {
            if rest.is_empty() {
                return Err(InputError::MissingArgument { command: "mode" });
            }
            Command::SwitchMode(rest.parse::<Mode>()?)
        }
        "task" => {
            if rest.is_empty() {
                return Err(InputError::MissingArgument { command: "task" });
            }
            Command::SetTask(validate_task_name(rest)?)
        }
        other => match other.parse::<Mode>() {
            // Bare mode names act like selecting a tab.
            Ok(mode) if rest.is_empty() => Command::SwitchMode(mode),
            _ => return Err(InputError::UnknownCommand(word.to_string())),
        },
    };

    Ok(InputLine::Command(command))
}
