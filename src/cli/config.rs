//! Session configuration built from command-line arguments.

use serde::{Deserialize, Serialize};

use crate::types::{ConfigError, DurationTable};

use super::commands::RunArgs;

/// How display output is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl OutputFormat {
    /// Picks the format from a `--json` flag.
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Settings for one interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Default duration of each mode
    pub durations: DurationTable,
    /// Task registered before the first command
    pub initial_task: Option<String>,
    /// Output format
    pub output: OutputFormat,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            durations: DurationTable::STANDARD,
            initial_task: None,
            output: OutputFormat::Text,
        }
    }
}

impl SessionConfig {
    /// Builds and validates a configuration from `run` arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if any duration is out of range.
    pub fn from_args(args: &RunArgs) -> Result<Self, ConfigError> {
        let durations = DurationTable::from_minutes(args.work, args.short_break, args.long_break);
        durations.validate()?;

        Ok(Self {
            durations,
            initial_task: args.task.clone(),
            output: OutputFormat::from_json_flag(args.json),
        })
    }
}
