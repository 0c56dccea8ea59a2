//! Command definitions for the Pomodoro Timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use clap::{Args, Parser, Subcommand};

use crate::types::MAX_MODE_MINUTES;

use super::input::validate_task_name;

// ============================================================================
// CLI Structure
// ============================================================================

/// Pomodoro Timer CLI - a terminal countdown for focused work
#[derive(Parser, Debug)]
#[command(
    name = "pomodoro",
    version,
    about = "ターミナルで動作するポモドーロタイマー",
    long_about = "作業・短い休憩・長い休憩の3つのモードを持つカウントダウンタイマー。\n\
                  タスクを設定すると、4回の作業セッションごとに長い休憩を知らせます。",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run an interactive timer session (commands are read from stdin)
    Run(RunArgs),

    /// Show the default duration of each mode
    Modes {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
    /// Work duration in minutes (1-99)
    #[arg(
        short,
        long,
        default_value = "25",
        value_parser = clap::value_parser!(u32).range(1..=MAX_MODE_MINUTES as i64)
    )]
    pub work: u32,

    /// Short break duration in minutes (1-99)
    #[arg(
        short,
        long,
        default_value = "5",
        value_parser = clap::value_parser!(u32).range(1..=MAX_MODE_MINUTES as i64)
    )]
    pub short_break: u32,

    /// Long break duration in minutes (1-99)
    #[arg(
        short,
        long,
        default_value = "15",
        value_parser = clap::value_parser!(u32).range(1..=MAX_MODE_MINUTES as i64)
    )]
    pub long_break: u32,

    /// Task to register before the session starts
    #[arg(short, long, value_parser = validate_task_name)]
    pub task: Option<String>,

    /// Print display events as JSON lines
    #[arg(long)]
    pub json: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            work: 25,
            short_break: 5,
            long_break: 15,
            task: None,
            json: false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
