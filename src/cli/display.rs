//! Display utilities for the Pomodoro Timer CLI.
//!
//! This module provides:
//! - `TerminalDisplay`, the display sink used by interactive sessions
//! - Formatted output for status, modes, help and errors

use std::io::{self, Write};

use serde::Serialize;

use crate::engine::{DisplayEvent, DisplaySink};
use crate::types::{format_remaining, DurationTable, Mode, TimerSnapshot, SESSIONS_PER_CYCLE};

use super::config::OutputFormat;
use super::error::InputError;

// ============================================================================
// TerminalDisplay
// ============================================================================

/// Display sink that writes engine events to a terminal stream.
#[derive(Debug)]
pub struct TerminalDisplay<W> {
    out: W,
    format: OutputFormat,
}

impl TerminalDisplay<io::Stdout> {
    /// Creates a display writing to stdout.
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(io::stdout(), format)
    }
}

impl<W: Write> TerminalDisplay<W> {
    /// Creates a display writing to `out`.
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    /// Consumes the display and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_event(&mut self, event: &DisplayEvent) {
        let line = match self.format {
            OutputFormat::Text => Self::event_text(event),
            OutputFormat::Json => match serde_json::to_string(event) {
                Ok(json) => json,
                Err(e) => {
                    tracing::warn!("表示イベントのシリアライズに失敗しました: {}", e);
                    return;
                }
            },
        };

        if let Err(e) = writeln!(self.out, "{}", line).and_then(|_| self.out.flush()) {
            tracing::warn!("表示の書き込みに失敗しました: {}", e);
        }
    }

    fn event_text(event: &DisplayEvent) -> String {
        match event {
            DisplayEvent::Time { text } => format!("  {}", text),
            DisplayEvent::Progress { text } => format!("  タスク進捗: {}", text),
            DisplayEvent::CycleComplete => format!(
                "* 長い休憩の時間です。{}/{}",
                SESSIONS_PER_CYCLE, SESSIONS_PER_CYCLE
            ),
        }
    }
}

impl<W: Write> DisplaySink for TerminalDisplay<W> {
    fn display_time(&mut self, text: &str) {
        self.write_event(&DisplayEvent::Time {
            text: text.to_string(),
        });
    }

    fn display_progress(&mut self, text: &str) {
        self.write_event(&DisplayEvent::Progress {
            text: text.to_string(),
        });
    }

    fn notify_cycle_complete(&mut self) {
        self.write_event(&DisplayEvent::CycleComplete);
    }
}

// ============================================================================
// Display
// ============================================================================

/// Entry of the `modes` listing.
#[derive(Debug, Serialize)]
struct ModeEntry {
    mode: Mode,
    seconds: u32,
    display: String,
}

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the session banner.
    pub fn show_session_start(snapshot: &TimerSnapshot, format: OutputFormat) {
        if format == OutputFormat::Json {
            return;
        }
        println!("* ポモドーロタイマーを起動しました");
        println!(
            "  モード: {}  残り時間: {}",
            snapshot.mode.label(),
            snapshot.remaining
        );
        if let Some(task) = &snapshot.task_name {
            println!("  タスク: {}", task);
        }
        println!("  help と入力するとコマンド一覧を表示します");
    }

    /// Shows the final state when the session ends.
    pub fn show_session_end(snapshot: &TimerSnapshot, format: OutputFormat) {
        match format {
            OutputFormat::Json => Self::print_json(snapshot),
            OutputFormat::Text => {
                println!("[] セッションを終了しました");
                println!(
                    "  モード: {}  残り時間: {}",
                    snapshot.mode.label(),
                    snapshot.remaining
                );
            }
        }
    }

    /// Shows the current timer status.
    pub fn show_status(snapshot: &TimerSnapshot, format: OutputFormat) {
        if format == OutputFormat::Json {
            Self::print_json(snapshot);
            return;
        }

        println!("ポモドーロタイマー ステータス");
        println!("─────────────────────────────");
        println!("モード: {}", snapshot.mode.label());
        println!(
            "状態: {}",
            if snapshot.running { "実行中" } else { "停止中" }
        );
        println!("残り時間: {}", snapshot.remaining);
        match &snapshot.task_name {
            Some(task) => {
                println!("タスク: {}", task);
                println!(
                    "進捗: {}/{}",
                    snapshot.completed_count, SESSIONS_PER_CYCLE
                );
            }
            None => println!("タスク: なし"),
        }
    }

    /// Shows the duration of each mode.
    pub fn show_modes(durations: &DurationTable, format: OutputFormat) {
        let entries: Vec<ModeEntry> = Mode::ALL
            .iter()
            .map(|&mode| {
                let seconds = durations.seconds_for(mode);
                ModeEntry {
                    mode,
                    seconds,
                    display: format_remaining(seconds),
                }
            })
            .collect();

        match format {
            OutputFormat::Json => Self::print_json(&entries),
            OutputFormat::Text => {
                for entry in &entries {
                    println!("{:<12} {}", entry.mode.label(), entry.display);
                }
            }
        }
    }

    /// Shows the list of session commands.
    pub fn show_help() {
        println!("コマンド一覧:");
        println!("  start              カウントダウンを開始");
        println!("  stop               カウントダウンを停止");
        println!("  reset              現在のモードの時間に戻す");
        println!("  mode <work|short|long>  モードを切り替え");
        println!("  task <名前>        タスクを設定 (1つまで)");
        println!("  clear              タスクを削除");
        println!("  status             現在の状態を表示");
        println!("  quit               終了");
    }

    /// Shows that a second task was rejected.
    pub fn show_task_rejected(current: &str) {
        eprintln!("タスクは一度に1つだけ設定できます (現在のタスク: {})", current);
    }

    /// Shows an input error with its suggestion.
    pub fn show_input_error(error: &InputError) {
        eprintln!("エラー: {}", error);
        eprintln!("  {}", error.suggestion());
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("エラー: {}", message);
    }

    fn print_json<T: Serialize + ?Sized>(value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::warn!("JSONのシリアライズに失敗しました: {}", e),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
