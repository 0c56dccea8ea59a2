//! Input error types for the terminal host.
//!
//! Every error here is recoverable: the session prints it and keeps
//! reading input.

use thiserror::Error;

use crate::types::ParseModeError;

use super::input::MAX_TASK_NAME_CHARS;

/// Errors that can occur while parsing a line of user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The line was blank.
    #[error("コマンドが入力されていません")]
    Empty,

    /// The first word is not a known command.
    #[error("不明なコマンドです: {0}")]
    UnknownCommand(String),

    /// The command needs an argument that was not given.
    #[error("{command} には引数が必要です")]
    MissingArgument {
        /// Command name
        command: &'static str,
    },

    /// The mode name is not recognized.
    #[error(transparent)]
    UnknownMode(#[from] ParseModeError),

    /// The task name is empty after trimming.
    #[error("タスク名は空にできません")]
    EmptyTaskName,

    /// The task name is too long.
    #[error("タスク名は{max}文字以内にしてください", max = MAX_TASK_NAME_CHARS)]
    TaskNameTooLong,
}

impl InputError {
    /// Returns true if the session should silently skip this input.
    #[must_use]
    pub fn is_ignorable(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::Empty => "コマンドを入力してください",
            Self::UnknownCommand(_) => "help と入力するとコマンド一覧を表示します",
            Self::MissingArgument { .. } => "help で使い方を確認してください",
            Self::UnknownMode(_) => "work / short / long のいずれかを指定してください",
            Self::EmptyTaskName | Self::TaskNameTooLong => {
                "1-100文字のタスク名を指定してください"
            }
        }
    }
}
