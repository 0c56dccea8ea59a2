//! Tick driver error types.
//!
//! The countdown engine itself cannot fail. These errors only describe the
//! channel between a host and a running [`TimerDriver`](super::TimerDriver).

use thiserror::Error;

/// Errors that can occur when talking to a running driver.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DriverError {
    /// The driver loop has ended and no longer accepts requests.
    #[error("タイマーは既に終了しています")]
    Closed,

    /// The driver dropped a status request without answering.
    #[error("タイマーの状態を取得できませんでした")]
    StatusUnavailable,
}

impl DriverError {
    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::Closed => "セッションを再起動してください",
            Self::StatusUnavailable => "もう一度お試しください",
        }
    }
}
