//! Tick driver for the countdown engine.
//!
//! [`TimerDriver`] is the external one-second tick source. It owns the
//! engine inside a single tokio task, so commands and ticks are applied one
//! at a time and a `stop` always lands before the next tick.

use tokio::sync::{mpsc, oneshot};
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};

use crate::types::TimerSnapshot;

use super::command::Command;
use super::countdown::CountdownEngine;
use super::error::DriverError;
use super::sink::DisplaySink;

/// Tick period.
const TICK_PERIOD: Duration = Duration::from_secs(1);

// ============================================================================
// Request
// ============================================================================

/// Messages accepted by the driver loop.
#[derive(Debug)]
pub enum Request {
    /// Apply an engine command
    Command(Command),
    /// Reply with the current snapshot
    Status(oneshot::Sender<TimerSnapshot>),
}

// ============================================================================
// DriverHandle
// ============================================================================

/// Cloneable handle used by hosts to reach a running driver.
#[derive(Debug, Clone)]
pub struct DriverHandle {
    tx: mpsc::UnboundedSender<Request>,
}

impl DriverHandle {
    /// Forwards a command to the engine.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Closed`] if the driver loop has ended.
    pub fn send(&self, command: Command) -> Result<(), DriverError> {
        self.tx
            .send(Request::Command(command))
            .map_err(|_| DriverError::Closed)
    }

    /// Queries the engine's current snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver loop has ended or drops the request.
    pub async fn status(&self) -> Result<TimerSnapshot, DriverError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Request::Status(reply_tx))
            .map_err(|_| DriverError::Closed)?;
        reply_rx.await.map_err(|_| DriverError::StatusUnavailable)
    }
}

// ============================================================================
// TimerDriver
// ============================================================================

/// Runs a [`CountdownEngine`] against a one-second interval.
pub struct TimerDriver<S> {
    engine: CountdownEngine<S>,
    rx: mpsc::UnboundedReceiver<Request>,
}

impl<S: DisplaySink> TimerDriver<S> {
    /// Wraps `engine` and returns the driver with a handle to it.
    pub fn new(engine: CountdownEngine<S>) -> (Self, DriverHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { engine, rx }, DriverHandle { tx })
    }

    /// Runs the driver loop.
    ///
    /// Ticks are delivered only while the engine is running; the interval
    /// is re-armed whenever the engine starts, so the first tick lands one
    /// period after `start`. Ends on [`Command::Quit`] or when every handle
    /// has been dropped, and hands the engine back.
    pub async fn run(mut self) -> CountdownEngine<S> {
        let mut ticker = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::debug!("ドライバーを開始");

        loop {
            tokio::select! {
                request = self.rx.recv() => {
                    let Some(request) = request else {
                        tracing::debug!("すべてのハンドルが破棄されました");
                        break;
                    };

                    match request {
                        Request::Command(command) => {
                            tracing::debug!(command = %command, "コマンドを受信");
                            let was_running = self.engine.is_running();
                            if !self.engine.apply(command) {
                                break;
                            }
                            if !was_running && self.engine.is_running() {
                                ticker.reset();
                            }
                        }
                        Request::Status(reply) => {
                            if reply.send(self.engine.snapshot()).is_err() {
                                tracing::warn!("状態要求の送信元が切断されました");
                            }
                        }
                    }
                }
                _ = ticker.tick(), if self.engine.is_running() => {
                    self.engine.tick();
                }
            }
        }

        tracing::info!("ドライバーを終了");
        self.engine
    }
}

// ============================================================================
// Tests
// ============================================================================
