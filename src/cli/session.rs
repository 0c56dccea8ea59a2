//! Interactive terminal session.
//!
//! The session plays the role of the window around the engine: it reads
//! one command per line, forwards it to a [`TimerDriver`], and lets the
//! driver deliver ticks in the background.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::engine::{Command, CountdownEngine, DisplaySink, DriverHandle, TimerDriver};
use crate::types::TimerSnapshot;

use super::config::SessionConfig;
use super::display::Display;
use super::input::{parse_line, InputLine};

/// Runs a session until `quit`, end of input, or Ctrl-C.
///
/// Returns the engine's final snapshot.
///
/// # Errors
///
/// Returns an error if the duration table is out of range, reading input
/// fails, or the driver task panics. The driver is shut down first in every
/// case except a rejected table.
pub async fn run_session<R, S>(config: SessionConfig, input: R, sink: S) -> Result<TimerSnapshot>
where
    R: AsyncBufRead + Unpin,
    S: DisplaySink + Send + 'static,
{
    let mut engine = CountdownEngine::with_durations(config.durations, sink)?;

    let mut banner = engine.snapshot();
    banner.task_name.clone_from(&config.initial_task);
    Display::show_session_start(&banner, config.output);

    if let Some(task) = config.initial_task.as_deref() {
        engine.set_task(task);
    }

    let (driver, handle) = TimerDriver::new(engine);
    let driver_task = tokio::spawn(driver.run());

    let mut lines = input.lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut watch_ctrl_c = true;

    let outcome = loop {
        let line = tokio::select! {
            line = lines.next_line() => match line {
                Ok(line) => line,
                Err(e) => break Err(anyhow::Error::new(e).context("入力の読み込みに失敗しました")),
            },
            result = &mut ctrl_c, if watch_ctrl_c => match result {
                Ok(()) => {
                    tracing::info!("Ctrl-C を受信しました");
                    None
                }
                Err(e) => {
                    tracing::warn!("Ctrl-C の監視を開始できませんでした: {}", e);
                    watch_ctrl_c = false;
                    continue;
                }
            },
        };

        let Some(line) = line else {
            break Ok(());
        };

        match dispatch(&handle, &line, &config).await {
            Ok(true) => {}
            Ok(false) => break Ok(()),
            Err(e) => break Err(e),
        }
    };

    // The driver may already be gone; that is the state we want.
    let _ = handle.send(Command::Quit);
    let engine = driver_task
        .await
        .context("タイマータスクが異常終了しました")?;

    outcome.map(|()| engine.snapshot())
}

/// Handles one input line. Returns false when the session should end.
async fn dispatch(handle: &DriverHandle, line: &str, config: &SessionConfig) -> Result<bool> {
    let input = match parse_line(line) {
        Ok(input) => input,
        Err(e) if e.is_ignorable() => return Ok(true),
        Err(e) => {
            Display::show_input_error(&e);
            return Ok(true);
        }
    };

    match input {
        InputLine::Command(Command::Quit) => return Ok(false),
        InputLine::Command(Command::SetTask(name)) => {
            let status = handle.status().await?;
            match status.task_name {
                Some(current) => Display::show_task_rejected(&current),
                None => handle.send(Command::SetTask(name))?,
            }
        }
        InputLine::Command(command) => handle.send(command)?,
        InputLine::Status => Display::show_status(&handle.status().await?, config.output),
        InputLine::Help => Display::show_help(),
    }

    Ok(true)
}
