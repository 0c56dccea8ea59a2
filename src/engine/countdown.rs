//! Countdown engine for the Pomodoro Timer.
//!
//! This module provides the single-clock state machine:
//! - Start/stop/reset with idempotent semantics
//! - Mode switching (always reloads the mode's default duration)
//! - One-second ticks with completion handling
//! - Task-cycle bookkeeping (four work sessions per cycle)

use crate::types::{
    format_remaining, ConfigError, DurationTable, Mode, TaskProgress, TimerSnapshot, TimerState,
};

use super::command::Command;
use super::sink::DisplaySink;

// ============================================================================
// CountdownEngine
// ============================================================================

/// Countdown engine that owns the timer state and reports to a display sink.
#[derive(Debug)]
pub struct CountdownEngine<S> {
    /// Current clock state
    state: TimerState,
    /// Current task progress
    progress: TaskProgress,
    /// Default durations per mode
    durations: DurationTable,
    /// Where display updates go
    sink: S,
}

impl<S: DisplaySink> CountdownEngine<S> {
    /// Creates an engine in Work mode with the standard durations.
    pub fn new(sink: S) -> Self {
        Self::build(DurationTable::STANDARD, sink)
    }

    /// Creates an engine in Work mode with a custom duration table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DurationOutOfRange`] if any mode lasts zero
    /// seconds or more than can be shown as `MM:SS`.
    pub fn with_durations(durations: DurationTable, sink: S) -> Result<Self, ConfigError> {
        durations.validate()?;
        Ok(Self::build(durations, sink))
    }

    fn build(durations: DurationTable, sink: S) -> Self {
        Self {
            state: TimerState::new(Mode::Work, &durations),
            progress: TaskProgress::default(),
            durations,
            sink,
        }
    }

    /// Starts the countdown.
    ///
    /// Does nothing if already running. A clock that has run out is reset
    /// first, so starting never fires a completion immediately.
    pub fn start(&mut self) {
        if self.state.running {
            tracing::trace!("start ignored: already running");
            return;
        }

        if self.state.is_expired() {
            self.reset();
        }

        self.state.running = true;

        if self.progress.is_task_set() && self.progress.completed_count == 0 {
            let text = self.progress.progress_text();
            self.sink.display_progress(&text);
        }

        tracing::debug!(
            mode = %self.state.active_mode,
            remaining = self.state.remaining_seconds,
            "タイマーを開始"
        );
    }

    /// Stops the countdown, keeping the remaining time.
    pub fn stop(&mut self) {
        if !self.state.running {
            tracing::trace!("stop ignored: not running");
            return;
        }

        self.state.running = false;

        tracing::debug!(
            mode = %self.state.active_mode,
            remaining = self.state.remaining_seconds,
            "タイマーを停止"
        );
    }

    /// Stops and reloads the active mode's default duration.
    ///
    /// Task progress is left untouched.
    pub fn reset(&mut self) {
        self.stop();
        self.state.remaining_seconds = self.durations.seconds_for(self.state.active_mode);
        self.show_time();

        tracing::debug!(mode = %self.state.active_mode, "タイマーをリセット");
    }

    /// Stops and selects `mode`, loading its default duration.
    ///
    /// Any paused time of the mode being left is discarded.
    pub fn switch_mode(&mut self, mode: Mode) {
        self.stop();
        self.state.active_mode = mode;
        self.state.remaining_seconds = self.durations.seconds_for(mode);
        self.show_time();

        tracing::debug!(mode = %mode, "モードを切り替え");
    }

    /// Advances the clock by one second.
    ///
    /// Ignored while stopped.
    pub fn tick(&mut self) {
        if !self.state.running {
            tracing::trace!("tick ignored: not running");
            return;
        }

        if self.state.tick() {
            self.complete();
        } else {
            self.show_time();
        }
    }

    /// Handles the clock reaching zero.
    fn complete(&mut self) {
        self.stop();
        self.show_time();

        tracing::info!(mode = %self.state.active_mode, "カウントダウン完了");

        if self.state.active_mode != Mode::Work || !self.progress.is_task_set() {
            return;
        }

        if self.progress.record_completion() {
            tracing::info!("4セッション完了: 長い休憩の時間です");
            self.sink.notify_cycle_complete();
        } else {
            let text = self.progress.progress_text();
            self.sink.display_progress(&text);
        }
    }

    /// Registers the current task.
    ///
    /// Only one task is allowed at a time: returns false and changes nothing
    /// if a task is already set.
    pub fn set_task(&mut self, name: impl Into<String>) -> bool {
        if self.progress.is_task_set() {
            tracing::trace!("set_task ignored: a task is already set");
            return false;
        }

        let name = name.into();
        tracing::debug!(task = %name, "タスクを設定");
        self.progress.task_name = Some(name);

        if self.progress.completed_count == 0 {
            let text = self.progress.progress_text();
            self.sink.display_progress(&text);
        }

        true
    }

    /// Drops the current task and abandons its cycle.
    pub fn clear_task(&mut self) {
        if let Some(name) = self.progress.task_name.take() {
            tracing::debug!(task = %name, "タスクを削除");
        }
        self.progress.completed_count = 0;
    }

    /// Applies a host command.
    ///
    /// Returns false for [`Command::Quit`], which the engine itself ignores.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Start => self.start(),
            Command::Stop => self.stop(),
            Command::Reset => self.reset(),
            Command::SwitchMode(mode) => self.switch_mode(mode),
            Command::SetTask(name) => {
                self.set_task(name);
            }
            Command::ClearTask => self.clear_task(),
            Command::Quit => return false,
        }
        true
    }

    fn show_time(&mut self) {
        let text = self.format_remaining();
        self.sink.display_time(&text);
    }
}

impl<S> CountdownEngine<S> {
    /// Returns the remaining time as `MM:SS`.
    pub fn format_remaining(&self) -> String {
        format_remaining(self.state.remaining_seconds)
    }

    /// Returns a reference to the clock state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Returns a reference to the task progress.
    pub fn progress(&self) -> &TaskProgress {
        &self.progress
    }

    /// Returns the duration table in use.
    pub fn durations(&self) -> &DurationTable {
        &self.durations
    }

    /// Returns true while ticks should be delivered.
    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Returns a serializable view of the engine.
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            mode: self.state.active_mode,
            remaining_seconds: self.state.remaining_seconds,
            remaining: self.format_remaining(),
            running: self.state.running,
            task_name: self.progress.task_name.clone(),
            completed_count: self.progress.completed_count,
        }
    }

    /// Returns a reference to the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns a mutable reference to the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Returns a mutable reference to the clock state (for testing).
    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut TimerState {
        &mut self.state
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::sink::{DisplayEvent, RecordingSink};

    fn create_engine() -> CountdownEngine<RecordingSink> {
        CountdownEngine::new(RecordingSink::new())
    }

    fn time(text: &str) -> DisplayEvent {
        DisplayEvent::Time {
            text: text.to_string(),
        }
    }

    fn progress(text: &str) -> DisplayEvent {
        DisplayEvent::Progress {
            text: text.to_string(),
        }
    }

    // ------------------------------------------------------------------------
    // Lifecycle Tests
    // ------------------------------------------------------------------------

    mod lifecycle_tests {
        use super::*;

        #[test]
        fn test_new_engine() {
            let engine = create_engine();
            let state = engine.state();

            assert_eq!(state.active_mode, Mode::Work);
            assert_eq!(state.remaining_seconds, 1500);
            assert!(!state.running);
            assert!(!engine.progress().is_task_set());
            assert_eq!(engine.progress().completed_count, 0);
            assert!(engine.sink().events().is_empty());
        }

        #[test]
        fn test_start() {
            let mut engine = create_engine();
            engine.start();

            assert!(engine.is_running());
            assert_eq!(engine.state().remaining_seconds, 1500);
            assert!(engine.sink().events().is_empty());
        }

        #[test]
        fn test_start_twice_equals_once() {
            let mut once = create_engine();
            once.start();

            let mut twice = create_engine();
            twice.start();
            twice.start();

            assert_eq!(once.state(), twice.state());
            assert_eq!(once.sink().events(), twice.sink().events());
        }

        #[test]
        fn test_stop_twice_equals_once() {
            let mut engine = create_engine();
            engine.start();
            engine.tick();

            engine.stop();
            let after_one = *engine.state();
            engine.stop();

            assert_eq!(*engine.state(), after_one);
            assert!(!engine.is_running());
            assert_eq!(engine.state().remaining_seconds, 1499);
        }

        #[test]
        fn test_stop_when_stopped_is_noop() {
            let mut engine = create_engine();
            engine.stop();

            assert!(!engine.is_running());
            assert!(engine.sink().events().is_empty());
        }

        #[test]
        fn test_start_from_zero_resets_first() {
            let mut engine = create_engine();
            engine.state_mut().remaining_seconds = 0;

            engine.start();

            assert!(engine.is_running());
            assert_eq!(engine.state().remaining_seconds, 1500);
            assert_eq!(engine.sink().events(), &[time("25:00")]);
        }

        #[test]
        fn test_stop_then_start_resumes() {
            let mut engine = create_engine();
            engine.start();
            engine.tick();
            engine.tick();
            engine.stop();
            engine.start();

            assert!(engine.is_running());
            assert_eq!(engine.state().remaining_seconds, 1498);
        }
    }

    // ------------------------------------------------------------------------
    // Reset / Mode Tests
    // ------------------------------------------------------------------------

    mod mode_tests {
        use super::*;

        #[test]
        fn test_reset_each_mode() {
            for (mode, expected) in [
                (Mode::Work, "25:00"),
                (Mode::ShortBreak, "05:00"),
                (Mode::LongBreak, "15:00"),
            ] {
                let mut engine = create_engine();
                engine.switch_mode(mode);
                engine.start();
                engine.tick();

                engine.reset();

                assert!(!engine.is_running());
                assert_eq!(engine.format_remaining(), expected);
                assert_eq!(engine.sink().last_time(), Some(expected));
            }
        }

        #[test]
        fn test_reset_keeps_task_progress() {
            let mut engine = create_engine();
            engine.set_task("Write report");
            engine.progress.completed_count = 2;

            engine.reset();

            assert!(engine.progress().is_task_set());
            assert_eq!(engine.progress().completed_count, 2);
        }

        #[test]
        fn test_switch_mode_discards_progress() {
            let mut engine = create_engine();
            engine.start();
            engine.state_mut().remaining_seconds = 1000;

            engine.switch_mode(Mode::ShortBreak);

            let state = engine.state();
            assert_eq!(state.active_mode, Mode::ShortBreak);
            assert_eq!(state.remaining_seconds, 300);
            assert!(!state.running);

            engine.switch_mode(Mode::Work);
            assert_eq!(engine.state().remaining_seconds, 1500);
        }

        #[test]
        fn test_switch_mode_displays_new_time() {
            let mut engine = create_engine();
            engine.switch_mode(Mode::LongBreak);

            assert_eq!(engine.sink().events(), &[time("15:00")]);
        }

        #[test]
        fn test_custom_durations() {
            let table = DurationTable::from_minutes(50, 10, 30);
            let mut engine = CountdownEngine::with_durations(table, RecordingSink::new()).unwrap();

            assert_eq!(engine.durations(), &table);
            assert_eq!(engine.format_remaining(), "50:00");
            engine.switch_mode(Mode::ShortBreak);
            assert_eq!(engine.format_remaining(), "10:00");
            engine.switch_mode(Mode::LongBreak);
            assert_eq!(engine.format_remaining(), "30:00");
        }

        #[test]
        fn test_zero_duration_rejected() {
            let table = DurationTable::from_minutes(0, 5, 15);
            let result = CountdownEngine::with_durations(table, RecordingSink::new());

            assert_eq!(
                result.unwrap_err(),
                ConfigError::DurationOutOfRange {
                    mode: Mode::Work,
                    seconds: 0
                }
            );
        }

        #[test]
        fn test_duration_past_two_digit_minutes_rejected() {
            let table = DurationTable::from_minutes(25, 5, 200);
            let result = CountdownEngine::with_durations(table, RecordingSink::new());

            assert_eq!(
                result.unwrap_err(),
                ConfigError::DurationOutOfRange {
                    mode: Mode::LongBreak,
                    seconds: 12000
                }
            );
        }

        #[test]
        fn test_longest_duration_stops_at_zero() {
            let table = DurationTable::from_minutes(99, 5, 15);
            let mut engine = CountdownEngine::with_durations(table, RecordingSink::new()).unwrap();

            assert_eq!(engine.format_remaining(), "99:00");
            engine.start();
            while engine.is_running() {
                engine.tick();
            }

            assert_eq!(engine.state().remaining_seconds, 0);
            assert_eq!(engine.sink().last_time(), Some("00:00"));
        }
    }

    // ------------------------------------------------------------------------
    // Tick Tests
    // ------------------------------------------------------------------------

    mod tick_tests {
        use super::*;

        #[test]
        fn test_tick_while_stopped_is_ignored() {
            let mut engine = create_engine();
            engine.tick();

            assert_eq!(engine.state().remaining_seconds, 1500);
            assert!(engine.sink().events().is_empty());
        }

        #[test]
        fn test_tick_displays_new_time() {
            let mut engine = create_engine();
            engine.start();
            engine.tick();

            assert_eq!(engine.state().remaining_seconds, 1499);
            assert_eq!(engine.sink().events(), &[time("24:59")]);
        }

        #[test]
        fn test_completion_stops_before_notifying() {
            let mut engine = create_engine();
            engine.start();
            engine.state_mut().remaining_seconds = 1;

            engine.tick();

            assert!(!engine.is_running());
            assert_eq!(engine.state().remaining_seconds, 0);
            assert_eq!(engine.sink().events(), &[time("00:00")]);
        }

        #[test]
        fn test_completion_with_task_reports_progress() {
            let mut engine = create_engine();
            engine.set_task("Write report");
            engine.start();
            engine.sink_mut().clear();
            engine.state_mut().remaining_seconds = 1;

            engine.tick();

            assert_eq!(engine.progress().completed_count, 1);
            assert_eq!(engine.sink().events(), &[time("00:00"), progress("1/4")]);
        }

        #[test]
        fn test_break_completion_does_not_count() {
            let mut engine = create_engine();
            engine.set_task("Write report");
            engine.switch_mode(Mode::ShortBreak);
            engine.start();
            engine.state_mut().remaining_seconds = 1;

            engine.tick();

            assert!(!engine.is_running());
            assert_eq!(engine.progress().completed_count, 0);
        }

        #[test]
        fn test_work_completion_without_task_does_not_count() {
            let mut engine = create_engine();
            engine.start();
            engine.state_mut().remaining_seconds = 1;

            engine.tick();

            assert_eq!(engine.progress().completed_count, 0);
            assert_eq!(engine.sink().last_progress(), None);
        }

        #[test]
        fn test_fourth_completion_closes_cycle() {
            let mut engine = create_engine();
            engine.set_task("Write report");
            engine.progress.completed_count = 3;
            engine.start();
            engine.sink_mut().clear();
            engine.state_mut().remaining_seconds = 1;

            engine.tick();

            assert_eq!(engine.progress().completed_count, 0);
            assert_eq!(
                engine.sink().events(),
                &[time("00:00"), DisplayEvent::CycleComplete]
            );
        }
    }

    // ------------------------------------------------------------------------
    // Task Tests
    // ------------------------------------------------------------------------

    mod task_tests {
        use super::*;

        #[test]
        fn test_set_task_shows_zero_progress() {
            let mut engine = create_engine();

            assert!(engine.set_task("Write report"));
            assert_eq!(
                engine.progress().task_name.as_deref(),
                Some("Write report")
            );
            assert_eq!(engine.sink().events(), &[progress("0/4")]);
        }

        #[test]
        fn test_second_set_task_is_rejected() {
            let mut engine = create_engine();
            engine.set_task("First");

            assert!(!engine.set_task("Second"));
            assert_eq!(engine.progress().task_name.as_deref(), Some("First"));
            assert_eq!(engine.sink().events().len(), 1);
        }

        #[test]
        fn test_clear_task_resets_counter() {
            let mut engine = create_engine();
            engine.set_task("First");
            engine.progress.completed_count = 3;

            engine.clear_task();

            assert!(!engine.progress().is_task_set());
            assert_eq!(engine.progress().completed_count, 0);
            assert!(engine.set_task("Second"));
        }

        #[test]
        fn test_start_refreshes_zero_progress() {
            let mut engine = create_engine();
            engine.set_task("Write report");
            engine.sink_mut().clear();

            engine.start();

            assert_eq!(engine.sink().events(), &[progress("0/4")]);
        }

        #[test]
        fn test_start_with_progress_does_not_refresh() {
            let mut engine = create_engine();
            engine.set_task("Write report");
            engine.progress.completed_count = 2;
            engine.sink_mut().clear();

            engine.start();

            assert!(engine.sink().events().is_empty());
        }
    }

    // ------------------------------------------------------------------------
    // Command / Snapshot Tests
    // ------------------------------------------------------------------------

    mod command_tests {
        use super::*;

        #[test]
        fn test_apply_maps_commands() {
            let mut engine = create_engine();

            assert!(engine.apply(Command::SetTask("Write report".to_string())));
            assert!(engine.apply(Command::Start));
            assert!(engine.is_running());
            assert!(engine.apply(Command::Stop));
            assert!(!engine.is_running());
            assert!(engine.apply(Command::SwitchMode(Mode::LongBreak)));
            assert_eq!(engine.state().active_mode, Mode::LongBreak);
            assert!(engine.apply(Command::Reset));
            assert!(engine.apply(Command::ClearTask));
            assert!(!engine.progress().is_task_set());
        }

        #[test]
        fn test_apply_quit_returns_false() {
            let mut engine = create_engine();
            assert!(!engine.apply(Command::Quit));
        }

        #[test]
        fn test_snapshot() {
            let mut engine = create_engine();
            engine.set_task("Write report");
            engine.start();
            engine.tick();

            let snapshot = engine.snapshot();
            assert_eq!(snapshot.mode, Mode::Work);
            assert_eq!(snapshot.remaining_seconds, 1499);
            assert_eq!(snapshot.remaining, "24:59");
            assert!(snapshot.running);
            assert_eq!(snapshot.task_name.as_deref(), Some("Write report"));
            assert_eq!(snapshot.completed_count, 0);
        }
    }
}
