//! Pomodoro countdown: a checkpoint-based timer state machine.
//!
//! DESIGN
//! ======
//! Remaining time is a pure function of "now": the state is a checkpointed
//! remaining duration plus an optional `running_since` instant. Pause
//! folds elapsed time into the checkpoint; there is no per-second mutation
//! to drift. Tests drive this with paused tokio time instead of sleeping.
//!
//! The owning session runs at most one 1 Hz notifier task while the timer
//! runs; that task only bumps the snapshot revision and settles expiry.
//! It never carries timer state of its own, so a duplicated tick source
//! cannot double-count.

use serde::Serialize;
use tokio::time::Instant;

/// Configured session length: 25 minutes.
pub const SESSION_LENGTH_SECS: u64 = 1500;

// =============================================================================
// TIMER
// =============================================================================

/// Countdown state machine.
///
/// Invariants: remaining seconds only decrease while running; reaching 0
/// forces the stopped state; `reset` always yields `Stopped(1500)`.
#[derive(Debug)]
pub struct PomodoroTimer {
    remaining_at_checkpoint: u64,
    running_since: Option<Instant>,
}

impl PomodoroTimer {
    #[must_use]
    pub fn new() -> Self {
        Self { remaining_at_checkpoint: SESSION_LENGTH_SECS, running_since: None }
    }

    /// Start the countdown. Idempotent: starting while running changes
    /// nothing. Starting an expired timer is a no-op until `reset`.
    ///
    /// Returns `true` when this call transitioned the timer into running.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.running_since.is_some() || self.remaining_at_checkpoint == 0 {
            return false;
        }
        self.running_since = Some(now);
        true
    }

    /// Pause the countdown, folding elapsed time into the checkpoint.
    /// No-op when already stopped.
    pub fn pause(&mut self, now: Instant) {
        if let Some(since) = self.running_since.take() {
            let elapsed = now.saturating_duration_since(since).as_secs();
            self.remaining_at_checkpoint = self.remaining_at_checkpoint.saturating_sub(elapsed);
        }
    }

    /// Stop the clock and restore the configured session length.
    /// Valid from any state.
    pub fn reset(&mut self) {
        self.remaining_at_checkpoint = SESSION_LENGTH_SECS;
        self.running_since = None;
    }

    /// Seconds left on the clock at `now`.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> u64 {
        match self.running_since {
            Some(since) => {
                let elapsed = now.saturating_duration_since(since).as_secs();
                self.remaining_at_checkpoint.saturating_sub(elapsed)
            }
            None => self.remaining_at_checkpoint,
        }
    }

    /// Whether the clock is counting down at `now`. Reports `false` once
    /// the countdown has reached zero even before `settle` runs.
    #[must_use]
    pub fn is_running(&self, now: Instant) -> bool {
        self.running_since.is_some() && self.remaining(now) > 0
    }

    /// Fold expiry into explicit state: a running timer whose remaining
    /// time has reached zero becomes `Stopped(0)`.
    ///
    /// Returns `true` when this call performed the transition.
    pub fn settle(&mut self, now: Instant) -> bool {
        if self.running_since.is_some() && self.remaining(now) == 0 {
            self.remaining_at_checkpoint = 0;
            self.running_since = None;
            return true;
        }
        false
    }

    /// Snapshot at `now`, for the presentation boundary.
    #[must_use]
    pub fn view(&self, now: Instant) -> TimerView {
        let remaining_seconds = self.remaining(now);
        TimerView { remaining_seconds, is_running: self.is_running(now), clock: format_clock(remaining_seconds) }
    }
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Presentation-facing timer state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerView {
    pub remaining_seconds: u64,
    pub is_running: bool,
    /// `MM:SS` rendering of the remaining time.
    pub clock: String,
}

/// Format seconds as `MM:SS`.
#[must_use]
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
#[path = "timer_test.rs"]
mod tests;
