//! Wall-clock countdown shared by the main timer and personal timers.
//!
//! A running countdown stores only the absolute target timestamp. The
//! remaining time is always derived from `target - now`, never advanced by
//! counting ticks, so missed polls (sleep, throttled tabs, a closed terminal)
//! cannot make the timer drift.
//!
//! ```text
//! Idle --toggle--> Running --toggle--> Idle (frozen)
//!                     |
//!                     +--poll, remaining == 0--> Idle (time_left = 0)
//! ```

use serde::{Deserialize, Serialize};

/// Outcome of a single poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The countdown was not running; nothing changed.
    Idle,
    /// Still running with this many seconds left.
    Running(u64),
    /// Reached zero during this poll and is now idle.
    Completed,
}

/// Outcome of `Countdown::toggle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Started,
    Paused,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    duration_secs: u64,
    time_left_secs: u64,
    /// Epoch milliseconds at which the countdown reaches zero.
    /// `Some` exactly while running.
    target_ms: Option<i64>,
}

/// Seconds between `now_ms` and `target_ms`, rounded half-up.
///
/// May be negative when the target lies in the past.
pub fn remaining_secs(target_ms: i64, now_ms: i64) -> i64 {
    let diff = target_ms.saturating_sub(now_ms) as f64 / 1000.0;
    (diff + 0.5).floor() as i64
}

/// Format whole seconds as `MM:SS`. Minutes are not wrapped at 60.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn target_after(now_ms: i64, secs: u64) -> i64 {
    let millis = i64::try_from(secs.saturating_mul(1000)).unwrap_or(i64::MAX);
    now_ms.saturating_add(millis)
}

impl Countdown {
    /// An idle countdown at full duration.
    pub fn new(duration_secs: u64) -> Self {
        Self {
            duration_secs,
            time_left_secs: duration_secs,
            target_ms: None,
        }
    }

    /// Rebuild a countdown from persisted values.
    ///
    /// `stored_left` is clamped into `[0, duration]` and defaults to the full
    /// duration. A `running_target` that still lies in the future resumes the
    /// countdown against that same target; one in the past resolves to idle
    /// at zero without reporting a completion.
    pub fn rehydrate(
        duration_secs: u64,
        stored_left: Option<u64>,
        running_target: Option<i64>,
        now_ms: i64,
    ) -> Self {
        let mut countdown = Self {
            duration_secs,
            time_left_secs: stored_left.unwrap_or(duration_secs).min(duration_secs),
            target_ms: None,
        };

        if let Some(target) = running_target {
            let remaining = remaining_secs(target, now_ms);
            if remaining > 0 {
                countdown.time_left_secs = (remaining as u64).min(duration_secs);
                countdown.target_ms = Some(target);
            } else {
                countdown.time_left_secs = 0;
            }
        }

        countdown
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    pub fn time_left_secs(&self) -> u64 {
        self.time_left_secs
    }

    pub fn target_ms(&self) -> Option<i64> {
        self.target_ms
    }

    pub fn is_running(&self) -> bool {
        self.target_ms.is_some()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.duration_secs.saturating_sub(self.time_left_secs)
    }

    /// 0.0 .. 1.0 progress through the configured interval.
    pub fn progress(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        (self.elapsed_secs() as f64 / self.duration_secs as f64).clamp(0.0, 1.0)
    }

    pub fn formatted(&self) -> String {
        format_clock(self.time_left_secs)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Pause a running countdown, freezing the remaining time, or start an
    /// idle one. An exhausted countdown restarts from full duration.
    pub fn toggle(&mut self, now_ms: i64) -> Toggle {
        if self.is_running() {
            self.time_left_secs = self.derive_left(now_ms);
            self.target_ms = None;
            Toggle::Paused
        } else {
            let start = if self.time_left_secs == 0 {
                self.duration_secs
            } else {
                self.time_left_secs
            };
            self.time_left_secs = start;
            self.target_ms = Some(target_after(now_ms, start));
            Toggle::Started
        }
    }

    /// Back to idle at full duration. Idempotent.
    pub fn reset(&mut self) {
        self.target_ms = None;
        self.time_left_secs = self.duration_secs;
    }

    /// Switch to a new duration at full length. A running countdown keeps
    /// running against a fresh target.
    pub fn restart_with(&mut self, duration_secs: u64, now_ms: i64) {
        self.duration_secs = duration_secs;
        self.time_left_secs = duration_secs;
        if self.is_running() {
            self.target_ms = Some(target_after(now_ms, duration_secs));
        }
    }

    pub fn poll(&mut self, now_ms: i64) -> Tick {
        if !self.is_running() {
            return Tick::Idle;
        }
        let left = self.derive_left(now_ms);
        self.time_left_secs = left;
        if left == 0 {
            self.target_ms = None;
            Tick::Completed
        } else {
            Tick::Running(left)
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Remaining seconds against the target, clamped to `[0, time_left]` so
    /// the value never climbs if the wall clock steps backwards.
    fn derive_left(&self, now_ms: i64) -> u64 {
        match self.target_ms {
            Some(target) => {
                let remaining = remaining_secs(target, now_ms).max(0) as u64;
                remaining.min(self.time_left_secs)
            }
            None => self.time_left_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: i64 = 1_700_000_000_000;

    #[test]
    fn start_sets_target() {
        let mut c = Countdown::new(1500);
        assert_eq!(c.toggle(T0), Toggle::Started);
        assert!(c.is_running());
        assert_eq!(c.target_ms(), Some(T0 + 1_500_000));
        assert_eq!(c.time_left_secs(), 1500);
    }

    #[test]
    fn pause_freezes_remaining() {
        let mut c = Countdown::new(1500);
        c.toggle(T0);
        assert_eq!(c.toggle(T0 + 100_400), Toggle::Paused);
        assert_eq!(c.time_left_secs(), 1400);
        assert!(!c.is_running());
        assert_eq!(c.target_ms(), None);
        // Paused time does not drain.
        assert_eq!(c.poll(T0 + 900_000), Tick::Idle);
        assert_eq!(c.time_left_secs(), 1400);
    }

    #[test]
    fn resume_continues_from_pause() {
        let mut c = Countdown::new(1500);
        c.toggle(T0);
        c.toggle(T0 + 100_000);
        c.toggle(T0 + 500_000);
        assert_eq!(c.target_ms(), Some(T0 + 500_000 + 1_400_000));
    }

    #[test]
    fn exhausted_restarts_from_full() {
        let mut c = Countdown::new(60);
        c.toggle(T0);
        assert_eq!(c.poll(T0 + 60_000), Tick::Completed);
        assert_eq!(c.time_left_secs(), 0);
        c.toggle(T0 + 70_000);
        assert_eq!(c.time_left_secs(), 60);
        assert_eq!(c.target_ms(), Some(T0 + 130_000));
    }

    #[test]
    fn poll_rounds_half_up() {
        let mut c = Countdown::new(10);
        c.toggle(T0);
        assert_eq!(c.poll(T0 + 1_500), Tick::Running(9));
        assert_eq!(c.poll(T0 + 1_501), Tick::Running(8));
        assert_eq!(c.poll(T0 + 9_500), Tick::Running(1));
        assert_eq!(c.poll(T0 + 9_501), Tick::Completed);
    }

    #[test]
    fn poll_never_increases_when_clock_goes_back() {
        let mut c = Countdown::new(100);
        c.toggle(T0);
        c.poll(T0 + 50_000);
        assert_eq!(c.time_left_secs(), 50);
        assert_eq!(c.poll(T0 + 10_000), Tick::Running(50));
    }

    #[test]
    fn missed_ticks_do_not_matter() {
        let mut c = Countdown::new(1500);
        c.toggle(T0);
        assert_eq!(c.poll(T0 + 1_000_000), Tick::Running(500));
    }

    #[test]
    fn reset_is_idempotent() {
        let mut c = Countdown::new(300);
        c.toggle(T0);
        c.poll(T0 + 10_000);
        c.reset();
        let once = c.clone();
        c.reset();
        assert_eq!(c, once);
        assert_eq!(c.time_left_secs(), 300);
        assert!(!c.is_running());
    }

    #[test]
    fn restart_with_keeps_running() {
        let mut c = Countdown::new(1500);
        c.toggle(T0);
        c.restart_with(300, T0 + 20_000);
        assert!(c.is_running());
        assert_eq!(c.time_left_secs(), 300);
        assert_eq!(c.target_ms(), Some(T0 + 320_000));
    }

    #[test]
    fn restart_with_stays_idle() {
        let mut c = Countdown::new(1500);
        c.restart_with(300, T0);
        assert!(!c.is_running());
        assert_eq!(c.time_left_secs(), 300);
    }

    #[test]
    fn progress_bounds() {
        let mut c = Countdown::new(100);
        assert_eq!(c.progress(), 0.0);
        c.toggle(T0);
        c.poll(T0 + 25_000);
        assert!((c.progress() - 0.25).abs() < 1e-9);
        c.poll(T0 + 100_000);
        assert_eq!(c.progress(), 1.0);
        assert_eq!(Countdown::new(0).progress(), 0.0);
    }

    #[test]
    fn rehydrate_future_target_resumes() {
        let c = Countdown::rehydrate(1500, Some(100), Some(T0 + 10_000), T0);
        assert!(c.is_running());
        assert_eq!(c.time_left_secs(), 10);
        assert_eq!(c.target_ms(), Some(T0 + 10_000));
    }

    #[test]
    fn rehydrate_past_target_resolves_idle() {
        let c = Countdown::rehydrate(1500, Some(100), Some(T0 - 5_000), T0);
        assert!(!c.is_running());
        assert_eq!(c.time_left_secs(), 0);
    }

    #[test]
    fn rehydrate_clamps_left() {
        let c = Countdown::rehydrate(300, Some(9_999), None, T0);
        assert_eq!(c.time_left_secs(), 300);
        let c = Countdown::rehydrate(300, None, None, T0);
        assert_eq!(c.time_left_secs(), 300);
    }

    #[test]
    fn clock_format() {
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(6_000), "100:00");
    }
}
