//! Cumulative session statistics.
//!
//! Totals are rounded to one decimal place after every addition. The
//! rounding applies to the running total rather than to each contribution,
//! so many small additions can drift slightly from the exact sum. That
//! behavior is kept as-is.

use serde::{Deserialize, Serialize};

use crate::timer::ModeKind;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub focus_minutes: f64,
    pub break_minutes: f64,
    pub breaks_taken: u64,
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl SessionStats {
    /// Credit one completed interval.
    pub fn record_completion(&mut self, kind: ModeKind, duration_secs: u64) {
        let minutes = duration_secs as f64 / 60.0;
        match kind {
            ModeKind::Focus => {
                self.focus_minutes = round1(self.focus_minutes + minutes);
            }
            ModeKind::Break => {
                self.break_minutes = round1(self.break_minutes + minutes);
                self.breaks_taken += 1;
            }
        }
    }

    /// Committed totals plus the partial elapsed time of an in-progress
    /// interval. Does not touch `self`.
    pub fn with_elapsed(&self, kind: ModeKind, elapsed_secs: u64) -> SessionStats {
        let mut projected = *self;
        let minutes = elapsed_secs as f64 / 60.0;
        match kind {
            ModeKind::Focus => projected.focus_minutes = round1(self.focus_minutes + minutes),
            ModeKind::Break => projected.break_minutes = round1(self.break_minutes + minutes),
        }
        projected
    }

    pub fn reset(&mut self) {
        *self = SessionStats::default();
    }
}
