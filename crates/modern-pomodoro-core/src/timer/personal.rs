//! Named, coloured countdowns that run alongside the main timer.
//!
//! Personal timers share the [`Countdown`] shape but never touch the mode
//! or stats of the main timer. They stay in the collection after reaching
//! zero; only their running state resets.

use serde::Serialize;
use uuid::Uuid;

use super::countdown::{Countdown, Tick, Toggle};

pub const DEFAULT_COLOR: &str = "#111827";
pub const DEFAULT_MINUTES: f64 = 25.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalTimer {
    pub id: String,
    pub name: String,
    pub color: String,
    countdown: Countdown,
}

impl PersonalTimer {
    pub fn from_parts(id: String, name: String, color: String, countdown: Countdown) -> Self {
        Self {
            id,
            name,
            color,
            countdown,
        }
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }
}

/// User input for a new personal timer, before coercion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalTimerDraft {
    pub name: String,
    pub minutes: f64,
    pub color: String,
}

impl Default for PersonalTimerDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            minutes: DEFAULT_MINUTES,
            color: DEFAULT_COLOR.into(),
        }
    }
}

/// Non-positive or non-finite minutes become one minute.
pub fn sanitize_minutes(minutes: f64) -> f64 {
    if minutes.is_finite() && minutes > 0.0 {
        minutes
    } else {
        1.0
    }
}

/// Whole seconds for a minute count, never below one second.
pub fn duration_from_minutes(minutes: f64) -> u64 {
    ((sanitize_minutes(minutes) * 60.0).round() as u64).max(1)
}

/// `#rgb` or `#rrggbb`, lowercased; anything else becomes the default.
pub fn normalize_color(color: &str) -> String {
    let color = color.trim();
    let valid = color
        .strip_prefix('#')
        .map(|hex| (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()))
        .unwrap_or(false);
    if valid {
        color.to_ascii_lowercase()
    } else {
        DEFAULT_COLOR.into()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersonalTimers {
    timers: Vec<PersonalTimer>,
}

impl PersonalTimers {
    pub fn from_timers(timers: Vec<PersonalTimer>) -> Self {
        Self { timers }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersonalTimer> {
        self.timers.iter()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&PersonalTimer> {
        self.timers.iter().find(|t| t.id == id)
    }

    pub fn any_running(&self) -> bool {
        self.timers.iter().any(|t| t.countdown.is_running())
    }

    /// Append a new idle timer built from `draft`. A blank name falls back
    /// to `default_name`.
    pub fn add(&mut self, draft: &PersonalTimerDraft, default_name: &str) -> &PersonalTimer {
        let name = match draft.name.trim() {
            "" => default_name.to_string(),
            trimmed => trimmed.to_string(),
        };
        self.timers.push(PersonalTimer {
            id: Uuid::new_v4().to_string(),
            name,
            color: normalize_color(&draft.color),
            countdown: Countdown::new(duration_from_minutes(draft.minutes)),
        });
        &self.timers[self.timers.len() - 1]
    }

    /// `None` when no timer has this id.
    pub fn toggle(&mut self, id: &str, now_ms: i64) -> Option<Toggle> {
        self.get_mut(id).map(|t| t.countdown.toggle(now_ms))
    }

    /// False when no timer has this id.
    pub fn reset(&mut self, id: &str) -> bool {
        match self.get_mut(id) {
            Some(t) => {
                t.countdown.reset();
                true
            }
            None => false,
        }
    }

    /// Advance every running timer against the same `now_ms`. Returns the
    /// ids of timers that reached zero in this pass.
    pub fn poll_all(&mut self, now_ms: i64) -> Vec<String> {
        self.timers
            .iter_mut()
            .filter_map(|t| match t.countdown.poll(now_ms) {
                Tick::Completed => Some(t.id.clone()),
                Tick::Idle | Tick::Running(_) => None,
            })
            .collect()
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut PersonalTimer> {
        self.timers.iter_mut().find(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: i64 = 1_700_000_000_000;

    fn draft(name: &str, minutes: f64) -> PersonalTimerDraft {
        PersonalTimerDraft {
            name: name.into(),
            minutes,
            color: "#FF0000".into(),
        }
    }

    #[test]
    fn zero_minutes_clamp_to_one_minute() {
        let mut timers = PersonalTimers::default();
        let t = timers.add(&draft("Ayşe", 0.0), "Yeni Sayaç");
        assert_eq!(t.countdown().duration_secs(), 60);
        assert_eq!(t.countdown().time_left_secs(), 60);
    }

    #[test]
    fn invalid_minutes_clamp() {
        assert_eq!(duration_from_minutes(-3.0), 60);
        assert_eq!(duration_from_minutes(f64::NAN), 60);
        assert_eq!(duration_from_minutes(f64::INFINITY), 60);
        assert_eq!(duration_from_minutes(0.5), 30);
    }

    #[test]
    fn blank_name_uses_default() {
        let mut timers = PersonalTimers::default();
        let t = timers.add(&draft("   ", 5.0), "New Timer");
        assert_eq!(t.name, "New Timer");
        assert_eq!(t.color, "#ff0000");
    }

    #[test]
    fn color_normalization() {
        assert_eq!(normalize_color("#ABC"), "#abc");
        assert_eq!(normalize_color("red"), DEFAULT_COLOR);
        assert_eq!(normalize_color("#12345g"), DEFAULT_COLOR);
    }

    #[test]
    fn timers_run_independently() {
        let mut timers = PersonalTimers::default();
        let a = timers.add(&draft("a", 1.0), "x").id.clone();
        let b = timers.add(&draft("b", 2.0), "x").id.clone();
        timers.toggle(&a, T0);
        timers.toggle(&b, T0);
        assert!(timers.any_running());

        let done = timers.poll_all(T0 + 60_000);
        assert_eq!(done, vec![a.clone()]);
        assert!(!timers.get(&a).unwrap().countdown().is_running());
        assert_eq!(timers.get(&b).unwrap().countdown().time_left_secs(), 60);

        let done = timers.poll_all(T0 + 120_000);
        assert_eq!(done, vec![b.clone()]);
        assert!(!timers.any_running());
        // Completed timers stay in the collection.
        assert_eq!(timers.len(), 2);
    }

    #[test]
    fn unknown_id_is_ignored() {
        let mut timers = PersonalTimers::default();
        assert_eq!(timers.toggle("nope", T0), None);
        assert!(!timers.reset("nope"));
    }

    #[test]
    fn reset_restores_duration() {
        let mut timers = PersonalTimers::default();
        let id = timers.add(&draft("a", 10.0), "x").id.clone();
        timers.toggle(&id, T0);
        timers.poll_all(T0 + 30_000);
        assert!(timers.reset(&id));
        let t = timers.get(&id).unwrap();
        assert_eq!(t.countdown().time_left_secs(), 600);
        assert!(!t.countdown().is_running());
    }
}
