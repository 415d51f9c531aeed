//! Timer session model.
//!
//! The session model owns the main countdown and everything around it:
//! the selected mode, cumulative stats, the notes log, theme and language
//! preferences, and the personal timers. It is a pure state machine. Time
//! is passed in as epoch milliseconds, and each mutating operation returns
//! the [`Effect`]s the host should carry out.
//!
//! ## Usage
//!
//! ```ignore
//! let mut model = SessionModel::new(Catalog::default());
//! let effects = model.toggle(now_ms());
//! // On a fixed cadence while anything is running:
//! let effects = model.poll(now_ms());
//! ```

use chrono::{DateTime, Utc};

use super::countdown::{Countdown, Tick, Toggle};
use super::mode::Mode;
use super::personal::{PersonalTimerDraft, PersonalTimers};
use crate::catalog::{Catalog, Labels};
use crate::events::Effect;
use crate::logbook::LogBook;
use crate::stats::{round1, SessionStats};

#[derive(Debug, Clone, PartialEq)]
pub struct SessionModel {
    catalog: Catalog,
    mode: Mode,
    timer: Countdown,
    stats: SessionStats,
    log: LogBook,
    theme: String,
    language: String,
    personal: PersonalTimers,
}

/// Fields restored from a snapshot, already validated.
pub(crate) struct SessionParts {
    pub mode: Mode,
    pub timer: Countdown,
    pub stats: SessionStats,
    pub log: LogBook,
    pub theme: String,
    pub language: String,
    pub personal: PersonalTimers,
}

impl SessionModel {
    /// Fresh state: default mode at full duration, empty stats and log.
    pub fn new(catalog: Catalog) -> Self {
        let mode = Mode::default();
        let timer = Countdown::new(catalog.modes.duration_secs(mode));
        let theme = catalog.themes.default_key().to_string();
        let language = catalog.languages.default_key().to_string();
        Self {
            catalog,
            mode,
            timer,
            stats: SessionStats::default(),
            log: LogBook::default(),
            theme,
            language,
            personal: PersonalTimers::default(),
        }
    }

    pub(crate) fn from_parts(catalog: Catalog, parts: SessionParts) -> Self {
        Self {
            catalog,
            mode: parts.mode,
            timer: parts.timer,
            stats: parts.stats,
            log: parts.log,
            theme: parts.theme,
            language: parts.language,
            personal: parts.personal,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn timer(&self) -> &Countdown {
        &self.timer
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn log(&self) -> &LogBook {
        &self.log
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn personal_timers(&self) -> &PersonalTimers {
        &self.personal
    }

    pub fn labels(&self) -> &Labels {
        self.catalog.languages.labels(&self.language)
    }

    pub fn mode_label(&self) -> &str {
        self.labels().mode(self.mode)
    }

    pub fn is_main_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn is_personal_running(&self) -> bool {
        self.personal.any_running()
    }

    /// Committed stats plus the elapsed part of a running interval.
    pub fn live_stats(&self) -> SessionStats {
        if self.timer.is_running() {
            self.stats
                .with_elapsed(self.mode.kind(), self.timer.elapsed_secs())
        } else {
            self.stats
        }
    }

    // ── Main timer ───────────────────────────────────────────────────

    pub fn toggle(&mut self, now_ms: i64) -> Vec<Effect> {
        match self.timer.toggle(now_ms) {
            Toggle::Started => vec![Effect::RequestNotificationPermission, Effect::Persist],
            Toggle::Paused => vec![Effect::Persist],
        }
    }

    pub fn reset(&mut self) -> Vec<Effect> {
        self.timer.reset();
        vec![Effect::ClearAlert, Effect::Persist]
    }

    /// Switch modes. A running countdown keeps running at the new mode's
    /// full duration; switching to the current mode does nothing.
    pub fn change_mode(&mut self, next: Mode, now_ms: i64) -> Vec<Effect> {
        if next == self.mode {
            return Vec::new();
        }
        self.mode = next;
        self.timer
            .restart_with(self.catalog.modes.duration_secs(next), now_ms);
        vec![Effect::ClearAlert, Effect::Persist]
    }

    /// Advance the main countdown. Fires completion effects and credits the
    /// stats when it reaches zero.
    pub fn poll(&mut self, now_ms: i64) -> Vec<Effect> {
        let before = self.timer.time_left_secs();
        match self.timer.poll(now_ms) {
            Tick::Idle => Vec::new(),
            Tick::Running(left) if left == before => Vec::new(),
            Tick::Running(_) => vec![Effect::Persist],
            Tick::Completed => self.complete(now_ms),
        }
    }

    fn complete(&mut self, now_ms: i64) -> Vec<Effect> {
        let duration_secs = self.timer.duration_secs();
        self.stats.record_completion(self.mode.kind(), duration_secs);

        let labels = self.labels();
        let message = labels.completed_message(labels.mode(self.mode));
        let body = labels.notification_body.clone();
        tracing::debug!(mode = %self.mode, duration_secs, "interval completed");

        vec![
            Effect::IntervalCompleted {
                mode: self.mode,
                duration_secs,
                completed_at: DateTime::from_timestamp_millis(now_ms).unwrap_or_else(Utc::now),
            },
            Effect::ShowAlert {
                message: message.clone(),
            },
            Effect::PlayChime,
            Effect::ShowNotification {
                title: message,
                body,
            },
            Effect::Persist,
        ]
    }

    // ── Personal timers ──────────────────────────────────────────────

    /// Add a personal timer and return its id.
    pub fn add_personal_timer(&mut self, draft: &PersonalTimerDraft) -> (String, Vec<Effect>) {
        let default_name = self.labels().personal_default_name.clone();
        let id = self.personal.add(draft, &default_name).id.clone();
        (id, vec![Effect::Persist])
    }

    /// Unknown ids are ignored.
    pub fn toggle_personal_timer(&mut self, id: &str, now_ms: i64) -> Vec<Effect> {
        match self.personal.toggle(id, now_ms) {
            Some(Toggle::Started) => vec![Effect::RequestNotificationPermission, Effect::Persist],
            Some(Toggle::Paused) => vec![Effect::Persist],
            None => {
                tracing::debug!(id, "toggle for unknown personal timer ignored");
                Vec::new()
            }
        }
    }

    /// Unknown ids are ignored.
    pub fn reset_personal_timer(&mut self, id: &str) -> Vec<Effect> {
        if self.personal.reset(id) {
            vec![Effect::Persist]
        } else {
            Vec::new()
        }
    }

    /// Advance every running personal timer against one `now_ms`.
    pub fn poll_personal(&mut self, now_ms: i64) -> Vec<Effect> {
        let before = self.personal.clone();
        let completed = self.personal.poll_all(now_ms);

        let labels = self.catalog.languages.labels(&self.language);
        let mut effects = Vec::new();
        for id in &completed {
            let Some(timer) = self.personal.get(id) else {
                continue;
            };
            let message = labels.completed_message(&timer.name);
            effects.push(Effect::ShowAlert {
                message: message.clone(),
            });
            effects.push(Effect::PlayChime);
            effects.push(Effect::ShowNotification {
                title: message,
                body: labels.notification_body.clone(),
            });
        }
        if self.personal != before {
            effects.push(Effect::Persist);
        }
        effects
    }

    // ── Notes, stats, preferences ────────────────────────────────────

    /// Log a note against the current mode with the minutes elapsed in the
    /// current interval. Blank notes produce no effects.
    pub fn add_log_entry(&mut self, text: &str, now_ms: i64) -> Vec<Effect> {
        let mut probe = self.timer.clone();
        probe.poll(now_ms);
        let minutes = round1(probe.elapsed_secs() as f64 / 60.0);
        match self.log.add(text, self.mode, minutes, now_ms) {
            Some(_) => vec![Effect::Persist],
            None => Vec::new(),
        }
    }

    pub fn reset_stats(&mut self) -> Vec<Effect> {
        self.stats.reset();
        vec![Effect::Persist]
    }

    /// Unknown theme keys are ignored.
    pub fn set_theme(&mut self, key: &str) -> Vec<Effect> {
        match self.catalog.themes.get(key) {
            Some(theme) if theme.key != self.theme => {
                self.theme = theme.key.clone();
                vec![Effect::Persist]
            }
            Some(_) => Vec::new(),
            None => {
                tracing::debug!(key, "unknown theme ignored");
                Vec::new()
            }
        }
    }

    /// Unknown language codes are ignored.
    pub fn set_language(&mut self, code: &str) -> Vec<Effect> {
        if !self.catalog.languages.contains(code) {
            tracing::debug!(code, "unknown language ignored");
            return Vec::new();
        }
        if code == self.language {
            return Vec::new();
        }
        self.language = code.to_string();
        vec![Effect::Persist]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::needs_persist;

    const T0: i64 = 1_700_000_000_000;

    fn model() -> SessionModel {
        SessionModel::new(Catalog::default())
    }

    #[test]
    fn fresh_state() {
        let m = model();
        assert_eq!(m.mode(), Mode::Pomodoro);
        assert_eq!(m.timer().time_left_secs(), 1500);
        assert!(!m.is_main_running());
        assert_eq!(m.theme(), "sunrise");
        assert_eq!(m.language(), "tr");
    }

    #[test]
    fn start_requests_permission() {
        let mut m = model();
        let effects = m.toggle(T0);
        assert!(effects.contains(&Effect::RequestNotificationPermission));
        assert!(needs_persist(&effects));
        assert!(m.is_main_running());
    }

    #[test]
    fn pause_then_resume_keeps_remaining() {
        let mut m = model();
        m.toggle(T0);
        m.poll(T0 + 200_000);
        m.toggle(T0 + 200_000);
        let left = m.timer().time_left_secs();
        m.toggle(T0 + 200_000);
        assert_eq!(m.timer().time_left_secs(), left);
        assert!(m.is_main_running());
    }

    #[test]
    fn full_focus_interval_credits_stats() {
        let mut m = model();
        m.toggle(0);
        let effects = m.poll(1_500_000);
        assert!(!m.is_main_running());
        assert_eq!(m.timer().time_left_secs(), 0);
        assert_eq!(m.stats().focus_minutes, 25.0);
        assert!(effects.contains(&Effect::PlayChime));
        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::IntervalCompleted {
                mode: Mode::Pomodoro,
                duration_secs: 1500,
                ..
            }
        )));
        assert!(effects.contains(&Effect::ShowAlert {
            message: "Pomodoro tamamlandı!".into()
        }));
    }

    #[test]
    fn break_completion_counts_breaks() {
        let mut m = model();
        m.change_mode(Mode::ShortBreak, T0);
        m.toggle(T0);
        m.poll(T0 + 300_000);
        assert_eq!(m.stats().break_minutes, 5.0);
        assert_eq!(m.stats().breaks_taken, 1);
        assert_eq!(m.stats().focus_minutes, 0.0);
    }

    #[test]
    fn change_mode_while_running_keeps_running() {
        let mut m = model();
        m.toggle(T0);
        m.change_mode(Mode::LongBreak, T0 + 60_000);
        assert!(m.is_main_running());
        assert_eq!(m.timer().time_left_secs(), 900);
        assert_eq!(m.timer().target_ms(), Some(T0 + 60_000 + 900_000));
    }

    #[test]
    fn change_to_same_mode_is_noop() {
        let mut m = model();
        m.toggle(T0);
        m.poll(T0 + 10_000);
        let before = m.clone();
        assert!(m.change_mode(Mode::Pomodoro, T0 + 20_000).is_empty());
        assert_eq!(m, before);
    }

    #[test]
    fn idle_poll_has_no_effects() {
        let mut m = model();
        assert!(m.poll(T0).is_empty());
    }

    #[test]
    fn unchanged_second_does_not_persist() {
        let mut m = model();
        m.toggle(T0);
        assert!(m.poll(T0 + 200).is_empty());
        assert_eq!(m.poll(T0 + 1_000), vec![Effect::Persist]);
    }

    #[test]
    fn live_stats_project_elapsed() {
        let mut m = model();
        m.toggle(T0);
        m.poll(T0 + 600_000);
        assert_eq!(m.live_stats().focus_minutes, 10.0);
        assert_eq!(m.stats().focus_minutes, 0.0);
        m.toggle(T0 + 600_000);
        assert_eq!(m.live_stats().focus_minutes, 0.0);
    }

    #[test]
    fn reset_twice_equals_once() {
        let mut m = model();
        m.toggle(T0);
        m.poll(T0 + 5_000);
        m.reset();
        let once = m.clone();
        m.reset();
        assert_eq!(m, once);
    }

    #[test]
    fn personal_completion_does_not_touch_stats() {
        let mut m = model();
        let (id, _) = m.add_personal_timer(&PersonalTimerDraft {
            name: "Ayşe".into(),
            minutes: 1.0,
            color: "#00ff00".into(),
        });
        m.toggle_personal_timer(&id, T0);
        let effects = m.poll_personal(T0 + 60_000);
        assert!(effects.contains(&Effect::ShowAlert {
            message: "Ayşe tamamlandı!".into()
        }));
        assert!(needs_persist(&effects));
        assert_eq!(*m.stats(), SessionStats::default());
        assert!(!m.is_personal_running());
    }

    #[test]
    fn log_entry_uses_elapsed_minutes() {
        let mut m = model();
        m.toggle(T0);
        m.add_log_entry("outline done", T0 + 90_000);
        let entry = &m.log().entries()[0];
        assert_eq!(entry.minutes, 1.5);
        assert_eq!(entry.mode, Mode::Pomodoro);
        assert!(m.add_log_entry("  ", T0).is_empty());
    }

    #[test]
    fn unknown_theme_and_language_are_ignored() {
        let mut m = model();
        assert!(m.set_theme("neon").is_empty());
        assert_eq!(m.theme(), "sunrise");
        assert!(m.set_language("xx").is_empty());
        assert_eq!(m.language(), "tr");
        assert_eq!(m.set_language("en"), vec![Effect::Persist]);
        assert_eq!(m.mode_label(), "Pomodoro");
        assert_eq!(m.set_theme("ocean"), vec![Effect::Persist]);
        assert_eq!(m.theme(), "ocean");
    }
}
