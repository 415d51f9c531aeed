//! Persisted snapshot of the whole session and its hydration.
//!
//! The snapshot is written in full after every state change and read back
//! once at startup. Reading is deliberately forgiving: the raw JSON is
//! walked field by field, and any field that is missing or has the wrong
//! type falls back to its own default without affecting its neighbours.
//! Unparsable input yields the fresh default state.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::logbook::{LogBook, LogEntry};
use crate::stats::SessionStats;
use crate::timer::{
    duration_from_minutes, normalize_color, Countdown, Mode, PersonalTimer, PersonalTimers,
    SessionModel, SessionParts,
};

/// Fixed storage key the snapshot lives under.
pub const STORAGE_KEY: &str = "modern-pomodoro-state";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub mode: Mode,
    /// Seconds.
    pub time_left: u64,
    pub is_running: bool,
    /// Epoch milliseconds.
    pub target_time: Option<i64>,
    pub stats: SessionStats,
    pub log_entries: Vec<LogEntry>,
    pub theme: String,
    pub language: String,
    pub personal_timers: Vec<PersonalTimerSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalTimerSnapshot {
    pub id: String,
    pub name: String,
    /// Seconds.
    pub duration: u64,
    pub time_left: u64,
    pub color: String,
    pub is_running: bool,
    pub target_time: Option<i64>,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<&PersonalTimer> for PersonalTimerSnapshot {
    fn from(timer: &PersonalTimer) -> Self {
        let countdown = timer.countdown();
        Self {
            id: timer.id.clone(),
            name: timer.name.clone(),
            duration: countdown.duration_secs(),
            time_left: countdown.time_left_secs(),
            color: timer.color.clone(),
            is_running: countdown.is_running(),
            target_time: countdown.target_ms(),
        }
    }
}

impl SessionModel {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            mode: self.mode(),
            time_left: self.timer().time_left_secs(),
            is_running: self.timer().is_running(),
            target_time: self.timer().target_ms(),
            stats: *self.stats(),
            log_entries: self.log().entries().to_vec(),
            theme: self.theme().to_string(),
            language: self.language().to_string(),
            personal_timers: self.personal_timers().iter().map(Into::into).collect(),
        }
    }

    /// Rebuild the session from a raw snapshot at startup.
    ///
    /// A running timer whose target already passed resolves to idle at zero.
    /// That missed completion is not credited to the stats and raises no
    /// effects.
    pub fn hydrate(raw: Option<&str>, catalog: Catalog, now_ms: i64) -> Self {
        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            return SessionModel::new(catalog);
        };
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Self::hydrate_value(&map, catalog, now_ms),
            Ok(other) => {
                tracing::warn!(kind = json_kind(&other), "snapshot is not an object, using defaults");
                SessionModel::new(catalog)
            }
            Err(e) => {
                tracing::warn!(error = %e, "state hydration failed, using defaults");
                SessionModel::new(catalog)
            }
        }
    }

    fn hydrate_value(map: &Map<String, Value>, catalog: Catalog, now_ms: i64) -> Self {
        let mode = map
            .get("mode")
            .and_then(Value::as_str)
            .and_then(Mode::from_key)
            .unwrap_or_default();
        let duration = catalog.modes.duration_secs(mode);
        let timer = Countdown::rehydrate(
            duration,
            seconds(map.get("timeLeft")),
            running_target(map),
            now_ms,
        );

        let theme = catalog
            .themes
            .resolve(map.get("theme").and_then(Value::as_str).unwrap_or_default())
            .to_string();
        let language = catalog
            .languages
            .resolve(map.get("language").and_then(Value::as_str).unwrap_or_default())
            .to_string();
        let default_name = catalog.languages.labels(&language).personal_default_name.clone();

        let parts = SessionParts {
            mode,
            timer,
            stats: hydrate_stats(map.get("stats")),
            log: hydrate_log(map.get("logEntries")),
            theme,
            language,
            personal: hydrate_personal(map.get("personalTimers"), &default_name, now_ms),
        };
        SessionModel::from_parts(catalog, parts)
    }
}

// ── Field readers ────────────────────────────────────────────────────

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn number(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64).filter(|n| n.is_finite())
}

/// Whole non-negative seconds.
fn seconds(value: Option<&Value>) -> Option<u64> {
    number(value).map(|n| n.max(0.0).round() as u64)
}

fn millis(value: Option<&Value>) -> Option<i64> {
    number(value).map(|n| n.round() as i64)
}

fn non_negative(value: Option<&Value>) -> f64 {
    number(value).map(|n| n.max(0.0)).unwrap_or(0.0)
}

fn id_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => Uuid::new_v4().to_string(),
    }
}

/// The target timestamp, only when the record also claims to be running.
fn running_target(map: &Map<String, Value>) -> Option<i64> {
    let running = map.get("isRunning").and_then(Value::as_bool).unwrap_or(false);
    if running {
        millis(map.get("targetTime"))
    } else {
        None
    }
}

fn hydrate_stats(value: Option<&Value>) -> SessionStats {
    let Some(map) = value.and_then(Value::as_object) else {
        return SessionStats::default();
    };
    SessionStats {
        focus_minutes: non_negative(map.get("focusMinutes")),
        break_minutes: non_negative(map.get("breakMinutes")),
        breaks_taken: non_negative(map.get("breaksTaken")).round() as u64,
    }
}

fn hydrate_log(value: Option<&Value>) -> LogBook {
    let Some(items) = value.and_then(Value::as_array) else {
        return LogBook::default();
    };
    let entries = items
        .iter()
        .filter_map(|item| {
            let map = item.as_object()?;
            let text = map.get("text").and_then(Value::as_str)?.trim();
            if text.is_empty() {
                return None;
            }
            Some(LogEntry {
                id: id_of(map.get("id")),
                text: text.to_string(),
                mode: map
                    .get("mode")
                    .and_then(Value::as_str)
                    .and_then(Mode::from_key)
                    .unwrap_or_default(),
                minutes: non_negative(map.get("minutes")),
                timestamp: millis(map.get("timestamp")).unwrap_or(0),
            })
        })
        .collect::<Vec<_>>();
    if entries.len() != items.len() {
        tracing::debug!(dropped = items.len() - entries.len(), "dropped malformed log entries");
    }
    LogBook::from_entries(entries)
}

fn hydrate_personal(value: Option<&Value>, default_name: &str, now_ms: i64) -> PersonalTimers {
    let Some(items) = value.and_then(Value::as_array) else {
        return PersonalTimers::default();
    };
    let timers = items
        .iter()
        .filter_map(|item| {
            let map = item.as_object()?;
            let duration = number(map.get("duration"))
                .filter(|d| *d > 0.0)
                .map(|d| (d.round() as u64).max(1))
                .unwrap_or_else(|| duration_from_minutes(1.0));
            let countdown = Countdown::rehydrate(
                duration,
                seconds(map.get("timeLeft")),
                running_target(map),
                now_ms,
            );
            let name = match map.get("name").and_then(Value::as_str).map(str::trim) {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => default_name.to_string(),
            };
            let color = normalize_color(map.get("color").and_then(Value::as_str).unwrap_or_default());
            Some(PersonalTimer::from_parts(id_of(map.get("id")), name, color, countdown))
        })
        .collect::<Vec<_>>();
    if timers.len() != items.len() {
        tracing::debug!(dropped = items.len() - timers.len(), "dropped malformed personal timers");
    }
    PersonalTimers::from_timers(timers)
}
