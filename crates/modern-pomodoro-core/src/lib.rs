//! # Modern Pomodoro Core Library
//!
//! This library provides the timer session model behind Modern Pomodoro: a
//! Pomodoro timer with three modes, session statistics, a notes log, and
//! any number of named "personal timers" for teammates. Hosts (the CLI, or
//! any other front end) own rendering and side effects; this crate owns the
//! state.
//!
//! ## Architecture
//!
//! - **Session model**: A pure, wall-clock-based state machine. Remaining
//!   time is derived from an absolute target timestamp, so a host can poll
//!   late, sleep, or restart without the countdown drifting.
//! - **Effects**: Mutating operations return [`Effect`]s (chime,
//!   notification, persist) instead of performing them.
//! - **Snapshot**: The whole session serializes to one JSON record and
//!   rehydrates field by field, tolerating corrupt or partial input.
//! - **Storage**: SQLite key-value storage for the snapshot, interval
//!   history, and TOML-based configuration.
//!
//! ## Key Components
//!
//! - [`SessionModel`]: Timer session state machine
//! - [`PollScheduler`]: Arms polling only while something is running
//! - [`Snapshot`]: Persisted record
//! - [`Catalog`]: Mode durations, themes, and localized labels
//! - [`Database`] / [`Config`]: Persistence and configuration

pub mod catalog;
pub mod error;
pub mod events;
pub mod logbook;
pub mod snapshot;
pub mod stats;
pub mod storage;
pub mod timer;
pub mod view;

pub use catalog::{Catalog, Labels, LanguageTable, ThemeSpec, ThemeTable};
pub use error::{ConfigError, CoreError, DatabaseError};
pub use events::{needs_persist, Effect};
pub use logbook::{LogBook, LogEntry, LOG_CAPACITY};
pub use snapshot::{PersonalTimerSnapshot, Snapshot, STORAGE_KEY};
pub use stats::SessionStats;
pub use storage::{Config, Database, MemoryStore, SnapshotStore};
pub use timer::{
    Countdown, Mode, ModeKind, ModeTable, PersonalTimer, PersonalTimerDraft, PersonalTimers,
    PollScheduler, SessionModel,
};
pub use view::{PersonalTimerView, SessionView, StatView, TimerView};

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
