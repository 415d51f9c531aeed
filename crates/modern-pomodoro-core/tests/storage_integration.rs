//! Integration tests for on-disk persistence.
//!
//! Each test opens a fresh SQLite file in a temporary directory, so a
//! "restart" is simply opening the same path again.

use chrono::{TimeZone, Utc};
use modern_pomodoro_core::storage::{load_session, persist};
use modern_pomodoro_core::{Catalog, Config, Database, Effect, Mode, PersonalTimerDraft, STORAGE_KEY};

const T0: i64 = 1_700_000_000_000;

#[test]
fn test_snapshot_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.db");

    {
        let db = Database::open_at(&path).unwrap();
        let (mut model, found) = load_session(&db, Catalog::default(), T0);
        assert!(!found);
        model.change_mode(Mode::LongBreak, T0);
        model.add_log_entry("planning", T0);
        let (id, _) = model.add_personal_timer(&PersonalTimerDraft {
            name: "Can".into(),
            minutes: 10.0,
            color: "#22c55e".into(),
        });
        model.toggle_personal_timer(&id, T0);
        persist(&db, &model);
    }

    let db = Database::open_at(&path).unwrap();
    let (model, found) = load_session(&db, Catalog::default(), T0 + 60_000);
    assert!(found);
    assert_eq!(model.mode(), Mode::LongBreak);
    assert_eq!(model.log().len(), 1);
    let timer = model.personal_timers().iter().next().unwrap();
    assert_eq!(timer.name, "Can");
    assert!(timer.countdown().is_running());
    assert_eq!(timer.countdown().time_left_secs(), 540);
}

#[test]
fn test_corrupt_snapshot_recovers_to_defaults() {
    let db = Database::open_memory().unwrap();
    db.kv_set(STORAGE_KEY, "{\"mode\": \"shortBreak\", \"timeLeft\": ").unwrap();
    let (model, found) = load_session(&db, Catalog::default(), T0);
    assert!(found);
    assert_eq!(model.mode(), Mode::Pomodoro);
    assert_eq!(model.timer().time_left_secs(), 1500);
}

#[test]
fn test_completed_intervals_feed_history() {
    let db = Database::open_memory().unwrap();
    let (mut model, _) = load_session(&db, Catalog::default(), T0);
    model.toggle(T0);
    let effects = model.poll(T0 + 1_500_000);

    for effect in &effects {
        if let Effect::IntervalCompleted {
            mode,
            duration_secs,
            completed_at,
        } = effect
        {
            db.record_completion(*mode, *duration_secs, *completed_at)
                .unwrap();
        }
    }

    let completed_at = Utc.timestamp_millis_opt(T0 + 1_500_000).unwrap();
    let recent = db.recent_sessions(5).unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].mode, Mode::Pomodoro);
    assert_eq!(recent[0].completed_at, completed_at);

    let stats = db.history_stats(completed_at).unwrap();
    assert_eq!(stats.focus_sessions, 1);
    assert_eq!(stats.today_focus_minutes, 25.0);
}

#[test]
fn test_config_durations_apply_to_hydration() {
    let mut cfg = Config::default();
    cfg.set("modes.pomodoro", "50").unwrap();
    let db = Database::open_memory().unwrap();
    db.kv_set(STORAGE_KEY, r#"{"mode":"pomodoro","timeLeft":2800}"#)
        .unwrap();
    let (model, _) = load_session(&db, cfg.catalog(), T0);
    assert_eq!(model.timer().duration_secs(), 3000);
    assert_eq!(model.timer().time_left_secs(), 2800);
}
