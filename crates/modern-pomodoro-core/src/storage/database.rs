//! SQLite storage.
//!
//! Provides persistent storage for:
//! - The session snapshot, in a key-value table
//! - A history of completed main timer intervals

use std::path::Path;

use chrono::{DateTime, NaiveTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{DatabaseError, Result};
use crate::timer::{Mode, ModeKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: i64,
    pub mode: Mode,
    pub duration_secs: u64,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HistoryStats {
    pub total_sessions: u64,
    pub focus_sessions: u64,
    pub focus_minutes: f64,
    pub break_minutes: f64,
    pub today_focus_sessions: u64,
    pub today_focus_minutes: f64,
}

/// SQLite database for the snapshot and interval history.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data dir>/modern-pomodoro.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("modern-pomodoro.db");
        Self::open_at(&path)
    }

    /// Open (or create) a database file at `path`.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS sessions (
                id            INTEGER PRIMARY KEY AUTOINCREMENT,
                mode          TEXT NOT NULL,
                duration_secs INTEGER NOT NULL,
                completed_at  TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_sessions_completed_at ON sessions(completed_at);",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Set `key` to `value` only if it currently holds `expected` (`None`
    /// meaning absent). The check and write are a single statement.
    pub fn kv_compare_and_set(&self, key: &str, expected: Option<&str>, value: &str) -> Result<bool> {
        let changed = match expected {
            Some(expected) => self.conn.execute(
                "UPDATE kv SET value = ?3 WHERE key = ?1 AND value = ?2",
                params![key, expected, value],
            )?,
            None => self.conn.execute(
                "INSERT OR IGNORE INTO kv (key, value) VALUES (?1, ?2)",
                params![key, value],
            )?,
        };
        Ok(changed == 1)
    }

    /// Record a completed main timer interval.
    pub fn record_completion(
        &self,
        mode: Mode,
        duration_secs: u64,
        completed_at: DateTime<Utc>,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO sessions (mode, duration_secs, completed_at) VALUES (?1, ?2, ?3)",
            params![mode.key(), duration_secs, completed_at.to_rfc3339()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent completions first. Rows with an unknown mode are skipped.
    pub fn recent_sessions(&self, limit: usize) -> Result<Vec<SessionRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, mode, duration_secs, completed_at
             FROM sessions
             ORDER BY completed_at DESC, id DESC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, u64>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, mode, duration_secs, completed_at) = row?;
            let (Some(mode), Ok(completed_at)) = (
                Mode::from_key(&mode),
                DateTime::parse_from_rfc3339(&completed_at),
            ) else {
                tracing::warn!(id, "skipping unreadable session row");
                continue;
            };
            records.push(SessionRecord {
                id,
                mode,
                duration_secs,
                completed_at: completed_at.with_timezone(&Utc),
            });
        }
        Ok(records)
    }

    /// Totals over the whole history, plus today's focus work (UTC day).
    pub fn history_stats(&self, now: DateTime<Utc>) -> Result<HistoryStats> {
        let start_of_day = now
            .date_naive()
            .and_time(NaiveTime::MIN)
            .and_utc()
            .to_rfc3339();

        let mut stmt = self.conn.prepare(
            "SELECT mode, COUNT(*), COALESCE(SUM(duration_secs), 0),
                    COUNT(CASE WHEN completed_at >= ?1 THEN 1 END),
                    COALESCE(SUM(CASE WHEN completed_at >= ?1 THEN duration_secs END), 0)
             FROM sessions
             GROUP BY mode",
        )?;
        let rows = stmt.query_map(params![start_of_day], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, u64>(1)?,
                row.get::<_, u64>(2)?,
                row.get::<_, u64>(3)?,
                row.get::<_, u64>(4)?,
            ))
        })?;

        let mut stats = HistoryStats::default();
        for row in rows {
            let (mode, count, secs, today_count, today_secs) = row?;
            let Some(mode) = Mode::from_key(&mode) else {
                continue;
            };
            stats.total_sessions += count;
            match mode.kind() {
                ModeKind::Focus => {
                    stats.focus_sessions += count;
                    stats.focus_minutes += secs as f64 / 60.0;
                    stats.today_focus_sessions += today_count;
                    stats.today_focus_minutes += today_secs as f64 / 60.0;
                }
                ModeKind::Break => {
                    stats.break_minutes += secs as f64 / 60.0;
                }
            }
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn kv_store() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("test").unwrap().is_none());
        db.kv_set("test", "hello").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "hello");
        db.kv_set("test", "again").unwrap();
        assert_eq!(db.kv_get("test").unwrap().unwrap(), "again");
    }

    #[test]
    fn kv_compare_and_set() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_compare_and_set("state", None, "a").unwrap());
        assert!(!db.kv_compare_and_set("state", None, "b").unwrap());
        assert!(!db.kv_compare_and_set("state", Some("stale"), "b").unwrap());
        assert_eq!(db.kv_get("state").unwrap().as_deref(), Some("a"));
        assert!(db.kv_compare_and_set("state", Some("a"), "b").unwrap());
        assert_eq!(db.kv_get("state").unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn record_and_query() {
        let db = Database::open_memory().unwrap();
        let now = Utc::now();
        db.record_completion(Mode::Pomodoro, 1500, now - Duration::days(2))
            .unwrap();
        db.record_completion(Mode::Pomodoro, 1500, now).unwrap();
        db.record_completion(Mode::ShortBreak, 300, now).unwrap();

        let stats = db.history_stats(now).unwrap();
        assert_eq!(stats.total_sessions, 3);
        assert_eq!(stats.focus_sessions, 2);
        assert_eq!(stats.focus_minutes, 50.0);
        assert_eq!(stats.break_minutes, 5.0);
        assert_eq!(stats.today_focus_sessions, 1);
        assert_eq!(stats.today_focus_minutes, 25.0);
    }

    #[test]
    fn recent_sessions_newest_first() {
        let db = Database::open_memory().unwrap();
        let now = Utc::now();
        db.record_completion(Mode::Pomodoro, 1500, now - Duration::hours(1))
            .unwrap();
        db.record_completion(Mode::LongBreak, 900, now).unwrap();

        let recent = db.recent_sessions(10).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].mode, Mode::LongBreak);
        assert_eq!(recent[1].duration_secs, 1500);

        assert_eq!(db.recent_sessions(1).unwrap().len(), 1);
    }
}
