mod config;
pub mod database;
mod store;

pub use config::{Config, ModesConfig, NotificationsConfig, TimerConfig, UiConfig};
pub use database::{Database, HistoryStats, SessionRecord};
pub use store::{load_session, persist, persist_if_unchanged, MemoryStore, SnapshotStore};

use std::path::PathBuf;

/// Returns the data directory.
///
/// `MODERN_POMODORO_HOME` wins when set. Otherwise this is
/// `~/.config/modern-pomodoro[-dev]/`, with `MODERN_POMODORO_ENV=dev`
/// selecting the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("MODERN_POMODORO_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("MODERN_POMODORO_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("modern-pomodoro-dev")
            } else {
                base_dir.join("modern-pomodoro")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
