use std::error::Error;

use modern_pomodoro_core::storage::{load_session, persist, persist_if_unchanged};
use modern_pomodoro_core::{
    needs_persist, now_ms, Config, Database, Effect, SessionModel, SnapshotStore,
};

use crate::effects::EffectRunner;

/// One hydrated session per process: loaded at startup, persisted after
/// every change.
pub struct Session {
    pub config: Config,
    pub db: Database,
    pub model: SessionModel,
    runner: EffectRunner,
    /// Snapshot text as last read or written by this process.
    last_snapshot: Option<String>,
}

impl Session {
    /// Load config and storage and hydrate the model exactly once.
    ///
    /// A session with no saved snapshot starts with the configured theme
    /// and language.
    pub fn open() -> Result<Self, Box<dyn Error>> {
        let config = Config::load()?;
        let db = Database::open()?;
        let (model, found) = load_session(&db, config.catalog(), now_ms());
        let last_snapshot = if found { read_snapshot(&db) } else { None };
        let runner = EffectRunner::new(&config.notifications);
        let mut session = Self {
            config,
            db,
            model,
            runner,
            last_snapshot,
        };
        if !found {
            let mut effects = session.model.set_theme(&session.config.ui.theme);
            effects.extend(session.model.set_language(&session.config.ui.language));
            session.apply(effects);
        }
        Ok(session)
    }

    /// Perform `effects`, then write the snapshot if any of them asks for it.
    pub fn apply(&mut self, effects: Vec<Effect>) {
        for effect in &effects {
            self.runner.perform(effect, &self.db);
        }
        if needs_persist(&effects) {
            if let Some(json) = persist(&self.db, &self.model) {
                self.last_snapshot = Some(json);
            }
        }
    }

    /// Like [`Session::apply`], but the snapshot is only written if no other
    /// process changed it since this one last read or wrote it. Used by the
    /// watch loop, whose writes are poll progress.
    pub fn apply_polled(&mut self, effects: Vec<Effect>) {
        for effect in &effects {
            self.runner.perform(effect, &self.db);
        }
        if needs_persist(&effects) {
            if let Some(json) =
                persist_if_unchanged(&self.db, &self.model, self.last_snapshot.as_deref())
            {
                self.last_snapshot = Some(json);
            }
        }
    }

    /// Re-hydrate if another process wrote the snapshot since this one last
    /// saw it. `as_of_ms` should be the previous poll time, so a countdown
    /// that ran out since then still completes on the next poll.
    pub fn refresh(&mut self, as_of_ms: i64) -> bool {
        let raw = read_snapshot(&self.db);
        if raw.is_none() || raw == self.last_snapshot {
            return false;
        }
        tracing::debug!("snapshot changed by another process, reloading");
        self.model = SessionModel::hydrate(raw.as_deref(), self.config.catalog(), as_of_ms);
        self.last_snapshot = raw;
        true
    }

    pub fn print_view(&self) -> Result<(), Box<dyn Error>> {
        println!("{}", serde_json::to_string_pretty(&self.model.view())?);
        Ok(())
    }
}

fn read_snapshot(db: &Database) -> Option<String> {
    match db.load_snapshot() {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(error = %e, "could not read snapshot");
            None
        }
    }
}

/// Resolve a personal timer id from a full id or a unique prefix.
pub fn resolve_personal_id(model: &SessionModel, id: &str) -> Result<String, Box<dyn Error>> {
    if model.personal_timers().get(id).is_some() {
        return Ok(id.to_string());
    }
    let matches: Vec<&str> = model
        .personal_timers()
        .iter()
        .filter(|t| t.id.starts_with(id))
        .map(|t| t.id.as_str())
        .collect();
    match matches.as_slice() {
        [single] => Ok(single.to_string()),
        [] => Err(format!("no personal timer with id '{id}'").into()),
        _ => Err(format!("id prefix '{id}' is ambiguous").into()),
    }
}
