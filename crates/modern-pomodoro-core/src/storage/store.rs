//! Snapshot persistence seam.
//!
//! The session model does not know where its snapshot lives. Hosts hand a
//! [`SnapshotStore`] to [`load_session`] once at startup and to [`persist`]
//! after every change. Writes are fire-and-forget: a failed save is logged
//! and never reported back to the operation that caused it.
//!
//! A long-running host shares the store with one-shot commands. It writes
//! through [`persist_if_unchanged`], so its poll progress never replaces a
//! snapshot another process wrote after its last read.

use std::cell::RefCell;

use super::database::Database;
use crate::catalog::Catalog;
use crate::error::Result;
use crate::snapshot::STORAGE_KEY;
use crate::timer::SessionModel;

pub trait SnapshotStore {
    /// The raw snapshot, or `None` if nothing was saved yet.
    fn load_snapshot(&self) -> Result<Option<String>>;

    fn save_snapshot(&self, json: &str) -> Result<()>;

    /// Write `json` only if the stored snapshot still equals `expected`.
    /// Returns whether the write happened.
    fn replace_snapshot(&self, expected: Option<&str>, json: &str) -> Result<bool>;
}

impl SnapshotStore for Database {
    fn load_snapshot(&self) -> Result<Option<String>> {
        self.kv_get(STORAGE_KEY)
    }

    fn save_snapshot(&self, json: &str) -> Result<()> {
        self.kv_set(STORAGE_KEY, json)
    }

    fn replace_snapshot(&self, expected: Option<&str>, json: &str) -> Result<bool> {
        self.kv_compare_and_set(STORAGE_KEY, expected, json)
    }
}

/// In-process store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn with_snapshot(json: impl Into<String>) -> Self {
        Self {
            value: RefCell::new(Some(json.into())),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

impl SnapshotStore for MemoryStore {
    fn load_snapshot(&self) -> Result<Option<String>> {
        Ok(self.value.borrow().clone())
    }

    fn save_snapshot(&self, json: &str) -> Result<()> {
        *self.value.borrow_mut() = Some(json.to_string());
        Ok(())
    }

    fn replace_snapshot(&self, expected: Option<&str>, json: &str) -> Result<bool> {
        let mut value = self.value.borrow_mut();
        if value.as_deref() != expected {
            return Ok(false);
        }
        *value = Some(json.to_string());
        Ok(true)
    }
}

/// Hydrate a session from `store`. Returns the model and whether a
/// snapshot was found. A failing store counts as no snapshot.
pub fn load_session(store: &dyn SnapshotStore, catalog: Catalog, now_ms: i64) -> (SessionModel, bool) {
    let raw = match store.load_snapshot() {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(error = %e, "could not read snapshot, starting fresh");
            None
        }
    };
    let found = raw.is_some();
    (SessionModel::hydrate(raw.as_deref(), catalog, now_ms), found)
}

fn snapshot_json(model: &SessionModel) -> Option<String> {
    match model.snapshot().to_json() {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::warn!(error = %e, "could not serialize snapshot");
            None
        }
    }
}

/// Write the full snapshot and return what was written. Failures are
/// logged, not returned.
pub fn persist(store: &dyn SnapshotStore, model: &SessionModel) -> Option<String> {
    let json = snapshot_json(model)?;
    match store.save_snapshot(&json) {
        Ok(()) => Some(json),
        Err(e) => {
            tracing::warn!(error = %e, "could not save snapshot");
            None
        }
    }
}

/// Like [`persist`], but only while the stored snapshot is still
/// `expected`. Returns `None` when nothing was written.
pub fn persist_if_unchanged(
    store: &dyn SnapshotStore,
    model: &SessionModel,
    expected: Option<&str>,
) -> Option<String> {
    let json = snapshot_json(model)?;
    match store.replace_snapshot(expected, &json) {
        Ok(true) => Some(json),
        Ok(false) => {
            tracing::debug!("snapshot changed by another writer, skipping save");
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not save snapshot");
            None
        }
    }
}
