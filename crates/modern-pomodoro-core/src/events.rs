use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Mode;

/// Side effects requested by a state transition.
///
/// The session model never plays sounds, shows notifications, or writes to
/// storage itself. Every mutating operation returns the effects the host
/// should perform, best-effort, after the state change has been applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Short audible chime.
    PlayChime,
    /// OS-level notification, delivered only if permission was granted.
    ShowNotification { title: String, body: String },
    /// Ask for notification permission if it has not been decided yet.
    /// Must not block the action that produced it.
    RequestNotificationPermission,
    /// In-app alert banner.
    ShowAlert { message: String },
    ClearAlert,
    /// A main timer interval ran to zero.
    IntervalCompleted {
        mode: Mode,
        duration_secs: u64,
        completed_at: DateTime<Utc>,
    },
    /// State changed; write the full snapshot.
    Persist,
}

/// True when any effect asks for the snapshot to be written.
pub fn needs_persist(effects: &[Effect]) -> bool {
    effects.iter().any(|e| matches!(e, Effect::Persist))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_serialization() {
        let json = serde_json::to_value(Effect::ShowAlert {
            message: "done".into(),
        })
        .unwrap();
        assert_eq!(json["type"], "show_alert");
        assert_eq!(json["message"], "done");
    }

    #[test]
    fn persist_detection() {
        assert!(needs_persist(&[Effect::PlayChime, Effect::Persist]));
        assert!(!needs_persist(&[Effect::PlayChime]));
    }
}
