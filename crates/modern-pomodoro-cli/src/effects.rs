//! Performs the effects returned by the session model.
//!
//! Everything here is best-effort. A missing notification daemon or a
//! failed history insert is logged and otherwise ignored; the timer state
//! has already been updated by the time an effect runs.

use std::io::Write;

use modern_pomodoro_core::storage::NotificationsConfig;
use modern_pomodoro_core::{Database, Effect};
use notify_rust::Notification;

pub struct EffectRunner {
    sound: bool,
    desktop: bool,
}

impl EffectRunner {
    pub fn new(config: &NotificationsConfig) -> Self {
        Self {
            sound: config.sound,
            desktop: config.desktop,
        }
    }

    pub fn perform(&self, effect: &Effect, db: &Database) {
        match effect {
            Effect::PlayChime => {
                if self.sound {
                    let mut err = std::io::stderr();
                    let _ = err.write_all(b"\x07");
                    let _ = err.flush();
                }
            }
            Effect::ShowNotification { title, body } => {
                if self.desktop {
                    show_notification(title, body);
                }
            }
            Effect::RequestNotificationPermission => {
                // Desktop notifications need no permission prompt.
                tracing::trace!("notification permission implicitly granted");
            }
            Effect::ShowAlert { message } => {
                eprintln!("{message}");
            }
            Effect::ClearAlert => {}
            Effect::IntervalCompleted {
                mode,
                duration_secs,
                completed_at,
            } => {
                if let Err(e) = db.record_completion(*mode, *duration_secs, *completed_at) {
                    tracing::warn!(error = %e, "could not record completed interval");
                }
            }
            Effect::Persist => {}
        }
    }
}

fn show_notification(title: &str, body: &str) {
    let result = Notification::new()
        .appname("Modern Pomodoro")
        .summary(title)
        .body(body)
        .show();
    if let Err(e) = result {
        tracing::debug!(error = %e, "desktop notification unavailable");
    }
}
