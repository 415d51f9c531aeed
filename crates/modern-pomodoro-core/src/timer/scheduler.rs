//! Poll scheduling for the session model.
//!
//! Two loops exist: one for the main timer and one shared loop for the
//! whole personal timer collection. Each loop is armed only while something
//! in its scope is running, so an idle session causes no wakeups. The
//! scheduler does not own a clock or a runtime; the host drives `tick()`
//! on `interval()` and stops when `is_idle()` turns true.

use std::time::Duration;

use super::engine::SessionModel;
use crate::events::Effect;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Armed,
}

/// Arming changes reported by `sync`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopChanges {
    pub main: Option<LoopState>,
    pub personal: Option<LoopState>,
}

impl LoopChanges {
    pub fn is_empty(&self) -> bool {
        self.main.is_none() && self.personal.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct PollScheduler {
    interval: Duration,
    main: LoopState,
    personal: LoopState,
}

fn state_for(running: bool) -> LoopState {
    if running {
        LoopState::Armed
    } else {
        LoopState::Idle
    }
}

impl PollScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            main: LoopState::Idle,
            personal: LoopState::Idle,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn main_loop(&self) -> LoopState {
        self.main
    }

    pub fn personal_loop(&self) -> LoopState {
        self.personal
    }

    pub fn is_idle(&self) -> bool {
        self.main == LoopState::Idle && self.personal == LoopState::Idle
    }

    /// Arm or disarm each loop from the model's running state. Call after
    /// every user action so a newly started timer re-arms its loop.
    pub fn sync(&mut self, model: &SessionModel) -> LoopChanges {
        let mut changes = LoopChanges::default();

        let main = state_for(model.is_main_running());
        if main != self.main {
            tracing::trace!(?main, "main poll loop");
            self.main = main;
            changes.main = Some(main);
        }

        let personal = state_for(model.is_personal_running());
        if personal != self.personal {
            tracing::trace!(?personal, "personal poll loop");
            self.personal = personal;
            changes.personal = Some(personal);
        }

        changes
    }

    /// Poll every armed scope with the same `now_ms`, then re-sync.
    pub fn tick(&mut self, model: &mut SessionModel, now_ms: i64) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.main == LoopState::Armed {
            effects.extend(model.poll(now_ms));
        }
        if self.personal == LoopState::Armed {
            effects.extend(model.poll_personal(now_ms));
        }
        self.sync(model);
        effects
    }
}

impl Default for PollScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::timer::PersonalTimerDraft;

    const T0: i64 = 1_700_000_000_000;

    #[test]
    fn idle_model_keeps_loops_idle() {
        let model = SessionModel::new(Catalog::default());
        let mut scheduler = PollScheduler::default();
        assert!(scheduler.sync(&model).is_empty());
        assert!(scheduler.is_idle());
    }

    #[test]
    fn starting_arms_and_completion_disarms() {
        let mut model = SessionModel::new(Catalog::default());
        let mut scheduler = PollScheduler::default();
        model.toggle(T0);
        let changes = scheduler.sync(&model);
        assert_eq!(changes.main, Some(LoopState::Armed));
        assert_eq!(changes.personal, None);

        scheduler.tick(&mut model, T0 + 1_000);
        assert_eq!(scheduler.main_loop(), LoopState::Armed);

        scheduler.tick(&mut model, T0 + 1_500_000);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn one_shared_loop_for_all_personal_timers() {
        let mut model = SessionModel::new(Catalog::default());
        let mut scheduler = PollScheduler::default();
        let mut ids = Vec::new();
        for minutes in [1.0, 2.0, 3.0] {
            let (id, _) = model.add_personal_timer(&PersonalTimerDraft {
                minutes,
                ..PersonalTimerDraft::default()
            });
            model.toggle_personal_timer(&id, T0);
            ids.push(id);
        }
        let changes = scheduler.sync(&model);
        assert_eq!(changes.personal, Some(LoopState::Armed));
        assert_eq!(scheduler.main_loop(), LoopState::Idle);

        scheduler.tick(&mut model, T0 + 60_000);
        assert_eq!(scheduler.personal_loop(), LoopState::Armed);
        scheduler.tick(&mut model, T0 + 180_000);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn same_now_for_every_timer() {
        let mut model = SessionModel::new(Catalog::default());
        let mut scheduler = PollScheduler::default();
        let (id, _) = model.add_personal_timer(&PersonalTimerDraft {
            minutes: 25.0,
            ..PersonalTimerDraft::default()
        });
        model.toggle(T0);
        model.toggle_personal_timer(&id, T0);
        scheduler.sync(&model);

        scheduler.tick(&mut model, T0 + 42_000);
        let personal_left = model
            .personal_timers()
            .get(&id)
            .unwrap()
            .countdown()
            .time_left_secs();
        assert_eq!(model.timer().time_left_secs(), personal_left);
    }
}
