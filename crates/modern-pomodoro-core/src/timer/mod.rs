mod countdown;
mod engine;
mod mode;
mod personal;
mod scheduler;

pub use countdown::{format_clock, remaining_secs, Countdown, Tick, Toggle};
pub use engine::SessionModel;
pub(crate) use engine::SessionParts;
pub use mode::{Mode, ModeKind, ModeTable};
pub use personal::{
    duration_from_minutes, normalize_color, sanitize_minutes, PersonalTimer, PersonalTimerDraft,
    PersonalTimers, DEFAULT_COLOR,
};
pub use scheduler::{LoopChanges, LoopState, PollScheduler, DEFAULT_POLL_INTERVAL};
