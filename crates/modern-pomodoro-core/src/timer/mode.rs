use serde::{Deserialize, Serialize};

/// The fixed set of main timer modes. The serialized names are the keys
/// stored in snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    Pomodoro,
    ShortBreak,
    LongBreak,
}

/// Whether a mode counts as focus time or break time in the stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeKind {
    Focus,
    Break,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Pomodoro, Mode::ShortBreak, Mode::LongBreak];

    pub fn key(self) -> &'static str {
        match self {
            Mode::Pomodoro => "pomodoro",
            Mode::ShortBreak => "shortBreak",
            Mode::LongBreak => "longBreak",
        }
    }

    /// Look up a mode by its snapshot key. Unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Mode> {
        Mode::ALL.into_iter().find(|m| m.key() == key)
    }

    pub fn kind(self) -> ModeKind {
        match self {
            Mode::Pomodoro => ModeKind::Focus,
            Mode::ShortBreak | Mode::LongBreak => ModeKind::Break,
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Pomodoro
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::from_key(s).ok_or_else(|| format!("unknown mode: {s}"))
    }
}

/// Fixed duration per mode, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeTable {
    pomodoro_secs: u64,
    short_break_secs: u64,
    long_break_secs: u64,
}

impl ModeTable {
    /// Build a table from minute values. Zero minutes is bumped to one so
    /// that every mode has a countable duration.
    pub fn from_minutes(pomodoro: u32, short_break: u32, long_break: u32) -> Self {
        let secs = |min: u32| u64::from(min.max(1)).saturating_mul(60);
        Self {
            pomodoro_secs: secs(pomodoro),
            short_break_secs: secs(short_break),
            long_break_secs: secs(long_break),
        }
    }

    pub fn duration_secs(&self, mode: Mode) -> u64 {
        match mode {
            Mode::Pomodoro => self.pomodoro_secs,
            Mode::ShortBreak => self.short_break_secs,
            Mode::LongBreak => self.long_break_secs,
        }
    }
}

impl Default for ModeTable {
    fn default() -> Self {
        Self::from_minutes(25, 5, 15)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_key(mode.key()), Some(mode));
        }
        assert_eq!(Mode::from_key("nap"), None);
    }

    #[test]
    fn serde_uses_snapshot_keys() {
        let json = serde_json::to_string(&Mode::ShortBreak).unwrap();
        assert_eq!(json, "\"shortBreak\"");
    }

    #[test]
    fn default_durations() {
        let table = ModeTable::default();
        assert_eq!(table.duration_secs(Mode::Pomodoro), 1500);
        assert_eq!(table.duration_secs(Mode::ShortBreak), 300);
        assert_eq!(table.duration_secs(Mode::LongBreak), 900);
    }

    #[test]
    fn zero_minutes_become_one() {
        let table = ModeTable::from_minutes(0, 5, 15);
        assert_eq!(table.duration_secs(Mode::Pomodoro), 60);
    }

    #[test]
    fn kinds() {
        assert_eq!(Mode::Pomodoro.kind(), ModeKind::Focus);
        assert_eq!(Mode::LongBreak.kind(), ModeKind::Break);
    }
}
