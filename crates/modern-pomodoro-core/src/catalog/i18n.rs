use serde::Serialize;

use crate::timer::Mode;

/// Every user-visible string for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Labels {
    pub name: String,
    pub pomodoro: String,
    pub short_break: String,
    pub long_break: String,
    pub running: String,
    pub idle: String,
    pub personal_running: String,
    pub personal_idle: String,
    pub start: String,
    pub pause: String,
    pub reset: String,
    /// Completion message; `{label}` is replaced with the timer label.
    pub completed: String,
    pub notification_body: String,
    pub personal_default_name: String,
    pub focus_time: String,
    pub break_time: String,
    pub breaks_taken: String,
    pub minutes_suffix: String,
    pub log_empty: String,
}

impl Labels {
    pub fn mode(&self, mode: Mode) -> &str {
        match mode {
            Mode::Pomodoro => &self.pomodoro,
            Mode::ShortBreak => &self.short_break,
            Mode::LongBreak => &self.long_break,
        }
    }

    pub fn completed_message(&self, label: &str) -> String {
        self.completed.replace("{label}", label)
    }

    fn turkish() -> Self {
        Self {
            name: "Türkçe".into(),
            pomodoro: "Pomodoro".into(),
            short_break: "Kısa Mola".into(),
            long_break: "Uzun Mola".into(),
            running: "Çalışıyor".into(),
            idle: "Beklemede".into(),
            personal_running: "Aktif".into(),
            personal_idle: "Hazır".into(),
            start: "Başlat".into(),
            pause: "Duraklat".into(),
            reset: "Sıfırla".into(),
            completed: "{label} tamamlandı!".into(),
            notification_body: "Kısa bir nefes alın ve modu değiştirin.".into(),
            personal_default_name: "Yeni Sayaç".into(),
            focus_time: "Odak Süresi".into(),
            break_time: "Mola Süresi".into(),
            breaks_taken: "Mola Sayısı".into(),
            minutes_suffix: "dk".into(),
            log_empty: "Henüz not yok. İlk odak seansını kaydet!".into(),
        }
    }

    fn english() -> Self {
        Self {
            name: "English".into(),
            pomodoro: "Pomodoro".into(),
            short_break: "Short Break".into(),
            long_break: "Long Break".into(),
            running: "Running".into(),
            idle: "Waiting".into(),
            personal_running: "Active".into(),
            personal_idle: "Ready".into(),
            start: "Start".into(),
            pause: "Pause".into(),
            reset: "Reset".into(),
            completed: "{label} complete!".into(),
            notification_body: "Take a short breath and switch modes.".into(),
            personal_default_name: "New Timer".into(),
            focus_time: "Focus Time".into(),
            break_time: "Break Time".into(),
            breaks_taken: "Breaks Taken".into(),
            minutes_suffix: "min".into(),
            log_empty: "No notes yet. Log your first focus session!".into(),
        }
    }
}

/// Ordered language table keyed by language code. The first entry is the
/// default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTable {
    languages: Vec<(String, Labels)>,
}

impl LanguageTable {
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.languages.iter().map(|(code, _)| code.as_str())
    }

    pub fn default_key(&self) -> &str {
        &self.languages[0].0
    }

    pub fn contains(&self, code: &str) -> bool {
        self.languages.iter().any(|(c, _)| c == code)
    }

    /// The canonical code for `code`, or the default code if it is unknown.
    pub fn resolve(&self, code: &str) -> &str {
        self.languages
            .iter()
            .find(|(c, _)| c == code)
            .map(|(c, _)| c.as_str())
            .unwrap_or(self.default_key())
    }

    /// Labels for `code`, falling back to the default language.
    pub fn labels(&self, code: &str) -> &Labels {
        self.languages
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, l)| l)
            .unwrap_or(&self.languages[0].1)
    }
}

impl Default for LanguageTable {
    fn default() -> Self {
        Self {
            languages: vec![
                ("tr".into(), Labels::turkish()),
                ("en".into(), Labels::english()),
            ],
        }
    }
}
