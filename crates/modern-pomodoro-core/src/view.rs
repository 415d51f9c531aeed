//! Read-only projections handed to the rendering layer.

use serde::Serialize;

use crate::catalog::Labels;
use crate::logbook::LogEntry;
use crate::stats::SessionStats;
use crate::timer::{Countdown, Mode, PersonalTimer, SessionModel};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerView {
    pub mode: Mode,
    pub label: String,
    pub formatted_time: String,
    /// 0.0 ..= 1.0
    pub progress: f64,
    pub is_running: bool,
    pub status: String,
    pub primary_action: String,
    pub secondary_action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalTimerView {
    pub id: String,
    pub name: String,
    pub color: String,
    pub duration_minutes: u64,
    pub formatted_time: String,
    pub progress: f64,
    pub is_running: bool,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatView {
    pub title: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub timer: TimerView,
    pub stats: Vec<StatView>,
    pub personal_timers: Vec<PersonalTimerView>,
    pub log_entries: Vec<LogEntry>,
    pub theme: String,
    pub language: String,
}

fn primary_action(labels: &Labels, countdown: &Countdown) -> String {
    if countdown.is_running() {
        labels.pause.clone()
    } else {
        labels.start.clone()
    }
}

/// Minutes without a trailing `.0`.
fn format_minutes(minutes: f64) -> String {
    if minutes.fract() == 0.0 {
        format!("{minutes:.0}")
    } else {
        format!("{minutes:.1}")
    }
}

pub fn stat_views(labels: &Labels, stats: &SessionStats) -> Vec<StatView> {
    vec![
        StatView {
            title: labels.focus_time.clone(),
            value: format!("{} {}", format_minutes(stats.focus_minutes), labels.minutes_suffix),
        },
        StatView {
            title: labels.break_time.clone(),
            value: format!("{} {}", format_minutes(stats.break_minutes), labels.minutes_suffix),
        },
        StatView {
            title: labels.breaks_taken.clone(),
            value: stats.breaks_taken.to_string(),
        },
    ]
}

pub fn personal_view(labels: &Labels, timer: &PersonalTimer) -> PersonalTimerView {
    let countdown = timer.countdown();
    PersonalTimerView {
        id: timer.id.clone(),
        name: timer.name.clone(),
        color: timer.color.clone(),
        duration_minutes: (countdown.duration_secs() as f64 / 60.0).round() as u64,
        formatted_time: countdown.formatted(),
        progress: countdown.progress(),
        is_running: countdown.is_running(),
        status: if countdown.is_running() {
            labels.personal_running.clone()
        } else {
            labels.personal_idle.clone()
        },
    }
}

impl SessionModel {
    pub fn timer_view(&self) -> TimerView {
        let labels = self.labels();
        let timer = self.timer();
        TimerView {
            mode: self.mode(),
            label: labels.mode(self.mode()).to_string(),
            formatted_time: timer.formatted(),
            progress: timer.progress(),
            is_running: timer.is_running(),
            status: if timer.is_running() {
                labels.running.clone()
            } else {
                labels.idle.clone()
            },
            primary_action: primary_action(labels, timer),
            secondary_action: labels.reset.clone(),
        }
    }

    /// Everything the renderer needs, with live stats.
    pub fn view(&self) -> SessionView {
        let labels = self.labels();
        SessionView {
            timer: self.timer_view(),
            stats: stat_views(labels, &self.live_stats()),
            personal_timers: self
                .personal_timers()
                .iter()
                .map(|t| personal_view(labels, t))
                .collect(),
            log_entries: self.log().entries().to_vec(),
            theme: self.theme().to_string(),
            language: self.language().to_string(),
        }
    }
}
