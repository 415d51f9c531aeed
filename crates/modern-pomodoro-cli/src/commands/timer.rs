use std::io::Write;

use clap::Subcommand;
use modern_pomodoro_core::timer::PollScheduler;
use modern_pomodoro_core::{now_ms, Mode, SessionModel};
use tokio::time::MissedTickBehavior;

use crate::session::Session;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start if idle, pause if running
    Toggle,
    /// Start (or resume) the main timer
    Start,
    /// Pause the main timer, freezing the remaining time
    Pause,
    /// Stop and return to the full duration of the current mode
    Reset,
    /// Switch mode (pomodoro, shortBreak, longBreak)
    Mode {
        mode: Mode,
    },
    /// Print the current session view as JSON
    Status,
    /// Poll running timers until they all stop (Ctrl-C to detach).
    /// Changes made by other commands meanwhile are picked up.
    Watch,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open()?;
    let now = now_ms();

    let effects = match action {
        TimerAction::Toggle => session.model.toggle(now),
        TimerAction::Start if !session.model.is_main_running() => session.model.toggle(now),
        TimerAction::Pause if session.model.is_main_running() => session.model.toggle(now),
        TimerAction::Start | TimerAction::Pause => Vec::new(),
        TimerAction::Reset => session.model.reset(),
        TimerAction::Mode { mode } => session.model.change_mode(mode, now),
        TimerAction::Status => {
            let mut effects = session.model.poll(now);
            effects.extend(session.model.poll_personal(now));
            effects
        }
        TimerAction::Watch => return watch(session),
    };

    session.apply(effects);
    session.print_view()
}

fn watch(mut session: Session) -> Result<(), Box<dyn std::error::Error>> {
    let mut scheduler = PollScheduler::new(session.config.poll_interval());
    scheduler.sync(&session.model);
    if scheduler.is_idle() {
        eprintln!("nothing is running");
        return session.print_view();
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let mut interval = tokio::time::interval(scheduler.interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        let mut last_poll = now_ms();
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    // Other commands may have changed the session meanwhile.
                    if session.refresh(last_poll) {
                        scheduler.sync(&session.model);
                    }
                    let now = now_ms();
                    let effects = scheduler.tick(&mut session.model, now);
                    last_poll = now;
                    render_line(&session.model);
                    session.apply_polled(effects);
                    if scheduler.is_idle() {
                        break;
                    }
                }
                _ = &mut ctrl_c => {
                    tracing::debug!("watch interrupted");
                    break;
                }
            }
        }
    });

    println!();
    session.print_view()
}

fn render_line(model: &SessionModel) {
    let view = model.timer_view();
    let mut line = format!("\r{} {} [{}]", view.label, view.formatted_time, view.status);
    for timer in model.personal_timers().iter().filter(|t| t.countdown().is_running()) {
        line.push_str(&format!("  {} {}", timer.name, timer.countdown().formatted()));
    }
    let mut out = std::io::stdout();
    let _ = out.write_all(line.as_bytes());
    let _ = out.flush();
}
