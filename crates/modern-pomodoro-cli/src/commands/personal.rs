use clap::Subcommand;
use modern_pomodoro_core::view::personal_view;
use modern_pomodoro_core::{now_ms, PersonalTimerDraft};

use crate::session::{resolve_personal_id, Session};

#[derive(Subcommand)]
pub enum PersonalAction {
    /// Add a personal timer
    Add {
        /// Display name (defaults to a localized "New Timer")
        #[arg(long, default_value = "")]
        name: String,
        /// Duration in minutes; invalid or non-positive values become 1
        #[arg(long, default_value = "25", allow_hyphen_values = true)]
        minutes: String,
        /// Colour as #rgb or #rrggbb
        #[arg(long, default_value = "#111827")]
        color: String,
    },
    /// Start or pause a personal timer
    Toggle {
        /// Timer id or a unique prefix of it
        id: String,
    },
    /// Reset a personal timer to its full duration
    Reset {
        /// Timer id or a unique prefix of it
        id: String,
    },
    /// List personal timers as JSON
    List,
}

pub fn run(action: PersonalAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open()?;
    let now = now_ms();

    match action {
        PersonalAction::Add {
            name,
            minutes,
            color,
        } => {
            let draft = PersonalTimerDraft {
                name,
                minutes: minutes.trim().parse::<f64>().unwrap_or(f64::NAN),
                color,
            };
            let (id, effects) = session.model.add_personal_timer(&draft);
            session.apply(effects);
            eprintln!("Personal timer added: {id}");
        }
        PersonalAction::Toggle { id } => {
            let id = resolve_personal_id(&session.model, &id)?;
            let effects = session.model.toggle_personal_timer(&id, now);
            session.apply(effects);
        }
        PersonalAction::Reset { id } => {
            let id = resolve_personal_id(&session.model, &id)?;
            let effects = session.model.reset_personal_timer(&id);
            session.apply(effects);
        }
        PersonalAction::List => {
            let effects = session.model.poll_personal(now);
            session.apply(effects);
        }
    }

    let labels = session.model.labels();
    let views: Vec<_> = session
        .model
        .personal_timers()
        .iter()
        .map(|t| personal_view(labels, t))
        .collect();
    println!("{}", serde_json::to_string_pretty(&views)?);
    Ok(())
}
