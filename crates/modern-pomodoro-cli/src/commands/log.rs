use clap::Subcommand;
use modern_pomodoro_core::now_ms;

use crate::session::Session;

#[derive(Subcommand)]
pub enum LogAction {
    /// Add a note for the current session
    Add {
        /// Note text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// List notes, most recent first
    List,
}

pub fn run(action: LogAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open()?;

    match action {
        LogAction::Add { text } => {
            let effects = session.model.add_log_entry(&text.join(" "), now_ms());
            if effects.is_empty() {
                return Err("note is empty".into());
            }
            session.apply(effects);
        }
        LogAction::List => {
            if session.model.log().is_empty() {
                eprintln!("{}", session.model.labels().log_empty);
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(session.model.log())?);
    Ok(())
}
