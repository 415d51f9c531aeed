use clap::Subcommand;
use modern_pomodoro_core::view::stat_views;
use modern_pomodoro_core::now_ms;

use crate::session::Session;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Session stats, including the running interval
    Show,
    /// Clear the session stats
    Reset,
    /// Completed intervals recorded in the history
    History {
        /// Number of recent intervals to list
        #[arg(long, default_value = "10")]
        limit: usize,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open()?;

    match action {
        StatsAction::Show => {
            let effects = session.model.poll(now_ms());
            session.apply(effects);
            let output = serde_json::json!({
                "committed": session.model.stats(),
                "live": session.model.live_stats(),
                "cards": stat_views(session.model.labels(), &session.model.live_stats()),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        StatsAction::Reset => {
            let effects = session.model.reset_stats();
            session.apply(effects);
            println!("{}", serde_json::to_string_pretty(session.model.stats())?);
        }
        StatsAction::History { limit } => {
            let output = serde_json::json!({
                "summary": session.db.history_stats(chrono::Utc::now())?,
                "recent": session.db.recent_sessions(limit)?,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
