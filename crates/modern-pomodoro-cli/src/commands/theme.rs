use clap::Subcommand;

use crate::session::Session;

#[derive(Subcommand)]
pub enum ThemeAction {
    /// List available themes
    List,
    /// Select a theme; unknown keys are ignored
    Set { key: String },
}

pub fn run(action: ThemeAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open()?;

    match action {
        ThemeAction::List => {
            let output = serde_json::json!({
                "current": session.model.theme(),
                "themes": session.model.catalog().themes.all(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        ThemeAction::Set { key } => {
            let effects = session.model.set_theme(&key);
            session.apply(effects);
            println!("{}", session.model.theme());
        }
    }
    Ok(())
}
