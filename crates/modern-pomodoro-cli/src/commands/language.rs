use clap::Subcommand;

use crate::session::Session;

#[derive(Subcommand)]
pub enum LanguageAction {
    /// List available languages
    List,
    /// Select a language; unknown codes are ignored
    Set { code: String },
}

pub fn run(action: LanguageAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open()?;

    match action {
        LanguageAction::List => {
            let languages = &session.model.catalog().languages;
            let options: serde_json::Map<String, serde_json::Value> = languages
                .codes()
                .map(|code| (code.to_string(), languages.labels(code).name.clone().into()))
                .collect();
            let output = serde_json::json!({
                "current": session.model.language(),
                "languages": options,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        LanguageAction::Set { code } => {
            let effects = session.model.set_language(&code);
            session.apply(effects);
            println!("{}", session.model.language());
        }
    }
    Ok(())
}
