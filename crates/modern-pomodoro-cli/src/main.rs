use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod effects;
mod session;

#[derive(Parser)]
#[command(name = "modern-pomodoro", version, about = "Modern Pomodoro timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Main timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Personal timers for teammates
    Personal {
        #[command(subcommand)]
        action: commands::personal::PersonalAction,
    },
    /// Session notes
    Log {
        #[command(subcommand)]
        action: commands::log::LogAction,
    },
    /// Session statistics and history
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Colour theme
    Theme {
        #[command(subcommand)]
        action: commands::theme::ThemeAction,
    },
    /// Interface language
    Language {
        #[command(subcommand)]
        action: commands::language::LanguageAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MODERN_POMODORO_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Personal { action } => commands::personal::run(action),
        Commands::Log { action } => commands::log::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Theme { action } => commands::theme::run(action),
        Commands::Language { action } => commands::language::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
