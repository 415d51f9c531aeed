pub mod config;
pub mod language;
pub mod log;
pub mod personal;
pub mod stats;
pub mod theme;
pub mod timer;
