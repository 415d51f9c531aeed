//! Immutable lookup tables handed to the session model at construction.
//!
//! Nothing in the crate reads mode durations, themes, or localized labels
//! from global state: the model and the views receive a [`Catalog`] and
//! resolve keys through it. Unknown keys resolve to each table's default.

mod i18n;
mod theme;

pub use i18n::{LanguageTable, Labels};
pub use theme::{ThemeSpec, ThemeTable};

use crate::timer::ModeTable;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    pub modes: ModeTable,
    pub themes: ThemeTable,
    pub languages: LanguageTable,
}

impl Catalog {
    /// Built-in themes and languages with the given mode durations.
    pub fn with_modes(modes: ModeTable) -> Self {
        Self {
            modes,
            ..Self::default()
        }
    }
}
