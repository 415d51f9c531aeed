use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeSpec {
    pub key: String,
    pub label: String,
    /// Accent colour shown on the theme chip.
    pub preview: String,
}

/// Ordered theme table. The first entry is the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeTable {
    themes: Vec<ThemeSpec>,
}

impl ThemeTable {
    pub fn all(&self) -> &[ThemeSpec] {
        &self.themes
    }

    pub fn default_key(&self) -> &str {
        &self.themes[0].key
    }

    pub fn get(&self, key: &str) -> Option<&ThemeSpec> {
        self.themes.iter().find(|t| t.key == key)
    }

    /// The canonical key for `key`, or the default key if it is unknown.
    pub fn resolve(&self, key: &str) -> &str {
        self.get(key).map(|t| t.key.as_str()).unwrap_or(self.default_key())
    }
}

impl Default for ThemeTable {
    fn default() -> Self {
        let theme = |key: &str, label: &str, preview: &str| ThemeSpec {
            key: key.into(),
            label: label.into(),
            preview: preview.into(),
        };
        Self {
            themes: vec![
                theme("sunrise", "Sunrise", "#f97316"),
                theme("midnight", "Midnight", "#6366f1"),
                theme("forest", "Forest", "#16a34a"),
                theme("ocean", "Ocean", "#0ea5e9"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_theme_resolves_to_default() {
        let table = ThemeTable::default();
        assert_eq!(table.resolve("neon"), "sunrise");
        assert_eq!(table.resolve("forest"), "forest");
    }
}
