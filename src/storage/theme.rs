//! Theme persistence under the `theme` key
//!
//! An explicit saved choice always wins. Without one, the ambient system
//! preference decides, and without that the theme is light.

use crate::domain::Theme;

use super::KvStore;

/// Key the theme is stored under
pub const THEME_KEY: &str = "theme";

/// Reads the terminal's ambient preference from `COLORFGBG` ("fg;bg")
pub fn system_theme() -> Option<Theme> {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|value| theme_from_colorfgbg(&value))
}

/// Maps a `COLORFGBG` value to a theme by its background colour index
pub fn theme_from_colorfgbg(value: &str) -> Option<Theme> {
    let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    match background {
        0..=6 | 8 => Some(Theme::Dark),
        7 | 9..=15 => Some(Theme::Light),
        _ => None,
    }
}

/// File-backed theme choice
#[derive(Debug, Clone)]
pub struct ThemeFile {
    kv: KvStore,
    system: Option<Theme>,
}

impl ThemeFile {
    /// Creates a theme file with a known system preference (if any)
    pub fn new(kv: KvStore, system: Option<Theme>) -> Self {
        Self { kv, system }
    }

    /// The explicitly saved theme, ignoring unreadable values
    pub fn stored(&self) -> Option<Theme> {
        match self.kv.get::<Theme>(THEME_KEY) {
            Ok(theme) => theme,
            Err(e) => {
                tracing::warn!("Ignoring unreadable theme: {:#}", e);
                None
            }
        }
    }

    /// Saved choice, falling back to the system preference
    pub fn preferred_theme(&self) -> Theme {
        self.stored().or(self.system).unwrap_or_default()
    }

    /// Records an explicit choice. Failures are logged, not returned.
    pub fn save(&self, theme: Theme) {
        match self.kv.set(THEME_KEY, &theme) {
            Ok(()) => tracing::debug!(%theme, "Saved theme"),
            Err(e) => tracing::warn!("Failed to save theme: {:#}", e),
        }
    }

    /// Flips the preferred theme, saves it and returns the new value
    pub fn toggle(&self) -> Theme {
        let theme = self.preferred_theme().toggled();
        self.save(theme);
        theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn theme_file(dir: &TempDir, system: Option<Theme>) -> ThemeFile {
        ThemeFile::new(KvStore::new(dir.path()), system)
    }

    #[test]
    fn defaults_to_light_without_preferences() {
        let dir = TempDir::new().unwrap();
        assert_eq!(theme_file(&dir, None).preferred_theme(), Theme::Light);
    }

    #[test]
    fn falls_back_to_system_preference() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            theme_file(&dir, Some(Theme::Dark)).preferred_theme(),
            Theme::Dark
        );
    }

    #[test]
    fn saved_choice_beats_system_preference() {
        let dir = TempDir::new().unwrap();
        let file = theme_file(&dir, Some(Theme::Dark));

        file.save(Theme::Light);
        assert_eq!(file.preferred_theme(), Theme::Light);
    }

    #[test]
    fn persisted_as_json_string() {
        let dir = TempDir::new().unwrap();
        theme_file(&dir, None).save(Theme::Dark);

        let raw = fs::read_to_string(dir.path().join("theme.json")).unwrap();
        assert_eq!(raw, "\"dark\"");
    }

    #[test]
    fn corrupt_value_uses_system_preference() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("theme.json"), "\"sepia\"").unwrap();

        let file = theme_file(&dir, Some(Theme::Dark));
        assert_eq!(file.stored(), None);
        assert_eq!(file.preferred_theme(), Theme::Dark);
    }

    #[test]
    fn toggle_saves_new_theme() {
        let dir = TempDir::new().unwrap();
        let file = theme_file(&dir, None);

        assert_eq!(file.toggle(), Theme::Dark);
        assert_eq!(theme_file(&dir, None).stored(), Some(Theme::Dark));
        assert_eq!(file.toggle(), Theme::Light);
    }

    #[test]
    fn colorfgbg_parsing() {
        assert_eq!(theme_from_colorfgbg("15;0"), Some(Theme::Dark));
        assert_eq!(theme_from_colorfgbg("0;15"), Some(Theme::Light));
        assert_eq!(theme_from_colorfgbg("12;default;8"), Some(Theme::Dark));
        assert_eq!(theme_from_colorfgbg("0;7"), Some(Theme::Light));
        assert_eq!(theme_from_colorfgbg("default"), None);
        assert_eq!(theme_from_colorfgbg(""), None);
    }
}
