//! Persisted light/dark preference.
//!
//! Saves a small JSON file to `~/.local/share/gacha/theme.json`
//! (or platform equivalent via `directories` crate). Without a saved value the
//! OS appearance decides.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GachaError;

const FILE_NAME: &str = "theme.json";

const SUN_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" width="24" height="24" fill="none" stroke="currentColor" stroke-width="2"><circle cx="12" cy="12" r="3.75"/><path stroke-linecap="round" d="M12 3v2.25M12 18.75V21M3 12h2.25M18.75 12H21M5.64 5.64l1.59 1.59M16.77 16.77l1.59 1.59M5.64 18.36l1.59-1.59M16.77 7.23l1.59-1.59"/></svg>"#;

const MOON_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" width="24" height="24" fill="none" stroke="currentColor" stroke-width="2"><path stroke-linecap="round" stroke-linejoin="round" d="M21.75 15A9.75 9.75 0 0 1 9 2.25 9.75 9.75 0 1 0 21.75 15z"/></svg>"#;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Value of the document's `data-theme` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Toggle button icon: the sun offers a way out of dark mode, the moon out of light.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Dark => SUN_ICON,
            Self::Light => MOON_ICON,
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme '{other}' (expected light or dark)")),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ask the OS for its appearance. Anything but a definite "dark" is light.
pub fn detect_system_theme() -> Theme {
    match dark_light::detect() {
        Ok(dark_light::Mode::Dark) => Theme::Dark,
        _ => Theme::Light,
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SavedTheme {
    theme: Theme,
}

/// Reads and writes the theme preference file.
pub struct ThemeStore {
    path: PathBuf,
    system: fn() -> Theme,
}

impl ThemeStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            system: detect_system_theme,
        }
    }

    /// Store in the platform data directory.
    pub fn open_default() -> Self {
        Self::open(crate::config::AppConfig::data_dir().join(FILE_NAME))
    }

    /// Replace OS detection, e.g. for tests or headless use.
    pub fn with_system(mut self, system: fn() -> Theme) -> Self {
        self.system = system;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The saved preference, if there is a readable one.
    pub fn saved(&self) -> Option<Theme> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<SavedTheme>(&content) {
            Ok(saved) => Some(saved.theme),
            Err(e) => {
                tracing::warn!("Ignoring unreadable theme file {}: {e}", self.path.display());
                None
            }
        }
    }

    /// Active theme: saved preference, else the OS appearance.
    pub fn current(&self) -> Theme {
        self.saved().unwrap_or_else(self.system)
    }

    /// Persist `theme` as the preference.
    pub fn set(&self, theme: Theme) -> Result<(), GachaError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&SavedTheme { theme })
            .map_err(|e| GachaError::Config(e.to_string()))?;
        std::fs::write(&self.path, json)?;
        tracing::debug!(theme = %theme, "saved theme preference");
        Ok(())
    }

    /// Flip the active theme, persist it and return the new value.
    pub fn toggle(&self) -> Result<Theme, GachaError> {
        let next = self.current().toggled();
        self.set(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &tempfile::TempDir) -> ThemeStore {
        ThemeStore::open(dir.path().join(FILE_NAME)).with_system(|| Theme::Light)
    }

    #[test]
    fn test_falls_back_to_system() {
        let dir = tempfile::tempdir().unwrap();
        let store = ThemeStore::open(dir.path().join(FILE_NAME)).with_system(|| Theme::Dark);
        assert_eq!(store.saved(), None);
        assert_eq!(store.current(), Theme::Dark);
    }

    #[test]
    fn test_saved_overrides_system() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        store.set(Theme::Dark).unwrap();
        assert_eq!(store.current(), Theme::Dark);
    }

    #[test]
    fn test_toggle_twice_restores_value_and_icon() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        for start in [Theme::Light, Theme::Dark] {
            store.set(start).unwrap();
            let icon = store.current().icon();

            assert_eq!(store.toggle().unwrap(), start.toggled());
            assert_ne!(store.current().icon(), icon);
            assert_eq!(store.toggle().unwrap(), start);

            assert_eq!(store.saved(), Some(start));
            assert_eq!(store.current().icon(), icon);
        }
    }

    #[test]
    fn test_corrupt_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        std::fs::write(store.path(), "{ not json").unwrap();
        assert_eq!(store.saved(), None);
        assert_eq!(store.current(), Theme::Light);
    }

    #[test]
    fn test_icons() {
        assert_eq!(Theme::Dark.icon(), SUN_ICON);
        assert_eq!(Theme::Light.icon(), MOON_ICON);
    }

    #[test]
    fn test_parse_theme() {
        assert_eq!("Dark".parse::<Theme>(), Ok(Theme::Dark));
        assert!("sepia".parse::<Theme>().is_err());
    }
}
