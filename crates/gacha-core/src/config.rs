use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::GachaError;
use crate::fetch::{HttpErrorPolicy, SearchPolicy};
use crate::genre::MatchMode;
use crate::translate::TranslationPolicy;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub translation: TranslationConfig,
    pub seasonal: SeasonalConfig,
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub max_attempts: u32,
    pub match_mode: MatchMode,
    pub media_type: String,
    pub on_http_error: HttpErrorPolicy,
    pub backoff_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    pub enabled: bool,
    pub budget_chars: usize,
    pub timeout_ms: u64,
    pub source_lang: String,
    pub target_lang: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalConfig {
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub jikan_base_url: String,
    pub translate_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Also write a daily rolling log file into the data directory.
    pub file: bool,
}

impl AppConfig {
    /// Load config: user file (if exists) merged over built-in defaults.
    pub fn load() -> Result<Self, GachaError> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from an explicit path, merged over built-in defaults.
    ///
    /// Keys missing from the user file keep their default values.
    pub fn load_from(path: &Path) -> Result<Self, GachaError> {
        let mut merged: toml::Table =
            toml::from_str(DEFAULT_CONFIG).map_err(|e| GachaError::Config(e.to_string()))?;

        if path.exists() {
            let user_str =
                std::fs::read_to_string(path).map_err(|e| GachaError::Config(e.to_string()))?;
            let user: toml::Table =
                toml::from_str(&user_str).map_err(|e| GachaError::Config(e.to_string()))?;
            merge_tables(&mut merged, user);
            tracing::debug!(path = %path.display(), "loaded user config");
        }

        toml::Value::Table(merged)
            .try_into()
            .map_err(|e: toml::de::Error| GachaError::Config(e.to_string()))
    }

    /// Save current config to the user config file.
    pub fn save(&self) -> Result<(), GachaError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), GachaError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| GachaError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Directory for persisted state and log files.
    pub fn data_dir() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn search_policy(&self) -> SearchPolicy {
        SearchPolicy {
            max_attempts: self.search.max_attempts,
            match_mode: self.search.match_mode,
            media_type: self.search.media_type.clone(),
            on_http_error: self.search.on_http_error,
            backoff: Duration::from_millis(self.search.backoff_ms),
        }
    }

    pub fn translation_policy(&self) -> TranslationPolicy {
        TranslationPolicy {
            enabled: self.translation.enabled,
            budget_chars: self.translation.budget_chars,
            timeout: Duration::from_millis(self.translation.timeout_ms),
            source_lang: self.translation.source_lang.clone(),
            target_lang: self.translation.target_lang.clone(),
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "gacha")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

/// Recursively overlay `overlay` onto `base`. Nested tables merge, everything else replaces.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        if let toml::Value::Table(incoming) = value {
            if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                merge_tables(existing, incoming);
                continue;
            }
            base.insert(key, toml::Value::Table(incoming));
        } else {
            base.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = AppConfig::default();
        assert_eq!(config.search.max_attempts, 15);
        assert_eq!(config.search.match_mode, MatchMode::Exact);
        assert_eq!(config.search.media_type, "TV");
        assert_eq!(config.search.on_http_error, HttpErrorPolicy::Retry);
        assert_eq!(config.translation.budget_chars, 500);
        assert_eq!(config.translation.timeout_ms, 5500);
        assert_eq!(config.seasonal.limit, 12);
        assert!(!config.logging.file);
    }

    #[test]
    fn test_missing_user_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.search.max_attempts, 15);
    }

    #[test]
    fn test_user_file_overrides_single_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[search]\nmax_attempts = 18\nmatch_mode = \"substring\"\n\n[translation]\ntarget_lang = \"es\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.search.max_attempts, 18);
        assert_eq!(config.search.match_mode, MatchMode::Substring);
        // Untouched keys keep their defaults.
        assert_eq!(config.search.backoff_ms, 1200);
        assert_eq!(config.translation.target_lang, "es");
        assert_eq!(config.translation.source_lang, "en");
    }

    #[test]
    fn test_invalid_user_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[search]\nmax_attempts = \"many\"\n").unwrap();

        assert!(matches!(
            AppConfig::load_from(&path),
            Err(GachaError::Config(_))
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.search.on_http_error = HttpErrorPolicy::Abort;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.search.on_http_error, HttpErrorPolicy::Abort);
    }

    #[test]
    fn test_policies_follow_config() {
        let config = AppConfig::default();
        let search = config.search_policy();
        assert_eq!(search.backoff, Duration::from_millis(1200));
        let translation = config.translation_policy();
        assert_eq!(translation.timeout, Duration::from_millis(5500));
        assert_eq!(translation.target_lang, "pt");
    }
}
