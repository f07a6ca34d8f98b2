use gacha_api::{JikanClient, MyMemoryClient};
use gacha_core::config::AppConfig;
use gacha_core::discover::Discover;
use gacha_core::error::GachaError;
use gacha_core::genre::GENRE_CHIPS;
use gacha_core::page::PageState;
use gacha_core::render::Renderer;
use gacha_core::seasonal;
use gacha_core::theme::ThemeStore;

use crate::cli::{Cli, Command, ConfigAction, ThemeAction};

/// Execute the parsed command and return what should be printed.
pub async fn run(cli: Cli, mut config: AppConfig) -> Result<String, GachaError> {
    let renderer = Renderer::new()?;
    let themes = ThemeStore::open_default();
    let mut page = PageState::new();

    let fragment = match cli.command {
        Command::Random {
            genre,
            match_mode,
            max_attempts,
            no_translate,
        } => {
            if let Some(mode) = match_mode {
                config.search.match_mode = mode;
            }
            if let Some(max) = max_attempts {
                config.search.max_attempts = max;
            }
            if no_translate {
                config.translation.enabled = false;
            }
            page.select_genre(genre.as_deref().unwrap_or_default());

            let source = JikanClient::with_base_url(&config.api.jikan_base_url)
                .map_err(|e| GachaError::Api(e.to_string()))?;
            let translator = MyMemoryClient::with_endpoint(&config.api.translate_url)
                .map_err(|e| GachaError::Api(e.to_string()))?;
            let search = config.search_policy();
            let translation = config.translation_policy();

            let discover = Discover {
                source: &source,
                translator: &translator,
                renderer: &renderer,
                search: &search,
                translation: &translation,
            };
            discover
                .show_random_anime(&page)
                .await?
                .unwrap_or_default()
        }
        Command::Seasons { limit } => {
            let source = JikanClient::with_base_url(&config.api.jikan_base_url)
                .map_err(|e| GachaError::Api(e.to_string()))?;
            let limit = limit.unwrap_or(config.seasonal.limit);
            seasonal::load_seasonal(&source, limit)
                .await
                .render(&renderer)?
        }
        Command::Theme { action } => {
            return match action.unwrap_or(ThemeAction::Show) {
                ThemeAction::Show => Ok(themes.current().to_string()),
                ThemeAction::Toggle => themes.toggle().map(|t| t.to_string()),
                ThemeAction::Set { theme } => themes.set(theme).map(|()| theme.to_string()),
            };
        }
        Command::Genres => return Ok(GENRE_CHIPS.join("\n")),
        Command::Config { action } => {
            return match action.unwrap_or(ConfigAction::Show) {
                ConfigAction::Path => Ok(AppConfig::config_path().display().to_string()),
                ConfigAction::Show => {
                    toml::to_string_pretty(&config).map_err(|e| GachaError::Config(e.to_string()))
                }
            };
        }
    };

    if cli.page {
        renderer.render_page("gacha", themes.current(), &page, &fragment)
    } else {
        Ok(fragment)
    }
}
