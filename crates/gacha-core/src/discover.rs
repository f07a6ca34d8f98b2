//! The "random anime" action: search, translate the synopsis, render.

use gacha_api::{RandomAnimeSource, Translator};

use crate::error::GachaError;
use crate::fetch::{self, SearchPolicy};
use crate::page::PageState;
use crate::render::Renderer;
use crate::translate::{self, TranslationPolicy};

/// Everything one random-anime action needs besides the page state.
pub struct Discover<'a, S, T> {
    pub source: &'a S,
    pub translator: &'a T,
    pub renderer: &'a Renderer,
    pub search: &'a SearchPolicy,
    pub translation: &'a TranslationPolicy,
}

impl<S: RandomAnimeSource, T: Translator> Discover<'_, S, T> {
    /// Run the action for the page's selected genre and return the fragment to show.
    ///
    /// Returns `Ok(None)` without touching the network when a previous action
    /// on the same page is still running.
    pub async fn show_random_anime(&self, page: &PageState) -> Result<Option<String>, GachaError> {
        let Some(_guard) = page.begin_search() else {
            tracing::debug!("random anime already in flight, ignoring");
            return Ok(None);
        };

        let filter = page.genre();
        let Some(anime) = fetch::find_random_anime(self.source, filter, self.search).await else {
            return self.renderer.render_not_found(filter).map(Some);
        };

        let synopsis = match anime.synopsis.as_deref() {
            Some(text) => {
                Some(translate::translate_synopsis(self.translator, text, self.translation).await.text)
            }
            None => None,
        };

        self.renderer
            .render_card(&anime, synopsis.as_deref())
            .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use gacha_api::ServiceError;

    use super::*;
    use crate::fetch::testing::{anime, ScriptedSource};

    #[derive(Debug, thiserror::Error)]
    #[error("never")]
    struct Never;

    impl ServiceError for Never {
        fn status(&self) -> Option<u16> {
            None
        }
    }

    struct Hanging;

    impl Translator for Hanging {
        type Error = Never;

        async fn translate(&self, text: &str, _: &str, _: &str) -> Result<String, Never> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(format!("late: {text}"))
        }
    }

    struct Prefix;

    impl Translator for Prefix {
        type Error = Never;

        async fn translate(&self, text: &str, _: &str, target: &str) -> Result<String, Never> {
            Ok(format!("[{target}] {text}"))
        }
    }

    fn with_synopsis(text: &str) -> gacha_api::AnimeRecord {
        let mut record = anime(5, "TV", &["Action"]);
        record.synopsis = Some(text.to_string());
        record
    }

    #[tokio::test(start_paused = true)]
    async fn test_translation_timeout_renders_original_synopsis() {
        let source = ScriptedSource::repeating(with_synopsis("Heroes gather."));
        let renderer = Renderer::new().unwrap();
        let discover = Discover {
            source: &source,
            translator: &Hanging,
            renderer: &renderer,
            search: &SearchPolicy::default(),
            translation: &TranslationPolicy::default(),
        };

        let html = discover
            .show_random_anime(&PageState::new())
            .await
            .unwrap()
            .unwrap();
        assert!(html.contains("<p class=\"anime-card__synopsis\">Heroes gather.</p>"));
        assert!(!html.contains("late:"));
    }

    #[tokio::test]
    async fn test_translated_synopsis_is_rendered() {
        let source = ScriptedSource::repeating(with_synopsis("Heroes gather."));
        let renderer = Renderer::new().unwrap();
        let discover = Discover {
            source: &source,
            translator: &Prefix,
            renderer: &renderer,
            search: &SearchPolicy::default(),
            translation: &TranslationPolicy::default(),
        };

        let mut page = PageState::new();
        page.select_genre("action");
        let html = discover.show_random_anime(&page).await.unwrap().unwrap();
        assert!(html.contains("[pt] Heroes gather."));
    }

    #[tokio::test]
    async fn test_exhausted_search_renders_message() {
        let source = ScriptedSource::repeating(anime(1, "Movie", &["Horror"]));
        let renderer = Renderer::new().unwrap();
        let discover = Discover {
            source: &source,
            translator: &Prefix,
            renderer: &renderer,
            search: &SearchPolicy {
                max_attempts: 3,
                ..Default::default()
            },
            translation: &TranslationPolicy::default(),
        };

        let mut page = PageState::new();
        page.select_genre("Horror");
        let html = discover.show_random_anime(&page).await.unwrap().unwrap();
        assert!(html.contains("good Horror anime"));
        assert_eq!(source.calls(), 3);
        assert!(!page.is_searching());
    }

    #[tokio::test]
    async fn test_pending_action_is_not_repeated() {
        let source = ScriptedSource::repeating(anime(1, "TV", &[]));
        let renderer = Renderer::new().unwrap();
        let discover = Discover {
            source: &source,
            translator: &Prefix,
            renderer: &renderer,
            search: &SearchPolicy::default(),
            translation: &TranslationPolicy::default(),
        };

        let page = PageState::new();
        let pending = page.begin_search().unwrap();
        assert!(discover.show_random_anime(&page).await.unwrap().is_none());
        assert_eq!(source.calls(), 0);

        drop(pending);
        assert!(discover.show_random_anime(&page).await.unwrap().is_some());
    }
}
