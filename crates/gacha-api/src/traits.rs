//! Trait definitions for the remote services the page talks to.
//!
//! The HTTP clients in this crate implement these traits so the search loop,
//! the seasonal loader and the synopsis translator can run against any source,
//! including in-memory fakes in tests.

use std::future::Future;

/// Errors that may carry an HTTP status from the remote service.
pub trait ServiceError: std::error::Error + Send + Sync + 'static {
    /// The non-success HTTP status the service answered with, if any.
    ///
    /// `None` means the request never produced a status (transport failure,
    /// undecodable body).
    fn status(&self) -> Option<u16>;
}

/// A source of single random anime records.
pub trait RandomAnimeSource: Send + Sync {
    type Error: ServiceError;

    /// Fetch one random anime. Every call is one network request.
    fn random_anime(&self) -> impl Future<Output = Result<AnimeRecord, Self::Error>> + Send;
}

/// A source of seasonal anime lists.
pub trait SeasonalSource: Send + Sync {
    type Error: ServiceError;

    /// Anime airing in the current broadcast season.
    fn seasons_now(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<AnimeRecord>, Self::Error>> + Send;

    /// Anime announced for upcoming seasons.
    fn seasons_upcoming(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<AnimeRecord>, Self::Error>> + Send;
}

/// A machine-translation service.
pub trait Translator: Send + Sync {
    type Error: ServiceError;

    /// Translate `text` from `source` to `target` (ISO 639-1 codes).
    fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// An anime as returned by the metadata service.
///
/// Owned by the remote API; callers hold a transient copy for one render.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimeRecord {
    pub mal_id: u64,
    pub title: String,
    pub title_english: Option<String>,
    pub score: Option<f32>,
    pub year: Option<u32>,
    pub episodes: Option<u32>,
    pub status: Option<String>,
    pub genres: Vec<String>,
    pub image_url: Option<String>,
    pub trailer_url: Option<String>,
    pub synopsis: Option<String>,
    pub media_type: Option<String>,
    pub aired: Option<String>,
    pub url: Option<String>,
}

impl AnimeRecord {
    /// Whether the record's media type equals `media_type`, ignoring case.
    pub fn is_media_type(&self, media_type: &str) -> bool {
        self.media_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case(media_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_ignores_case() {
        let anime = AnimeRecord {
            media_type: Some("tv".into()),
            ..Default::default()
        };
        assert!(anime.is_media_type("TV"));
        assert!(!anime.is_media_type("Movie"));
    }

    #[test]
    fn test_missing_media_type_never_matches() {
        let anime = AnimeRecord::default();
        assert!(!anime.is_media_type("TV"));
    }
}
