//! Bounded random-anime search.
//!
//! The metadata service hands out one random record per request, so finding a
//! TV series in a given genre means drawing repeatedly until one qualifies or
//! the attempt budget runs out. Attempts are strictly sequential.

use std::time::Duration;

use gacha_api::{AnimeRecord, RandomAnimeSource, ServiceError};
use serde::{Deserialize, Serialize};

use crate::genre::{GenreFilter, MatchMode};

/// What to do when the service answers with a non-success HTTP status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpErrorPolicy {
    /// Give up immediately.
    Abort,
    /// Sleep for the backoff delay and draw again (rate limiting is common).
    #[default]
    Retry,
}

/// Parameters of one search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPolicy {
    pub max_attempts: u32,
    pub match_mode: MatchMode,
    pub media_type: String,
    pub on_http_error: HttpErrorPolicy,
    pub backoff: Duration,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 15,
            match_mode: MatchMode::Exact,
            media_type: "TV".to_string(),
            on_http_error: HttpErrorPolicy::Retry,
            backoff: Duration::from_millis(1200),
        }
    }
}

impl SearchPolicy {
    /// Whether `anime` is an acceptable result for `filter`.
    pub fn accepts(&self, anime: &AnimeRecord, filter: &GenreFilter) -> bool {
        anime.is_media_type(&self.media_type) && filter.matches(&anime.genres, self.match_mode)
    }
}

/// Outcome of a search, with the number of requests it took.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchReport {
    pub anime: Option<AnimeRecord>,
    pub attempts: u32,
}

/// Draw random anime until one satisfies `policy` and `filter`.
///
/// Never performs more than `policy.max_attempts` requests. Errors are logged
/// and end the search with no result, except HTTP status errors under
/// [`HttpErrorPolicy::Retry`], which cost one attempt and a backoff sleep.
pub async fn search<S: RandomAnimeSource>(
    source: &S,
    filter: &GenreFilter,
    policy: &SearchPolicy,
) -> SearchReport {
    let mut attempts = 0;

    while attempts < policy.max_attempts {
        attempts += 1;

        match source.random_anime().await {
            Ok(anime) if policy.accepts(&anime, filter) => {
                tracing::info!(attempts, mal_id = anime.mal_id, title = %anime.title, "found anime");
                return SearchReport {
                    anime: Some(anime),
                    attempts,
                };
            }
            Ok(anime) => {
                tracing::debug!(
                    attempt = attempts,
                    title = %anime.title,
                    media_type = anime.media_type.as_deref().unwrap_or("?"),
                    genres = ?anime.genres,
                    "rejected random anime"
                );
            }
            Err(e) => match (e.status(), policy.on_http_error) {
                (Some(status), HttpErrorPolicy::Retry) => {
                    tracing::warn!(attempt = attempts, status, "random anime request failed, backing off");
                    if attempts < policy.max_attempts {
                        tokio::time::sleep(policy.backoff).await;
                    }
                }
                _ => {
                    tracing::warn!(attempt = attempts, error = %e, "random anime search aborted");
                    return SearchReport {
                        anime: None,
                        attempts,
                    };
                }
            },
        }
    }

    tracing::info!(attempts, genre = %filter, "no matching anime within attempt budget");
    SearchReport {
        anime: None,
        attempts,
    }
}

/// Like [`search`], returning only the record.
pub async fn find_random_anime<S: RandomAnimeSource>(
    source: &S,
    filter: &GenreFilter,
    policy: &SearchPolicy,
) -> Option<AnimeRecord> {
    search(source, filter, policy).await.anime
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use gacha_api::{AnimeRecord, RandomAnimeSource, ServiceError};

    #[derive(Debug, thiserror::Error)]
    #[error("fake error (status {0:?})")]
    pub struct FakeError(pub Option<u16>);

    impl ServiceError for FakeError {
        fn status(&self) -> Option<u16> {
            self.0
        }
    }

    pub fn anime(id: u64, media_type: &str, genres: &[&str]) -> AnimeRecord {
        AnimeRecord {
            mal_id: id,
            title: format!("Anime {id}"),
            media_type: Some(media_type.to_string()),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            ..Default::default()
        }
    }

    /// Replays a script of responses, then repeats `fallback` forever.
    pub struct ScriptedSource {
        script: Mutex<VecDeque<Result<AnimeRecord, FakeError>>>,
        fallback: AnimeRecord,
        calls: AtomicU32,
    }

    impl ScriptedSource {
        pub fn new(script: Vec<Result<AnimeRecord, FakeError>>, fallback: AnimeRecord) -> Self {
            Self {
                script: Mutex::new(script.into()),
                fallback,
                calls: AtomicU32::new(0),
            }
        }

        pub fn repeating(fallback: AnimeRecord) -> Self {
            Self::new(Vec::new(), fallback)
        }

        pub fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl RandomAnimeSource for ScriptedSource {
        type Error = FakeError;

        async fn random_anime(&self) -> Result<AnimeRecord, FakeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self.script.lock().unwrap().pop_front();
            next.unwrap_or_else(|| Ok(self.fallback.clone()))
        }
    }
}
