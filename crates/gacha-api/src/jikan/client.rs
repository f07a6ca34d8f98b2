use reqwest::{Client, StatusCode};
use url::Url;

use super::error::JikanError;
use super::types::{JikanAnime, JikanErrorBody, JikanListResponse, JikanResponse};
use crate::traits::{AnimeRecord, RandomAnimeSource, SeasonalSource};

pub const DEFAULT_BASE_URL: &str = "https://api.jikan.moe/v4";

/// Jikan v4 (unofficial MyAnimeList) REST client. No authentication needed.
pub struct JikanClient {
    base_url: String,
    http: Client,
}

impl JikanClient {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Point the client at another Jikan deployment (or a mock server).
    pub fn with_base_url(base_url: &str) -> Result<Self, JikanError> {
        let parsed = Url::parse(base_url)?;
        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            http: Client::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check the HTTP response for errors and turn the body into a message on failure.
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, JikanError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<JikanErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or(body);
        tracing::warn!(status = status.as_u16(), "Jikan API error");

        if status == StatusCode::TOO_MANY_REQUESTS {
            Err(JikanError::RateLimited(message))
        } else {
            Err(JikanError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn get_list(&self, path: &str, limit: u32) -> Result<Vec<AnimeRecord>, JikanError> {
        let resp = self
            .http
            .get(format!("{}{path}", self.base_url))
            .query(&[("limit", limit.to_string())])
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        let list: JikanListResponse<JikanAnime> = resp
            .json()
            .await
            .map_err(|e| JikanError::Parse(e.to_string()))?;

        tracing::debug!(path, count = list.data.len(), "fetched anime list");
        Ok(list.data.into_iter().map(JikanAnime::into_record).collect())
    }
}

impl Default for JikanClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomAnimeSource for JikanClient {
    type Error = JikanError;

    async fn random_anime(&self) -> Result<AnimeRecord, JikanError> {
        let resp = self
            .http
            .get(format!("{}/random/anime", self.base_url))
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        let random: JikanResponse<JikanAnime> = resp
            .json()
            .await
            .map_err(|e| JikanError::Parse(e.to_string()))?;

        Ok(random.data.into_record())
    }
}

impl SeasonalSource for JikanClient {
    type Error = JikanError;

    async fn seasons_now(&self, limit: u32) -> Result<Vec<AnimeRecord>, JikanError> {
        self.get_list("/seasons/now", limit).await
    }

    async fn seasons_upcoming(&self, limit: u32) -> Result<Vec<AnimeRecord>, JikanError> {
        self.get_list("/seasons/upcoming", limit).await
    }
}
