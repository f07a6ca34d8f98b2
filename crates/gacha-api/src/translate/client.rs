use reqwest::Client;
use url::Url;

use super::error::TranslateError;
use super::types::MyMemoryResponse;
use crate::traits::Translator;

pub const DEFAULT_ENDPOINT: &str = "https://api.mymemory.translated.net/get";

/// MyMemory free translation API client.
pub struct MyMemoryClient {
    endpoint: Url,
    http: Client,
}

impl MyMemoryClient {
    pub fn new() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            http: Client::new(),
        }
    }

    pub fn with_endpoint(endpoint: &str) -> Result<Self, TranslateError> {
        Ok(Self {
            endpoint: Url::parse(endpoint)?,
            http: Client::new(),
        })
    }
}

impl Default for MyMemoryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator for MyMemoryClient {
    type Error = TranslateError;

    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError> {
        let langpair = format!("{source}|{target}");
        let resp = self
            .http
            .get(self.endpoint.clone())
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            tracing::warn!(status, "translation API error");
            return Err(TranslateError::Api { status, message });
        }

        let body: MyMemoryResponse = resp
            .json()
            .await
            .map_err(|e| TranslateError::Parse(e.to_string()))?;

        // MyMemory reports quota and language errors inside a 200 response.
        let status = body.status();
        if status != 200 {
            return Err(TranslateError::Api {
                status,
                message: body.response_details.unwrap_or_default(),
            });
        }

        body.response_data
            .and_then(|d| d.translated_text)
            .filter(|t| !t.trim().is_empty())
            .ok_or(TranslateError::Empty)
    }
}
