use thiserror::Error;

use crate::traits::ServiceError;

/// Errors from the MyMemory translation client.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid endpoint: {0}")]
    Url(#[from] url::ParseError),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("empty translation")]
    Empty,

    #[error("parse error: {0}")]
    Parse(String),
}

impl ServiceError for TranslateError {
    fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Url(_) | Self::Empty | Self::Parse(_) => None,
        }
    }
}
