//! Network-related error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum NetworkError {
    #[error("connection timeout to {url}")]
    Timeout { url: String },

    #[error("download of {url} to {dest} failed: {message}")]
    DownloadFailed {
        url: String,
        dest: String,
        message: String,
    },

    #[error("connection refused by {url}: {message}")]
    ConnectionRefused { url: String, message: String },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error {status} fetching {url}")]
    HttpError { url: String, status: u16 },

    #[error("failed to initialise HTTP client: {0}")]
    ClientInit(String),
}

impl UserFacingError for NetworkError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::Timeout { .. } | Self::ConnectionRefused { .. } => {
                Some("Check your network connection and re-run; completed stages are skipped.")
            }
            Self::HttpError { status: 404, .. } => {
                Some("Make sure the requested version exists on the release server.")
            }
            Self::InvalidUrl(_) => Some("Check the base URLs in the [sources] config section."),
            _ => None,
        }
    }

    fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::ConnectionRefused { .. } | Self::DownloadFailed { .. } => {
                true
            }
            Self::HttpError { status, .. } => *status >= 500,
            Self::InvalidUrl(_) | Self::ClientInit(_) => false,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::Timeout { .. } => "network.timeout",
            Self::DownloadFailed { .. } => "network.download_failed",
            Self::ConnectionRefused { .. } => "network.connection_refused",
            Self::InvalidUrl(_) => "network.invalid_url",
            Self::HttpError { .. } => "network.http_error",
            Self::ClientInit(_) => "network.client_init",
        };
        Some(code)
    }
}
