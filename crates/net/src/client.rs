//! HTTP client configuration and request helpers

use ghostup_config::NetworkConfig;
use ghostup_errors::{Error, NetworkError};
use reqwest::{Client, Response};
use std::time::Duration;

/// Network client configuration
#[derive(Debug, Clone)]
pub struct NetConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(300), // release archives are tens of MB
            connect_timeout: Duration::from_secs(30),
            user_agent: format!("ghostup/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl From<&NetworkConfig> for NetConfig {
    fn from(config: &NetworkConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout),
            connect_timeout: Duration::from_secs(config.connect_timeout),
            ..Self::default()
        }
    }
}

/// HTTP client wrapper
///
/// Requests are attempted exactly once. A failed run is resumed by invoking
/// the installer again, which skips stages that already completed.
#[derive(Clone, Debug)]
pub struct NetClient {
    client: Client,
}

impl NetClient {
    /// Create a new network client
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client fails to initialize.
    pub fn new(config: NetConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| NetworkError::ClientInit(e.to_string()))?;

        Ok(Self { client })
    }

    /// Create with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created with default settings.
    pub fn with_defaults() -> Result<Self, Error> {
        Self::new(NetConfig::default())
    }

    /// Execute a single GET request
    ///
    /// # Errors
    ///
    /// Returns an error on timeouts, refused connections, or other transport
    /// failures. HTTP error statuses are returned as a normal response.
    pub async fn get(&self, url: &str) -> Result<Response, Error> {
        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| map_transport_error(url, None, &e).into())
    }
}

/// Classify a reqwest failure into the network error taxonomy
pub(crate) fn map_transport_error(
    url: &str,
    dest: Option<&std::path::Path>,
    error: &reqwest::Error,
) -> NetworkError {
    if error.is_timeout() {
        NetworkError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        NetworkError::ConnectionRefused {
            url: url.to_string(),
            message: error.to_string(),
        }
    } else {
        NetworkError::DownloadFailed {
            url: url.to_string(),
            dest: dest.map(|d| d.display().to_string()).unwrap_or_default(),
            message: error.to_string(),
        }
    }
}
