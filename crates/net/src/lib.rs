#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Network operations for ghostup
//!
//! Fetches release archives, their signatures and compiler toolchains over
//! HTTPS. Every request is a single attempt.

mod client;
mod download;

pub use client::{NetClient, NetConfig};
pub use download::{part_path, Download, DownloadResult};

use ghostup_errors::{Error, NetworkError};
use std::path::Path;
use url::Url;

/// Download `url` to `dest`, emitting download events on `tx`
///
/// # Errors
///
/// Returns an error if the URL is invalid, the download fails, or there are
/// I/O errors while writing the file.
pub async fn download_file(
    client: &NetClient,
    url: &str,
    dest: &Path,
    tx: &ghostup_events::EventSender,
) -> Result<DownloadResult, Error> {
    let download = Download::new(url)?;
    download.execute(client, dest, tx).await
}

/// Join a base URL and path segments with single slashes
///
/// # Errors
///
/// Returns an error if the result is not a valid absolute URL.
pub fn join_url(base: &str, segments: &[&str]) -> Result<String, Error> {
    let mut joined = base.trim_end_matches('/').to_string();
    for segment in segments {
        joined.push('/');
        joined.push_str(segment.trim_matches('/'));
    }
    parse_url(&joined)?;
    Ok(joined)
}

/// Parse and validate a URL
///
/// # Errors
///
/// Returns an error if the URL string is malformed.
pub fn parse_url(url: &str) -> Result<Url, Error> {
    Url::parse(url).map_err(|e| NetworkError::InvalidUrl(format!("{url}: {e}")).into())
}
