//! Streaming file download with BLAKE3 hashing

use futures::StreamExt;
use ghostup_errors::{Error, NetworkError};
use ghostup_events::{AppEvent, DownloadEvent, EventEmitter, EventSender};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::client::map_transport_error;
use crate::NetClient;

/// Download operation handle
pub struct Download {
    url: Url,
}

/// Result of a download operation
#[derive(Debug, Clone)]
pub struct DownloadResult {
    pub url: String,
    pub path: PathBuf,
    pub size: u64,
    /// Hex encoded BLAKE3 of the body
    pub hash: String,
}

impl Download {
    /// Create a new download
    ///
    /// # Errors
    ///
    /// Returns an error if the provided URL is invalid or cannot be parsed.
    pub fn new(url: &str) -> Result<Self, Error> {
        let url = Url::parse(url).map_err(|e| NetworkError::InvalidUrl(format!("{url}: {e}")))?;
        Ok(Self { url })
    }

    /// Execute the download
    ///
    /// The body is streamed to `<dest>.part` and renamed onto `dest` only
    /// after the final byte is flushed, so `dest` never holds a partial file.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server answers with a
    /// non-success status, or the file cannot be written.
    pub async fn execute(
        self,
        client: &NetClient,
        dest: &Path,
        tx: &EventSender,
    ) -> Result<DownloadResult, Error> {
        let url_str = self.url.to_string();

        let result = self.fetch(client, &url_str, dest, tx).await;
        if let Err(err) = &result {
            tx.emit_download_failed(&url_str, err);
        }
        result
    }

    async fn fetch(
        &self,
        client: &NetClient,
        url_str: &str,
        dest: &Path,
        tx: &EventSender,
    ) -> Result<DownloadResult, Error> {
        let response = client.get(self.url.as_str()).await?;

        if !response.status().is_success() {
            return Err(NetworkError::HttpError {
                url: url_str.to_string(),
                status: response.status().as_u16(),
            }
            .into());
        }

        let content_length = response.content_length();

        tx.emit(AppEvent::Download(DownloadEvent::Started {
            url: url_str.to_string(),
            dest: dest.to_path_buf(),
            total_size: content_length,
        }));

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| write_error(url_str, dest, &e))?;
        }

        let temp_path = part_path(dest);
        let streamed = stream_to_file(response, url_str, dest, &temp_path).await;
        let (size, hash) = match streamed {
            Ok(done) => done,
            Err(err) => {
                let _ = tokio::fs::remove_file(&temp_path).await;
                return Err(err);
            }
        };

        if let Err(e) = tokio::fs::rename(&temp_path, dest).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(write_error(url_str, dest, &e));
        }

        tx.emit(AppEvent::Download(DownloadEvent::Completed {
            url: url_str.to_string(),
            dest: dest.to_path_buf(),
            size,
            hash: hash.clone(),
        }));

        Ok(DownloadResult {
            url: url_str.to_string(),
            path: dest.to_path_buf(),
            size,
            hash,
        })
    }
}

async fn stream_to_file(
    response: reqwest::Response,
    url: &str,
    dest: &Path,
    temp_path: &Path,
) -> Result<(u64, String), Error> {
    let mut file = File::create(temp_path)
        .await
        .map_err(|e| write_error(url, dest, &e))?;

    let mut stream = response.bytes_stream();
    let mut downloaded = 0u64;
    let mut hasher = blake3::Hasher::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| map_transport_error(url, Some(dest), &e))?;

        hasher.update(&chunk);
        file.write_all(&chunk)
            .await
            .map_err(|e| write_error(url, dest, &e))?;
        downloaded += chunk.len() as u64;
    }

    file.flush().await.map_err(|e| write_error(url, dest, &e))?;
    file.sync_all()
        .await
        .map_err(|e| write_error(url, dest, &e))?;
    drop(file);

    Ok((downloaded, hasher.finalize().to_hex().to_string()))
}

/// Sibling path the body is streamed into before the final rename
#[must_use]
pub fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}

fn write_error(url: &str, dest: &Path, error: &std::io::Error) -> Error {
    NetworkError::DownloadFailed {
        url: url.to_string(),
        dest: dest.display().to_string(),
        message: error.to_string(),
    }
    .into()
}
