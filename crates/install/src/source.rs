//! Release source staging
//!
//! Downloads the signed release tarball, checks it against the trusted key
//! and unpacks it into `<work_dir>/ghostty-<version>`. Nothing is extracted
//! before the signature verified.

use ghostup_config::InstallLayout;
use ghostup_errors::{Error, UserFacingError};
use ghostup_events::{AppEvent, EventEmitter, EventSender, PipelineEvent};
use ghostup_net::{download_file, join_url, NetClient};
use ghostup_platform::fs;
use ghostup_signing::Verifier;
use ghostup_types::{StageOutcome, Version};
use std::path::Path;
use std::sync::Arc;

use crate::archive::extract_archive;

/// Ensures the verified source tree for a release is present
#[derive(Clone)]
pub struct SourceStager {
    client: NetClient,
    base_url: String,
    layout: InstallLayout,
    verifier: Arc<dyn Verifier>,
}

impl std::fmt::Debug for SourceStager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceStager")
            .field("base_url", &self.base_url)
            .field("work_dir", &self.layout.work_dir)
            .finish_non_exhaustive()
    }
}

impl SourceStager {
    #[must_use]
    pub fn new(
        client: NetClient,
        base_url: impl Into<String>,
        layout: InstallLayout,
        verifier: Arc<dyn Verifier>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            layout,
            verifier,
        }
    }

    /// `{base}/{version}/ghostty-{version}.tar.gz` and its `.minisig`
    ///
    /// # Errors
    ///
    /// Returns an error if the configured base URL does not form a valid URL.
    pub fn release_urls(&self, version: &Version) -> Result<(String, String), Error> {
        let archive = file_name(&self.layout.release_archive_path(version));
        let signature = file_name(&self.layout.release_signature_path(version));
        Ok((
            join_url(&self.base_url, &[version.as_str(), archive.as_str()])?,
            join_url(&self.base_url, &[version.as_str(), signature.as_str()])?,
        ))
    }

    /// Staged means the directory exists with at least one entry in it
    pub async fn is_staged(&self, version: &Version) -> bool {
        let Ok(mut entries) = tokio::fs::read_dir(self.layout.staged_source_dir(version)).await
        else {
            return false;
        };
        matches!(entries.next_entry().await, Ok(Some(_)))
    }

    /// Remove the staged tree so the next `ensure` fetches it again
    ///
    /// # Errors
    ///
    /// Returns an error if the tree exists but cannot be removed.
    pub async fn reset(&self, version: &Version) -> Result<(), Error> {
        fs::remove_dir_all(&self.layout.staged_source_dir(version)).await
    }

    /// Download, verify and extract unless the release is already staged
    ///
    /// # Errors
    ///
    /// Returns network, signing or extraction failures. A signing failure
    /// leaves no staged directory behind.
    pub async fn ensure(&self, version: &Version, tx: &EventSender) -> Result<StageOutcome, Error> {
        let staged = self.layout.staged_source_dir(version);
        if self.is_staged(version).await {
            tx.emit_debug(format!("source already staged at {}", staged.display()));
            return Ok(StageOutcome::AlreadySatisfied);
        }

        let (archive_url, signature_url) = self.release_urls(version)?;
        let archive = self.layout.release_archive_path(version);
        let signature = self.layout.release_signature_path(version);

        fs::create_dir_all(&self.layout.work_dir).await?;
        download_file(&self.client, &archive_url, &archive, tx).await?;
        download_file(&self.client, &signature_url, &signature, tx).await?;

        if let Err(err) = self.verify(&archive, &signature).await {
            tx.emit_error_with_details(
                format!("{} failed signature verification", archive.display()),
                err.user_message(),
            );
            remove_downloads(&archive, &signature).await;
            return Err(err);
        }
        tx.emit(AppEvent::Pipeline(PipelineEvent::SignatureVerified {
            artifact: archive.clone(),
        }));

        let extracted = extract_archive(&archive, &staged).await;
        remove_downloads(&archive, &signature).await;
        extracted?;
        tx.emit_archive_extracted(archive, staged);

        Ok(StageOutcome::Completed)
    }

    async fn verify(&self, archive: &Path, signature: &Path) -> Result<(), Error> {
        let verifier = Arc::clone(&self.verifier);
        let archive = archive.to_path_buf();
        let signature = signature.to_path_buf();

        tokio::task::spawn_blocking(move || verifier.verify_file(&archive, &signature))
            .await
            .map_err(|e| Error::internal(format!("verification task failed: {e}")))?
            .map_err(Into::into)
    }
}

async fn remove_downloads(archive: &Path, signature: &Path) {
    // Best effort; a leftover download is replaced by the next fetch
    let _ = fs::remove_file(archive).await;
    let _ = fs::remove_file(signature).await;
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghostup_signing::MinisignVerifier;

    fn stager(root: &Path) -> SourceStager {
        SourceStager::new(
            NetClient::with_defaults().unwrap(),
            "https://release.files.ghostty.org/",
            InstallLayout::rooted_at(root),
            Arc::new(MinisignVerifier::release()),
        )
    }

    #[test]
    fn test_release_urls() {
        let stager = stager(Path::new("/r"));
        let (archive, signature) = stager
            .release_urls(&Version::parse("1.2.0").unwrap())
            .unwrap();
        assert_eq!(
            archive,
            "https://release.files.ghostty.org/1.2.0/ghostty-1.2.0.tar.gz"
        );
        assert_eq!(
            signature,
            "https://release.files.ghostty.org/1.2.0/ghostty-1.2.0.tar.gz.minisig"
        );
    }

    #[tokio::test]
    async fn test_empty_directory_is_not_staged() {
        let temp = tempfile::tempdir().unwrap();
        let stager = stager(temp.path());
        let version = Version::parse("1.2.0").unwrap();
        let dir = temp.path().join("work").join("ghostty-1.2.0");

        assert!(!stager.is_staged(&version).await);
        std::fs::create_dir_all(&dir).unwrap();
        assert!(!stager.is_staged(&version).await);
        std::fs::write(dir.join("build.zig"), "").unwrap();
        assert!(stager.is_staged(&version).await);

        stager.reset(&version).await.unwrap();
        assert!(!dir.exists());
    }
}
