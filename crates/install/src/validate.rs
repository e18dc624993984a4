//! Post-build artifact check

use ghostup_errors::{Error, InstallError};
use ghostup_platform::fs;
use std::path::Path;

/// Confirms the build left an executable at the expected path
///
/// The build tool's exit status is never taken as proof of installation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactValidator;

impl ArtifactValidator {
    /// # Errors
    ///
    /// Returns [`InstallError::ArtifactMissing`] if nothing is at `path`, or
    /// [`InstallError::NotExecutable`] if it is not an executable file.
    pub async fn verify(path: &Path) -> Result<(), Error> {
        if !fs::exists(path).await {
            return Err(InstallError::ArtifactMissing {
                path: path.display().to_string(),
            }
            .into());
        }
        if !fs::is_executable(path).await {
            return Err(InstallError::NotExecutable {
                path: path.display().to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    #[tokio::test]
    async fn test_missing_and_plain_files_fail() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("ghostty");

        let err = ArtifactValidator::verify(&path).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Install(InstallError::ArtifactMissing { .. })
        ));

        std::fs::write(&path, b"not yet").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();
        let err = ArtifactValidator::verify(&path).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Install(InstallError::NotExecutable { .. })
        ));

        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        ArtifactValidator::verify(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_directory_is_not_an_artifact() {
        let temp = tempfile::tempdir().unwrap();
        let err = ArtifactValidator::verify(temp.path()).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Install(InstallError::NotExecutable { .. })
        ));
    }
}
