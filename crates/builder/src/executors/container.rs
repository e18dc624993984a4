//! Container image build with podman
//!
//! The image compiles the release internally. Only the finished binary is
//! copied out of a throwaway container and installed under the prefix.

use async_trait::async_trait;
use ghostup_config::constants::{APP_NAME, CONTAINER_BINARY_PATH, CONTAINER_IMAGE};
use ghostup_errors::{BuildError, Error};
use ghostup_events::EventEmitter;
use ghostup_platform::{fs, PlatformCommand};
use rand::distr::Alphanumeric;
use rand::Rng;
use std::path::Path;

use super::BuildExecutor;
use crate::{BuildContext, BuildRunner};

/// Builds inside a container image and installs the extracted binary
#[derive(Debug, Clone)]
pub struct ContainerBuild {
    runtime: String,
    runner: BuildRunner,
}

impl ContainerBuild {
    #[must_use]
    pub fn new(runtime: impl Into<String>) -> Self {
        Self {
            runtime: runtime.into(),
            runner: BuildRunner::new(),
        }
    }

    #[must_use]
    pub fn runtime(&self) -> &str {
        &self.runtime
    }

    /// Check that the runtime answers `--version` and the container file exists
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::ContainerfileMissing`] or
    /// [`BuildError::RuntimeUnavailable`].
    pub async fn ensure_available(&self, ctx: &BuildContext) -> Result<(), Error> {
        let mut cmd = ctx.platform.command(&self.runtime);
        cmd.arg("--version");

        let unavailable = |message: String| BuildError::RuntimeUnavailable {
            runtime: self.runtime.clone(),
            message,
        };
        match ctx
            .platform
            .execute_command(&ctx.platform_context(), cmd)
            .await
        {
            Ok(output) if output.success() => {
                ctx.emit_debug(format!(
                    "container runtime: {}",
                    String::from_utf8_lossy(&output.stdout).trim()
                ));
            }
            Ok(output) => return Err(unavailable(output.combined().trim().to_string()).into()),
            Err(e) => return Err(unavailable(e.to_string()).into()),
        }

        if !fs::exists(&ctx.containerfile).await {
            return Err(BuildError::ContainerfileMissing {
                path: ctx.containerfile.display().to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Image tag for the requested release
    #[must_use]
    pub fn image_tag(ctx: &BuildContext) -> String {
        format!("{CONTAINER_IMAGE}:{}", ctx.version)
    }

    /// `podman build [--no-cache] -t <tag> --build-arg .. -f Containerfile .`
    #[must_use]
    pub fn build_command(&self, ctx: &BuildContext) -> PlatformCommand {
        let containerfile = ctx
            .containerfile
            .file_name()
            .map_or_else(
                || ctx.containerfile.display().to_string(),
                |n| n.to_string_lossy().into_owned(),
            );

        let mut cmd = ctx.platform.command(&self.runtime);
        cmd.arg("build");
        if ctx.no_cache {
            cmd.arg("--no-cache");
        }
        let tag = Self::image_tag(ctx);
        let version_arg = format!("GHOSTTY_VERSION={}", ctx.version);
        let toolchain_arg = format!("ZIG_VERSION={}", ctx.toolchain_version);
        cmd.args(["-t", tag.as_str()])
            .args(["--build-arg", version_arg.as_str()])
            .args(["--build-arg", toolchain_arg.as_str()])
            .args(["-f", containerfile.as_str(), "."]);
        if let Some(dir) = ctx.containerfile.parent().filter(|p| !p.as_os_str().is_empty()) {
            cmd.current_dir(dir);
        }
        cmd
    }

    async fn extract_and_install(&self, ctx: &BuildContext, container: &str) -> Result<(), Error> {
        let staging = tempfile::Builder::new()
            .prefix("ghostty-container-")
            .tempdir()
            .map_err(|e| install_failed(&ctx.binary_path, &e))?;
        let extracted = staging.path().join(APP_NAME);

        let mut cp = ctx.platform.command(&self.runtime);
        cp.arg("cp")
            .arg(format!("{container}:{CONTAINER_BINARY_PATH}"))
            .arg(extracted.display().to_string());
        self.runner.run(ctx, cp).await?;

        install_binary(&extracted, &ctx.binary_path).await
    }
}

#[async_trait]
impl BuildExecutor for ContainerBuild {
    fn name(&self) -> &'static str {
        "container"
    }

    async fn build(&self, ctx: &BuildContext) -> Result<(), Error> {
        self.runner.run(ctx, self.build_command(ctx)).await?;

        let name = container_name();
        let mut create = ctx.platform.command(&self.runtime);
        create
            .args(["create", "--name", name.as_str()])
            .arg(Self::image_tag(ctx));
        self.runner.run(ctx, create).await?;

        let result = self.extract_and_install(ctx, &name).await;

        let mut rm = ctx.platform.command(&self.runtime);
        rm.args(["rm", name.as_str()]);
        if let Err(e) = self.runner.run(ctx, rm).await {
            ctx.emit_warning_with_context(
                format!("failed to remove container {name}"),
                e.to_string(),
            );
        }

        result
    }
}

/// `ghostty-extract-` followed by 8 random lowercase alphanumerics
#[must_use]
pub fn container_name() -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("ghostty-extract-{suffix}")
}

/// Copy `src` next to `dest`, mark it 0755 and rename it into place
async fn install_binary(src: &Path, dest: &Path) -> Result<(), Error> {
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| install_failed(dest, &e))?;
    }

    let mut staged = dest.as_os_str().to_os_string();
    staged.push(".new");
    let staged = std::path::PathBuf::from(staged);

    let installed: Result<(), Error> = async {
        tokio::fs::copy(src, &staged)
            .await
            .map_err(|e| install_failed(dest, &e))?;
        fs::set_executable(&staged).await?;
        tokio::fs::rename(&staged, dest)
            .await
            .map_err(|e| install_failed(dest, &e))
    }
    .await;

    if installed.is_err() {
        let _ = tokio::fs::remove_file(&staged).await;
    }
    installed
}

fn install_failed(dest: &Path, error: &std::io::Error) -> Error {
    BuildError::InstallFailed {
        dest: dest.display().to_string(),
        message: error.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_name_shape() {
        let name = container_name();
        let suffix = name.strip_prefix("ghostty-extract-").unwrap();
        assert_eq!(suffix.len(), 8);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_install_binary_sets_mode() {
        let temp = tempfile::tempdir().unwrap();
        let src = temp.path().join("ghostty");
        std::fs::write(&src, b"\x7fELF").unwrap();
        let dest = temp.path().join("prefix").join("bin").join("ghostty");

        install_binary(&src, &dest).await.unwrap();

        assert!(fs::is_executable(&dest).await);
        assert_eq!(std::fs::read(&dest).unwrap(), b"\x7fELF");
    }
}
