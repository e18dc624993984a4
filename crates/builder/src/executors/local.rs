//! Host toolchain build

use async_trait::async_trait;
use ghostup_config::constants::TOOLCHAIN_BINARY;
use ghostup_errors::Error;
use ghostup_platform::PlatformCommand;

use super::BuildExecutor;
use crate::{BuildContext, BuildRunner};

/// Release-mode optimisation flag passed to every local build
pub const OPTIMIZE_FLAG: &str = "-Doptimize=ReleaseFast";

/// Runs `zig build` from the downloaded toolchain against the staged source
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalBuild {
    runner: BuildRunner,
}

impl LocalBuild {
    #[must_use]
    pub fn new() -> Self {
        Self {
            runner: BuildRunner::new(),
        }
    }

    /// `<toolchain_dir>/zig build -p <prefix> -Doptimize=ReleaseFast`
    #[must_use]
    pub fn command(&self, ctx: &BuildContext) -> PlatformCommand {
        let program = ctx.toolchain_dir.join(TOOLCHAIN_BINARY);
        let prefix = ctx.prefix.display().to_string();

        let mut cmd = ctx.platform.command(&program.display().to_string());
        cmd.args(["build", "-p", prefix.as_str(), OPTIMIZE_FLAG])
            .current_dir(&ctx.source_dir)
            .prepend_path(&ctx.toolchain_dir);
        cmd
    }
}

#[async_trait]
impl BuildExecutor for LocalBuild {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn build(&self, ctx: &BuildContext) -> Result<(), Error> {
        self.runner.run(ctx, self.command(ctx)).await
    }
}
