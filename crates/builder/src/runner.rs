//! Quiet-on-success command execution

use ghostup_errors::{BuildError, Error};
use ghostup_events::{AppEvent, BuildEvent, EventEmitter};
use ghostup_platform::{CommandOutput, PlatformCommand};
use std::time::Instant;

use crate::BuildContext;

/// Runs external build commands with fully buffered output
///
/// Output of a successful command is dropped. A non-zero exit turns the
/// whole captured output into a [`BuildError::Failed`].
#[derive(Debug, Default, Clone, Copy)]
pub struct BuildRunner;

impl BuildRunner {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Run `cmd` to completion
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::SpawnFailed`] if the program cannot be launched
    /// and [`BuildError::Failed`] if it exits unsuccessfully.
    pub async fn run(&self, ctx: &BuildContext, cmd: PlatformCommand) -> Result<(), Error> {
        self.run_capture(ctx, cmd).await.map(|_| ())
    }

    /// Run `cmd` and return its output on success
    ///
    /// # Errors
    ///
    /// Same as [`BuildRunner::run`].
    pub async fn run_capture(
        &self,
        ctx: &BuildContext,
        cmd: PlatformCommand,
    ) -> Result<CommandOutput, Error> {
        let command = cmd.display();
        let start = Instant::now();

        ctx.emit(AppEvent::Build(BuildEvent::Started {
            command: command.clone(),
            cwd: cmd.get_current_dir().cloned(),
        }));

        let output = ctx
            .platform
            .execute_command(&ctx.platform_context(), cmd)
            .await
            .map_err(|e| BuildError::SpawnFailed {
                command: command.clone(),
                message: e.to_string(),
            })?;

        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        if output.success() {
            ctx.emit(AppEvent::Build(BuildEvent::Completed {
                command,
                duration_ms,
            }));
            return Ok(output);
        }

        let status = output.status.to_string();
        ctx.emit(AppEvent::Build(BuildEvent::Failed {
            command: command.clone(),
            status: status.clone(),
            duration_ms,
        }));

        Err(BuildError::Failed {
            command,
            status,
            output: output.combined(),
        }
        .into())
    }
}
