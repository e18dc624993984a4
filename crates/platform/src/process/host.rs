//! Host process operations backed by `tokio::process`

use async_trait::async_trait;
use ghostup_errors::{Error, PlatformError};
use ghostup_events::EventEmitter;
use std::collections::HashMap;
use std::time::Instant;
use tokio::process::Command;

use crate::core::PlatformContext;
use crate::process::{CommandOutput, PlatformCommand, ProcessOperations};

/// Runs commands directly on the host
#[derive(Debug, Default, Clone, Copy)]
pub struct HostProcessOperations;

impl HostProcessOperations {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn command_context(cmd: &PlatformCommand) -> HashMap<String, String> {
    let mut context = HashMap::new();
    context.insert("command".to_string(), cmd.display());
    if let Some(dir) = cmd.get_current_dir() {
        context.insert("cwd".to_string(), dir.display().to_string());
    }
    context
}

#[async_trait]
impl ProcessOperations for HostProcessOperations {
    async fn execute_command(
        &self,
        ctx: &PlatformContext,
        cmd: PlatformCommand,
    ) -> Result<CommandOutput, Error> {
        let start = Instant::now();
        ctx.emit_debug_with_context("process started", command_context(&cmd));

        let mut command = Command::new(cmd.program());
        command.args(cmd.get_args());
        if let Some(dir) = cmd.get_current_dir() {
            command.current_dir(dir);
        }
        for (key, value) in cmd.get_env_vars() {
            command.env(key, value);
        }

        let result = match command.output().await {
            Ok(output) => Ok(CommandOutput {
                status: output.status,
                stdout: output.stdout,
                stderr: output.stderr,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(PlatformError::CommandNotFound {
                    command: cmd.program().to_string(),
                })
            }
            Err(e) => Err(PlatformError::ProcessExecutionFailed {
                command: cmd.display(),
                message: e.to_string(),
            }),
        };

        match &result {
            Ok(output) => {
                let mut context = command_context(&cmd);
                context.insert("status".to_string(), output.status.to_string());
                context.insert(
                    "duration_ms".to_string(),
                    start.elapsed().as_millis().to_string(),
                );
                ctx.emit_debug_with_context("process exited", context);
            }
            Err(e) => ctx.emit_operation_failed(cmd.display(), e.to_string()),
        }

        result.map_err(Error::from)
    }
}
