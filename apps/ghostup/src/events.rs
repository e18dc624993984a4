//! Event handling and status display

use console::{Style, Term};
use ghostup_events::{
    AppEvent, BuildEvent, DownloadEvent, GeneralEvent, IntegrationEvent, PipelineEvent,
};
use ghostup_types::{Stage, StageOutcome};

use crate::logging::log_event_with_tracing;

/// Renders pipeline events as `[INFO]`/`[SUCCESS]`/`[WARNING]`/`[ERROR]` lines
pub struct EventHandler {
    colors_enabled: bool,
    debug_enabled: bool,
    term: Term,
}

impl EventHandler {
    pub fn new(colors_enabled: bool, debug_enabled: bool) -> Self {
        Self {
            colors_enabled,
            debug_enabled,
            term: Term::stderr(),
        }
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, event: AppEvent) {
        log_event_with_tracing(&event);

        match event {
            AppEvent::General(event) => self.handle_general(event),
            AppEvent::Download(event) => self.handle_download(event),
            AppEvent::Pipeline(event) => self.handle_pipeline(event),
            AppEvent::Build(event) => self.handle_build(event),
            AppEvent::Integration(event) => self.handle_integration(event),
        }
    }

    fn handle_general(&self, event: GeneralEvent) {
        match event {
            GeneralEvent::Warning { message, context } => match context {
                Some(context) => self.warning(&format!("{message} ({context})")),
                None => self.warning(&message),
            },
            GeneralEvent::Error { message, details } => {
                self.error(&message);
                if let Some(details) = details {
                    self.detail(&details);
                }
            }
            GeneralEvent::DebugLog { message, .. } => {
                if self.debug_enabled {
                    self.debug(&message);
                }
            }
            GeneralEvent::OperationFailed { .. } => {}
        }
    }

    fn handle_download(&self, event: DownloadEvent) {
        match event {
            DownloadEvent::Started { url, .. } => self.info(&format!("Downloading {url}")),
            DownloadEvent::Completed { dest, size, .. } => {
                if self.debug_enabled {
                    self.debug(&format!("Saved {} ({size} bytes)", dest.display()));
                }
            }
            DownloadEvent::Failed { url, failure } => {
                self.error(&format!("Download of {url} failed: {}", failure.message));
            }
        }
    }

    fn handle_pipeline(&self, event: PipelineEvent) {
        match event {
            PipelineEvent::Started {
                version,
                toolchain_version,
                mode,
            } => self.info(&format!(
                "Installing Ghostty {version} (zig {toolchain_version}, {mode} build)"
            )),
            PipelineEvent::StageStarted { stage } => self.info(stage_intro(stage)),
            PipelineEvent::StageCompleted { stage, outcome } => match outcome {
                StageOutcome::Completed => self.success(&stage.to_string()),
                StageOutcome::AlreadySatisfied => {
                    self.info(&format!("{stage}: already satisfied"));
                }
                StageOutcome::Skipped { reason } => {
                    self.info(&format!("{stage}: skipped ({reason})"));
                }
            },
            PipelineEvent::StageFailed { stage, failure } => {
                self.error(&format!("{stage} failed: {}", failure.message));
            }
            PipelineEvent::SignatureVerified { artifact } => {
                self.success(&format!("Signature verified for {}", artifact.display()));
            }
            PipelineEvent::ArchiveExtracted { dest, .. } => {
                self.info(&format!("Extracted to {}", dest.display()));
            }
            PipelineEvent::Finished { .. } => {}
        }
    }

    fn handle_build(&self, event: BuildEvent) {
        match event {
            BuildEvent::Started { command, .. } => {
                if self.debug_enabled {
                    self.debug(&format!("$ {command}"));
                }
            }
            BuildEvent::Completed {
                command,
                duration_ms,
            } => {
                if self.debug_enabled {
                    self.debug(&format!("{command} finished in {duration_ms} ms"));
                }
            }
            BuildEvent::Failed {
                command, status, ..
            } => self.error(&format!("{command} exited with {status}")),
        }
    }

    fn handle_integration(&self, event: IntegrationEvent) {
        match event {
            IntegrationEvent::LauncherWritten { path } => {
                self.success(&format!("Launcher written to {}", path.display()));
            }
            IntegrationEvent::ServiceMenuInstalled { path } => {
                self.success(&format!("Service menu installed to {}", path.display()));
            }
            IntegrationEvent::ConfigCreated { path } => {
                self.success(&format!("Default config created at {}", path.display()));
            }
            IntegrationEvent::ConfigPreserved { path } => {
                self.info(&format!("Keeping existing config at {}", path.display()));
            }
            IntegrationEvent::Warning { warning } => {
                self.warning(&format!("{}: {}", warning.step, warning.message));
            }
        }
    }

    fn info(&self, message: &str) {
        self.line("[INFO]", Style::new().blue(), message);
    }

    fn success(&self, message: &str) {
        self.line("[SUCCESS]", Style::new().green(), message);
    }

    fn warning(&self, message: &str) {
        self.line("[WARNING]", Style::new().yellow(), message);
    }

    fn error(&self, message: &str) {
        self.line("[ERROR]", Style::new().red().bold(), message);
    }

    fn debug(&self, message: &str) {
        self.line("[DEBUG]", Style::new().dim(), message);
    }

    fn detail(&self, message: &str) {
        for line in message.lines() {
            let _ = self.term.write_line(&format!("  {line}"));
        }
    }

    fn line(&self, prefix: &str, style: Style, message: &str) {
        let prefix = if self.colors_enabled {
            style.force_styling(true).apply_to(prefix).to_string()
        } else {
            prefix.to_string()
        };
        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }
}

fn stage_intro(stage: Stage) -> &'static str {
    match stage {
        Stage::ToolchainReady => "Preparing build toolchain",
        Stage::SourceReady => "Staging release source",
        Stage::Built => "Building",
        Stage::Validated => "Checking installed binary",
        Stage::Integrated => "Setting up desktop integration",
    }
}
