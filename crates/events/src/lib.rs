#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Event system for async communication in ghostup
//!
//! Library crates never print. Everything a user should see is sent as an
//! [`AppEvent`] over an unbounded channel and rendered by the CLI, which also
//! forwards each event to `tracing`.

pub mod events;
pub use events::{
    AppEvent, BuildEvent, DownloadEvent, FailureContext, GeneralEvent, IntegrationEvent,
    PipelineEvent,
};

use ghostup_errors::UserFacingError;
use ghostup_types::{IntegrationWarning, Stage, StageOutcome};
use std::path::PathBuf;
use tokio::sync::mpsc::UnboundedSender;

/// Type alias for event sender
pub type EventSender = UnboundedSender<AppEvent>;

/// Type alias for event receiver
pub type EventReceiver = tokio::sync::mpsc::UnboundedReceiver<AppEvent>;

/// Create a new event channel
#[must_use]
pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// The unified trait for emitting events throughout ghostup
///
/// Implemented for the raw `EventSender` and for any struct that carries an
/// optional sender.
pub trait EventEmitter {
    /// Get the event sender for this emitter
    fn event_sender(&self) -> Option<&EventSender>;

    /// Emit an event through this emitter
    fn emit(&self, event: AppEvent) {
        if let Some(sender) = self.event_sender() {
            // Ignore send errors - if receiver is dropped, we just continue
            let _ = sender.send(event);
        }
    }

    /// Emit a debug log event
    fn emit_debug(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::debug(message)));
    }

    /// Emit a debug log event with context
    fn emit_debug_with_context(
        &self,
        message: impl Into<String>,
        context: std::collections::HashMap<String, String>,
    ) {
        self.emit(AppEvent::General(GeneralEvent::debug_with_context(
            message, context,
        )));
    }

    /// Emit a warning event
    fn emit_warning(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::warning(message)));
    }

    /// Emit a warning event with context
    fn emit_warning_with_context(&self, message: impl Into<String>, context: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::warning_with_context(
            message, context,
        )));
    }

    /// Emit an error event with details
    fn emit_error_with_details(&self, message: impl Into<String>, details: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::error_with_details(
            message, details,
        )));
    }

    /// Emit an operation failed event
    fn emit_operation_failed(&self, operation: impl Into<String>, error: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::OperationFailed {
            operation: operation.into(),
            error: error.into(),
        }));
    }

    /// Emit a stage started event
    fn emit_stage_started(&self, stage: Stage) {
        self.emit(AppEvent::Pipeline(PipelineEvent::StageStarted { stage }));
    }

    /// Emit a stage completed event
    fn emit_stage_completed(&self, stage: Stage, outcome: StageOutcome) {
        self.emit(AppEvent::Pipeline(PipelineEvent::StageCompleted {
            stage,
            outcome,
        }));
    }

    /// Emit a stage failed event
    fn emit_stage_failed<E: UserFacingError + ?Sized>(&self, stage: Stage, error: &E) {
        self.emit(AppEvent::Pipeline(PipelineEvent::StageFailed {
            stage,
            failure: FailureContext::from_error(error),
        }));
    }

    /// Emit a download failed event
    fn emit_download_failed<E: UserFacingError + ?Sized>(&self, url: impl Into<String>, error: &E) {
        self.emit(AppEvent::Download(DownloadEvent::Failed {
            url: url.into(),
            failure: FailureContext::from_error(error),
        }));
    }

    /// Emit an archive extracted event
    fn emit_archive_extracted(&self, archive: PathBuf, dest: PathBuf) {
        self.emit(AppEvent::Pipeline(PipelineEvent::ArchiveExtracted {
            archive,
            dest,
        }));
    }

    /// Emit an integration warning
    fn emit_integration_warning(&self, warning: IntegrationWarning) {
        self.emit(AppEvent::Integration(IntegrationEvent::Warning { warning }));
    }
}

impl EventEmitter for EventSender {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(self)
    }
}

impl EventEmitter for Option<EventSender> {
    fn event_sender(&self) -> Option<&EventSender> {
        self.as_ref()
    }
}
