use ghostup_types::{BuildMode, Stage, StageOutcome, Version};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::FailureContext;

/// Install pipeline progress
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PipelineEvent {
    Started {
        version: Version,
        toolchain_version: Version,
        mode: BuildMode,
    },

    StageStarted {
        stage: Stage,
    },

    StageCompleted {
        stage: Stage,
        outcome: StageOutcome,
    },

    StageFailed {
        stage: Stage,
        failure: FailureContext,
    },

    /// Release archive matched its detached signature
    SignatureVerified {
        artifact: PathBuf,
    },

    ArchiveExtracted {
        archive: PathBuf,
        dest: PathBuf,
    },

    Finished {
        version: Version,
        binary_path: Option<PathBuf>,
        warnings: usize,
    },
}
