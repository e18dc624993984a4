//! Report type definitions for pipeline runs

use crate::{BuildMode, Stage, Version};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How a stage ended in a successful run
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StageOutcome {
    /// The stage performed its side effect
    Completed,
    /// The idempotence gate found the work already done
    AlreadySatisfied,
    /// The stage was not run
    Skipped { reason: String },
}

impl StageOutcome {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed => "done",
            Self::AlreadySatisfied => "cached",
            Self::Skipped { .. } => "skipped",
        }
    }
}

/// One row of the stage summary
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StageRecord {
    pub stage: Stage,
    pub outcome: StageOutcome,
    pub duration_ms: u64,
}

/// Which desktop integration step produced a warning
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationStep {
    Launcher,
    ServiceMenu,
    DefaultConfig,
}

impl std::fmt::Display for IntegrationStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Launcher => write!(f, "launcher entry"),
            Self::ServiceMenu => write!(f, "file manager service menu"),
            Self::DefaultConfig => write!(f, "default configuration"),
        }
    }
}

/// Non-fatal desktop integration failure
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IntegrationWarning {
    pub step: IntegrationStep,
    pub message: String,
}

/// Installation report
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InstallReport {
    /// Release that was installed (or staged)
    pub version: Version,
    /// Toolchain version used for the build
    pub toolchain_version: Version,
    pub mode: BuildMode,
    /// Per-stage results in execution order
    pub stages: Vec<StageRecord>,
    /// Installed binary, when the run got past validation
    pub binary_path: Option<PathBuf>,
    pub warnings: Vec<IntegrationWarning>,
    /// Total execution time
    pub duration_ms: u64,
}

impl InstallReport {
    /// Outcome recorded for `stage`, if it was reached
    #[must_use]
    pub fn outcome(&self, stage: Stage) -> Option<&StageOutcome> {
        self.stages
            .iter()
            .find(|record| record.stage == stage)
            .map(|record| &record.outcome)
    }
}
