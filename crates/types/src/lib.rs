#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for ghostup
//!
//! This crate provides the small vocabulary shared by every other crate:
//! release identifiers, pipeline stages and the run report.

pub mod reports;
pub mod version;

pub use reports::{IntegrationStep, IntegrationWarning, InstallReport, StageOutcome, StageRecord};
pub use version::Version;

use serde::{Deserialize, Serialize};

/// Install pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    ToolchainReady,
    SourceReady,
    Built,
    Validated,
    Integrated,
}

impl Stage {
    /// All stages in the order the pipeline runs them
    pub const ALL: [Stage; 5] = [
        Stage::ToolchainReady,
        Stage::SourceReady,
        Stage::Built,
        Stage::Validated,
        Stage::Integrated,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ToolchainReady => "toolchain-ready",
            Self::SourceReady => "source-ready",
            Self::Built => "built",
            Self::Validated => "validated",
            Self::Integrated => "integrated",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the build tool runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Downloaded toolchain on the host
    Local,
    /// Inside a container image built from the local Containerfile
    Container,
}

impl std::fmt::Display for BuildMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Container => write!(f, "container"),
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    Always,
    Auto,
    Never,
}

// Implement clap::ValueEnum for ColorChoice
impl clap::ValueEnum for ColorChoice {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Always, Self::Auto, Self::Never]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::Always => clap::builder::PossibleValue::new("always"),
            Self::Auto => clap::builder::PossibleValue::new("auto"),
            Self::Never => clap::builder::PossibleValue::new("never"),
        })
    }
}

impl Default for ColorChoice {
    fn default() -> Self {
        Self::Auto
    }
}
