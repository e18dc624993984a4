use ghostup_types::IntegrationWarning;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Desktop integration results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum IntegrationEvent {
    LauncherWritten { path: PathBuf },

    ServiceMenuInstalled { path: PathBuf },

    ConfigCreated { path: PathBuf },

    /// An existing config file was left untouched
    ConfigPreserved { path: PathBuf },

    Warning { warning: IntegrationWarning },
}
