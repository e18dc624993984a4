use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Build tool invocation events
///
/// Captured process output is never carried here; it only reaches the user
/// through the error returned for a failed build.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BuildEvent {
    Started {
        command: String,
        cwd: Option<PathBuf>,
    },

    Completed {
        command: String,
        duration_ms: u64,
    },

    Failed {
        command: String,
        status: String,
        duration_ms: u64,
    },
}
