use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::FailureContext;

/// Download-specific events for the event system
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DownloadEvent {
    /// Response headers received, body transfer starting
    Started {
        url: String,
        dest: PathBuf,
        total_size: Option<u64>,
    },

    /// File written and renamed into its final place
    Completed {
        url: String,
        dest: PathBuf,
        size: u64,
        /// BLAKE3 of the downloaded bytes, hex encoded
        hash: String,
    },

    Failed {
        url: String,
        failure: FailureContext,
    },
}
