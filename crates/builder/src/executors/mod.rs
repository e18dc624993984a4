//! Build executors
//!
//! Each executor turns a staged source tree into `<prefix>/bin/ghostty`,
//! either with the host toolchain or inside a container image.

use async_trait::async_trait;
use ghostup_errors::Error;

use crate::BuildContext;

mod container;
mod local;

pub use container::{container_name, ContainerBuild};
pub use local::{LocalBuild, OPTIMIZE_FLAG};

/// Trait for build executor implementations
#[async_trait]
pub trait BuildExecutor: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Build and install the binary
    async fn build(&self, ctx: &BuildContext) -> Result<(), Error>;
}
