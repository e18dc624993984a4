#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Install pipeline for ghostup
//!
//! This crate turns "nothing installed" into a validated binary under the
//! install prefix with desktop integration in place:
//!
//! 1. `ToolchainReady` fetches and unpacks the compiler, or checks the
//!    container runtime in container mode
//! 2. `SourceReady` downloads, verifies and unpacks the signed release
//! 3. `Built` runs the build tool
//! 4. `Validated` checks the installed binary on disk
//! 5. `Integrated` writes launcher, service menu and default config
//!
//! State lives only on the filesystem. Every run re-probes it, and a run
//! holds an exclusive lock on the work directory.

#[macro_use]
mod macros;

mod archive;
mod context;
mod desktop;
mod lock;
mod pipeline;
mod source;
mod toolchain;
mod validate;

pub use archive::{extract_archive, ArchiveFormat};
pub use context::InstallContext;
pub use desktop::DesktopIntegrator;
pub use lock::InstallLock;
pub use pipeline::{InstallPipeline, PipelineFailure};
pub use source::SourceStager;
pub use toolchain::ToolchainManager;
pub use validate::ArtifactValidator;
