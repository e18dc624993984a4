#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Build execution for ghostup
//!
//! Runs the external build tool against a staged source tree, either with
//! the host toolchain ([`LocalBuild`]) or inside a container image
//! ([`ContainerBuild`]). All process output is buffered by [`BuildRunner`]
//! and only surfaces through the error of a failed command.

mod context;
mod executors;
mod runner;

pub use context::BuildContext;
pub use executors::{container_name, BuildExecutor, ContainerBuild, LocalBuild, OPTIMIZE_FLAG};
pub use runner::BuildRunner;
