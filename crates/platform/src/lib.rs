#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Platform abstraction layer for ghostup.
//!
//! This crate provides a unified interface for:
//! - Process execution with captured output and event emission
//! - Filesystem helpers with path-carrying errors
//!
//! Build steps talk to [`ProcessOperations`] through [`Platform`] so tests can
//! substitute the process layer.

pub mod core;
pub mod fs;
pub mod process;

pub use crate::core::{Platform, PlatformContext};
pub use process::{CommandOutput, HostProcessOperations, PlatformCommand, ProcessOperations};
