//! Build context shared by the executors

use ghostup_config::InstallLayout;
use ghostup_events::{EventEmitter, EventSender};
use ghostup_platform::{Platform, PlatformContext};
use ghostup_types::Version;
use std::path::PathBuf;

/// Everything an executor needs to produce the installed binary
#[derive(Clone, Debug)]
pub struct BuildContext {
    /// Staged source tree, used as the build's working directory
    pub source_dir: PathBuf,
    /// Install prefix handed to the build tool
    pub prefix: PathBuf,
    /// Directory holding the toolchain binary
    pub toolchain_dir: PathBuf,
    /// Where the finished binary must end up
    pub binary_path: PathBuf,
    /// Container recipe for container builds
    pub containerfile: PathBuf,
    pub version: Version,
    pub toolchain_version: Version,
    /// Disable the container image cache
    pub no_cache: bool,
    pub platform: Platform,
    event_sender: Option<EventSender>,
}

impl BuildContext {
    /// Create a build context from the resolved layout
    #[must_use]
    pub fn new(layout: &InstallLayout, version: Version, toolchain_version: Version) -> Self {
        Self {
            source_dir: layout.staged_source_dir(&version),
            prefix: layout.prefix.clone(),
            toolchain_dir: layout.toolchain_dir.clone(),
            binary_path: layout.binary_path(),
            containerfile: layout.containerfile.clone(),
            version,
            toolchain_version,
            no_cache: false,
            platform: Platform::current(),
            event_sender: None,
        }
    }

    #[must_use]
    pub fn with_no_cache(mut self, no_cache: bool) -> Self {
        self.no_cache = no_cache;
        self
    }

    /// Replace the process layer
    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    #[must_use]
    pub fn with_event_sender(mut self, event_sender: EventSender) -> Self {
        self.event_sender = Some(event_sender);
        self
    }

    /// Platform context carrying this build's event sender
    #[must_use]
    pub fn platform_context(&self) -> PlatformContext {
        self.platform.create_context(self.event_sender.clone())
    }
}

impl EventEmitter for BuildContext {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}
