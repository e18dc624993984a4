//! Inputs for one pipeline run

use ghostup_config::constants::{CONTAINER_RUNTIME, RELEASE_BASE_URL, TOOLCHAIN_BASE_URL};
use ghostup_config::{Config, InstallLayout};
use ghostup_errors::Error;
use ghostup_events::{EventEmitter, EventSender};
use ghostup_net::{NetClient, NetConfig};
use ghostup_platform::Platform;
use ghostup_signing::{MinisignVerifier, Verifier};
use ghostup_types::{BuildMode, Version};
use std::sync::Arc;

/// Immutable description of what to install, where, and how
#[derive(Clone)]
pub struct InstallContext {
    pub layout: InstallLayout,
    pub version: Version,
    pub toolchain_version: Version,
    pub mode: BuildMode,
    /// Passed to the container image build
    pub no_cache: bool,
    /// Drop the toolchain and staged source before ensuring them
    pub pull_always: bool,
    /// Stop once the source is staged
    pub skip_build: bool,
    pub release_base_url: String,
    pub toolchain_base_url: String,
    pub container_runtime: String,
    pub net: NetClient,
    pub verifier: Arc<dyn Verifier>,
    pub platform: Platform,
    event_sender: Option<EventSender>,
}

context_builder! {
    InstallContext {
        mode: BuildMode,
        no_cache: bool,
        pull_always: bool,
        skip_build: bool,
        release_base_url: String,
        toolchain_base_url: String,
        container_runtime: String,
        verifier: Arc<dyn Verifier>,
        platform: Platform,
    }
}

impl InstallContext {
    /// Local build against the upstream hosts, verified with the release key
    #[must_use]
    pub fn new(
        layout: InstallLayout,
        version: Version,
        toolchain_version: Version,
        net: NetClient,
    ) -> Self {
        Self {
            layout,
            version,
            toolchain_version,
            mode: BuildMode::Local,
            no_cache: false,
            pull_always: false,
            skip_build: false,
            release_base_url: RELEASE_BASE_URL.to_string(),
            toolchain_base_url: TOOLCHAIN_BASE_URL.to_string(),
            container_runtime: CONTAINER_RUNTIME.to_string(),
            net,
            verifier: Arc::new(MinisignVerifier::release()),
            platform: Platform::current(),
            event_sender: None,
        }
    }

    /// Context for the versions, sources and network settings in `config`
    ///
    /// # Errors
    ///
    /// Returns an error if a configured version is invalid or the HTTP
    /// client cannot be created.
    pub fn from_config(config: &Config, layout: InstallLayout) -> Result<Self, Error> {
        let net = NetClient::new(NetConfig::from(&config.network))?;
        Ok(Self::new(
            layout,
            config.release_version()?,
            config.toolchain_version()?,
            net,
        )
        .with_release_base_url(config.sources.release_base_url.clone())
        .with_toolchain_base_url(config.sources.toolchain_base_url.clone())
        .with_container_runtime(config.container.runtime.clone()))
    }
}

impl EventEmitter for InstallContext {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}

impl std::fmt::Debug for InstallContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallContext")
            .field("version", &self.version)
            .field("toolchain_version", &self.toolchain_version)
            .field("mode", &self.mode)
            .field("no_cache", &self.no_cache)
            .field("pull_always", &self.pull_always)
            .field("skip_build", &self.skip_build)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_from_config_carries_sources() {
        let mut config = Config::default();
        config.sources.release_base_url = "http://127.0.0.1:9/releases".to_string();
        config.install.zig_version = "0.13.0".to_string();

        let ctx = InstallContext::from_config(&config, InstallLayout::rooted_at(Path::new("/r")))
            .unwrap()
            .with_mode(BuildMode::Container)
            .with_skip_build(true);

        assert_eq!(ctx.release_base_url, "http://127.0.0.1:9/releases");
        assert_eq!(ctx.toolchain_base_url, TOOLCHAIN_BASE_URL);
        assert_eq!(ctx.toolchain_version.as_str(), "0.13.0");
        assert_eq!(ctx.mode, BuildMode::Container);
        assert!(ctx.skip_build);
        assert!(ctx.event_sender().is_none());
    }
}
