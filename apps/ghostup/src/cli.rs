//! Command line interface definition

use clap::Parser;
use ghostup_types::{ColorChoice, Version};
use std::path::PathBuf;

/// ghostup - build and install Ghostty from a signed source release
#[derive(Parser, Debug)]
#[command(name = "ghostup")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build and install Ghostty from a signed source release")]
#[command(long_about = None)]
pub struct Cli {
    /// Release to install (defaults to the pinned release)
    #[arg(id = "release_version", value_name = "VERSION", value_parser = parse_version)]
    pub version: Option<Version>,

    #[command(flatten)]
    pub install: InstallArgs,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options that shape the install run
#[derive(Parser, Debug)]
pub struct InstallArgs {
    /// Build inside a container image instead of with a downloaded toolchain
    #[arg(long)]
    pub container: bool,

    /// Toolchain version to build with
    #[arg(long, value_name = "VERSION", value_parser = parse_version)]
    pub zig_version: Option<Version>,

    /// Disable the container image cache (container builds only)
    #[arg(long)]
    pub no_cache: bool,

    /// Re-download the toolchain and release even if already present
    #[arg(long)]
    pub pull_always: bool,

    /// Stop after the source is downloaded, verified and unpacked
    #[arg(long)]
    pub skip_build: bool,

    /// Install prefix (binary lands in <PREFIX>/bin)
    #[arg(long, value_name = "PATH")]
    pub prefix: Option<PathBuf>,

    /// Directory for downloads, the toolchain and staged sources
    #[arg(long, value_name = "PATH")]
    pub work_dir: Option<PathBuf>,
}

/// Global arguments
#[derive(Parser, Debug)]
pub struct GlobalArgs {
    /// Print the install report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging to the state directory
    #[arg(long)]
    pub debug: bool,

    /// Color output control
    #[arg(long, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

fn parse_version(value: &str) -> Result<Version, String> {
    Version::parse(value).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_parse() {
        let cli = Cli::try_parse_from([
            "ghostup",
            "1.1.3",
            "--container",
            "--no-cache",
            "--zig-version",
            "0.13.0",
            "--prefix",
            "/opt/ghostty",
        ])
        .unwrap();

        assert_eq!(cli.version.unwrap().as_str(), "1.1.3");
        assert!(cli.install.container);
        assert!(cli.install.no_cache);
        assert_eq!(cli.install.zig_version.unwrap().as_str(), "0.13.0");
        assert_eq!(cli.install.prefix, Some(PathBuf::from("/opt/ghostty")));
    }

    #[test]
    fn test_path_separator_in_version_is_rejected() {
        assert!(Cli::try_parse_from(["ghostup", "../1.2.0"]).is_err());
        assert!(Cli::try_parse_from(["ghostup", "--skip-signature"]).is_err());
    }
}
