//! Command line smoke tests against the built binary

use std::process::Command;

fn ghostup() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ghostup"));
    cmd.env_remove("RUST_LOG")
        .env_remove("GHOSTUP_VERSION")
        .env_remove("GHOSTUP_ZIG_VERSION");
    cmd
}

#[test]
fn test_version_flag() {
    let output = ghostup().arg("--version").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_lists_install_flags() {
    let output = ghostup().arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in [
        "--container",
        "--zig-version",
        "--no-cache",
        "--pull-always",
        "--skip-build",
    ] {
        assert!(stdout.contains(flag), "missing {flag} in help");
    }
    assert!(!stdout.contains("--skip-signature"));
    assert!(!stdout.contains("--uninstall"));
}

#[test]
fn test_invalid_version_is_rejected() {
    let output = ghostup().arg("1.2/../0").output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_signature_bypass_is_not_offered() {
    let output = ghostup().arg("--skip-signature").output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_invalid_env_version_fails_before_any_work() {
    let temp = tempfile::tempdir().unwrap();
    let output = ghostup()
        .env("GHOSTUP_VERSION", "bad/version")
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .arg("--work-dir")
        .arg(temp.path().join("work"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("GHOSTUP_VERSION"), "{stderr}");
    assert!(!temp.path().join("work").exists());
}
