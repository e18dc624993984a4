//! Integration tests for builder crate

#[cfg(all(test, unix))]
mod tests {
    use async_trait::async_trait;
    use ghostup_builder::*;
    use ghostup_config::InstallLayout;
    use ghostup_errors::{BuildError, Error};
    use ghostup_events::{channel, AppEvent, BuildEvent};
    use ghostup_platform::{
        CommandOutput, Platform, PlatformCommand, PlatformContext, ProcessOperations,
    };
    use ghostup_types::Version;
    use std::os::unix::fs::PermissionsExt;
    use std::os::unix::process::ExitStatusExt;
    use std::path::Path;
    use std::process::ExitStatus;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    fn context(root: &Path) -> BuildContext {
        let layout = InstallLayout::rooted_at(root);
        BuildContext::new(
            &layout,
            Version::parse("1.2.0").unwrap(),
            Version::parse("0.14.1").unwrap(),
        )
    }

    fn write_script(path: &Path, body: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// Records every command and answers like a well-behaved podman
    #[derive(Default)]
    struct FakePodman {
        calls: Mutex<Vec<Vec<String>>>,
        fail_on: Option<&'static str>,
    }

    impl FakePodman {
        fn subcommands(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|c| c.first().cloned().unwrap_or_default())
                .collect()
        }
    }

    #[async_trait]
    impl ProcessOperations for FakePodman {
        async fn execute_command(
            &self,
            _ctx: &PlatformContext,
            cmd: PlatformCommand,
        ) -> Result<CommandOutput, Error> {
            let args = cmd.get_args().to_vec();
            self.calls.lock().unwrap().push(args.clone());

            let sub = args.first().map(String::as_str).unwrap_or_default();
            if self.fail_on == Some(sub) {
                return Ok(CommandOutput {
                    status: ExitStatus::from_raw(125 << 8),
                    stdout: Vec::new(),
                    stderr: format!("{sub} exploded").into_bytes(),
                });
            }
            if sub == "cp" {
                std::fs::write(&args[2], b"binary").unwrap();
            }
            Ok(CommandOutput {
                status: ExitStatus::from_raw(0),
                stdout: b"podman version 5.0.0\n".to_vec(),
                stderr: Vec::new(),
            })
        }
    }

    #[test]
    fn test_local_command_shape() {
        let temp = tempdir().unwrap();
        let ctx = context(temp.path());
        let cmd = LocalBuild::new().command(&ctx);

        assert!(cmd.program().ends_with("work/compiler/zig"));
        assert_eq!(
            cmd.get_args(),
            [
                "build".to_string(),
                "-p".to_string(),
                temp.path().join("prefix").display().to_string(),
                OPTIMIZE_FLAG.to_string(),
            ]
        );
        assert_eq!(cmd.get_current_dir(), Some(&ctx.source_dir));
        assert!(cmd.get_env_vars().iter().any(|(k, _)| k == "PATH"));
    }

    #[tokio::test]
    async fn test_successful_build_output_is_suppressed() {
        let temp = tempdir().unwrap();
        let (tx, mut rx) = channel();
        let ctx = context(temp.path()).with_event_sender(tx);
        std::fs::create_dir_all(&ctx.source_dir).unwrap();
        write_script(
            &ctx.toolchain_dir.join("zig"),
            "echo SECRET-STDOUT; echo SECRET-STDERR >&2; mkdir -p \"$3/bin\"; touch \"$3/bin/ghostty\"",
        );

        LocalBuild::new().build(&ctx).await.unwrap();
        assert!(ctx.binary_path.exists());

        while let Ok(event) = rx.try_recv() {
            let rendered = format!("{event:?}");
            assert!(!rendered.contains("SECRET"), "leaked output: {rendered}");
        }
    }

    #[tokio::test]
    async fn test_failing_build_surfaces_all_output() {
        let temp = tempdir().unwrap();
        let (tx, mut rx) = channel();
        let ctx = context(temp.path()).with_event_sender(tx);
        std::fs::create_dir_all(&ctx.source_dir).unwrap();
        write_script(
            &ctx.toolchain_dir.join("zig"),
            "echo compiling; echo 'error: linker failed' >&2; exit 2",
        );

        let err = LocalBuild::new().build(&ctx).await.unwrap_err();
        match err {
            Error::Build(BuildError::Failed { output, status, .. }) => {
                assert!(output.contains("compiling"));
                assert!(output.contains("error: linker failed"));
                assert!(status.contains('2'));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let mut saw_failed = false;
        while let Ok(event) = rx.try_recv() {
            if let AppEvent::Build(BuildEvent::Failed { .. }) = &event {
                saw_failed = true;
            }
            assert!(!format!("{event:?}").contains("linker failed"));
        }
        assert!(saw_failed);
    }

    #[tokio::test]
    async fn test_missing_toolchain_is_spawn_failure() {
        let temp = tempdir().unwrap();
        let ctx = context(temp.path());
        std::fs::create_dir_all(&ctx.source_dir).unwrap();

        let err = LocalBuild::new().build(&ctx).await.unwrap_err();
        assert!(matches!(err, Error::Build(BuildError::SpawnFailed { .. })));
    }

    #[tokio::test]
    async fn test_container_build_sequence_and_install() {
        let temp = tempdir().unwrap();
        let fake = Arc::new(FakePodman::default());
        let ctx = context(temp.path())
            .with_platform(Platform::new(fake.clone()))
            .with_no_cache(true);

        let executor = ContainerBuild::new("podman");
        executor.build(&ctx).await.unwrap();

        assert_eq!(fake.subcommands(), ["build", "create", "cp", "rm"]);
        let calls = fake.calls.lock().unwrap().clone();
        assert_eq!(calls[0][1], "--no-cache");
        assert!(calls[0].contains(&"ghostty-builder:1.2.0".to_string()));
        assert!(calls[0].contains(&"GHOSTTY_VERSION=1.2.0".to_string()));
        assert!(calls[0].contains(&"ZIG_VERSION=0.14.1".to_string()));
        assert!(calls[2][1].ends_with(":/build/output/bin/ghostty"));
        assert_eq!(calls[1][2], calls[3][1]);

        let mode = std::fs::metadata(&ctx.binary_path)
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[tokio::test]
    async fn test_container_removed_when_copy_fails() {
        let temp = tempdir().unwrap();
        let fake = Arc::new(FakePodman {
            fail_on: Some("cp"),
            ..FakePodman::default()
        });
        let ctx = context(temp.path()).with_platform(Platform::new(fake.clone()));

        let err = ContainerBuild::new("podman").build(&ctx).await.unwrap_err();
        assert!(matches!(err, Error::Build(BuildError::Failed { .. })));
        assert_eq!(fake.subcommands(), ["build", "create", "cp", "rm"]);
        assert!(!ctx.binary_path.exists());
    }

    #[tokio::test]
    async fn test_image_build_failure_stops_early() {
        let temp = tempdir().unwrap();
        let fake = Arc::new(FakePodman {
            fail_on: Some("build"),
            ..FakePodman::default()
        });
        let ctx = context(temp.path()).with_platform(Platform::new(fake.clone()));

        let err = ContainerBuild::new("podman").build(&ctx).await.unwrap_err();
        match err {
            Error::Build(BuildError::Failed { output, .. }) => {
                assert!(output.contains("build exploded"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(fake.subcommands(), ["build"]);
    }

    #[tokio::test]
    async fn test_ensure_available_requires_containerfile() {
        let temp = tempdir().unwrap();
        let fake = Arc::new(FakePodman::default());
        let ctx = context(temp.path()).with_platform(Platform::new(fake));
        let executor = ContainerBuild::new("podman");

        let err = executor.ensure_available(&ctx).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Build(BuildError::ContainerfileMissing { .. })
        ));

        std::fs::write(&ctx.containerfile, "FROM scratch\n").unwrap();
        executor.ensure_available(&ctx).await.unwrap();
    }

    #[tokio::test]
    async fn test_ensure_available_reports_missing_runtime() {
        let temp = tempdir().unwrap();
        let ctx = context(temp.path());
        std::fs::write(&ctx.containerfile, "FROM scratch\n").unwrap();

        let err = ContainerBuild::new("ghostup-no-such-runtime")
            .ensure_available(&ctx)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Build(BuildError::RuntimeUnavailable { .. })
        ));
    }
}
