//! Integration tests for platform crate

#[cfg(all(test, unix))]
mod tests {
    use ghostup_errors::{Error, PlatformError};
    use ghostup_events::{channel, AppEvent, GeneralEvent};
    use ghostup_platform::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_execute_captures_output() {
        let platform = Platform::current();
        let ctx = platform.create_context(None);

        let mut cmd = platform.command("sh");
        cmd.args(["-c", "echo out; echo err >&2; exit 3"]);
        let output = platform.execute_command(&ctx, cmd).await.unwrap();

        assert!(!output.success());
        assert_eq!(output.status.code(), Some(3));
        let combined = output.combined();
        assert!(combined.contains("out"));
        assert!(combined.contains("err"));
    }

    #[tokio::test]
    async fn test_execute_honours_cwd_and_path() {
        let temp = tempdir().unwrap();
        let bin = temp.path().join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        let tool = bin.join("fake-tool");
        std::fs::write(&tool, "#!/bin/sh\necho \"tool in $(pwd)\"\n").unwrap();
        fs::set_executable(&tool).await.unwrap();

        let platform = Platform::current();
        let ctx = platform.create_context(None);
        let mut cmd = platform.command("sh");
        cmd.args(["-c", "fake-tool"])
            .current_dir(temp.path())
            .prepend_path(&bin);
        let output = platform.execute_command(&ctx, cmd).await.unwrap();

        assert!(output.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        let cwd = temp.path().canonicalize().unwrap();
        assert!(stdout.contains(&cwd.display().to_string()));
    }

    #[tokio::test]
    async fn test_missing_program_is_command_not_found() {
        let (tx, mut rx) = channel();
        let platform = Platform::current();
        let ctx = platform.create_context(Some(tx));

        let cmd = platform.command("ghostup-definitely-missing-binary");
        let err = platform.execute_command(&ctx, cmd).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Platform(PlatformError::CommandNotFound { .. })
        ));

        let mut saw_failure = false;
        while let Ok(event) = rx.try_recv() {
            if let AppEvent::General(GeneralEvent::OperationFailed { .. }) = event {
                saw_failure = true;
            }
        }
        assert!(saw_failure);
    }

    #[tokio::test]
    async fn test_write_atomic_replaces_contents() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("a").join("b.txt");

        fs::write_atomic(&path, b"first").await.unwrap();
        fs::write_atomic(&path, b"second").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
        let leftovers: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_missing_paths_is_ok() {
        let temp = tempdir().unwrap();
        fs::remove_dir_all(&temp.path().join("nope")).await.unwrap();
        fs::remove_file(&temp.path().join("nope.txt")).await.unwrap();
    }

    #[tokio::test]
    async fn test_is_executable() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("x");
        std::fs::write(&file, "x").unwrap();
        assert!(!fs::is_executable(&file).await);
        fs::set_executable(&file).await.unwrap();
        assert!(fs::is_executable(&file).await);
        assert!(!fs::is_executable(temp.path()).await);
    }
}
