//! Integration tests for error types

#[cfg(test)]
mod tests {
    use ghostup_errors::*;

    #[test]
    fn test_error_conversion() {
        let net_err = NetworkError::Timeout {
            url: "https://example.com".into(),
        };
        let err: Error = net_err.into();
        assert!(matches!(err, Error::Network(_)));
    }

    #[test]
    fn test_error_display() {
        let err = InstallError::ArtifactMissing {
            path: "/home/u/.local/bin/ghostty".into(),
        };
        assert_eq!(
            err.to_string(),
            "build finished but no binary was installed at /home/u/.local/bin/ghostty"
        );
    }

    #[test]
    fn test_build_failure_keeps_output_out_of_message() {
        let err: Error = BuildError::Failed {
            command: "zig build".into(),
            status: "exit status: 1".into(),
            output: "error: missing dependency\n".into(),
        }
        .into();
        let rendered = err.user_message();
        assert!(rendered.contains("zig build"));
        assert!(!rendered.contains("missing dependency"));
        assert_eq!(err.build_output(), Some("error: missing dependency\n"));

        let other: Error = BuildError::SpawnFailed {
            command: "zig build".into(),
            message: "not found".into(),
        }
        .into();
        assert_eq!(other.build_output(), None);
    }

    #[test]
    fn test_verification_is_never_retryable() {
        let err: Error = SigningError::VerificationFailed {
            path: "ghostty-1.2.0.tar.gz".into(),
            reason: "signature mismatch".into(),
        }
        .into();
        assert!(!err.is_retryable());
        assert_eq!(err.user_code(), Some("signing.verification_failed"));
        assert!(err.user_hint().is_some());
    }

    #[test]
    fn test_transport_retryability_hint() {
        let server_error: Error = NetworkError::HttpError {
            url: "https://example.com/a".into(),
            status: 503,
        }
        .into();
        let not_found: Error = NetworkError::HttpError {
            url: "https://example.com/a".into(),
            status: 404,
        }
        .into();
        assert!(server_error.is_retryable());
        assert!(!not_found.is_retryable());
    }

    #[test]
    fn test_io_error_with_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::io_with_path(&io_err, "/tmp/work");
        match err {
            Error::Io {
                kind,
                message,
                path,
            } => {
                assert_eq!(kind, std::io::ErrorKind::PermissionDenied);
                assert!(message.starts_with("/tmp/work"));
                assert_eq!(path, Some(std::path::PathBuf::from("/tmp/work")));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_clone() {
        let err = ToolchainError::BinaryMissing {
            path: "compiler/zig".into(),
            archive: "zig.tar.xz".into(),
        };
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }
}
