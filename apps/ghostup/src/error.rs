//! CLI error handling

use std::fmt;

use ghostup_errors::UserFacingError;
use ghostup_install::PipelineFailure;

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Configuration error
    Config(ghostup_errors::Error),
    /// A pipeline stage failed
    Pipeline(PipelineFailure),
    /// I/O error
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "Configuration error: {}", e.user_message()),
            CliError::Pipeline(failure) => {
                match failure.stage {
                    Some(stage) => write!(f, "Stage {stage} failed: {}", failure.user_message())?,
                    None => write!(f, "{}", failure.user_message())?,
                }
                if let Some(code) = failure.user_code() {
                    write!(f, "\n  Code: {code}")?;
                }
                if let Some(hint) = failure.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                if failure.is_retryable() {
                    write!(f, "\n  Retry: safe to retry this operation.")?;
                }
                if let Some(output) = failure.error.build_output() {
                    write!(f, "\n\nBuild output:\n{}", output.trim_end())?;
                }
                Ok(())
            }
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl CliError {
    /// One-line description without captured build output
    pub fn summary(&self) -> String {
        match self {
            CliError::Pipeline(failure) => failure.to_string(),
            other => other.to_string(),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Pipeline(e) => Some(e),
            CliError::Io(e) => Some(e),
        }
    }
}

impl From<ghostup_errors::Error> for CliError {
    fn from(e: ghostup_errors::Error) -> Self {
        CliError::Config(e)
    }
}

impl From<PipelineFailure> for CliError {
    fn from(e: PipelineFailure) -> Self {
        CliError::Pipeline(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghostup_errors::BuildError;
    use ghostup_types::Stage;

    fn build_failure() -> CliError {
        CliError::Pipeline(PipelineFailure {
            stage: Some(Stage::Built),
            error: BuildError::Failed {
                command: "zig build".into(),
                status: "exit status: 1".into(),
                output: "step 1/3\nerror: undefined symbol\n".into(),
            }
            .into(),
        })
    }

    #[test]
    fn test_build_output_printed_once_after_hint() {
        let rendered = build_failure().to_string();
        assert_eq!(rendered.matches("error: undefined symbol").count(), 1);
        let hint = rendered.find("Hint:").unwrap();
        let output = rendered.find("Build output:").unwrap();
        assert!(hint < output);
    }

    #[test]
    fn test_summary_omits_build_output() {
        let summary = build_failure().summary();
        assert!(summary.contains("zig build"));
        assert!(!summary.contains("undefined symbol"));
    }
}
