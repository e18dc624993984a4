//! Install pipeline orchestration
//!
//! Stages run strictly in order and every run starts again from the top.
//! Each stage probes the filesystem to decide whether its work is already
//! done, so a rerun after a failure resumes at the first incomplete stage.

use ghostup_builder::{BuildContext, BuildExecutor, ContainerBuild, LocalBuild};
use ghostup_errors::{Error, UserFacingError};
use ghostup_events::{channel, AppEvent, EventEmitter, EventSender, PipelineEvent};
use ghostup_types::{
    BuildMode, InstallReport, IntegrationWarning, Stage, StageOutcome, StageRecord,
};
use std::borrow::Cow;
use std::future::Future;
use std::time::Instant;

use crate::{
    ArtifactValidator, DesktopIntegrator, InstallContext, InstallLock, SourceStager,
    ToolchainManager,
};

/// A fatal pipeline error and the stage it happened in
///
/// `stage` is `None` when the run failed before the first stage started,
/// for example because another run holds the lock.
#[derive(Debug, Clone)]
pub struct PipelineFailure {
    pub stage: Option<Stage>,
    pub error: Error,
}

impl std::fmt::Display for PipelineFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.stage {
            Some(stage) => write!(f, "stage {stage} failed: {}", self.error),
            None => write!(f, "{}", self.error),
        }
    }
}

impl std::error::Error for PipelineFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl UserFacingError for PipelineFailure {
    fn user_message(&self) -> Cow<'_, str> {
        self.error.user_message()
    }

    fn user_hint(&self) -> Option<&'static str> {
        self.error.user_hint()
    }

    fn is_retryable(&self) -> bool {
        self.error.is_retryable()
    }

    fn user_code(&self) -> Option<&'static str> {
        self.error.user_code()
    }
}

/// Runs the five stages for one [`InstallContext`]
#[derive(Debug, Clone)]
pub struct InstallPipeline {
    ctx: InstallContext,
}

impl InstallPipeline {
    #[must_use]
    pub fn new(ctx: InstallContext) -> Self {
        Self { ctx }
    }

    #[must_use]
    pub fn context(&self) -> &InstallContext {
        &self.ctx
    }

    /// Run every stage under the work directory lock
    ///
    /// # Errors
    ///
    /// Returns the first fatal error together with the failing stage.
    /// Desktop integration problems never fail the run; they are listed in
    /// the report's warnings.
    pub async fn run(&self) -> Result<InstallReport, PipelineFailure> {
        let started = Instant::now();
        let ctx = &self.ctx;
        let tx = ctx.event_sender().cloned().unwrap_or_else(|| channel().0);

        let _lock = InstallLock::acquire(&ctx.layout.lock_path())
            .map_err(|error| PipelineFailure { stage: None, error })?;

        tx.emit(AppEvent::Pipeline(PipelineEvent::Started {
            version: ctx.version.clone(),
            toolchain_version: ctx.toolchain_version.clone(),
            mode: ctx.mode,
        }));
        self.warn_ignored_flags(&tx);

        let mut report = InstallReport {
            version: ctx.version.clone(),
            toolchain_version: ctx.toolchain_version.clone(),
            mode: ctx.mode,
            stages: Vec::with_capacity(Stage::ALL.len()),
            binary_path: None,
            warnings: Vec::new(),
            duration_ms: 0,
        };

        let build_ctx = BuildContext::new(
            &ctx.layout,
            ctx.version.clone(),
            ctx.toolchain_version.clone(),
        )
        .with_no_cache(ctx.no_cache)
        .with_platform(ctx.platform.clone())
        .with_event_sender(tx.clone());

        if ctx.skip_build {
            skip(&tx, &mut report.stages, Stage::ToolchainReady, "--skip-build");
        } else {
            run_stage(&tx, &mut report.stages, Stage::ToolchainReady, async {
                self.ensure_toolchain(&build_ctx, &tx).await
            })
            .await?;
        }

        run_stage(&tx, &mut report.stages, Stage::SourceReady, async {
            self.ensure_source(&tx).await
        })
        .await?;

        if ctx.skip_build {
            for stage in [Stage::Built, Stage::Validated, Stage::Integrated] {
                skip(&tx, &mut report.stages, stage, "--skip-build");
            }
            return Ok(finish(&tx, report, started));
        }

        run_stage(&tx, &mut report.stages, Stage::Built, async {
            self.build(&build_ctx).await
        })
        .await?;

        let binary_path = ctx.layout.binary_path();
        run_stage(&tx, &mut report.stages, Stage::Validated, async {
            ArtifactValidator::verify(&binary_path).await?;
            Ok::<_, Error>(StageOutcome::Completed)
        })
        .await?;
        report.binary_path = Some(binary_path.clone());

        let mut warnings: Vec<IntegrationWarning> = Vec::new();
        run_stage(&tx, &mut report.stages, Stage::Integrated, async {
            warnings = DesktopIntegrator::new(&ctx.layout)
                .integrate(
                    &ctx.layout.staged_source_dir(&ctx.version),
                    &binary_path,
                    &tx,
                )
                .await;
            Ok::<_, Error>(StageOutcome::Completed)
        })
        .await?;
        report.warnings = warnings;

        Ok(finish(&tx, report, started))
    }

    fn warn_ignored_flags(&self, tx: &EventSender) {
        match self.ctx.mode {
            BuildMode::Local if self.ctx.no_cache => {
                tx.emit_warning("--no-cache only applies to container builds; ignoring it");
            }
            BuildMode::Container if self.ctx.pull_always => {
                tx.emit_warning("--pull-always has no effect on container builds; ignoring it");
            }
            _ => {}
        }
    }

    async fn ensure_toolchain(
        &self,
        build_ctx: &BuildContext,
        tx: &EventSender,
    ) -> Result<StageOutcome, Error> {
        let ctx = &self.ctx;
        match ctx.mode {
            BuildMode::Local => {
                let manager = ToolchainManager::new(
                    ctx.net.clone(),
                    ctx.toolchain_base_url.clone(),
                    ctx.layout.toolchain_dir.clone(),
                );
                if ctx.pull_always {
                    manager.reset().await?;
                }
                manager.ensure(&ctx.toolchain_version, tx).await
            }
            BuildMode::Container => {
                ContainerBuild::new(ctx.container_runtime.clone())
                    .ensure_available(build_ctx)
                    .await?;
                Ok(StageOutcome::Completed)
            }
        }
    }

    async fn ensure_source(&self, tx: &EventSender) -> Result<StageOutcome, Error> {
        let ctx = &self.ctx;
        let stager = SourceStager::new(
            ctx.net.clone(),
            ctx.release_base_url.clone(),
            ctx.layout.clone(),
            ctx.verifier.clone(),
        );
        if ctx.pull_always && ctx.mode == BuildMode::Local {
            stager.reset(&ctx.version).await?;
        }
        stager.ensure(&ctx.version, tx).await
    }

    async fn build(&self, build_ctx: &BuildContext) -> Result<StageOutcome, Error> {
        let executor: Box<dyn BuildExecutor> = match self.ctx.mode {
            BuildMode::Local => Box::new(LocalBuild::new()),
            BuildMode::Container => {
                Box::new(ContainerBuild::new(self.ctx.container_runtime.clone()))
            }
        };
        build_ctx.emit_debug(format!("building with the {} executor", executor.name()));
        executor.build(build_ctx).await?;
        Ok(StageOutcome::Completed)
    }
}

/// Emit the stage lifecycle around `work` and record how it ended
async fn run_stage<F>(
    tx: &EventSender,
    records: &mut Vec<StageRecord>,
    stage: Stage,
    work: F,
) -> Result<StageOutcome, PipelineFailure>
where
    F: Future<Output = Result<StageOutcome, Error>>,
{
    tx.emit_stage_started(stage);
    let started = Instant::now();

    match work.await {
        Ok(outcome) => {
            tx.emit_stage_completed(stage, outcome.clone());
            records.push(StageRecord {
                stage,
                outcome: outcome.clone(),
                duration_ms: elapsed_ms(started),
            });
            Ok(outcome)
        }
        Err(error) => {
            tx.emit_stage_failed(stage, &error);
            Err(PipelineFailure {
                stage: Some(stage),
                error,
            })
        }
    }
}

fn skip(tx: &EventSender, records: &mut Vec<StageRecord>, stage: Stage, reason: &str) {
    let outcome = StageOutcome::Skipped {
        reason: reason.to_string(),
    };
    tx.emit_stage_completed(stage, outcome.clone());
    records.push(StageRecord {
        stage,
        outcome,
        duration_ms: 0,
    });
}

fn finish(tx: &EventSender, mut report: InstallReport, started: Instant) -> InstallReport {
    report.duration_ms = elapsed_ms(started);
    tx.emit(AppEvent::Pipeline(PipelineEvent::Finished {
        version: report.version.clone(),
        binary_path: report.binary_path.clone(),
        warnings: report.warnings.len(),
    }));
    report
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghostup_errors::{BuildError, InstallError};

    #[test]
    fn test_failure_display_names_stage() {
        let failure = PipelineFailure {
            stage: Some(Stage::Validated),
            error: InstallError::ArtifactMissing {
                path: "/p/bin/ghostty".to_string(),
            }
            .into(),
        };
        assert!(failure.to_string().starts_with("stage validated failed:"));
        assert_eq!(failure.user_code(), Some("install.artifact_missing"));

        let early = PipelineFailure {
            stage: None,
            error: InstallError::Locked {
                path: "/w/.ghostup.lock".to_string(),
            }
            .into(),
        };
        assert!(!early.to_string().contains("stage"));
        assert!(early.is_retryable());
    }

    #[tokio::test]
    async fn test_failed_build_output_stays_out_of_events() {
        let (tx, mut rx) = channel();
        let mut records = Vec::new();

        let failure = run_stage(&tx, &mut records, Stage::Built, async {
            Err::<StageOutcome, Error>(BuildError::Failed {
                command: "zig build".into(),
                status: "exit status: 1".into(),
                output: "step 1/3\nerror: undefined symbol\n".into(),
            }
            .into())
        })
        .await
        .unwrap_err();
        drop(tx);

        assert_eq!(failure.stage, Some(Stage::Built));
        assert!(failure.error.build_output().is_some());
        assert!(records.is_empty());

        let mut seen = 0;
        while let Some(event) = rx.recv().await {
            seen += 1;
            let rendered = format!("{event:?}");
            assert!(!rendered.contains("undefined symbol"), "leaked: {rendered}");
        }
        assert_eq!(seen, 2);
    }
}
