//! Integration tests for types

#[cfg(test)]
mod tests {
    use ghostup_types::*;

    #[test]
    fn test_stage_order() {
        let mut stages = Stage::ALL.to_vec();
        stages.reverse();
        stages.sort();
        assert_eq!(stages, Stage::ALL.to_vec());
        assert_eq!(Stage::ToolchainReady.to_string(), "toolchain-ready");
    }

    #[test]
    fn test_stage_serialization() {
        let json = serde_json::to_string(&Stage::SourceReady).unwrap();
        assert_eq!(json, r#""source-ready""#);
    }

    #[test]
    fn test_report_outcome_lookup() {
        let report = InstallReport {
            version: Version::parse("1.2.0").unwrap(),
            toolchain_version: Version::parse("0.14.1").unwrap(),
            mode: BuildMode::Local,
            stages: vec![
                StageRecord {
                    stage: Stage::ToolchainReady,
                    outcome: StageOutcome::AlreadySatisfied,
                    duration_ms: 1,
                },
                StageRecord {
                    stage: Stage::Built,
                    outcome: StageOutcome::Skipped {
                        reason: "--skip-build".into(),
                    },
                    duration_ms: 0,
                },
            ],
            binary_path: None,
            warnings: Vec::new(),
            duration_ms: 1,
        };

        assert_eq!(
            report.outcome(Stage::ToolchainReady),
            Some(&StageOutcome::AlreadySatisfied)
        );
        assert_eq!(report.outcome(Stage::Built).map(StageOutcome::label), Some("skipped"));
        assert!(report.outcome(Stage::Integrated).is_none());
    }

    #[test]
    fn test_color_choice_default() {
        assert_eq!(ColorChoice::default(), ColorChoice::Auto);
    }
}
