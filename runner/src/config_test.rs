use crate::config::{AnalysisConfig, ConfigErrors, OutputConfig, MAX_PRIORITY_TIERS};
use rtan_analysis::{AveragingMode, Metric, PriorityRange};
use std::{fs, path::PathBuf};

fn parse(yaml: &str) -> AnalysisConfig {
    serde_yaml::from_str(yaml).unwrap()
}

#[test]
pub fn defaults_fill_optional_fields() {
    let config = parse(
        "data:\n  path: data\nalgorithms: [Amaga, Ampga, Mcssga]\n",
    );

    assert_eq!(config.data.manifest, "request_applications.json");
    assert_eq!(config.data.glob, "*.csv");
    assert_eq!(config.data.repeats, None);
    assert_eq!(config.priority, PriorityRange::new(1, 10));
    assert_eq!(config.averaging, AveragingMode::AcrossRepeats);
    assert_eq!(
        config.metrics,
        vec![Metric::ResponseTime, Metric::ResponseTimeInClouds]
    );
    assert_eq!(
        config.output,
        OutputConfig {
            path: PathBuf::from("out")
        }
    );
    assert_eq!(config.order().pairs().len(), 3);
}

#[test]
pub fn full_config_parses() {
    let config = parse(
        r#"
data:
  path: data
  repeats: 2
  manifest: apps.json
  glob: "result-*.csv"
algorithms: [BERand, Mcssga]
focus: Mcssga
priority: { min: 1, max: 5 }
averaging: per-repeat
metrics: [resp_time, pri_weighted_resp_time_in_clouds]
output:
  path: plots
threads: 2
"#,
    );

    assert_eq!(config.data.repeats, Some(2));
    assert_eq!(config.focus.as_deref(), Some("Mcssga"));
    assert_eq!(config.averaging, AveragingMode::PerRepeat);
    assert_eq!(
        config.metrics,
        vec![
            Metric::ResponseTime,
            Metric::PriorityWeightedResponseTimeInClouds
        ]
    );
    assert_eq!(config.threads, Some(2));
}

#[test]
pub fn unknown_fields_are_rejected() {
    let result = serde_yaml::from_str::<AnalysisConfig>(
        "data:\n  path: data\nalgorithms: [A]\nsolvers: {}\n",
    );

    assert!(result.is_err());
}

#[test]
pub fn missing_file_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();

    assert!(matches!(
        AnalysisConfig::load(&dir.path().join("absent.yaml")),
        Err(ConfigErrors::FileNotFound(_))
    ));
}

#[test]
pub fn preflight_accepts_valid_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rtan.yaml");
    fs::write(
        &path,
        format!(
            "data:\n  path: {}\nalgorithms: [A, B]\nfocus: B\nmetrics: []\nthreads: 0\n",
            dir.path().display()
        ),
    )
    .unwrap();

    let mut config = AnalysisConfig::load(&path).unwrap();

    assert!(!config.preflight_checks());
    // fallbacks are applied in place
    assert_eq!(config.metrics, Metric::NON_PRIORITY.to_vec());
    assert_eq!(config.threads, None);
}

#[test]
pub fn preflight_reports_every_problem() {
    let mut config = parse(
        r#"
data:
  path: /definitely/not/here
  repeats: 0
  glob: "[unclosed"
algorithms: [A, A]
focus: C
priority: { min: 5, max: 1 }
"#,
    );

    assert!(config.preflight_checks());
}

#[test]
pub fn preflight_rejects_empty_algorithms() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = parse(&format!(
        "data:\n  path: {}\nalgorithms: []\n",
        dir.path().display()
    ));

    assert!(config.preflight_checks());
}

#[test]
pub fn invalid_glob_fails_to_compile() {
    let config = parse("data:\n  path: data\n  glob: \"[unclosed\"\nalgorithms: [A]\n");

    assert!(matches!(
        config.data.compile_glob(),
        Err(ConfigErrors::InvalidGlobs(_))
    ));
}

#[test]
pub fn preflight_rejects_unbounded_priority_span() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = parse(&format!(
        "data:\n  path: {}\nalgorithms: [A, B]\npriority: {{ min: 0, max: 4294967295 }}\n",
        dir.path().display()
    ));

    assert!(config.preflight_checks());
}

#[test]
pub fn preflight_accepts_widest_supported_priority_span() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = parse(&format!(
        "data:\n  path: {}\nalgorithms: [A, B]\npriority: {{ min: 1, max: {MAX_PRIORITY_TIERS} }}\n",
        dir.path().display()
    ));

    assert_eq!(config.priority.tiers(), MAX_PRIORITY_TIERS);
    assert!(!config.preflight_checks());
}
