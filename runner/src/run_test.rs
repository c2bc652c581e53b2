use crate::{
    config::AnalysisConfig,
    executors::ExecutorError,
    run::{run, Command, RunError},
};
use rtan_analysis::{ResultRecord, ViolationKind};
use rtan_ingest::read_results;
use std::{fs, path::Path};
use tempfile::TempDir;

const LEGACY_HEADER: &str =
    "app_name,priority,resp_time,resp_time_in_clouds,pri_wei_resp_time,pri_wei_resp_time_in_clouds";

fn write_table(path: &Path, rows: &[(&str, u32, f64)]) {
    let mut content = String::from(LEGACY_HEADER);
    for (name, priority, resp) in rows {
        let weighted = resp * *priority as f64;
        content.push_str(&format!(
            "\n{name},{priority},{resp},{},{weighted},{}",
            resp / 2.0,
            weighted / 2.0
        ));
    }
    content.push('\n');

    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// repeat 1 submits A(2), B(1), C(1); X accepts A and B over two tables, Y accepts A
fn experiment() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let repeat = dir.path().join("data").join("repeat1");

    fs::create_dir_all(&repeat).unwrap();
    fs::write(
        repeat.join("request_applications.json"),
        r#"[{"name": "A", "priority": 2}, {"name": "B", "priority": 1}, {"name": "C", "priority": 1}]"#,
    )
    .unwrap();
    write_table(&repeat.join("X").join("part-1.csv"), &[("A", 2, 10.0)]);
    write_table(&repeat.join("X").join("part-2.csv"), &[("B", 1, 20.0)]);
    write_table(&repeat.join("Y").join("all.csv"), &[("A", 2, 20.0)]);

    dir
}

fn config(dir: &Path, extra: &str) -> AnalysisConfig {
    let mut config: AnalysisConfig = serde_yaml::from_str(&format!(
        "data:\n  path: {}\noutput:\n  path: {}\nthreads: 2\n{extra}",
        dir.join("data").display(),
        dir.join("out").display()
    ))
    .unwrap();

    assert!(!config.preflight_checks());

    config
}

#[test]
pub fn all_writes_reconciled_pairs_and_summary() {
    let dir = experiment();
    let config = config(dir.path(), "algorithms: [X, Y]\n");

    let summary = run(Command::All, &config).unwrap();
    let out = dir.path().join("out");

    let sentinel = summary.sentinel.as_ref().unwrap().record().resp_time;
    assert!((sentinel - 22.0).abs() < 1e-9);

    let x = read_results(&out.join("reconciled").join("X.csv")).unwrap();
    assert_eq!(
        x.iter().map(|record| record.app_name.as_str()).collect::<Vec<_>>(),
        vec!["A", "B", "C"]
    );
    assert_eq!(x[0].resp_time, 10.0);
    assert_eq!(x[1].resp_time, 20.0);
    assert!((x[2].resp_time - 22.0).abs() < 1e-9);

    let y = read_results(&out.join("reconciled").join("Y.csv")).unwrap();
    assert!(y[1..].iter().all(|record| (record.resp_time - 22.0).abs() < 1e-9));

    let pair = out.join("pairs").join("X_vs_Y");
    assert_eq!(
        read_results(&pair.join("X.csv")).unwrap(),
        vec![ResultRecord::new("A", 2, 10.0, 5.0, 20.0, 10.0)]
    );
    assert_eq!(
        read_results(&pair.join("Y.csv")).unwrap(),
        vec![ResultRecord::new("A", 2, 20.0, 10.0, 40.0, 20.0)]
    );

    // one summary per pair and selected metric
    assert_eq!(summary.pairs.len(), 2);
    assert_eq!(summary.pairs[0].second_faster, 0);
    assert_eq!(summary.pairs[0].first_faster, 1);

    let yaml = fs::read_to_string(out.join("summary.yaml")).unwrap();
    assert!(yaml.contains("acceptance"));
    assert!(yaml.contains("across-repeats"));
}

#[test]
pub fn check_writes_nothing() {
    let dir = experiment();
    let config = config(dir.path(), "algorithms: [X, Y]\n");

    let summary = run(Command::Check, &config).unwrap();

    assert!(summary.sentinel.is_some());
    assert_eq!(summary.pairs.len(), 2);
    assert!(!dir.path().join("out").exists());
}

#[test]
pub fn reconcile_skips_pairs() {
    let dir = experiment();
    let config = config(dir.path(), "algorithms: [X, Y]\n");

    let summary = run(Command::Reconcile, &config).unwrap();

    assert!(summary.pairs.is_empty());
    assert_eq!(summary.acceptance.len(), 2);
    assert!(dir.path().join("out").join("reconciled").is_dir());
    assert!(!dir.path().join("out").join("pairs").exists());
}

#[test]
pub fn focus_restricts_reported_pairs() {
    let dir = experiment();
    // Z has no folder at all, so it accepted nothing
    let config = config(
        dir.path(),
        "algorithms: [X, Y, Z]\nfocus: Z\nmetrics: [resp_time]\n",
    );

    let summary = run(Command::Compare, &config).unwrap();

    assert_eq!(summary.pairs.len(), 2);
    assert!(summary.pairs.iter().all(|pair| pair.pair.contains("Z")));
    assert!(summary.pairs.iter().all(|pair| pair.apps == 0));
    assert!(summary.sentinel.is_none());
}

#[test]
pub fn missing_manifest_fails_the_repeat() {
    let dir = experiment();
    fs::remove_file(
        dir.path()
            .join("data")
            .join("repeat1")
            .join("request_applications.json"),
    )
    .unwrap();
    let config = config(dir.path(), "algorithms: [X, Y]\n");

    assert!(matches!(
        run(Command::All, &config),
        Err(RunError::Executor(ExecutorError::Load { repeat: 1, .. }))
    ));
}

#[test]
pub fn unknown_application_is_an_integrity_error() {
    let dir = experiment();
    write_table(
        &dir.path().join("data").join("repeat1").join("Y").join("extra.csv"),
        &[("D", 1, 5.0)],
    );
    let config = config(dir.path(), "algorithms: [X, Y]\n");

    match run(Command::Reconcile, &config) {
        Err(RunError::Integrity(error)) => assert_eq!(error.kind(), ViolationKind::Completeness),
        other => panic!("expected integrity error, got {other:?}"),
    }
}
