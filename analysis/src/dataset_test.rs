use crate::{
    dataset::{AppGroup, RepeatInput},
    error::{DataIntegrityError, ViolationKind},
    manifest::ApplicationManifest,
    record::{Metric, ResultRecord},
};
use std::collections::BTreeMap;

fn repeat_with(records: Vec<ResultRecord>) -> RepeatInput {
    let manifest = ApplicationManifest::new(2, [("A", 1), ("B", 1)]).unwrap();

    RepeatInput::new(manifest, BTreeMap::from([(String::from("X"), records)]))
}

fn invalid_metric(record: ResultRecord) -> (Metric, f64) {
    let repeat = repeat_with(vec![ResultRecord::measured("B", 1, 10.0, 5.0), record]);

    let error = repeat.groups("X").unwrap_err();
    assert_eq!(error.kind(), ViolationKind::Precondition);

    match error {
        DataIntegrityError::InvalidMetric {
            algorithm,
            repeat,
            app,
            metric,
            value,
        } => {
            assert_eq!(algorithm, "X");
            assert_eq!(repeat, 2);
            assert_eq!(app, "A");
            (metric, value)
        }
        other => panic!("expected invalid metric, got {other:?}"),
    }
}

#[test]
pub fn pending_marker_in_measured_row_is_rejected() {
    let (metric, value) = invalid_metric(ResultRecord::measured("A", 1, 100.0, -1.0));

    assert_eq!(metric, Metric::ResponseTimeInClouds);
    assert_eq!(value, -1.0);
}

#[test]
pub fn negative_value_is_rejected() {
    let (metric, _) = invalid_metric(ResultRecord::new("A", 1, 3.0, 1.0, -0.5, 1.0));

    assert_eq!(metric, Metric::PriorityWeightedResponseTime);
}

#[test]
pub fn nan_is_rejected() {
    let (metric, value) = invalid_metric(ResultRecord::measured("A", 1, f64::NAN, 1.0));

    assert_eq!(metric, Metric::ResponseTime);
    assert!(value.is_nan());
}

#[test]
pub fn infinity_is_rejected() {
    let (metric, value) = invalid_metric(ResultRecord::measured("A", 1, 2.0, f64::INFINITY));

    assert_eq!(metric, Metric::ResponseTimeInClouds);
    assert_eq!(value, f64::INFINITY);
}

#[test]
pub fn zero_is_a_valid_measurement() {
    let repeat = repeat_with(vec![ResultRecord::measured("A", 1, 0.0, 0.0)]);

    assert!(repeat.groups("X").unwrap().contains("A"));
}

#[test]
pub fn collapsed_group_holds_its_mean() {
    let mut group = AppGroup::new("A", 1);
    group.records = vec![
        ResultRecord::measured("A", 1, 10.0, 2.0),
        ResultRecord::measured("A", 1, 30.0, 4.0),
    ];

    let collapsed = group.collapsed().unwrap();

    assert_eq!(
        collapsed.records,
        vec![ResultRecord::measured("A", 1, 20.0, 3.0)]
    );
}
