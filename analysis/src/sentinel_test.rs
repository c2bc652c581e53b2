use crate::{
    dataset::AlgorithmDataset,
    record::{Metric, ResultRecord, PENDING},
    sentinel::{substitute, SentinelRecord, ENLARGE_RATE, SENTINEL_APP_NAME},
};

fn assert_close(left: f64, right: f64) {
    assert!((left - right).abs() < 1e-9, "{left} != {right}");
}

#[test]
pub fn sentinel_enlarges_the_maximum_of_every_metric() {
    let records = vec![
        ResultRecord::new("A", 1, 10.0, 7.0, 10.0, 7.0),
        ResultRecord::new("B", 3, 20.0, 2.0, 60.0, 6.0),
        ResultRecord::placeholder("C", 2),
    ];

    let sentinel = SentinelRecord::compute(&records);

    assert_eq!(sentinel.record().app_name, SENTINEL_APP_NAME);
    assert_close(sentinel.value(Metric::ResponseTime), 22.0);
    assert_close(sentinel.value(Metric::ResponseTimeInClouds), 7.0 * ENLARGE_RATE);
    assert_close(sentinel.value(Metric::PriorityWeightedResponseTime), 66.0);
    assert_close(
        sentinel.value(Metric::PriorityWeightedResponseTimeInClouds),
        7.0 * ENLARGE_RATE,
    );
}

#[test]
pub fn sentinel_without_real_records_is_zero() {
    let sentinel = SentinelRecord::compute(&[ResultRecord::placeholder("C", 2)]);

    for metric in Metric::ALL {
        assert_eq!(sentinel.value(metric), 0.0);
    }
}

#[test]
pub fn substitution_replaces_only_pending_values() {
    let mut dataset = AlgorithmDataset::new();
    dataset.insert(
        "X",
        vec![
            ResultRecord::measured("A", 1, 10.0, 1.0),
            ResultRecord::placeholder("C", 2),
        ],
    );
    let sentinel = SentinelRecord::compute(dataset.get("X"));

    assert_eq!(substitute(&mut dataset, &sentinel), 4);

    let records = dataset.get("X");
    assert_eq!(records[0], ResultRecord::measured("A", 1, 10.0, 1.0));
    assert_close(records[1].resp_time, 11.0);
    // the priority-weighted sentinel is taken as is, not re-weighted by priority 2
    assert_close(records[1].pri_weighted_resp_time, 11.0);
    assert!(!records[1].is_pending());
}

#[test]
pub fn substitution_is_idempotent() {
    let mut dataset = AlgorithmDataset::new();
    dataset.insert(
        "X",
        vec![
            ResultRecord::measured("A", 1, 10.0, 1.0),
            ResultRecord::placeholder("B", 1),
        ],
    );
    let sentinel = SentinelRecord::compute(dataset.get("X"));

    substitute(&mut dataset, &sentinel);
    let once = dataset.clone();

    assert_eq!(substitute(&mut dataset, &sentinel), 0);
    assert_eq!(dataset, once);
    assert!(dataset.get("X").iter().all(|r| r.resp_time != PENDING));
}
