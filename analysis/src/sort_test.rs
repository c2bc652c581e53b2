use crate::{
    error::{DataIntegrityError, ViolationKind},
    pairwise::{AlgorithmPair, PairwiseAlignedSet},
    record::ResultRecord,
    sort::{sort_by_priority, PriorityRange},
};

fn aligned(entries: &[(&str, u32)]) -> PairwiseAlignedSet {
    let mut set = PairwiseAlignedSet::new(AlgorithmPair::new("X", "Y"));

    for (idx, (name, priority)) in entries.iter().enumerate() {
        set.push(
            ResultRecord::measured(*name, *priority, idx as f64, 0.0),
            ResultRecord::measured(*name, *priority, 100.0 + idx as f64, 0.0),
        );
    }

    set
}

fn names(records: &[ResultRecord]) -> Vec<&str> {
    records.iter().map(|r| r.app_name.as_str()).collect()
}

#[test]
pub fn sort_is_stable_inside_a_tier() {
    let set = aligned(&[("a", 3), ("b", 1), ("c", 3), ("d", 2), ("e", 1)]);

    let sorted = sort_by_priority(&set, PriorityRange::default()).unwrap();

    assert_eq!(names(&sorted.first), vec!["b", "e", "d", "a", "c"]);
    assert_eq!(names(&sorted.second), names(&sorted.first));
    // the pairing travels with the permutation
    assert_eq!(sorted.first[0].resp_time, 1.0);
    assert_eq!(sorted.second[0].resp_time, 101.0);
}

#[test]
pub fn sorting_an_empty_set_is_a_no_op() {
    let set = aligned(&[]);

    assert!(sort_by_priority(&set, PriorityRange::default())
        .unwrap()
        .is_empty());
}

#[test]
pub fn priority_outside_range_is_fatal() {
    let set = aligned(&[("a", 1), ("b", 11)]);

    let error = sort_by_priority(&set, PriorityRange::new(1, 10)).unwrap_err();

    assert_eq!(
        error,
        DataIntegrityError::PriorityOutOfRange {
            pair: "X vs Y".to_string(),
            min: 1,
            max: 10,
            total: 2,
            bucketed: 1,
        }
    );
    assert_eq!(error.kind(), ViolationKind::Ordering);
}

#[test]
pub fn unequal_sides_are_rejected_before_sorting() {
    let mut set = aligned(&[("a", 1)]);
    set.second.push(ResultRecord::measured("b", 1, 0.0, 0.0));

    assert!(matches!(
        sort_by_priority(&set, PriorityRange::default()),
        Err(DataIntegrityError::LengthMismatch {
            first_len: 1,
            second_len: 2,
            ..
        })
    ));
}

#[test]
pub fn custom_range_buckets_by_offset() {
    let set = aligned(&[("a", 7), ("b", 5), ("c", 6)]);

    let sorted = sort_by_priority(&set, PriorityRange::new(5, 7)).unwrap();

    assert_eq!(names(&sorted.first), vec!["b", "c", "a"]);
}
