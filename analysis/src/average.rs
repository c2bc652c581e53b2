use crate::{
    error::DataIntegrityError,
    record::{Metric, ResultRecord},
};

/// Mean of every metric over `records`; name and priority come from the first record.
///
/// An empty slice is a precondition violation and fails before any division.
pub fn average(records: &[ResultRecord]) -> Result<ResultRecord, DataIntegrityError> {
    let first = records
        .first()
        .ok_or(DataIntegrityError::EmptyGroup { app: None })?;

    let count = records.len() as f64;
    let mut averaged = first.clone();

    for metric in Metric::ALL {
        let sum: f64 = records.iter().map(|record| metric.value(record)).sum();
        *metric.value_mut(&mut averaged) = sum / count;
    }

    Ok(averaged)
}
