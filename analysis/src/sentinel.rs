use crate::{
    dataset::{AlgorithmDataset, Measurements},
    record::{Metric, ResultRecord, PENDING},
};
use serde::Serialize;
use tracing::{debug, instrument};

/// marker name of the synthetic record, never a real application
pub const SENTINEL_APP_NAME: &str = "rej";

/// rejected applications rank strictly behind the worst real measurement
pub const ENLARGE_RATE: f64 = 1.1;

/// Worst-case values assigned to rejected applications
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SentinelRecord(ResultRecord);

impl SentinelRecord {
    /// `ENLARGE_RATE` times the largest real value of every metric; placeholders are skipped
    pub fn compute<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ResultRecord>,
    {
        let mut sentinel = ResultRecord::new(SENTINEL_APP_NAME, 1, 0.0, 0.0, 0.0, 0.0);

        for record in records.into_iter().filter(|record| !record.is_pending()) {
            for metric in Metric::ALL {
                let current = metric.value_mut(&mut sentinel);
                *current = current.max(metric.value(record));
            }
        }

        // TODO: weight the priority-weighted metrics by each rejected app's own priority once the intended chart semantics are settled
        for metric in Metric::ALL {
            *metric.value_mut(&mut sentinel) *= ENLARGE_RATE;
        }

        Self(sentinel)
    }

    /// sentinel over the complete set of loaded repeats
    pub fn from_measurements(measurements: &Measurements) -> Self {
        Self::compute(measurements.records())
    }

    pub fn record(&self) -> &ResultRecord {
        &self.0
    }

    pub fn value(&self, metric: Metric) -> f64 {
        metric.value(&self.0)
    }
}

/// Replace every pending metric with the sentinel's value, returns how many were replaced.
///
/// Rejected applications take the sentinel's priority-weighted metrics
/// directly, they are not re-weighted with their own priority.
#[instrument(level = "debug", skip_all)]
pub fn substitute(dataset: &mut AlgorithmDataset, sentinel: &SentinelRecord) -> usize {
    let mut replaced = 0;

    for record in dataset.records_mut() {
        for metric in Metric::ALL {
            let value = metric.value_mut(record);

            if *value == PENDING {
                *value = sentinel.value(metric);
                replaced += 1;
            }
        }
    }

    debug!(replaced, "Substituted sentinel values");

    replaced
}
