//! Reconciliation and pairwise comparison of response-time measurements
//! collected for competing scheduling algorithms.

pub mod average;
pub mod compare;
pub mod dataset;
pub mod error;
pub mod manifest;
pub mod pairwise;
pub mod pipeline;
pub mod reconcile;
pub mod record;
pub mod sentinel;
pub mod sort;
pub mod validate;

#[cfg(test)]
mod dataset_test;
#[cfg(test)]
mod sentinel_test;
#[cfg(test)]
mod sort_test;

pub use average::average;
pub use compare::{
    acceptance, cdf, cdf_series, priority_tiers, summarize_pair, AcceptanceSummary, CdfPoint,
    CdfSeries, PairSummary, PriorityAcceptance, PriorityTier,
};
pub use dataset::{
    AcceptedGroups, AlgorithmDataset, AlgorithmOrder, AppGroup, Measurements, RepeatInput,
};
pub use error::{DataIntegrityError, ViolationKind};
pub use manifest::ApplicationManifest;
pub use pairwise::{
    accepted_by_all, extract_all, extract_pair, AlgorithmPair, PairTable, PairwiseAlignedSet,
};
pub use pipeline::{compare_pairs, reconcile_all, AveragingMode, Reconciliation};
pub use reconcile::{complement, reconcile};
pub use record::{Keyed, Metric, ResultRecord, PENDING};
pub use sentinel::{substitute, SentinelRecord, ENLARGE_RATE, SENTINEL_APP_NAME};
pub use sort::{sort_by_priority, PriorityRange};
pub use validate::{
    check_alignment, check_completeness, check_monotonic, validate_pairs, validate_sorted_pairs,
};
