use crate::record::Metric;
use serde::Serialize;
use thiserror::Error;

/// The four families of broken invariants, all of them fatal for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationKind {
    /// accepted and rejected applications do not rebuild the manifest
    Completeness,
    /// the two sides of a pair diverge in length or identity
    Alignment,
    /// a sorted sequence decreases in priority
    Ordering,
    /// an operation was called outside its domain
    Precondition,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataIntegrityError {
    #[error("repeat {repeat}, algorithm {algorithm}: {accepted} accepted + {complement} rejected does not match {submitted} submitted applications")]
    Completeness {
        algorithm: String,
        repeat: usize,
        submitted: usize,
        accepted: usize,
        complement: usize,
    },
    #[error("repeat {repeat}: application {app} was submitted more than once")]
    DuplicateSubmission { repeat: usize, app: String },
    #[error("repeat {repeat}, algorithm {algorithm}: application {app} was accepted more than once")]
    DuplicateApplication {
        algorithm: String,
        repeat: usize,
        app: String,
    },
    #[error("repeat {repeat}, algorithm {algorithm}: application {app} is not in the manifest")]
    UnknownApplication {
        algorithm: String,
        repeat: usize,
        app: String,
    },
    #[error("repeat {repeat}, algorithm {algorithm}: application {app} has priority {found}, the manifest requested {expected}")]
    PriorityMismatch {
        algorithm: String,
        repeat: usize,
        app: String,
        expected: u32,
        found: u32,
    },
    #[error("repeat {repeat}, algorithm {algorithm}: {metric} of {app} is {value}, measured values must be finite and non-negative")]
    InvalidMetric {
        algorithm: String,
        repeat: usize,
        app: String,
        metric: Metric,
        value: f64,
    },
    #[error("repeat {repeat}: measurements for {algorithm} which is not a compared algorithm")]
    UnknownAlgorithm { algorithm: String, repeat: usize },
    #[error("{pair}: sequence lengths differ ({first_len} != {second_len})")]
    LengthMismatch {
        pair: String,
        first_len: usize,
        second_len: usize,
    },
    #[error("{pair}: index {index} holds {first_app} (priority {first_priority}) and {second_app} (priority {second_priority})")]
    Misaligned {
        pair: String,
        index: usize,
        first_app: String,
        first_priority: u32,
        second_app: String,
        second_priority: u32,
    },
    #[error("{pair}, {algorithm}: priority {found} of {app} at index {index} is smaller than the current {current}")]
    PriorityDecrease {
        pair: String,
        algorithm: String,
        index: usize,
        app: String,
        current: u32,
        found: u32,
    },
    #[error("{pair}: only {bucketed} of {total} applications fall into priorities [{min}, {max}]")]
    PriorityOutOfRange {
        pair: String,
        min: u32,
        max: u32,
        total: usize,
        bucketed: usize,
    },
    #[error("{pair}, {algorithm}: sorting produced {output} records from {input}")]
    SortLength {
        pair: String,
        algorithm: String,
        input: usize,
        output: usize,
    },
    #[error("cannot average an empty group of records (application: {})", .app.as_deref().unwrap_or("unknown"))]
    EmptyGroup { app: Option<String> },
}

impl DataIntegrityError {
    pub fn kind(&self) -> ViolationKind {
        match self {
            Self::Completeness { .. }
            | Self::DuplicateSubmission { .. }
            | Self::DuplicateApplication { .. }
            | Self::UnknownApplication { .. }
            | Self::PriorityMismatch { .. }
            | Self::UnknownAlgorithm { .. } => ViolationKind::Completeness,
            Self::LengthMismatch { .. } | Self::Misaligned { .. } => ViolationKind::Alignment,
            Self::PriorityDecrease { .. }
            | Self::PriorityOutOfRange { .. }
            | Self::SortLength { .. } => ViolationKind::Ordering,
            Self::EmptyGroup { .. } | Self::InvalidMetric { .. } => ViolationKind::Precondition,
        }
    }
}
