//! Consistency checks run between pipeline stages.
//!
//! Every check returns the first violation it finds; a violation makes the
//! whole comparison unusable, so there is no attempt to collect or repair.

use crate::{
    error::DataIntegrityError,
    manifest::ApplicationManifest,
    pairwise::{AlgorithmPair, PairTable, PairwiseAlignedSet},
    record::{Keyed, ResultRecord},
};
use tracing::debug;

pub fn check_same_length<T>(set: &PairwiseAlignedSet<T>) -> Result<(), DataIntegrityError> {
    if set.first.len() != set.second.len() {
        return Err(DataIntegrityError::LengthMismatch {
            pair: set.pair.to_string(),
            first_len: set.first.len(),
            second_len: set.second.len(),
        });
    }

    Ok(())
}

/// equal lengths and identical (name, priority) at every index
pub fn check_alignment<T: Keyed>(set: &PairwiseAlignedSet<T>) -> Result<(), DataIntegrityError> {
    check_same_length(set)?;

    for (index, (first, second)) in set.first.iter().zip(set.second.iter()).enumerate() {
        if first.app_name() != second.app_name() || first.priority() != second.priority() {
            return Err(DataIntegrityError::Misaligned {
                pair: set.pair.to_string(),
                index,
                first_app: first.app_name().to_string(),
                first_priority: first.priority(),
                second_app: second.app_name().to_string(),
                second_priority: second.priority(),
            });
        }
    }

    Ok(())
}

/// priorities of `sequence` never decrease
pub fn check_monotonic<T: Keyed>(
    pair: &AlgorithmPair,
    algorithm: &str,
    sequence: &[T],
) -> Result<(), DataIntegrityError> {
    let mut current = match sequence.first() {
        Some(item) => item.priority(),
        None => return Ok(()),
    };

    for (index, item) in sequence.iter().enumerate() {
        if item.priority() < current {
            return Err(DataIntegrityError::PriorityDecrease {
                pair: pair.to_string(),
                algorithm: algorithm.to_string(),
                index,
                app: item.app_name().to_string(),
                current,
                found: item.priority(),
            });
        }

        current = item.priority();
    }

    Ok(())
}

/// every reconciled repeat holds exactly one record per manifest entry
pub fn check_completeness(
    manifest: &ApplicationManifest,
    algorithm: &str,
    reconciled: &[ResultRecord],
) -> Result<(), DataIntegrityError> {
    let complete = reconciled.len() == manifest.len()
        && reconciled
            .iter()
            .zip(manifest.iter())
            .all(|(record, (name, priority))| {
                record.app_name == name && record.priority == priority
            });

    if !complete {
        let pending = reconciled.iter().filter(|record| record.is_pending()).count();

        return Err(DataIntegrityError::Completeness {
            algorithm: algorithm.to_string(),
            repeat: manifest.repeat(),
            submitted: manifest.len(),
            accepted: reconciled.len() - pending,
            complement: pending,
        });
    }

    Ok(())
}

/// alignment of every pair, run on freshly extracted or averaged tables
pub fn validate_pairs<T: Keyed>(table: &PairTable<T>) -> Result<(), DataIntegrityError> {
    for set in table.iter() {
        check_alignment(set)?;
    }

    debug!(pairs = table.len(), "Validated pairwise alignment");

    Ok(())
}

/// alignment and non-decreasing priority of every pair, run after sorting
pub fn validate_sorted_pairs<T: Keyed>(table: &PairTable<T>) -> Result<(), DataIntegrityError> {
    validate_pairs(table)?;

    for set in table.iter() {
        check_monotonic(&set.pair, &set.pair.first, &set.first)?;
    }

    debug!(pairs = table.len(), "Validated sorted pairs");

    Ok(())
}
