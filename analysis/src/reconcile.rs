use crate::{error::DataIntegrityError, manifest::ApplicationManifest, record::ResultRecord};
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

/// Placeholders for every manifest entry `algorithm` did not accept.
///
/// `accepted` must hold at most one record per application. Any accepted
/// record that does not map one-to-one onto a manifest entry is an error.
pub fn complement(
    manifest: &ApplicationManifest,
    algorithm: &str,
    accepted: &[ResultRecord],
) -> Result<Vec<ResultRecord>, DataIntegrityError> {
    let repeat = manifest.repeat();
    let mut seen = HashSet::with_capacity(accepted.len());

    for record in accepted {
        let expected = manifest.priority(&record.app_name).ok_or_else(|| {
            DataIntegrityError::UnknownApplication {
                algorithm: algorithm.to_string(),
                repeat,
                app: record.app_name.clone(),
            }
        })?;

        if expected != record.priority {
            return Err(DataIntegrityError::PriorityMismatch {
                algorithm: algorithm.to_string(),
                repeat,
                app: record.app_name.clone(),
                expected,
                found: record.priority,
            });
        }

        if !seen.insert(record.app_name.as_str()) {
            return Err(DataIntegrityError::DuplicateApplication {
                algorithm: algorithm.to_string(),
                repeat,
                app: record.app_name.clone(),
            });
        }
    }

    let rejected: Vec<ResultRecord> = manifest
        .iter()
        .filter(|(name, _)| !seen.contains(name))
        .map(|(name, priority)| ResultRecord::placeholder(name, priority))
        .collect();

    if accepted.len() + rejected.len() != manifest.len() {
        return Err(DataIntegrityError::Completeness {
            algorithm: algorithm.to_string(),
            repeat,
            submitted: manifest.len(),
            accepted: accepted.len(),
            complement: rejected.len(),
        });
    }

    Ok(rejected)
}

/// Accepted records plus placeholders, one record per manifest entry in manifest order
#[instrument(level = "debug", skip(manifest, accepted), fields(repeat = manifest.repeat()))]
pub fn reconcile(
    manifest: &ApplicationManifest,
    algorithm: &str,
    accepted: &[ResultRecord],
) -> Result<Vec<ResultRecord>, DataIntegrityError> {
    let rejected = complement(manifest, algorithm, accepted)?;

    debug!(
        accepted = accepted.len(),
        rejected = rejected.len(),
        "Complemented rejected applications"
    );

    let by_name: HashMap<&str, &ResultRecord> = accepted
        .iter()
        .map(|record| (record.app_name.as_str(), record))
        .collect();
    // placeholders come out of `complement` in manifest order as well
    let mut rejected = rejected.into_iter();
    let mut reconciled = Vec::with_capacity(manifest.len());

    for (name, _) in manifest.iter() {
        match by_name.get(name) {
            Some(record) => reconciled.push((*record).clone()),
            None => reconciled.extend(rejected.next()),
        }
    }

    Ok(reconciled)
}
