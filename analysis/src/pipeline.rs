use crate::{
    compare::{acceptance, AcceptanceSummary},
    dataset::{AlgorithmDataset, AlgorithmOrder, AppGroup, Measurements, RepeatInput},
    error::DataIntegrityError,
    pairwise::{extract_all, PairTable, PairwiseAlignedSet},
    reconcile::reconcile,
    sentinel::{substitute, SentinelRecord},
    sort::{sort_by_priority, PriorityRange},
    validate::{check_completeness, validate_pairs, validate_sorted_pairs},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// How repeats of the same application are collapsed in pairwise comparisons
#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AveragingMode {
    /// one record per application: the mean of its per-repeat means over every
    /// repeat both algorithms accepted it in, so each repeat weighs the same
    #[default]
    AcrossRepeats,
    /// one record per application and repeat, repeats concatenated
    PerRepeat,
}

/// Reconciled, sentinel-substituted dataset of every algorithm
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reconciliation {
    pub sentinel: SentinelRecord,
    pub dataset: AlgorithmDataset,
    pub acceptance: Vec<AcceptanceSummary>,
}

/// reconcile one repeat into an immutable partial dataset
#[instrument(level = "debug", skip_all, fields(repeat = repeat.repeat()))]
fn reconcile_repeat(
    order: &AlgorithmOrder,
    repeat: &RepeatInput,
) -> Result<AlgorithmDataset, DataIntegrityError> {
    let manifest = repeat.manifest();
    let mut partial = AlgorithmDataset::new();

    for (algorithm, groups) in repeat.grouped(order)? {
        // several request samples of one application collapse into one record
        let accepted = groups.averaged(manifest)?;
        let reconciled = reconcile(manifest, &algorithm, &accepted)?;

        check_completeness(manifest, &algorithm, &reconciled)?;
        partial.insert(algorithm, reconciled);
    }

    Ok(partial)
}

/// Fill in every rejected application and substitute the sentinel.
///
/// The sentinel is computed from the complete `measurements` before any
/// substitution takes place.
#[instrument(level = "info", skip_all)]
pub fn reconcile_all(
    order: &AlgorithmOrder,
    measurements: &Measurements,
) -> Result<Reconciliation, DataIntegrityError> {
    let mut dataset = measurements
        .repeats()
        .iter()
        .map(|repeat| reconcile_repeat(order, repeat))
        .try_fold(AlgorithmDataset::new(), |dataset, partial| {
            Ok::<_, DataIntegrityError>(dataset.merge(partial?))
        })?;

    let sentinel = SentinelRecord::from_measurements(measurements);
    let replaced = substitute(&mut dataset, &sentinel);

    info!(
        repeats = measurements.repeats().len(),
        replaced,
        sentinel_resp_time = sentinel.record().resp_time,
        "Reconciled all algorithms"
    );

    Ok(Reconciliation {
        sentinel,
        dataset,
        acceptance: acceptance(order, measurements)?,
    })
}

/// extract the accepted-by-both groups of one repeat
#[instrument(level = "debug", skip_all, fields(repeat = repeat.repeat()))]
fn extract_repeat(
    order: &AlgorithmOrder,
    repeat: &RepeatInput,
) -> Result<PairTable<AppGroup>, DataIntegrityError> {
    let groups = repeat.grouped(order)?;
    let table = extract_all(order, repeat.manifest(), &groups);

    validate_pairs(&table)?;

    Ok(table)
}

fn average_table(table: PairTable<AppGroup>) -> Result<PairTable, DataIntegrityError> {
    let averaged = table.try_map(|set| set.average())?;

    validate_pairs(&averaged)?;

    Ok(averaged)
}

/// Aligned, averaged and priority-sorted sets for every algorithm pair
#[instrument(level = "info", skip_all, fields(mode = ?mode))]
pub fn compare_pairs(
    order: &AlgorithmOrder,
    measurements: &Measurements,
    range: PriorityRange,
    mode: AveragingMode,
) -> Result<PairTable, DataIntegrityError> {
    let mut tables = measurements
        .repeats()
        .iter()
        .map(|repeat| extract_repeat(order, repeat));

    let averaged = match mode {
        AveragingMode::PerRepeat => tables.try_fold(PairTable::empty(order), |merged, table| {
            Ok::<_, DataIntegrityError>(merged.merge(average_table(table?)?))
        })?,
        AveragingMode::AcrossRepeats => average_table(tables.try_fold(
            PairTable::empty(order),
            |merged, table| {
                let collapsed = table?.try_map(|set| set.collapse())?;

                Ok::<_, DataIntegrityError>(merged.merge_with(collapsed, PairwiseAlignedSet::pool))
            },
        )?)?,
    };

    validate_pairs(&averaged)?;

    let sorted = averaged.try_map(|set| sort_by_priority(&set, range))?;

    validate_sorted_pairs(&sorted)?;

    for set in sorted.iter() {
        debug!(pair = %set.pair, apps = set.len(), "Sorted pair by priority");
    }

    Ok(sorted)
}
