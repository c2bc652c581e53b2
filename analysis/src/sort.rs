use crate::{
    error::DataIntegrityError,
    pairwise::PairwiseAlignedSet,
    record::Keyed,
    validate::{check_monotonic, check_same_length},
};
use serde::{Deserialize, Serialize};

/// Inclusive range of valid application priorities
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PriorityRange {
    pub min: u32,
    pub max: u32,
}

impl PriorityRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, priority: u32) -> bool {
        (self.min..=self.max).contains(&priority)
    }

    /// number of priority tiers
    pub fn tiers(&self) -> usize {
        if self.max < self.min {
            0
        } else {
            (self.max - self.min) as usize + 1
        }
    }
}

impl Default for PriorityRange {
    fn default() -> Self {
        Self::new(1, 10)
    }
}

/// Sort an aligned set by ascending priority, keeping input order inside a tier.
///
/// The positions of the first sequence are bucketed once per priority of
/// `range`; the second sequence follows the same permutation so the pairing
/// survives. Items with a priority outside `range` fall out of the buckets
/// and are reported as an error.
pub fn sort_by_priority<T>(
    set: &PairwiseAlignedSet<T>,
    range: PriorityRange,
) -> Result<PairwiseAlignedSet<T>, DataIntegrityError>
where
    T: Keyed + Clone,
{
    check_same_length(set)?;

    let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); range.tiers()];

    for (idx, item) in set.first.iter().enumerate() {
        if range.contains(item.priority()) {
            buckets[(item.priority() - range.min) as usize].push(idx);
        }
    }

    let bucketed: usize = buckets.iter().map(Vec::len).sum();

    if bucketed != set.len() {
        return Err(DataIntegrityError::PriorityOutOfRange {
            pair: set.pair.to_string(),
            min: range.min,
            max: range.max,
            total: set.len(),
            bucketed,
        });
    }

    let mut sorted = PairwiseAlignedSet::new(set.pair.clone());

    for idx in buckets.into_iter().flatten() {
        sorted.push(set.first[idx].clone(), set.second[idx].clone());
    }

    for (algorithm, input, output) in [
        (&set.pair.first, &set.first, &sorted.first),
        (&set.pair.second, &set.second, &sorted.second),
    ] {
        if input.len() != output.len() {
            return Err(DataIntegrityError::SortLength {
                pair: set.pair.to_string(),
                algorithm: algorithm.clone(),
                input: input.len(),
                output: output.len(),
            });
        }
    }

    check_monotonic(&sorted.pair, &sorted.pair.first, &sorted.first)?;
    check_monotonic(&sorted.pair, &sorted.pair.second, &sorted.second)?;

    Ok(sorted)
}
