use crate::{
    dataset::{AcceptedGroups, AlgorithmOrder, AppGroup},
    error::DataIntegrityError,
    manifest::ApplicationManifest,
    record::{Keyed, ResultRecord},
};
use serde::Serialize;
use std::{
    collections::{BTreeMap, HashMap},
    fmt,
};
use tracing::{debug, instrument};

/// Two algorithms in their canonical orientation
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct AlgorithmPair {
    pub first: String,
    pub second: String,
}

impl AlgorithmPair {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn contains(&self, algorithm: &str) -> bool {
        self.first == algorithm || self.second == algorithm
    }
}

impl fmt::Display for AlgorithmPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}", self.first, self.second)
    }
}

/// Index-aligned sequences of the applications both algorithms of `pair` accepted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairwiseAlignedSet<T = ResultRecord> {
    pub pair: AlgorithmPair,
    pub first: Vec<T>,
    pub second: Vec<T>,
}

impl<T> PairwiseAlignedSet<T> {
    pub fn new(pair: AlgorithmPair) -> Self {
        Self {
            pair,
            first: Vec::new(),
            second: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.first.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    pub fn push(&mut self, first: T, second: T) {
        self.first.push(first);
        self.second.push(second);
    }

    /// append the entries of `other` after the entries of `self`
    pub fn extend(&mut self, other: Self) {
        self.first.extend(other.first);
        self.second.extend(other.second);
    }

    /// the sequence belonging to `algorithm`
    pub fn side(&self, algorithm: &str) -> Option<&[T]> {
        if self.pair.first == algorithm {
            Some(&self.first)
        } else if self.pair.second == algorithm {
            Some(&self.second)
        } else {
            None
        }
    }
}

impl PairwiseAlignedSet<AppGroup> {
    /// collapse both sides to one averaged record per application
    pub fn average(&self) -> Result<PairwiseAlignedSet<ResultRecord>, DataIntegrityError> {
        Ok(PairwiseAlignedSet {
            pair: self.pair.clone(),
            first: self
                .first
                .iter()
                .map(AppGroup::average)
                .collect::<Result<_, _>>()?,
            second: self
                .second
                .iter()
                .map(AppGroup::average)
                .collect::<Result<_, _>>()?,
        })
    }

    /// both sides reduced to one record per application
    pub fn collapse(&self) -> Result<Self, DataIntegrityError> {
        Ok(PairwiseAlignedSet {
            pair: self.pair.clone(),
            first: self
                .first
                .iter()
                .map(AppGroup::collapsed)
                .collect::<Result<_, _>>()?,
            second: self
                .second
                .iter()
                .map(AppGroup::collapsed)
                .collect::<Result<_, _>>()?,
        })
    }

    /// fold another repeat into this set, pooling records of applications already present
    pub fn pool(&mut self, other: Self) {
        let mut index: HashMap<String, usize> = self
            .first
            .iter()
            .enumerate()
            .map(|(idx, group)| (group.app_name.clone(), idx))
            .collect();

        for (first, second) in other.first.into_iter().zip(other.second) {
            match index.get(&first.app_name) {
                Some(&idx) => {
                    self.first[idx].records.extend(first.records);
                    self.second[idx].records.extend(second.records);
                }
                None => {
                    index.insert(first.app_name.clone(), self.first.len());
                    self.push(first, second);
                }
            }
        }
    }
}

/// Aligned sets of every algorithm pair, in canonical pair order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PairTable<T = ResultRecord> {
    sets: Vec<PairwiseAlignedSet<T>>,
}

impl<T> PairTable<T> {
    /// one empty set per pair of `order`
    pub fn empty(order: &AlgorithmOrder) -> Self {
        Self {
            sets: order.pairs().into_iter().map(PairwiseAlignedSet::new).collect(),
        }
    }

    pub fn from_sets(sets: Vec<PairwiseAlignedSet<T>>) -> Self {
        Self { sets }
    }

    pub fn get(&self, pair: &AlgorithmPair) -> Option<&PairwiseAlignedSet<T>> {
        self.sets.iter().find(|set| &set.pair == pair)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PairwiseAlignedSet<T>> + '_ {
        self.sets.iter()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// fold `other` into `self` pair by pair with `combine`
    pub fn merge_with<F>(mut self, other: Self, mut combine: F) -> Self
    where
        F: FnMut(&mut PairwiseAlignedSet<T>, PairwiseAlignedSet<T>),
    {
        for set in other.sets {
            match self.sets.iter_mut().find(|own| own.pair == set.pair) {
                Some(own) => combine(own, set),
                None => self.sets.push(set),
            }
        }

        self
    }

    /// concatenate the sets of `other` after those of `self`
    pub fn merge(self, other: Self) -> Self {
        self.merge_with(other, PairwiseAlignedSet::extend)
    }

    pub fn try_map<U, F>(self, f: F) -> Result<PairTable<U>, DataIntegrityError>
    where
        F: FnMut(PairwiseAlignedSet<T>) -> Result<PairwiseAlignedSet<U>, DataIntegrityError>,
    {
        Ok(PairTable {
            sets: self.sets.into_iter().map(f).collect::<Result<_, _>>()?,
        })
    }

    /// keep only the pairs matching `predicate`
    pub fn retain<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&AlgorithmPair) -> bool,
    {
        self.sets.retain(|set| predicate(&set.pair));
    }
}

impl<T> IntoIterator for PairTable<T> {
    type Item = PairwiseAlignedSet<T>;
    type IntoIter = std::vec::IntoIter<PairwiseAlignedSet<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sets.into_iter()
    }
}

/// Applications every algorithm in `groups` accepted, one sequence per algorithm.
///
/// The sequences are built in a single pass over the manifest, which is what
/// keeps them index-aligned.
pub fn accepted_by_all(
    manifest: &ApplicationManifest,
    groups: &[&AcceptedGroups],
) -> Vec<Vec<AppGroup>> {
    let mut sequences = vec![Vec::new(); groups.len()];

    for (name, _) in manifest.iter() {
        let accepted: Option<Vec<&AppGroup>> =
            groups.iter().map(|algorithm| algorithm.get(name)).collect();

        if let Some(accepted) = accepted {
            for (sequence, group) in sequences.iter_mut().zip(accepted) {
                sequence.push(group.clone());
            }
        }
    }

    sequences
}

/// Applications both algorithms of `pair` accepted
pub fn extract_pair(
    manifest: &ApplicationManifest,
    pair: AlgorithmPair,
    first: &AcceptedGroups,
    second: &AcceptedGroups,
) -> PairwiseAlignedSet<AppGroup> {
    let mut sequences = accepted_by_all(manifest, &[first, second]).into_iter();

    PairwiseAlignedSet {
        pair,
        first: sequences.next().unwrap_or_default(),
        second: sequences.next().unwrap_or_default(),
    }
}

/// Extract every pair of `order` from one repeat's grouped measurements
#[instrument(level = "debug", skip_all, fields(repeat = manifest.repeat()))]
pub fn extract_all(
    order: &AlgorithmOrder,
    manifest: &ApplicationManifest,
    groups: &BTreeMap<String, AcceptedGroups>,
) -> PairTable<AppGroup> {
    let empty = AcceptedGroups::default();
    let lookup = |algorithm: &str| groups.get(algorithm).unwrap_or(&empty);

    let sets = order
        .pairs()
        .into_iter()
        .map(|pair| {
            let first = lookup(&pair.first);
            let second = lookup(&pair.second);
            let set = extract_pair(manifest, pair.clone(), first, second);

            debug!(pair = %set.pair, both = set.len(), "Extracted applications accepted by both");

            set
        })
        .collect();

    PairTable::from_sets(sets)
}

impl<T: Keyed> PairwiseAlignedSet<T> {
    /// application names in sequence order, from the first side
    pub fn app_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.first.iter().map(Keyed::app_name)
    }
}
