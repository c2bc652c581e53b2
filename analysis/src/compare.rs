use crate::{
    dataset::{AlgorithmDataset, AlgorithmOrder, Measurements},
    error::DataIntegrityError,
    pairwise::{AlgorithmPair, PairwiseAlignedSet},
    record::{Keyed, Metric},
};
use itertools::Itertools;
use serde::Serialize;
use std::{cmp::Ordering, collections::BTreeMap};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CdfPoint {
    pub value: f64,
    pub probability: f64,
}

/// Empirical CDF of one metric of one algorithm
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CdfSeries {
    pub algorithm: String,
    pub metric: Metric,
    pub label: &'static str,
    pub points: Vec<CdfPoint>,
}

/// sorted values, the i-th (1-based) paired with probability i/n
pub fn cdf(values: impl IntoIterator<Item = f64>) -> Vec<CdfPoint> {
    let sorted = values
        .into_iter()
        .sorted_by(|a, b| a.total_cmp(b))
        .collect_vec();
    let count = sorted.len() as f64;

    sorted
        .into_iter()
        .enumerate()
        .map(|(idx, value)| CdfPoint {
            value,
            probability: (idx + 1) as f64 / count,
        })
        .collect()
}

pub fn cdf_series(
    order: &AlgorithmOrder,
    dataset: &AlgorithmDataset,
    metrics: &[Metric],
) -> Vec<CdfSeries> {
    order
        .iter()
        .cartesian_product(metrics.iter().copied())
        .map(|(algorithm, metric)| CdfSeries {
            algorithm: algorithm.to_string(),
            metric,
            label: metric.label(),
            points: cdf(dataset.get(algorithm).iter().map(|record| metric.value(record))),
        })
        .collect()
}

/// Contiguous run of one priority inside a sorted sequence, `end` exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriorityTier {
    pub priority: u32,
    pub start: usize,
    pub end: usize,
}

pub fn priority_tiers<T: Keyed>(sequence: &[T]) -> Vec<PriorityTier> {
    let mut tiers: Vec<PriorityTier> = Vec::new();

    for (idx, item) in sequence.iter().enumerate() {
        match tiers.last_mut() {
            Some(tier) if tier.priority == item.priority() => tier.end = idx + 1,
            _ => tiers.push(PriorityTier {
                priority: item.priority(),
                start: idx,
                end: idx + 1,
            }),
        }
    }

    tiers
}

/// Head-to-head result of one metric over an aligned pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairSummary {
    pub pair: AlgorithmPair,
    pub metric: Metric,
    pub label: &'static str,
    pub apps: usize,
    /// applications where the first algorithm responded faster
    pub first_faster: usize,
    pub second_faster: usize,
    pub ties: usize,
    pub tiers: Vec<PriorityTier>,
}

pub fn summarize_pair(set: &PairwiseAlignedSet, metric: Metric) -> PairSummary {
    let (mut first_faster, mut second_faster, mut ties) = (0, 0, 0);

    for (first, second) in set.first.iter().zip(set.second.iter()) {
        match metric.value(first).total_cmp(&metric.value(second)) {
            Ordering::Less => first_faster += 1,
            Ordering::Greater => second_faster += 1,
            Ordering::Equal => ties += 1,
        }
    }

    PairSummary {
        pair: set.pair.clone(),
        metric,
        label: metric.label(),
        apps: set.len(),
        first_faster,
        second_faster,
        ties,
        tiers: priority_tiers(&set.first),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriorityAcceptance {
    pub submitted: usize,
    pub accepted: usize,
    pub rate: f64,
}

/// Share of submitted applications an algorithm accepted, over all repeats
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcceptanceSummary {
    pub algorithm: String,
    pub submitted: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub rate: f64,
    pub per_priority: BTreeMap<u32, PriorityAcceptance>,
}

fn rate(accepted: usize, submitted: usize) -> f64 {
    if submitted == 0 {
        0.0
    } else {
        accepted as f64 / submitted as f64
    }
}

pub fn acceptance(
    order: &AlgorithmOrder,
    measurements: &Measurements,
) -> Result<Vec<AcceptanceSummary>, DataIntegrityError> {
    let mut summaries = Vec::with_capacity(order.len());

    for algorithm in order.iter() {
        let mut per_priority = BTreeMap::<u32, PriorityAcceptance>::new();

        for repeat in measurements.repeats() {
            let groups = repeat.groups(algorithm)?;

            for (name, priority) in repeat.manifest().iter() {
                let entry = per_priority.entry(priority).or_default();
                entry.submitted += 1;

                if groups.contains(name) {
                    entry.accepted += 1;
                }
            }
        }

        let submitted: usize = per_priority.values().map(|entry| entry.submitted).sum();
        let accepted: usize = per_priority.values().map(|entry| entry.accepted).sum();

        per_priority
            .values_mut()
            .for_each(|entry| entry.rate = rate(entry.accepted, entry.submitted));

        summaries.push(AcceptanceSummary {
            algorithm: algorithm.to_string(),
            submitted,
            accepted,
            rejected: submitted - accepted,
            rate: rate(accepted, submitted),
            per_priority,
        });
    }

    Ok(summaries)
}
