use crate::{
    average::average,
    error::DataIntegrityError,
    manifest::ApplicationManifest,
    pairwise::AlgorithmPair,
    record::{Keyed, Metric, ResultRecord},
};
use itertools::Itertools;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Global ordering of the compared algorithms, fixes the orientation of every pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlgorithmOrder(Vec<String>);

impl AlgorithmOrder {
    /// keeps the first occurrence of every name
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).unique().collect_vec())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, algorithm: &str) -> bool {
        self.0.iter().any(|name| name == algorithm)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    /// every unordered pair exactly once, `(i, j)` with `i < j`
    pub fn pairs(&self) -> Vec<AlgorithmPair> {
        self.0
            .iter()
            .tuple_combinations()
            .map(|(first, second)| AlgorithmPair::new(first.clone(), second.clone()))
            .collect_vec()
    }
}

/// All accepted records of one application for one algorithm
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppGroup {
    pub app_name: String,
    pub priority: u32,
    pub records: Vec<ResultRecord>,
}

impl AppGroup {
    pub fn new(app_name: impl Into<String>, priority: u32) -> Self {
        Self {
            app_name: app_name.into(),
            priority,
            records: Vec::new(),
        }
    }

    /// collapse the group into a single averaged record
    pub fn average(&self) -> Result<ResultRecord, DataIntegrityError> {
        average(&self.records).map_err(|error| match error {
            DataIntegrityError::EmptyGroup { .. } => DataIntegrityError::EmptyGroup {
                app: Some(self.app_name.clone()),
            },
            other => other,
        })
    }

    /// the group reduced to its single averaged record
    pub fn collapsed(&self) -> Result<AppGroup, DataIntegrityError> {
        Ok(AppGroup {
            app_name: self.app_name.clone(),
            priority: self.priority,
            records: vec![self.average()?],
        })
    }
}

impl Keyed for AppGroup {
    fn app_name(&self) -> &str {
        &self.app_name
    }

    fn priority(&self) -> u32 {
        self.priority
    }
}

/// Accepted records of one algorithm in one repeat, keyed by application
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AcceptedGroups {
    groups: HashMap<String, AppGroup>,
}

impl AcceptedGroups {
    pub fn get(&self, app: &str) -> Option<&AppGroup> {
        self.groups
            .get(app)
            .filter(|group| !group.records.is_empty())
    }

    pub fn contains(&self, app: &str) -> bool {
        self.get(app).is_some()
    }

    /// number of distinct accepted applications
    pub fn len(&self) -> usize {
        self.groups
            .values()
            .filter(|group| !group.records.is_empty())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// one averaged record per accepted application, in manifest order
    pub fn averaged(
        &self,
        manifest: &ApplicationManifest,
    ) -> Result<Vec<ResultRecord>, DataIntegrityError> {
        manifest
            .iter()
            .filter_map(|(name, _)| self.get(name))
            .map(AppGroup::average)
            .collect()
    }
}

/// Measurements of every algorithm for one repeat, together with its manifest
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatInput {
    manifest: ApplicationManifest,
    measurements: BTreeMap<String, Vec<ResultRecord>>,
}

impl RepeatInput {
    pub fn new(
        manifest: ApplicationManifest,
        measurements: BTreeMap<String, Vec<ResultRecord>>,
    ) -> Self {
        Self {
            manifest,
            measurements,
        }
    }

    pub fn repeat(&self) -> usize {
        self.manifest.repeat()
    }

    pub fn manifest(&self) -> &ApplicationManifest {
        &self.manifest
    }

    /// algorithms with at least one loaded file
    pub fn algorithms(&self) -> impl Iterator<Item = &str> + '_ {
        self.measurements.keys().map(String::as_str)
    }

    /// raw records of `algorithm`, empty if it accepted nothing
    pub fn records(&self, algorithm: &str) -> &[ResultRecord] {
        self.measurements
            .get(algorithm)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// group the records of `algorithm` by application, rejecting records the
    /// manifest does not know and metrics that are negative or not finite
    pub fn groups(&self, algorithm: &str) -> Result<AcceptedGroups, DataIntegrityError> {
        let mut groups = HashMap::<String, AppGroup>::new();

        for record in self.records(algorithm) {
            let expected = self.manifest.priority(&record.app_name).ok_or_else(|| {
                DataIntegrityError::UnknownApplication {
                    algorithm: algorithm.to_string(),
                    repeat: self.repeat(),
                    app: record.app_name.clone(),
                }
            })?;

            if expected != record.priority {
                return Err(DataIntegrityError::PriorityMismatch {
                    algorithm: algorithm.to_string(),
                    repeat: self.repeat(),
                    app: record.app_name.clone(),
                    expected,
                    found: record.priority,
                });
            }

            // negative values would collide with the pending marker
            if let Some(metric) = Metric::ALL.into_iter().find(|metric| {
                let value = metric.value(record);
                !value.is_finite() || value < 0.0
            }) {
                return Err(DataIntegrityError::InvalidMetric {
                    algorithm: algorithm.to_string(),
                    repeat: self.repeat(),
                    app: record.app_name.clone(),
                    metric,
                    value: metric.value(record),
                });
            }

            groups
                .entry(record.app_name.clone())
                .or_insert_with(|| AppGroup::new(record.app_name.clone(), expected))
                .records
                .push(record.clone());
        }

        Ok(AcceptedGroups { groups })
    }

    /// group every algorithm of `order`, failing on measurements of unknown algorithms
    pub fn grouped(
        &self,
        order: &AlgorithmOrder,
    ) -> Result<BTreeMap<String, AcceptedGroups>, DataIntegrityError> {
        if let Some(unknown) = self.algorithms().find(|name| !order.contains(name)) {
            return Err(DataIntegrityError::UnknownAlgorithm {
                algorithm: unknown.to_string(),
                repeat: self.repeat(),
            });
        }

        order
            .iter()
            .map(|algorithm| Ok((algorithm.to_string(), self.groups(algorithm)?)))
            .collect()
    }
}

/// The complete, fully loaded set of repeats of one comparison run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Measurements {
    repeats: Vec<RepeatInput>,
}

impl Measurements {
    /// collect loaded repeats, ordered by repeat index regardless of load order
    pub fn from_repeats(repeats: impl IntoIterator<Item = RepeatInput>) -> Self {
        let mut repeats = repeats.into_iter().collect_vec();
        repeats.sort_by_key(RepeatInput::repeat);

        Self { repeats }
    }

    pub fn repeats(&self) -> &[RepeatInput] {
        &self.repeats
    }

    pub fn is_empty(&self) -> bool {
        self.repeats.is_empty()
    }

    /// every loaded record of every algorithm and repeat
    pub fn records(&self) -> impl Iterator<Item = &ResultRecord> + '_ {
        self.repeats
            .iter()
            .flat_map(|repeat| repeat.measurements.values().flatten())
    }
}

/// Reconciled records per algorithm
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlgorithmDataset {
    records: BTreeMap<String, Vec<ResultRecord>>,
}

impl AlgorithmDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, algorithm: impl Into<String>, records: Vec<ResultRecord>) {
        self.records
            .entry(algorithm.into())
            .or_default()
            .extend(records);
    }

    pub fn get(&self, algorithm: &str) -> &[ResultRecord] {
        self.records
            .get(algorithm)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ResultRecord])> + '_ {
        self.records
            .iter()
            .map(|(name, records)| (name.as_str(), records.as_slice()))
    }

    pub(crate) fn records_mut(&mut self) -> impl Iterator<Item = &mut ResultRecord> + '_ {
        self.records.values_mut().flatten()
    }

    /// append the records of `other` after the records of `self`
    pub fn merge(mut self, other: Self) -> Self {
        for (algorithm, records) in other.records {
            self.insert(algorithm, records);
        }

        self
    }
}
