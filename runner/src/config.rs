use globset::{GlobBuilder, GlobMatcher};
use itertools::Itertools;
use rtan_analysis::{AlgorithmOrder, AveragingMode, Metric, PriorityRange};
use serde::{Deserialize, Serialize};
use std::{fs::File, path::Path, path::PathBuf};
use thiserror::Error;
use tracing::{error, warn};

/// sorting allocates one bucket per priority tier
pub const MAX_PRIORITY_TIERS: usize = 1024;

#[derive(Error, Debug)]
pub enum ConfigErrors {
    #[error("Globs were invalid")]
    InvalidGlobs(#[from] globset::Error),
    #[error("Config file could not be opened")]
    FileNotFound(#[from] std::io::Error),
    #[error("Config file is malformed")]
    Malformed(#[from] serde_yaml::Error),
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    // where the measurements live and how they are laid out
    pub data: DataConfig,
    // global algorithm order, the pair order derives from it
    pub algorithms: Vec<String>,
    // restrict the reported pairs to those containing this algorithm
    #[serde(default)]
    pub focus: Option<String>,
    #[serde(default)]
    pub priority: PriorityRange,
    #[serde(default)]
    pub averaging: AveragingMode,
    #[serde(default = "default_metrics")]
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub output: OutputConfig,
    // size of the loading thread pool, rayon picks one when absent
    #[serde(default)]
    pub threads: Option<usize>,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    pub path: PathBuf,
    // detected from the repeat{N} folders when absent
    #[serde(default)]
    pub repeats: Option<usize>,
    #[serde(default = "default_manifest")]
    pub manifest: String,
    #[serde(default = "default_glob")]
    pub glob: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

impl DataConfig {
    /// compile the glob selecting result tables inside an algorithm folder
    pub fn compile_glob(&self) -> Result<GlobMatcher, ConfigErrors> {
        Ok(GlobBuilder::new(&self.glob)
            .literal_separator(true)
            .build()?
            .compile_matcher())
    }
}

impl AnalysisConfig {
    #[tracing::instrument(level = "debug")]
    pub fn load(path: &Path) -> Result<Self, ConfigErrors> {
        Ok(serde_yaml::from_reader(File::open(path)?)?)
    }

    pub fn order(&self) -> AlgorithmOrder {
        AlgorithmOrder::new(self.algorithms.iter())
    }

    pub fn preflight_checks(&mut self) -> bool {
        // report every problem at once instead of piece-by-piece
        let mut contains_error = false;

        if self.algorithms.is_empty() {
            error!("No algorithm was defined, there is nothing to compare");
            contains_error = true;
        }

        for duplicate in self.algorithms.iter().duplicates() {
            error!("algorithms lists {duplicate} more than once");
            contains_error = true;
        }

        if let Some(ref focus) = self.focus {
            if !self.algorithms.contains(focus) {
                error!("focus {focus} is not one of the configured algorithms");
                contains_error = true;
            }
        }

        if self.priority.min > self.priority.max {
            error!(
                "priority.min ({}) is larger than priority.max ({})",
                self.priority.min, self.priority.max
            );
            contains_error = true;
        } else if self.priority.tiers() > MAX_PRIORITY_TIERS {
            error!(
                "priority spans {} tiers ({} to {}), at most {MAX_PRIORITY_TIERS} are supported",
                self.priority.tiers(),
                self.priority.min,
                self.priority.max
            );
            contains_error = true;
        }

        if !self.data.path.is_dir() {
            error!(
                "Failed to find data.path. Either not a directory or not found at {}",
                self.data.path.to_string_lossy()
            );
            contains_error = true;
        }

        if self.data.repeats == Some(0) {
            error!("data.repeats cannot be 0, leave it out to detect the repeats instead");
            contains_error = true;
        }

        if let Err(error) = self.data.compile_glob() {
            error!("data.glob ({}) is invalid: {error}", self.data.glob);
            contains_error = true;
        }

        if self.metrics.is_empty() {
            warn!("No metric was selected. Falling back to the response time metrics");
            self.metrics = default_metrics();
        } else {
            self.metrics = self.metrics.iter().copied().unique().collect_vec();
        }

        if self.threads == Some(0) {
            warn!("threads is 0. Falling back to the default thread pool size");
            self.threads = None;
        }

        contains_error
    }
}

fn default_metrics() -> Vec<Metric> {
    Metric::NON_PRIORITY.to_vec()
}

fn default_manifest() -> String {
    String::from("request_applications.json")
}

fn default_glob() -> String {
    String::from("*.csv")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("out")
}
