use rtan_analysis::{
    AcceptanceSummary, AveragingMode, CdfSeries, PairSummary, PairTable, PriorityRange,
    Reconciliation, SentinelRecord,
};
use rtan_ingest::{write_results, IngestError};
use serde::Serialize;
use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to create {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write result table")]
    Table(#[from] IngestError),
    #[error("Failed to serialize summary")]
    Summary(#[from] serde_yaml::Error),
}

/// Everything a plotting consumer needs besides the tables themselves
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub algorithms: Vec<String>,
    pub averaging: AveragingMode,
    pub priority: PriorityRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentinel: Option<SentinelRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub acceptance: Vec<AcceptanceSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cdf: Vec<CdfSeries>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pairs: Vec<PairSummary>,
}

/// Writes results below the output root
#[derive(Debug, Clone)]
pub struct Exporter {
    root: PathBuf,
}

fn create_dir(path: &Path) -> Result<(), ExportError> {
    fs::create_dir_all(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl Exporter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<root>/reconciled/<algorithm>.csv`
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn reconciled(&self, reconciliation: &Reconciliation) -> Result<(), ExportError> {
        let dir = self.root.join("reconciled");
        create_dir(&dir)?;

        for (algorithm, records) in reconciliation.dataset.iter() {
            write_results(&dir.join(format!("{algorithm}.csv")), records)?;
            debug!(algorithm = %algorithm, records = records.len(), "Wrote reconciled table");
        }

        info!(path = ?dir, "Exported reconciled dataset");

        Ok(())
    }

    /// `<root>/pairs/<first>_vs_<second>/{<first>,<second>}.csv`
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn pairs(&self, table: &PairTable) -> Result<(), ExportError> {
        let root = self.root.join("pairs");

        for set in table.iter() {
            let dir = root.join(format!("{}_vs_{}", set.pair.first, set.pair.second));
            create_dir(&dir)?;

            write_results(&dir.join(format!("{}.csv", set.pair.first)), &set.first)?;
            write_results(&dir.join(format!("{}.csv", set.pair.second)), &set.second)?;
            debug!(pair = %set.pair, apps = set.len(), "Wrote pair tables");
        }

        info!(path = ?root, pairs = table.len(), "Exported pairwise comparison");

        Ok(())
    }

    /// `<root>/summary.yaml`
    pub fn summary(&self, summary: &Summary) -> Result<(), ExportError> {
        create_dir(&self.root)?;

        let path = self.root.join("summary.yaml");
        let file = File::create(&path).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;

        serde_yaml::to_writer(file, summary)?;
        info!(path = ?path, "Exported summary");

        Ok(())
    }
}
