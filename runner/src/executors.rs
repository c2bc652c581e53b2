pub mod local;

use crate::config::{AnalysisConfig, ConfigErrors};
use rtan_analysis::Measurements;
use rtan_ingest::IngestError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("No repeat folder found below {0}")]
    NoRepeats(PathBuf),
    #[error("Failed to load repeat {repeat}")]
    Load {
        repeat: usize,
        #[source]
        source: IngestError,
    },
}

/// Turns the files of an experiment into loaded measurements
pub trait Executor: Sized {
    fn load(config: &AnalysisConfig) -> Result<Self, ConfigErrors>;

    fn execute(&self) -> Result<Measurements, ExecutorError>;
}
