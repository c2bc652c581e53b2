use crate::{
    config::{AnalysisConfig, ConfigErrors},
    executors::{local::LocalExecutor, Executor, ExecutorError},
    export::{ExportError, Exporter, Summary},
};
use clap::Subcommand;
use itertools::iproduct;
use rtan_analysis::{
    cdf_series, compare_pairs, reconcile_all, summarize_pair, DataIntegrityError, PairTable,
};
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// fill in rejected applications and export one table per algorithm
    Reconcile,
    /// align, average and sort every algorithm pair
    Compare,
    /// reconcile and compare
    All,
    /// load and validate only, nothing is written
    Check,
}

impl Command {
    fn reconciles(self) -> bool {
        !matches!(self, Self::Compare)
    }

    fn compares(self) -> bool {
        !matches!(self, Self::Reconcile)
    }

    fn writes(self) -> bool {
        !matches!(self, Self::Check)
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigErrors),
    #[error(transparent)]
    Executor(#[from] ExecutorError),
    #[error(transparent)]
    Integrity(#[from] DataIntegrityError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

#[instrument(skip(config), level = "info")]
pub fn run(command: Command, config: &AnalysisConfig) -> Result<Summary, RunError> {
    let order = config.order();
    let measurements = LocalExecutor::load(config)?.execute()?;

    let exporter = Exporter::new(&config.output.path);
    let mut summary = Summary {
        algorithms: order.iter().map(String::from).collect(),
        averaging: config.averaging,
        priority: config.priority,
        sentinel: None,
        acceptance: Vec::new(),
        cdf: Vec::new(),
        pairs: Vec::new(),
    };

    if command.reconciles() {
        let reconciliation = reconcile_all(&order, &measurements)?;

        if command.writes() {
            exporter.reconciled(&reconciliation)?;
        }

        summary.cdf = cdf_series(&order, &reconciliation.dataset, &config.metrics);
        summary.sentinel = Some(reconciliation.sentinel);
        summary.acceptance = reconciliation.acceptance;
    }

    if command.compares() {
        let mut table: PairTable =
            compare_pairs(&order, &measurements, config.priority, config.averaging)?;

        if let Some(ref focus) = config.focus {
            table.retain(|pair| pair.contains(focus));
        }

        if command.writes() {
            exporter.pairs(&table)?;
        }

        summary.pairs = iproduct!(table.iter(), config.metrics.iter())
            .map(|(set, metric)| summarize_pair(set, *metric))
            .collect();
    }

    if command.writes() {
        exporter.summary(&summary)?;
    }

    info!(
        repeats = measurements.repeats().len(),
        pairs = summary.pairs.len(),
        "Done with processing"
    );

    Ok(summary)
}
