use super::{Executor, ExecutorError};
use crate::{
    collector::{Collector, RepeatFiles},
    config::{AnalysisConfig, ConfigErrors},
};
use itertools::Itertools;
use rayon::{prelude::*, ThreadPool, ThreadPoolBuilder};
use rtan_analysis::{AlgorithmOrder, Measurements, RepeatInput, ResultRecord};
use rtan_ingest::{read_manifest, read_results, IngestError};
use std::{
    collections::BTreeMap,
    path::PathBuf,
    sync::atomic::{AtomicUsize, Ordering},
};
use tracing::{debug, info, instrument};
use tracing_unwrap::ResultExt;

/// Executor that loads repeats concurrently on a local thread pool
pub struct LocalExecutor {
    collector: Collector,
    order: AlgorithmOrder,
    root: PathBuf,
    repeats: Option<usize>,
    pool: ThreadPool,
}

impl Executor for LocalExecutor {
    fn load(config: &AnalysisConfig) -> Result<Self, ConfigErrors> {
        // 0 lets rayon choose
        let thread_number = config.threads.unwrap_or(0);

        debug!("Starting thread pool with {thread_number} threads");

        let pool = ThreadPoolBuilder::new()
            .num_threads(thread_number)
            .thread_name(|idx| format!("rtan-loader-{idx}"))
            .build()
            .unwrap_or_log();

        Ok(Self {
            collector: Collector::load(&config.data)?,
            order: config.order(),
            root: config.data.path.clone(),
            repeats: config.data.repeats,
            pool,
        })
    }

    /// load every repeat in parallel, each into its own immutable input
    #[instrument(skip(self), level = "info")]
    fn execute(&self) -> Result<Measurements, ExecutorError> {
        let total = self
            .repeats
            .unwrap_or_else(|| self.collector.discover_repeats());

        if total == 0 {
            return Err(ExecutorError::NoRepeats(self.root.clone()));
        }

        let processed = AtomicUsize::new(0);

        let inputs = self.pool.install(|| {
            (1..=total)
                .into_par_iter()
                .map(|repeat| {
                    let input = load_repeat(self.collector.collect(repeat, &self.order))
                        .map_err(|source| ExecutorError::Load { repeat, source })?;

                    info!(
                        "Done with {}/{total}",
                        processed.fetch_add(1, Ordering::SeqCst) + 1
                    );

                    Ok(input)
                })
                .collect::<Result<Vec<_>, ExecutorError>>()
        })?;

        Ok(Measurements::from_repeats(inputs))
    }
}

#[instrument(level = "debug", skip_all, fields(repeat = files.repeat))]
pub fn load_repeat(files: RepeatFiles) -> Result<RepeatInput, IngestError> {
    let manifest = read_manifest(&files.manifest, files.repeat)?;

    let measurements = files
        .tables
        .into_iter()
        .map(|(algorithm, tables)| {
            let records = tables
                .iter()
                .map(|table| read_results(table))
                .flatten_ok()
                .collect::<Result<Vec<ResultRecord>, _>>()?;

            debug!(algorithm = %algorithm, tables = tables.len(), records = records.len(), "Loaded results");

            Ok((algorithm, records))
        })
        .collect::<Result<BTreeMap<_, _>, IngestError>>()?;

    Ok(RepeatInput::new(manifest, measurements))
}
