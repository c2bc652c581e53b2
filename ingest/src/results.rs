use crate::error::IngestError;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use rtan_analysis::ResultRecord;
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};
use tracing::debug;

/// Parse one result table.
///
/// The header row names the columns, so column order is free and the
/// legacy `pri_wei_*` headers are accepted next to the current ones.
pub fn read_results_from<R: Read>(
    reader: R,
    origin: &Path,
) -> Result<Vec<ResultRecord>, IngestError> {
    ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader)
        .deserialize()
        .collect::<Result<Vec<ResultRecord>, _>>()
        .map_err(|error| IngestError::csv(origin, error))
}

#[tracing::instrument(level = "debug")]
pub fn read_results(path: &Path) -> Result<Vec<ResultRecord>, IngestError> {
    let file = File::open(path).map_err(|error| IngestError::io(path, error))?;
    let records = read_results_from(BufReader::new(file), path)?;

    debug!(records = records.len(), "Read result table");

    Ok(records)
}

/// write `records` with the current column names, header first
pub fn write_results_to<W: Write>(writer: W, records: &[ResultRecord]) -> Result<(), IngestError> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);

    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;

    Ok(())
}

#[tracing::instrument(level = "debug", skip(records), fields(records = records.len()))]
pub fn write_results(path: &Path, records: &[ResultRecord]) -> Result<(), IngestError> {
    let file = File::create(path).map_err(|error| IngestError::io(path, error))?;

    write_results_to(BufWriter::new(file), records)
}
