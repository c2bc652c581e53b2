use crate::error::IngestError;
use rtan_analysis::ApplicationManifest;
use serde::Deserialize;
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};
use tracing::debug;

/// one entry of the deploy request sent to the scheduler
///
/// The request carries more (resources, images, ...) than the analysis needs;
/// those fields are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApplicationRequest {
    pub name: String,
    pub priority: u32,
}

pub fn parse_manifest<R: Read>(
    reader: R,
    repeat: usize,
    origin: &Path,
) -> Result<ApplicationManifest, IngestError> {
    let requests: Vec<ApplicationRequest> =
        serde_json::from_reader(reader).map_err(|error| IngestError::json(origin, error))?;

    Ok(ApplicationManifest::new(
        repeat,
        requests
            .into_iter()
            .map(|request| (request.name, request.priority)),
    )?)
}

#[tracing::instrument(level = "debug")]
pub fn read_manifest(path: &Path, repeat: usize) -> Result<ApplicationManifest, IngestError> {
    let file = File::open(path).map_err(|error| IngestError::io(path, error))?;
    let manifest = parse_manifest(BufReader::new(file), repeat, path)?;

    debug!(applications = manifest.len(), "Read request manifest");

    Ok(manifest)
}
