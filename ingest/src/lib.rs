//! Readers and writers for the files an experiment run leaves behind:
//! per-algorithm result CSVs and the per-repeat request manifest.

pub mod error;
pub mod manifest;
pub mod results;


pub use error::IngestError;
pub use manifest::{parse_manifest, read_manifest, ApplicationRequest};
pub use results::{read_results, read_results_from, write_results, write_results_to};
