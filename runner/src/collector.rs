use crate::config::{ConfigErrors, DataConfig};
use globset::GlobMatcher;
use ignore::{DirEntry, WalkBuilder};
use itertools::Itertools;
use rtan_analysis::AlgorithmOrder;
use std::{collections::BTreeMap, path::PathBuf};
use tracing::{debug, warn};

/// Files making up one repeat of an experiment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatFiles {
    pub repeat: usize,
    pub manifest: PathBuf,
    /// result tables per algorithm, empty when the algorithm accepted nothing
    pub tables: BTreeMap<String, Vec<PathBuf>>,
}

/// Locates repeats and result tables below the data root,
/// laid out as `<root>/repeat{N}/<algorithm>/<table>`
#[derive(Debug)]
pub struct Collector {
    root: PathBuf,
    manifest: String,
    matcher: GlobMatcher,
}

impl Collector {
    pub fn load(config: &DataConfig) -> Result<Self, ConfigErrors> {
        let matcher = config.compile_glob()?;

        debug!("Filtering with glob: {:?}", matcher.glob());

        Ok(Self {
            root: config.path.clone(),
            manifest: config.manifest.clone(),
            matcher,
        })
    }

    pub fn repeat_dir(&self, repeat: usize) -> PathBuf {
        self.root.join(format!("repeat{repeat}"))
    }

    /// number of contiguous `repeat{N}` folders starting at 1
    pub fn discover_repeats(&self) -> usize {
        let count = (1..)
            .take_while(|repeat| self.repeat_dir(*repeat).is_dir())
            .count();

        debug!(repeats = count, root = ?self.root, "Discovered repeats");

        count
    }

    /// all files of `repeat`, tables sorted by path
    pub fn collect(&self, repeat: usize, order: &AlgorithmOrder) -> RepeatFiles {
        let dir = self.repeat_dir(repeat);

        let tables = order
            .iter()
            .map(|algorithm| {
                let folder = dir.join(algorithm);

                if !folder.is_dir() {
                    warn!(
                        repeat,
                        algorithm = %algorithm,
                        "No result folder, treating every application as rejected"
                    );

                    return (algorithm.to_string(), Vec::new());
                }

                (algorithm.to_string(), self.tables(folder))
            })
            .collect();

        RepeatFiles {
            repeat,
            manifest: dir.join(&self.manifest),
            tables,
        }
    }

    fn tables(&self, folder: PathBuf) -> Vec<PathBuf> {
        WalkBuilder::new(&folder)
            // .gitignore and hidden-file rules must not hide data
            .standard_filters(false)
            .max_depth(Some(1))
            .build()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Failed to search for result tables in {folder:?}: {e}");
                    None
                }
            })
            .filter(|entry| entry.file_type().map_or(false, |kind| kind.is_file()))
            .filter(|entry| self.matcher.is_match(entry.file_name()))
            .map(DirEntry::into_path)
            .sorted()
            .collect_vec()
    }
}
