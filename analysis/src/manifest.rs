use crate::error::DataIntegrityError;
use std::collections::HashMap;

/// Every application submitted in one repeat, in submission order.
///
/// This is the ground truth independent of what any algorithm accepted; it
/// is built once per repeat and never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationManifest {
    repeat: usize,
    entries: Vec<(String, u32)>,
    index: HashMap<String, usize>,
}

impl ApplicationManifest {
    /// build a manifest, rejecting applications submitted twice
    pub fn new<I, S>(repeat: usize, submissions: I) -> Result<Self, DataIntegrityError>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut entries = Vec::new();
        let mut index = HashMap::new();

        for (name, priority) in submissions {
            let name = name.into();

            if index.insert(name.clone(), entries.len()).is_some() {
                return Err(DataIntegrityError::DuplicateSubmission { repeat, app: name });
            }

            entries.push((name, priority));
        }

        Ok(Self {
            repeat,
            entries,
            index,
        })
    }

    pub fn repeat(&self) -> usize {
        self.repeat
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, app: &str) -> bool {
        self.index.contains_key(app)
    }

    /// requested priority of `app`
    pub fn priority(&self, app: &str) -> Option<u32> {
        self.index.get(app).map(|&idx| self.entries[idx].1)
    }

    /// iterate (name, priority) in submission order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.entries
            .iter()
            .map(|(name, priority)| (name.as_str(), *priority))
    }
}
