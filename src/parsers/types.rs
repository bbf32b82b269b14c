use std::collections::BTreeMap;
use std::path::PathBuf;
use strum::{AsRefStr, Display};
use thiserror::Error;

/// Session header fields that must be present in every block
#[derive(AsRefStr, Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum SessionField {
    #[strum(serialize = "Start Date")]
    StartDate,
    #[strum(serialize = "Subject")]
    Subject,
}

/// Errors that abort an extraction
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The data folder could not be listed
    #[error("Failed to read data folder {path:?}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data file could not be opened or is not valid UTF-8
    #[error("Failed to read log file {path:?}: {source}")]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A session block is missing its date or subject header
    #[error("Malformed session in {path:?} (block {block}, byte offset {offset}): missing {missing}")]
    MalformedSession {
        path: PathBuf,
        block: usize,
        offset: usize,
        missing: SessionField,
    },
}

/// One experimental session cut out of a log file
#[derive(Clone, Debug)]
pub struct SessionBlock {
    /// Subject identifier from the `Subject:` header
    pub subject: String,
    /// Session date as `YYYY-MM-DD`
    pub date: String,
    /// Raw block text, header line included
    pub text: String,
    /// File the block was read from
    pub source: PathBuf,
    /// Ordinal of the block within its file
    pub index: usize,
    /// Byte offset of the block within its file
    pub offset: usize,
}

/// Sparse index -> value mapping decoded from one lettered section
///
/// An index missing from the map means the session carried no value there,
/// which is distinct from a stored `0.0`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectionValues {
    values: BTreeMap<usize, f64>,
}

impl SectionValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, replacing any earlier value at the same index
    pub fn insert(&mut self, index: usize, value: f64) {
        self.values.insert(index, value);
    }

    /// Value at an index, `None` if the section never reached it
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(&index).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Highest index present
    pub fn max_index(&self) -> Option<usize> {
        self.values.keys().next_back().copied()
    }

    /// Present `(index, value)` pairs in ascending index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values.iter().map(|(&index, &value)| (index, value))
    }

    /// Project onto `width` leading positions, one slot per position
    pub fn project(&self, width: usize) -> Vec<Option<f64>> {
        (0..width).map(|index| self.get(index)).collect()
    }
}

impl FromIterator<(usize, f64)> for SectionValues {
    fn from_iter<I: IntoIterator<Item = (usize, f64)>>(iter: I) -> Self {
        let mut values = SectionValues::new();
        for (index, value) in iter {
            values.insert(index, value);
        }
        values
    }
}
