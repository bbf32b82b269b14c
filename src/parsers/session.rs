//! Session splitter for MedPC data files
//!
//! A data file is a concatenation of session blocks, each opened by a
//! `Start Date:` header line:
//!
//! ```text
//! File: C:\MED-PC\Data\!2023-07-14_09h12m.Subject R1
//!
//! Start Date: 07/14/23
//! End Date: 07/14/23
//! Subject: R1
//! Experiment: 5CSRTT
//! ...
//! A:
//!      0:       10.000        5.000       15.000        1.000        2.000
//!      5:       10.000
//! ...
//! Start Date: 07/14/23
//! ...
//! ```
//!
//! Anything before the first header is preamble and is dropped.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::vec;

use super::types::{ExtractError, SessionBlock, SessionField};
use crate::settings::ExtractSettings;

/// Splits data files into session blocks and reads their subject and date
#[derive(Clone, Debug)]
pub struct SessionSplitter {
    settings: ExtractSettings,
    date_regex: Regex,
    subject_regex: Regex,
}

impl Default for SessionSplitter {
    fn default() -> Self {
        Self::new(&ExtractSettings::default())
    }
}

impl SessionSplitter {
    pub fn new(settings: &ExtractSettings) -> Self {
        let date_pattern = format!(
            r"{}\s*(?<month>[0-9]{{2}})/(?<day>[0-9]{{2}})/(?<year>[0-9]{{2}})",
            regex::escape(&settings.session_header)
        );
        let subject_pattern = format!(
            r"{}\s*(?<subject>\S+)",
            regex::escape(&settings.subject_label)
        );

        Self {
            settings: settings.clone(),
            date_regex: Regex::new(&date_pattern).expect("Failed to compile regex"),
            subject_regex: Regex::new(&subject_pattern).expect("Failed to compile regex"),
        }
    }

    /// Whether a file name selects a data file
    pub fn is_data_file_name(&self, file_name: &str) -> bool {
        self.settings.matches_file_name(file_name)
    }

    /// List data files directly inside `folder`, in directory order
    pub fn discover_files(&self, folder: &Path) -> Result<Vec<PathBuf>, ExtractError> {
        let read_dir_error = |source: std::io::Error| ExtractError::ReadDir {
            path: folder.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(folder).map_err(read_dir_error)? {
            let entry = entry.map_err(read_dir_error)?;
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };

            let path = entry.path();
            if self.is_data_file_name(file_name) && path.is_file() {
                files.push(path);
            }
        }

        if files.is_empty() {
            tracing::warn!("No data files found in {:?}", folder);
        } else {
            tracing::info!("Found {} data files in {:?}", files.len(), folder);
        }

        Ok(files)
    }

    /// Read one data file and split it into session blocks
    pub fn read_file(&self, path: &Path) -> Result<Vec<SessionBlock>, ExtractError> {
        let text = fs::read_to_string(path).map_err(|source| ExtractError::UnreadableFile {
            path: path.to_path_buf(),
            source,
        })?;

        let blocks = self.split(&text, path)?;
        tracing::info!("Read {} sessions from {:?}", blocks.len(), path);
        Ok(blocks)
    }

    /// Split file text into session blocks
    ///
    /// `source` is only recorded on the blocks and in errors.
    pub fn split(&self, text: &str, source: &Path) -> Result<Vec<SessionBlock>, ExtractError> {
        let header = self.settings.session_header.as_str();
        let mut starts: Vec<usize> = text.match_indices(header).map(|(i, _)| i).collect();
        if starts.first() != Some(&0) {
            starts.insert(0, 0);
        }

        let mut blocks = Vec::new();
        for (i, &start) in starts.iter().enumerate() {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            let piece = &text[start..end];

            if !piece.trim_start().starts_with(header) {
                continue;
            }

            let block = self.parse_block(piece, source, blocks.len(), start)?;
            blocks.push(block);
        }

        Ok(blocks)
    }

    /// Read subject and date from one block
    fn parse_block(
        &self,
        piece: &str,
        source: &Path,
        index: usize,
        offset: usize,
    ) -> Result<SessionBlock, ExtractError> {
        let malformed = |missing: SessionField| ExtractError::MalformedSession {
            path: source.to_path_buf(),
            block: index,
            offset,
            missing,
        };

        let date = self
            .date_regex
            .captures(piece)
            .map(|c| format!("20{}-{}-{}", &c["year"], &c["month"], &c["day"]))
            .ok_or_else(|| malformed(SessionField::StartDate))?;

        let subject = self
            .subject_regex
            .captures(piece)
            .map(|c| c["subject"].to_string())
            .ok_or_else(|| malformed(SessionField::Subject))?;

        Ok(SessionBlock {
            subject,
            date,
            text: piece.to_string(),
            source: source.to_path_buf(),
            index,
            offset,
        })
    }

    /// Lazily iterate over every session block of every data file in `folder`
    ///
    /// The folder is listed up front; each file is read only when the
    /// iterator reaches it. Iteration stops after the first error.
    pub fn sessions(&self, folder: &Path) -> Result<Sessions, ExtractError> {
        let files = self.discover_files(folder)?;
        Ok(Sessions {
            splitter: self.clone(),
            files: files.into_iter(),
            pending: Vec::new().into_iter(),
            failed: false,
        })
    }
}

/// Iterate over the session blocks in `folder` using default settings
pub fn iter_sessions(folder: &Path) -> Result<Sessions, ExtractError> {
    SessionSplitter::default().sessions(folder)
}

/// Lazy sequence of session blocks across the data files of a folder
pub struct Sessions {
    splitter: SessionSplitter,
    files: vec::IntoIter<PathBuf>,
    pending: vec::IntoIter<SessionBlock>,
    failed: bool,
}

impl Iterator for Sessions {
    type Item = Result<SessionBlock, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            if let Some(block) = self.pending.next() {
                return Some(Ok(block));
            }

            let path = self.files.next()?;
            match self.splitter.read_file(&path) {
                Ok(blocks) => self.pending = blocks.into_iter(),
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
