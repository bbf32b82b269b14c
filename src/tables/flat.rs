//! One-row-per-session tables (A, D and G sections)

use std::path::Path;

use super::extractor::extract_section;
use super::types::{Row, Table, TableExtractor};
use crate::fields::Section;
use crate::parsers::section::SectionDecoder;
use crate::parsers::types::{ExtractError, SessionBlock};

/// Projects a section's sparse values onto its field list, one row per session
///
/// A session without the section still gets a row, with every field `None`.
#[derive(Clone, Copy, Debug)]
pub struct FlatTable {
    section: Section,
}

impl FlatTable {
    pub fn new(section: Section) -> Self {
        Self { section }
    }
}

impl TableExtractor for FlatTable {
    fn section(&self) -> Section {
        self.section
    }

    fn rows(&self, session: &SessionBlock, decoder: &SectionDecoder) -> Vec<Row> {
        let values = decoder.decode(&session.text, self.section);
        vec![Row::new(
            self.section,
            &session.subject,
            &session.date,
            values.project(self.section.width()),
        )]
    }
}

/// Control/session parameters, one row per session
pub fn extract_a(folder: impl AsRef<Path>) -> Result<Table, ExtractError> {
    extract_section(folder.as_ref(), Section::A)
}

/// Summary response counts, one row per session
pub fn extract_d(folder: impl AsRef<Path>) -> Result<Table, ExtractError> {
    extract_section(folder.as_ref(), Section::D)
}

/// Summary latencies, one row per session
pub fn extract_g(folder: impl AsRef<Path>) -> Result<Table, ExtractError> {
    extract_section(folder.as_ref(), Section::G)
}
