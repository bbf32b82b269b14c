//! Folder-level extraction driver

use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;

use super::flat::FlatTable;
use super::trials::TrialTable;
use super::types::{Row, Table, TableExtractor};
use crate::fields::Section;
use crate::parsers::section::SectionDecoder;
use crate::parsers::session::SessionSplitter;
use crate::parsers::types::{ExtractError, SessionBlock};
use crate::settings::ExtractSettings;

/// Row builder for a section
pub fn table_extractor(section: Section) -> Box<dyn TableExtractor> {
    match section {
        Section::A | Section::D | Section::G => Box::new(FlatTable::new(section)),
        Section::K => Box::new(TrialTable),
    }
}

/// All four tables from one pass over a folder
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionTables {
    pub a: Table,
    pub d: Table,
    pub g: Table,
    pub k: Table,
}

impl SessionTables {
    pub fn get(&self, section: Section) -> &Table {
        match section {
            Section::A => &self.a,
            Section::D => &self.d,
            Section::G => &self.g,
            Section::K => &self.k,
        }
    }
}

/// Reads session blocks from a folder and builds section tables from them
#[derive(Clone, Debug)]
pub struct Extractor {
    settings: ExtractSettings,
    splitter: SessionSplitter,
    decoder: SectionDecoder,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(ExtractSettings::default())
    }
}

impl Extractor {
    pub fn new(settings: ExtractSettings) -> Self {
        Self {
            splitter: SessionSplitter::new(&settings),
            decoder: SectionDecoder::new(settings.payload_indent),
            settings,
        }
    }

    pub fn settings(&self) -> &ExtractSettings {
        &self.settings
    }

    /// Every session block in the folder, stopping at the first error
    pub fn load_sessions(&self, folder: &Path) -> Result<Vec<SessionBlock>, ExtractError> {
        self.splitter.sessions(folder)?.collect()
    }

    /// Build the table for one section from the data files in `folder`
    pub fn extract(&self, folder: &Path, section: Section) -> Result<Table, ExtractError> {
        let sessions = self.load_sessions(folder)?;
        Ok(self.build_table(&sessions, section))
    }

    /// Build all four tables, reading the folder once
    pub fn extract_all(&self, folder: &Path) -> Result<SessionTables, ExtractError> {
        let sessions = self.load_sessions(folder)?;
        Ok(SessionTables {
            a: self.build_table(&sessions, Section::A),
            d: self.build_table(&sessions, Section::D),
            g: self.build_table(&sessions, Section::G),
            k: self.build_table(&sessions, Section::K),
        })
    }

    /// Build and sort the table for one section from already split sessions
    pub fn build_table(&self, sessions: &[SessionBlock], section: Section) -> Table {
        let extractor = table_extractor(section);
        let extractor = extractor.as_ref();

        // Collecting keeps encounter order, which the stable sort relies on
        let per_session: Vec<Vec<Row>> = if self.settings.parallel {
            sessions
                .par_iter()
                .map(|session| extractor.rows(session, &self.decoder))
                .collect()
        } else {
            sessions
                .iter()
                .map(|session| extractor.rows(session, &self.decoder))
                .collect()
        };

        let mut rows: Vec<Row> = per_session.into_iter().flatten().collect();
        extractor.sort(&mut rows);

        tracing::info!(
            "Extracted {} rows for section {} from {} sessions",
            rows.len(),
            section,
            sessions.len()
        );

        Table::new(section, rows)
    }
}

/// Extract one section from `folder` with default settings
pub fn extract_section(folder: &Path, section: Section) -> Result<Table, ExtractError> {
    Extractor::default().extract(folder, section)
}
