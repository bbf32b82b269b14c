use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;

use crate::fields::{Section, DATE_COLUMN, SUBJECT_COLUMN};
use crate::parsers::section::SectionDecoder;
use crate::parsers::types::SessionBlock;

/// One output record: a session (A/D/G) or a single trial of a session (K)
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    pub section: Section,
    pub subject: String,
    pub date: String,
    /// One slot per field of `section`, `None` where the session had no value
    pub values: Vec<Option<f64>>,
}

impl Row {
    /// Build a row, padding with `None` or truncating to the section width
    pub fn new(section: Section, subject: &str, date: &str, mut values: Vec<Option<f64>>) -> Self {
        values.resize(section.width(), None);
        Self {
            section,
            subject: subject.to_string(),
            date: date.to_string(),
            values,
        }
    }

    /// Value of a named field; the outer `None` means the section has no such field
    pub fn field(&self, name: &str) -> Option<Option<f64>> {
        self.section
            .field_index(name)
            .map(|index| self.values.get(index).copied().flatten())
    }

    /// Trial number of a K row
    pub fn trial_number(&self) -> Option<f64> {
        if self.section.is_trial_section() {
            self.values.first().copied().flatten()
        } else {
            None
        }
    }
}

impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let names = self.section.field_names();
        let mut map = serializer.serialize_map(Some(names.len() + 2))?;
        map.serialize_entry(SUBJECT_COLUMN, &self.subject)?;
        map.serialize_entry(DATE_COLUMN, &self.date)?;
        for (name, value) in names.iter().zip(&self.values) {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Sorted rows extracted for one lettered section
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    section: Section,
    rows: Vec<Row>,
}

impl Table {
    /// Wrap rows that are already in their final order
    pub fn new(section: Section, rows: Vec<Row>) -> Self {
        Self { section, rows }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in table order; the slice index is the row index
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Column names: Subject, Date, then the section's fields
    pub fn columns(&self) -> Vec<&'static str> {
        self.section.column_names()
    }

    /// All values of a named field, top to bottom
    pub fn column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let index = self.section.field_index(name)?;
        Some(self.rows.iter().map(|row| row.values[index]).collect())
    }

    /// Subject of every row, top to bottom
    pub fn subjects(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.subject.as_str()).collect()
    }

    /// Date of every row, top to bottom
    pub fn dates(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.date.as_str()).collect()
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(&self.rows)
    }
}

/// Turns decoded session blocks into rows for one section
pub trait TableExtractor: Send + Sync {
    /// Section this extractor reads
    fn section(&self) -> Section;

    /// Rows contributed by one session block
    fn rows(&self, session: &SessionBlock, decoder: &SectionDecoder) -> Vec<Row>;

    /// Put rows into final table order; must be a stable sort
    fn sort(&self, rows: &mut [Row]) {
        rows.sort_by(compare_sessions);
    }
}

/// Order rows by subject, then ISO date
pub fn compare_sessions(a: &Row, b: &Row) -> Ordering {
    a.subject
        .cmp(&b.subject)
        .then_with(|| a.date.cmp(&b.date))
}
