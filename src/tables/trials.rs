//! One-row-per-trial table (K section)
//!
//! The K array holds fixed-width trial records back to back with nothing
//! marking where one trial ends. A value's trial is `index / width` and its
//! slot is `index % width`, so a gap in the indices stays a gap instead of
//! shifting every later trial. Only trials holding a value are materialized.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::Path;

use super::extractor::extract_section;
use super::types::{compare_sessions, Row, Table, TableExtractor};
use crate::fields::{Section, K_FIELD_NAMES};
use crate::parsers::section::SectionDecoder;
use crate::parsers::types::{ExtractError, SectionValues, SessionBlock};

/// Reshapes the K section into trial rows
#[derive(Clone, Copy, Debug, Default)]
pub struct TrialTable;

impl TableExtractor for TrialTable {
    fn section(&self) -> Section {
        Section::K
    }

    fn rows(&self, session: &SessionBlock, decoder: &SectionDecoder) -> Vec<Row> {
        let values = decoder.decode(&session.text, Section::K);
        if values.is_empty() {
            tracing::debug!(
                "No trials recorded for {} on {} ({:?} block {})",
                session.subject,
                session.date,
                session.source,
                session.index
            );
            return Vec::new();
        }

        split_trials(&values, K_FIELD_NAMES.len())
            .into_iter()
            .map(|trial| Row::new(Section::K, &session.subject, &session.date, trial))
            .collect()
    }

    fn sort(&self, rows: &mut [Row]) {
        rows.sort_by(|a, b| {
            compare_sessions(a, b).then_with(|| compare_trial_numbers(a, b))
        });
    }
}

/// Cut sparse K values into records of `width` slots
///
/// Records where every slot is `None` are dropped. The last record may be
/// shorter than `width`.
pub fn split_trials(values: &SectionValues, width: usize) -> Vec<Vec<Option<f64>>> {
    if width == 0 {
        return Vec::new();
    }

    let Some(max_index) = values.max_index() else {
        return Vec::new();
    };
    let last_trial = max_index / width;

    let mut trials: BTreeMap<usize, Vec<Option<f64>>> = BTreeMap::new();
    for (index, value) in values.iter() {
        let trial = index / width;
        let slots = if trial == last_trial {
            max_index % width + 1
        } else {
            width
        };
        trials.entry(trial).or_insert_with(|| vec![None; slots])[index % width] = Some(value);
    }

    trials.into_values().collect()
}

/// Order by trial number, rows without one last
fn compare_trial_numbers(a: &Row, b: &Row) -> Ordering {
    match (a.trial_number(), b.trial_number()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Trial-by-trial records, one row per trial
pub fn extract_k(folder: impl AsRef<Path>) -> Result<Table, ExtractError> {
    extract_section(folder.as_ref(), Section::K)
}
