//! medpclog - Session and section extraction for MedPC behavioural logs
//!
//! MedPC writes one or more experimental sessions per data file, each with
//! lettered numeric arrays (A, D, G, K, ...). This library splits those files
//! into sessions and turns the arrays into named tables.
//!
//! ## Module Structure
//!
//! - [`fields`] - Field name tables for each lettered section
//! - [`parsers`] - Session splitting and section decoding
//! - [`settings`] - File selection and parsing settings
//! - [`tables`] - Row/table model and the per-section extractors
//!
//! ## Example
//!
//! ```no_run
//! let table = medpclog::extract_k("data/cohort1")?;
//! for row in table.rows() {
//!     println!("{} {} trial {:?}", row.subject, row.date, row.trial_number());
//! }
//! # Ok::<(), medpclog::ExtractError>(())
//! ```

pub mod fields;
pub mod parsers;
pub mod settings;
pub mod tables;

pub use fields::Section;
pub use parsers::types::{ExtractError, SectionValues, SessionBlock};
pub use settings::ExtractSettings;
pub use tables::{extract_a, extract_d, extract_g, extract_k, Extractor, Row, SessionTables, Table};
