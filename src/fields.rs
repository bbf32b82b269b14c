//! Field name tables for the lettered sections of a MedPC session.
//!
//! Each lettered section is a flat numeric array. The position of a value in
//! that array is its meaning, fixed by the box program that wrote the file, so
//! the names below are the only mapping from index to column.

use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Column holding the session subject in every table
pub const SUBJECT_COLUMN: &str = "Subject";

/// Column holding the ISO session date in every table
pub const DATE_COLUMN: &str = "Date";

/// Control/session parameters (A)
pub const A_FIELD_NAMES: &[&str] = &[
    "Trials to Run",
    "Response (Limited Hold) Time (sec)",
    "Time Out (sec)",
    "Reward (1=Pellet  2=Dipper)",
    "Reward Duration (sec)",
    "Session Time (min)",
];

/// Summary response counts (D)
pub const D_FIELD_NAMES: &[&str] = &[
    "Correct Responses",
    "Incorrect Responses",
    "Omissions",
    "Premature ITI Wall Responses",
    "Perseverant Responses",
    "Time Out Responses",
    "Total Receptacle Head Entries",
    "Total Wall Entries",
    "D8_NotUsed",
    "D9_NotUsed",
    "D10_NotUsed",
    "D11_NotUsed",
    "D12_NotUsed",
    "Reward Port Head Entries During TimeOut (Incorrect/Omission)",
    "Wall Head Entries During TimeOut (Incorrect/Omission)",
    "Reward Port Head Entries During TimeOut (Premature)",
    "Wall Head Entries During TimeOut (Premature)",
    "Reward Port Head Entries During Tone Trials",
    "Wall Head Entries During Tone Trials",
    "Initiated Trials",
    "Passive Trials",
    "Time (sec)",
];

/// Summary latencies (G)
pub const G_FIELD_NAMES: &[&str] = &[
    "Average Latency to Correct Response",
    "Average Latency to Incorrect Response",
    "Average Latency to Reward",
    "G3_NotUsed",
    "G4_NotUsed",
    "Total Latency Time to Correct Response",
    "Total Latency Time to Incorrect Response",
    "Total Latency Time to Reward",
];

/// Trial-by-trial record layout (K)
///
/// The K array is a sequence of fixed-width trial records with no boundary
/// marker, so the length of this table is also the record width.
pub const K_FIELD_NAMES: &[&str] = &[
    "Trial Number",
    "Nose Poke Stimulus Location (1-5)",
    "First Response to Stimulus (1-5,0=Omission)",
    "Correct Response Latency",
    "Incorrect Response Latency",
    "Latency to Reward",
    "Omission Error",
    "Perseverant Responses to NP #1",
    "Perseverant Responses to NP #2",
    "Perseverant Responses to NP #3",
    "Perseverant Responses to NP #4",
    "Perseverant Responses to NP #5",
    "Trial type Tone or No Tone (0=No Tone,1=Tone)",
    "Timestamp of Light Cue Onset",
    "Timestamp of Tone Onset",
    "Tipo de recompensa (0=small,1=large)",
    "Premature ITI Responses",
    "Time Out Responses",
    "All Receptacle Head Entries (Trial By Trial)",
    "Cue Duration",
    "ITI Duration",
    "Modo de ensayo (0=SIMPLE,1=DUAL)",
    "Trial type (1 normal, 0 forced)",
    "Timestamp of Trial Start",
    "Reward Retrieval Omission (1=yes,0=no)",
    "Number of Times Dipper Goes Up",
    "Timestamp of Head Entry to Reward Port After Correct Response",
    "Head Entries to Reward During Time Out (trial level)",
    "Head Entries to Wall During Time Out (trial level)",
    "Head Entries to Reward During Time Out for Premature Trials",
    "Head Entries to Wall During Time Out for Premature Trials",
    "Head Entries to Reward Port During Tone-Only Trials",
    "Head Entries to Wall During Tone-Only Trials",
    "Prior Trial Initiation Entries into Reward Port",
    "Prior Trial Initiation Entries into Wall",
    "Timestamp of End of Trial",
];

/// Name of the K field that orders trials within a session
pub const TRIAL_NUMBER_FIELD: &str = "Trial Number";

/// Lettered sections extracted from a session block
#[derive(
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Display,
    EnumIter,
    EnumString,
    Eq,
    Hash,
    PartialEq,
)]
pub enum Section {
    /// Control/session parameters
    A,
    /// Summary response counts
    D,
    /// Summary latencies
    G,
    /// Trial-by-trial records
    K,
}

impl Section {
    /// Single-letter tag that opens the section inside a block
    pub fn tag(&self) -> char {
        match self {
            Section::A => 'A',
            Section::D => 'D',
            Section::G => 'G',
            Section::K => 'K',
        }
    }

    /// Ordered field names for this section
    pub fn field_names(&self) -> &'static [&'static str] {
        match self {
            Section::A => A_FIELD_NAMES,
            Section::D => D_FIELD_NAMES,
            Section::G => G_FIELD_NAMES,
            Section::K => K_FIELD_NAMES,
        }
    }

    /// Number of named fields, which for K is also the trial record width
    pub fn width(&self) -> usize {
        self.field_names().len()
    }

    /// Position of a named field, if the section has it
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.field_names().iter().position(|field| *field == name)
    }

    /// Full column list of a table for this section: Subject, Date, then fields
    pub fn column_names(&self) -> Vec<&'static str> {
        let mut columns = Vec::with_capacity(self.width() + 2);
        columns.push(SUBJECT_COLUMN);
        columns.push(DATE_COLUMN);
        columns.extend_from_slice(self.field_names());
        columns
    }

    /// Whether the section is reshaped into one row per trial
    pub fn is_trial_section(&self) -> bool {
        matches!(self, Section::K)
    }
}
