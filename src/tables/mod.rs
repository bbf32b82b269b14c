pub mod extractor;
pub mod flat;
pub mod trials;
pub mod types;

pub use extractor::{extract_section, table_extractor, Extractor, SessionTables};
pub use flat::{extract_a, extract_d, extract_g, FlatTable};
pub use trials::{extract_k, split_trials, TrialTable};
pub use types::{Row, Table, TableExtractor};
