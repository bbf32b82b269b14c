pub mod section;
pub mod session;
pub mod types;

pub use section::{decode_section, SectionDecoder};
pub use session::{iter_sessions, SessionSplitter, Sessions};
pub use types::{ExtractError, SectionValues, SessionBlock, SessionField};
