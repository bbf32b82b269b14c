//! Lettered section decoder
//!
//! A section opens on a line starting with `<tag>:` and continues through the
//! run of indented payload lines that follows it:
//!
//! ```text
//! K:
//!      0:        1.000        3.000        1.000        2.340
//!      5:        0.000        0.000        0.000        0.000
//! ```
//!
//! Each payload line carries a start index followed by the values stored at
//! consecutive indices from there. The box software wraps long arrays at an
//! arbitrary column count, so nothing may be assumed about run lengths.

use regex::Regex;
use std::sync::LazyLock;

use super::types::SectionValues;
use crate::fields::Section;

/// `<index>: <values...>` with optional leading whitespace
static PAYLOAD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?<index>[0-9]+):\s*(?<values>.*)$").expect("Failed to compile regex")
});

/// Number of leading spaces a payload line needs in standard exports
pub const DEFAULT_PAYLOAD_INDENT: usize = 4;

/// Decoder for the indexed numeric payload of a lettered section
#[derive(Clone, Debug)]
pub struct SectionDecoder {
    indent: String,
}

impl Default for SectionDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_PAYLOAD_INDENT)
    }
}

impl SectionDecoder {
    pub fn new(payload_indent: usize) -> Self {
        Self {
            indent: " ".repeat(payload_indent),
        }
    }

    /// Decode one of the known sections from a session block
    pub fn decode(&self, block: &str, section: Section) -> SectionValues {
        self.decode_tag(block, section.tag())
    }

    /// Decode the section opened by `<tag>:` from a session block
    ///
    /// Returns an empty mapping when the block has no such section. Lines
    /// inside the section that do not parse are skipped.
    pub fn decode_tag(&self, block: &str, tag: char) -> SectionValues {
        let opener = format!("{}:", tag);
        let mut values = SectionValues::new();
        let mut lines = block.lines();

        // Everything up to and including the opening line is ignored
        if !lines.any(|line| line.starts_with(&opener)) {
            return values;
        }

        for line in lines {
            if !line.starts_with(&self.indent) {
                break;
            }

            match parse_payload_line(line) {
                Some((start, numbers)) => {
                    for (offset, value) in numbers.into_iter().enumerate() {
                        values.insert(start + offset, value);
                    }
                }
                None => {
                    tracing::debug!("Skipping unparseable {} payload line: {:?}", tag, line);
                }
            }
        }

        values
    }
}

/// Decode a section using the standard payload indent
pub fn decode_section(block: &str, section: Section) -> SectionValues {
    SectionDecoder::default().decode(block, section)
}

/// Split a payload line into its start index and values
///
/// Returns `None` if the line lacks the `<index>:` prefix, if any value token
/// is not a number, or if the run would overflow the index space.
fn parse_payload_line(line: &str) -> Option<(usize, Vec<f64>)> {
    let captures = PAYLOAD_LINE.captures(line)?;
    let start: usize = captures["index"].parse().ok()?;

    let numbers = captures["values"]
        .split_whitespace()
        .map(str::parse::<f64>)
        .collect::<Result<Vec<_>, _>>()
        .ok()?;

    start.checked_add(numbers.len())?;
    Some((start, numbers))
}
