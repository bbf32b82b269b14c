//! Tests for the lettered section decoder
//!
//! Tests cover:
//! - Payload continuation and the four-space indent rule
//! - Values wrapped across lines and index gaps
//! - Overlapping runs and malformed payload lines
//! - Sections that are absent or empty

#[path = "../common/mod.rs"]
mod common;

use common::example_files::*;
use common::synthetic::*;
use common::example_path;
use medpclog::parsers::section::{decode_section, SectionDecoder};
use medpclog::parsers::session::SessionSplitter;
use medpclog::Section;

// ============================================
// Continuation Tests
// ============================================

#[test]
fn test_wrapped_values_follow_line_index() {
    let values: Vec<f64> = (0..12).map(|i| i as f64 * 1.5).collect();
    let block = SessionText::new("07/14/23", "R1").section('D', &values).build();

    let decoded = decode_section(&block, Section::D);

    assert_eq!(decoded.len(), 12);
    for (i, expected) in values.iter().enumerate() {
        assert_eq!(decoded.get(i), Some(*expected), "Index {}", i);
    }
}

#[test]
fn test_line_with_three_spaces_closes_section() {
    let block = "K:\n    0: 1 2\n   2: 3 4\n    4: 5 6\n";
    let decoded = decode_section(block, Section::K);

    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded.get(2), None);
    assert_eq!(decoded.get(4), None);
}

#[test]
fn test_blank_line_closes_section() {
    let block = "A:\n     0: 10 5\n\n     2: 15 1\n";
    let decoded = decode_section(block, Section::A);
    assert_eq!(decoded.len(), 2);
}

#[test]
fn test_tab_indent_is_not_payload() {
    let block = "A:\n\t0: 10 5\n";
    assert!(decode_section(block, Section::A).is_empty());
}

#[test]
fn test_next_tag_closes_section() {
    let block = SessionText::new("07/14/23", "R1")
        .section('D', &[1.0, 2.0])
        .section('G', &[9.0, 9.0, 9.0])
        .build();

    let decoded = decode_section(&block, Section::D);
    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded.get(2), None);
}

#[test]
fn test_section_does_not_reopen() {
    let block = "A:\n     0: 1 2\nB:\nA:\n     0: 7 8 9\n";
    let decoded = decode_section(block, Section::A);

    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded.get(0), Some(1.0));
}

#[test]
fn test_lines_before_tag_are_ignored() {
    let block = "     0: 5 5 5\nG:\n     0: 1\n";
    let decoded = decode_section(block, Section::G);
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded.get(0), Some(1.0));
}

#[test]
fn test_tag_must_start_line() {
    let block = " K:\n     0: 1 2\nMSN: K:\n     0: 3\n";
    assert!(decode_section(block, Section::K).is_empty());
}

// ============================================
// Index Mapping Tests
// ============================================

#[test]
fn test_index_gaps_stay_absent() {
    let block = "K:\n     0: 1 2\n    10: 3\n";
    let decoded = decode_section(block, Section::K);

    assert_eq!(decoded.len(), 3);
    assert_eq!(decoded.max_index(), Some(10));
    assert_eq!(decoded.get(5), None);
}

#[test]
fn test_size_is_sum_of_runs() {
    let block = "D:\n     0: 1 2 3\n     3: 4\n     4: 5 6 7 8\n";
    assert_eq!(decode_section(block, Section::D).len(), 3 + 1 + 4);
}

#[test]
fn test_overlapping_runs_last_write_wins() {
    let block = "D:\n     0: 1 2 3\n     2: 30 40\n";
    let decoded = decode_section(block, Section::D);

    assert_eq!(decoded.len(), 4);
    assert_eq!(decoded.get(2), Some(30.0));
    assert_eq!(decoded.get(3), Some(40.0));
}

#[test]
fn test_zero_values_are_present() {
    let decoded = decode_section("G:\n     0: 0 0.000\n", Section::G);
    assert_eq!(decoded.get(0), Some(0.0));
    assert_eq!(decoded.get(1), Some(0.0));
    assert_eq!(decoded.get(2), None);
}

#[test]
fn test_scientific_and_negative_values() {
    let decoded = decode_section("A:\n     0: -1.5 2e3 +4\n", Section::A);
    assert_eq!(decoded.get(0), Some(-1.5));
    assert_eq!(decoded.get(1), Some(2000.0));
    assert_eq!(decoded.get(2), Some(4.0));
}

// ============================================
// Malformed Payload Tests
// ============================================

#[test]
fn test_malformed_line_is_skipped() {
    let block = "A:\n     0: 10 5\n     (corrupted)\n     2: 15\n";
    let decoded = decode_section(block, Section::A);

    assert_eq!(decoded.len(), 3);
    assert_eq!(decoded.get(2), Some(15.0));
}

#[test]
fn test_line_with_bad_token_is_skipped_whole() {
    let block = "A:\n     0: 10 five 15\n     3: 1\n";
    let decoded = decode_section(block, Section::A);

    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded.get(0), None);
    assert_eq!(decoded.get(3), Some(1.0));
}

#[test]
fn test_index_line_without_values() {
    let decoded = decode_section("A:\n     0:\n     1: 5\n", Section::A);
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded.get(1), Some(5.0));
}

#[test]
fn test_empty_section() {
    let block = SessionText::new("07/14/23", "R1").raw("K:\nZ:\n").build();
    assert!(decode_section(&block, Section::K).is_empty());
}

#[test]
fn test_crlf_line_endings() {
    let block = "Start Date: 07/14/23\r\nSubject: R1\r\nA:\r\n     0: 10 5\r\n     2: 15\r\nB:\r\n";
    let decoded = decode_section(block, Section::A);
    assert_eq!(decoded.len(), 3);
    assert_eq!(decoded.get(2), Some(15.0));
}

// ============================================
// Decoder Behaviour Tests
// ============================================

#[test]
fn test_decode_is_repeatable() {
    let blocks = SessionSplitter::default()
        .read_file(&example_path(MEDPC_BOX1))
        .expect("Should read example file");
    let decoder = SectionDecoder::default();

    for block in &blocks {
        let first = decoder.decode(&block.text, Section::K);
        let second = decoder.decode(&block.text, Section::K);
        assert_eq!(first, second);
    }
}

#[test]
fn test_example_sections() {
    let blocks = SessionSplitter::default()
        .read_file(&example_path(MEDPC_BOX1))
        .expect("Should read example file");
    let r2 = &blocks[0];

    let a = decode_section(&r2.text, Section::A);
    assert_eq!(a.len(), 6);
    assert_eq!(a.get(0), Some(50.0));
    assert_eq!(a.get(5), Some(30.0));

    assert_eq!(decode_section(&r2.text, Section::D).len(), 22);
    assert_eq!(decode_section(&r2.text, Section::G).get(2), Some(0.75));
    assert_eq!(decode_section(&r2.text, Section::K).len(), 72);
}
