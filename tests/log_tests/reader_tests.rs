//! Tests for Log Reader
//!
//! These tests verify:
//! - The unbound/open/closed lifecycle and FileNotFound on open
//! - Sequential replay in append order
//! - Iterator behavior, including fusing after corruption
//! - Truncated-frame detection

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use evlog::{LogError, LogReader, LogWriter, Uri};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_log() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("event.log");
    (temp_dir, log_path)
}

fn frame_uri() -> Uri {
    Uri::new("ns.example", "ExampleFrame")
}

fn write_payloads(path: &Path, payloads: &[&[u8]]) {
    let mut writer = LogWriter::from_path(path).unwrap();
    for payload in payloads {
        writer.write_payload(payload, &frame_uri()).unwrap();
    }
    writer.close().unwrap();
}

fn append_raw(path: &Path, bytes: &[u8]) {
    let mut file = OpenOptions::new().append(true).open(path).unwrap();
    file.write_all(bytes).unwrap();
    file.sync_all().unwrap();
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

#[test]
fn test_smoke() {
    let reader = LogReader::new();

    assert!(reader.is_closed());
    assert!(!reader.is_open());
    assert!(reader.file_name().is_none());
}

#[test]
fn test_open_close() {
    let (_temp, log_path) = setup_temp_log();
    write_payloads(&log_path, &[]);

    let mut reader = LogReader::new();
    reader.open(&log_path).unwrap();
    assert!(!reader.is_closed());
    assert!(reader.is_open());
    assert_eq!(reader.file_name(), Some(log_path.as_path()));

    reader.close().unwrap();
    assert!(reader.is_closed());
    assert!(!reader.is_open());
    assert!(reader.file_name().is_none());
}

#[test]
fn test_open_missing_file_fails() {
    let (_temp, log_path) = setup_temp_log();

    let mut reader = LogReader::new();
    let result = reader.open(&log_path);

    assert!(matches!(result, Err(LogError::FileNotFound(_))));
    assert!(reader.is_closed());
}

#[test]
fn test_double_open_fails() {
    let (_temp, log_path) = setup_temp_log();
    write_payloads(&log_path, &[]);

    let mut reader = LogReader::new();
    reader.open(&log_path).unwrap();

    assert!(matches!(reader.open(&log_path), Err(LogError::AlreadyOpen)));
    assert!(reader.is_open());
}

#[test]
fn test_read_while_unbound_fails() {
    let mut reader = LogReader::new();
    assert!(matches!(reader.read(), Err(LogError::NotOpen)));
}

#[test]
fn test_read_after_close_fails() {
    let (_temp, log_path) = setup_temp_log();
    write_payloads(&log_path, &[]);

    let mut reader = LogReader::from_path(&log_path).unwrap();
    reader.close().unwrap();

    assert!(matches!(reader.read(), Err(LogError::NotOpen)));
}

#[test]
fn test_close_without_open_fails() {
    let mut reader = LogReader::new();
    assert!(matches!(reader.close(), Err(LogError::NotOpen)));
}

// =============================================================================
// Sequential Read Tests
// =============================================================================

#[test]
fn test_read_empty_log() {
    let (_temp, log_path) = setup_temp_log();
    write_payloads(&log_path, &[]);

    let mut reader = LogReader::from_path(&log_path).unwrap();

    assert!(reader.read().unwrap().is_none());
    // Polling again stays at end of stream
    assert!(reader.read().unwrap().is_none());
}

#[test]
fn test_read_single_record() {
    let (_temp, log_path) = setup_temp_log();
    write_payloads(&log_path, &[&[1, 2, 3, 4, 5, 6, 7, 8, 9]]);

    let mut reader = LogReader::from_path(&log_path).unwrap();

    let record = reader.read().unwrap().unwrap();
    assert_eq!(&record.payload[..], &[1, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert_eq!(record.uri, frame_uri());

    assert!(reader.read().unwrap().is_none());
}

#[test]
fn test_read_preserves_append_order() {
    let (_temp, log_path) = setup_temp_log();
    let payloads: Vec<Vec<u8>> = (0..20u8).map(|i| vec![i; (i as usize) + 1]).collect();
    let slices: Vec<&[u8]> = payloads.iter().map(|p| p.as_slice()).collect();
    write_payloads(&log_path, &slices);

    let mut reader = LogReader::from_path(&log_path).unwrap();

    for (i, expected) in payloads.iter().enumerate() {
        let record = reader.read().unwrap().unwrap();
        assert_eq!(&record.payload[..], &expected[..], "record {i} out of order");
    }
    assert!(reader.read().unwrap().is_none());
}

#[test]
fn test_reopen_rewinds_to_start() {
    let (_temp, log_path) = setup_temp_log();
    write_payloads(&log_path, &[b"first", b"second"]);

    let mut reader = LogReader::from_path(&log_path).unwrap();
    reader.read().unwrap().unwrap();
    reader.close().unwrap();

    reader.open(&log_path).unwrap();
    let record = reader.read().unwrap().unwrap();
    assert_eq!(&record.payload[..], b"first");
}

// =============================================================================
// Iterator Tests
// =============================================================================

#[test]
fn test_records_empty_log() {
    let (_temp, log_path) = setup_temp_log();
    write_payloads(&log_path, &[]);

    let reader = LogReader::from_path(&log_path).unwrap();
    assert_eq!(reader.records().count(), 0);
}

#[test]
fn test_records_in_order() {
    let (_temp, log_path) = setup_temp_log();
    write_payloads(&log_path, &[b"a", b"b", b"c"]);

    let reader = LogReader::from_path(&log_path).unwrap();
    let records: Vec<_> = reader.records().map(|r| r.unwrap()).collect();

    assert_eq!(records.len(), 3);
    assert_eq!(&records[0].payload[..], b"a");
    assert_eq!(&records[1].payload[..], b"b");
    assert_eq!(&records[2].payload[..], b"c");
}

#[test]
fn test_records_for_loop() {
    let (_temp, log_path) = setup_temp_log();
    write_payloads(&log_path, &[b"x", b"y"]);

    let reader = LogReader::from_path(&log_path).unwrap();
    let mut count = 0;
    for result in reader.records() {
        result.unwrap();
        count += 1;
    }

    assert_eq!(count, 2);
}

// =============================================================================
// Corruption Tests
// =============================================================================

#[test]
fn test_partial_trailing_frame_is_corrupt() {
    let (_temp, log_path) = setup_temp_log();
    write_payloads(&log_path, &[b"complete"]);
    // A crash mid-write leaves a partial length prefix behind
    append_raw(&log_path, &[0x05, 0x00]);

    let mut reader = LogReader::from_path(&log_path).unwrap();

    let first = reader.read().unwrap().unwrap();
    assert_eq!(&first.payload[..], b"complete");

    assert!(matches!(reader.read(), Err(LogError::CorruptLog(_))));
}

#[test]
fn test_truncated_payload_is_corrupt() {
    let (_temp, log_path) = setup_temp_log();
    write_payloads(&log_path, &[b"first", b"second-record-payload"]);

    // Cut into the last frame's payload
    let len = std::fs::metadata(&log_path).unwrap().len();
    let file = OpenOptions::new().write(true).open(&log_path).unwrap();
    file.set_len(len - 3).unwrap();

    let mut reader = LogReader::from_path(&log_path).unwrap();

    let first = reader.read().unwrap().unwrap();
    assert_eq!(&first.payload[..], b"first");

    assert!(matches!(reader.read(), Err(LogError::CorruptLog(_))));
}

#[test]
fn test_fabricated_length_is_corrupt() {
    let (_temp, log_path) = setup_temp_log();
    write_payloads(&log_path, &[]);
    // A scheme length far beyond the field limit
    append_raw(&log_path, &u32::MAX.to_le_bytes());

    let mut reader = LogReader::from_path(&log_path).unwrap();

    assert!(matches!(reader.read(), Err(LogError::CorruptLog(_))));
}

#[test]
fn test_records_fuses_after_corruption() {
    let (_temp, log_path) = setup_temp_log();
    write_payloads(&log_path, &[b"ok"]);
    append_raw(&log_path, &[0xFF; 3]);

    let reader = LogReader::from_path(&log_path).unwrap();
    let mut records = reader.records();

    assert!(matches!(records.next(), Some(Ok(_))));
    assert!(matches!(records.next(), Some(Err(LogError::CorruptLog(_)))));
    assert!(records.next().is_none());
    assert!(records.next().is_none());
}
