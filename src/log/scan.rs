//! Log integrity scan
//!
//! Sequential pass over a log file without a reader handle: counts complete
//! records and reports whether the file ends in a truncated frame, the
//! expected artifact of a crash mid-write. The scan never repairs the file
//! and never attempts to resynchronize past a bad frame.

use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

use tracing::debug;

use crate::error::{LogError, Result};

use super::codec;

/// Outcome of scanning a log file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// Number of complete records
    pub records: u64,

    /// Bytes covered by complete records
    pub complete_bytes: u64,

    /// Bytes past the last complete record (zero for a clean log)
    pub trailing_bytes: u64,

    /// Whether the file ends in a truncated or malformed frame
    pub truncated: bool,
}

impl ScanReport {
    /// Whether every byte of the file belongs to a complete record
    pub fn is_clean(&self) -> bool {
        !self.truncated
    }
}

/// Scan a log file and report its framing integrity
pub fn scan(path: impl AsRef<Path>) -> Result<ScanReport> {
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(LogError::FileNotFound(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };
    let total_bytes = file.metadata()?.len();
    let mut reader = BufReader::new(file);

    let mut records = 0u64;
    let mut complete_bytes = 0u64;
    let mut truncated = false;

    loop {
        match codec::read_record(&mut reader) {
            Ok(Some(record)) => {
                records += 1;
                complete_bytes += record.encoded_len() as u64;
            }
            Ok(None) => break,
            Err(LogError::CorruptLog(reason)) => {
                debug!(path = %path.display(), %reason, "scan stopped at incomplete frame");
                truncated = true;
                break;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(ScanReport {
        records,
        complete_bytes,
        trailing_bytes: total_bytes - complete_bytes,
        truncated,
    })
}
