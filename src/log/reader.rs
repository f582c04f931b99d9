//! Log Reader
//!
//! Replays records from an event log file in append order.

use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::mem;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{LogError, Result};

use super::codec;
use super::Record;

/// Lifecycle of the reader's file resource, mirroring the writer's.
enum ReaderState {
    Unbound,
    Open {
        file: BufReader<File>,
        path: PathBuf,
    },
    Closed,
}

/// Reads records from an event log file
///
/// Successive [`read`](LogReader::read) calls return records in exactly the
/// order they were appended; no reordering, duplication, or skipping except
/// at genuine end of stream.
pub struct LogReader {
    state: ReaderState,
}

impl LogReader {
    /// Create an unbound reader
    pub fn new() -> Self {
        Self {
            state: ReaderState::Unbound,
        }
    }

    /// Create a reader already bound to `path`
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut reader = Self::new();
        reader.open(path)?;
        Ok(reader)
    }

    /// Bind the reader to an existing log file and rewind to its start
    ///
    /// Unlike the writer, the file must already exist; a missing path fails
    /// with [`LogError::FileNotFound`].
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<()> {
        if self.is_open() {
            return Err(LogError::AlreadyOpen);
        }
        let path = path.as_ref().to_path_buf();
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LogError::FileNotFound(path))
            }
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), "opened log for reading");
        self.state = ReaderState::Open {
            file: BufReader::new(file),
            path,
        };
        Ok(())
    }

    /// Read the next record
    ///
    /// `Ok(None)` signals end of stream; it is not an error, and a
    /// long-lived reader may poll again later. [`LogError::CorruptLog`] is
    /// fatal: the cursor is undefined afterwards and the stream must be
    /// treated as ended.
    pub fn read(&mut self) -> Result<Option<Record>> {
        match &mut self.state {
            ReaderState::Open { file, .. } => codec::read_record(file),
            _ => Err(LogError::NotOpen),
        }
    }

    /// Release the log file
    pub fn close(&mut self) -> Result<()> {
        match mem::replace(&mut self.state, ReaderState::Closed) {
            ReaderState::Open { path, .. } => {
                debug!(path = %path.display(), "closed log");
                Ok(())
            }
            previous => {
                self.state = previous;
                Err(LogError::NotOpen)
            }
        }
    }

    /// Whether a log file is currently bound
    pub fn is_open(&self) -> bool {
        matches!(self.state, ReaderState::Open { .. })
    }

    /// Whether no log file is bound (unbound and closed are equivalent)
    pub fn is_closed(&self) -> bool {
        !self.is_open()
    }

    /// Path of the bound log file, if open
    pub fn file_name(&self) -> Option<&Path> {
        match &self.state {
            ReaderState::Open { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Iterate over the remaining records
    ///
    /// The iterator ends at end of stream and fuses after the first error,
    /// since the format has no resynchronization markers to recover at.
    pub fn records(self) -> Records {
        Records {
            reader: self,
            done: false,
        }
    }
}

impl Default for LogReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over log records
pub struct Records {
    reader: LogReader,
    done: bool,
}

impl Iterator for Records {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.read() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
