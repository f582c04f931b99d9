//! Log Writer
//!
//! Appends uri-tagged records to an event log file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::mem;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::config::FlushPolicy;
use crate::error::{LogError, Result};
use crate::uri::Uri;

use super::codec;

/// Lifecycle of the writer's file resource.
///
/// The file handle exists only in `Open`, so writes against an unbound or
/// closed writer cannot reach a stale descriptor. `Unbound` is the state at
/// construction; `Closed` is only reachable after a successful open.
enum WriterState {
    Unbound,
    Open {
        file: BufWriter<File>,
        path: PathBuf,
        pending: usize,
    },
    Closed,
}

/// Writes records to an event log file
///
/// Records land on disk in exactly the order `write` is called. Dropping an
/// open writer closes it, so records written before an unclean exit remain
/// readable; prefer an explicit [`close`](LogWriter::close) to observe flush
/// errors.
pub struct LogWriter {
    state: WriterState,
    flush_policy: FlushPolicy,
}

impl LogWriter {
    /// Create an unbound writer with the default flush policy
    pub fn new() -> Self {
        Self::with_flush_policy(FlushPolicy::default())
    }

    /// Create an unbound writer with an explicit flush policy
    pub fn with_flush_policy(flush_policy: FlushPolicy) -> Self {
        Self {
            state: WriterState::Unbound,
            flush_policy,
        }
    }

    /// Create a writer already bound to `path`
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut writer = Self::new();
        writer.open(path)?;
        Ok(writer)
    }

    /// Bind the writer to a log file, creating or truncating it
    ///
    /// Fails with [`LogError::AlreadyOpen`] if a file is already bound; the
    /// existing binding is left untouched.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<()> {
        if self.is_open() {
            return Err(LogError::AlreadyOpen);
        }
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        debug!(path = %path.display(), "opened log for writing");
        self.state = WriterState::Open {
            file: BufWriter::new(file),
            path,
            pending: 0,
        };
        Ok(())
    }

    /// Serialize a message with bincode and append it as one record
    pub fn write<M: Serialize>(&mut self, message: &M, uri: &Uri) -> Result<()> {
        let payload =
            bincode::serialize(message).map_err(|e| LogError::Serialization(e.to_string()))?;
        self.write_payload(&payload, uri)
    }

    /// Append an already-serialized payload as one record
    ///
    /// The frame is appended with a single write, so either the complete
    /// record lands or the call fails with the file at its previous length.
    pub fn write_payload(&mut self, payload: &[u8], uri: &Uri) -> Result<()> {
        let flush_policy = self.flush_policy;
        match &mut self.state {
            WriterState::Open { file, pending, .. } => {
                codec::write_record(file, uri, payload)?;
                trace!(uri = %uri, payload_len = payload.len(), "appended record");
                *pending += 1;
                let flush_now = match flush_policy {
                    FlushPolicy::EveryWrite => true,
                    FlushPolicy::EveryNRecords { count } => *pending >= count,
                };
                if flush_now {
                    file.flush()?;
                    *pending = 0;
                }
                Ok(())
            }
            _ => Err(LogError::NotOpen),
        }
    }

    /// Push buffered frames to the OS regardless of policy
    pub fn flush(&mut self) -> Result<()> {
        match &mut self.state {
            WriterState::Open { file, pending, .. } => {
                file.flush()?;
                *pending = 0;
                Ok(())
            }
            _ => Err(LogError::NotOpen),
        }
    }

    /// Number of records written since the last flush boundary
    pub fn pending_records(&self) -> usize {
        match &self.state {
            WriterState::Open { pending, .. } => *pending,
            _ => 0,
        }
    }

    /// Flush, sync and release the log file
    ///
    /// Fails with [`LogError::NotOpen`] (and is a no-op) if no file is
    /// bound.
    pub fn close(&mut self) -> Result<()> {
        match mem::replace(&mut self.state, WriterState::Closed) {
            WriterState::Open { mut file, path, .. } => {
                file.flush()?;
                file.get_ref().sync_all()?;
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
        matches!(self.state, WriterState::Open { .. })
    }

    /// Whether no log file is bound (unbound and closed are equivalent)
    pub fn is_closed(&self) -> bool {
        !self.is_open()
    }

    /// Path of the bound log file, if open
    pub fn file_name(&self) -> Option<&Path> {
        match &self.state {
            WriterState::Open { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl Default for LogWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        if self.is_open() {
            if let Err(e) = self.close() {
                warn!(error = %e, "failed to close log writer on drop");
            }
        }
    }
}
