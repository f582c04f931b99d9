//! Log record definitions

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::{LogError, Result};
use crate::uri::Uri;

/// A single record in the event log: a descriptor plus an opaque payload.
///
/// The payload is whatever byte sequence the producer handed the writer;
/// the log never interprets it. Consumers are expected to pick a decoder
/// based on the record's [`Uri`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Descriptor naming the payload's type and origin
    pub uri: Uri,

    /// Serialized message bytes
    pub payload: Bytes,
}

impl Record {
    /// Create a record from a descriptor and payload bytes
    pub fn new(uri: Uri, payload: impl Into<Bytes>) -> Self {
        Self {
            uri,
            payload: payload.into(),
        }
    }

    /// Decode the payload as a bincode-serialized message.
    ///
    /// Convenience for consumers whose producer used
    /// [`LogWriter::write`](crate::LogWriter::write); payloads written
    /// through `write_payload` carry whatever encoding the producer chose.
    pub fn decode_message<M: DeserializeOwned>(&self) -> Result<M> {
        bincode::deserialize(&self.payload).map_err(|e| LogError::Serialization(e.to_string()))
    }

    /// Size of this record's on-disk frame in bytes
    pub fn encoded_len(&self) -> usize {
        super::codec::frame_len(&self.uri, self.payload.len())
    }
}
