//! Record codec
//!
//! Framing of one record to bytes and back. This is the on-disk contract:
//! encode and decode must stay exact inverses for every descriptor/payload
//! pair, including empty strings and zero-length payloads.
//!
//! ## Frame Format
//! ```text
//! ┌──────────┬─────────┬──────────┬────────────┬──────────┬────────┐
//! │ Len (4)  │ scheme  │ Len (4)  │ authority  │ Len (4)  │ path   │
//! ├──────────┼─────────┼──────────┼────────────┴──────────┴────────┤
//! │ Len (4)  │ query   │ Len (4)  │ payload                        │
//! └──────────┴─────────┴──────────┴────────────────────────────────┘
//! ```
//!
//! Every length is unsigned 32-bit little-endian and counts only the bytes
//! of the field that follows it. There is no checksum and no padding; the
//! frame is self-delimiting through its lengths alone, so a length that
//! points past the end of the stream is unrecoverable corruption.

use std::io::{ErrorKind, Read, Write};

use crate::error::{LogError, Result};
use crate::uri::Uri;

use super::Record;

/// Size of one length prefix
const LEN_SIZE: usize = 4;

/// Maximum size of a single uri string field (64 KiB)
pub const MAX_URI_FIELD_LEN: u32 = 64 * 1024;

/// Maximum size of a record payload (256 MiB)
pub const MAX_PAYLOAD_LEN: u32 = 256 * 1024 * 1024;

// =============================================================================
// Encoding
// =============================================================================

/// Encode one record to a self-delimiting frame
///
/// Format: four length-prefixed uri fields followed by the length-prefixed
/// payload. Callers that need the size limits enforced should go through
/// [`write_record`].
pub fn encode_record(uri: &Uri, payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(frame_len(uri, payload.len()));

    put_field(&mut frame, uri.scheme.as_bytes());
    put_field(&mut frame, uri.authority.as_bytes());
    put_field(&mut frame, uri.path.as_bytes());
    put_field(&mut frame, uri.query.as_bytes());
    put_field(&mut frame, payload);

    frame
}

/// Encoded size of a frame with the given descriptor and payload length
pub(crate) fn frame_len(uri: &Uri, payload_len: usize) -> usize {
    5 * LEN_SIZE
        + uri.scheme.len()
        + uri.authority.len()
        + uri.path.len()
        + uri.query.len()
        + payload_len
}

fn put_field(frame: &mut Vec<u8>, bytes: &[u8]) {
    frame.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
    frame.extend_from_slice(bytes);
}

// =============================================================================
// Decoding
// =============================================================================

/// Read exactly one record frame from the cursor
///
/// Returns `Ok(None)` when the cursor is exactly at the end of the stream
/// (a clean record boundary). Any frame cut short, any length field larger
/// than the size limits, and any uri field that is not valid UTF-8 is
/// reported as [`LogError::CorruptLog`]; the cursor position is undefined
/// afterwards and the stream must be treated as ended.
pub fn read_record<R: Read>(reader: &mut R) -> Result<Option<Record>> {
    let scheme_len = match read_len(reader)? {
        Some(len) => len,
        None => return Ok(None),
    };
    let scheme = read_uri_field(reader, scheme_len, "uri scheme")?;

    let authority_len = next_len(reader, "uri authority")?;
    let authority = read_uri_field(reader, authority_len, "uri authority")?;

    let path_len = next_len(reader, "uri path")?;
    let path = read_uri_field(reader, path_len, "uri path")?;

    let query_len = next_len(reader, "uri query")?;
    let query = read_uri_field(reader, query_len, "uri query")?;

    let payload_len = next_len(reader, "payload")?;
    if payload_len > MAX_PAYLOAD_LEN {
        return Err(LogError::CorruptLog(format!(
            "payload length {payload_len} exceeds {MAX_PAYLOAD_LEN}-byte limit"
        )));
    }
    let payload = read_bytes(reader, payload_len as usize, "payload")?;

    let uri = Uri {
        scheme,
        authority,
        path,
        query,
    };
    Ok(Some(Record::new(uri, payload)))
}

/// Read a length prefix, distinguishing clean end of stream from truncation
///
/// `Ok(None)` only when zero bytes remain; a partially present prefix is
/// corruption.
fn read_len<R: Read>(reader: &mut R) -> Result<Option<u32>> {
    let mut buf = [0u8; LEN_SIZE];
    let mut filled = 0;
    while filled < LEN_SIZE {
        match reader.read(&mut buf[filled..]) {
            Ok(0) if filled == 0 => return Ok(None),
            Ok(0) => {
                return Err(LogError::CorruptLog(format!(
                    "length prefix cut short at {filled} of {LEN_SIZE} bytes"
                )))
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(Some(u32::from_le_bytes(buf)))
}

/// Read a length prefix in the middle of a frame, where end of stream is
/// already corruption
fn next_len<R: Read>(reader: &mut R, field: &'static str) -> Result<u32> {
    read_len(reader)?.ok_or_else(|| {
        LogError::CorruptLog(format!("{field} length prefix missing at end of stream"))
    })
}

fn read_uri_field<R: Read>(reader: &mut R, len: u32, field: &'static str) -> Result<String> {
    if len > MAX_URI_FIELD_LEN {
        return Err(LogError::CorruptLog(format!(
            "{field} length {len} exceeds {MAX_URI_FIELD_LEN}-byte limit"
        )));
    }
    let bytes = read_bytes(reader, len as usize, field)?;
    String::from_utf8(bytes)
        .map_err(|_| LogError::CorruptLog(format!("{field} is not valid UTF-8")))
}

fn read_bytes<R: Read>(reader: &mut R, len: usize, field: &'static str) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    match reader.read_exact(&mut buf) {
        Ok(()) => Ok(buf),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(LogError::CorruptLog(format!(
            "{field} cut short by end of stream"
        ))),
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Write one record frame to a stream
///
/// The frame is emitted with a single `write_all`, so from the caller's
/// point of view either the whole frame lands or the call fails. Flushing
/// is left to the caller.
pub fn write_record<W: Write>(writer: &mut W, uri: &Uri, payload: &[u8]) -> Result<()> {
    check_field(uri.scheme.len(), MAX_URI_FIELD_LEN, "uri scheme")?;
    check_field(uri.authority.len(), MAX_URI_FIELD_LEN, "uri authority")?;
    check_field(uri.path.len(), MAX_URI_FIELD_LEN, "uri path")?;
    check_field(uri.query.len(), MAX_URI_FIELD_LEN, "uri query")?;
    check_field(payload.len(), MAX_PAYLOAD_LEN, "payload")?;

    writer.write_all(&encode_record(uri, payload))?;
    Ok(())
}

fn check_field(size: usize, max: u32, field: &'static str) -> Result<()> {
    if size > max as usize {
        return Err(LogError::RecordTooLarge {
            field,
            size,
            max: max as usize,
        });
    }
    Ok(())
}
