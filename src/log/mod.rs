//! Event Log Module
//!
//! Append-only storage for uri-tagged records with sequential replay.
//!
//! ## Responsibilities
//! - Frame records (descriptor + payload) before any byte reaches disk
//! - Append records in exactly the order `write` is called
//! - Replay records in append order, detecting truncated frames
//! - Track the open/closed lifecycle of file handles
//!
//! ## File Format
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │ Record 1                                                  │
//! │ ┌────────┬────────┬─────┬───────────┬─────┬──────┬─────┐  │
//! │ │ Len(4) │ scheme │ ... │ authority │ ... │ path │ ... │  │
//! │ ├────────┼────────┴─────┴───────────┴─────┴──────┴─────┤  │
//! │ │ Len(4) │ payload bytes                               │  │
//! │ └────────┴─────────────────────────────────────────────┘  │
//! ├───────────────────────────────────────────────────────────┤
//! │ Record 2 ...                                              │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! Every length is an unsigned 32-bit little-endian count of the bytes in
//! the field that follows it. There is no file header, footer, or checksum;
//! a zero-record file is a valid empty log.

mod codec;
mod reader;
mod record;
mod scan;
mod writer;

pub use codec::{encode_record, read_record, write_record, MAX_PAYLOAD_LEN, MAX_URI_FIELD_LEN};
pub use reader::{LogReader, Records};
pub use record::Record;
pub use scan::{scan, ScanReport};
pub use writer::LogWriter;
