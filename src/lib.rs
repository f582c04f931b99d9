//! # evlog
//!
//! An append-only binary event log with:
//! - Uri-tagged records (a descriptor carried alongside every payload)
//! - Sequential replay in exact append order
//! - Deterministic end-of-stream and truncation detection
//! - Opaque payloads: the log measures bytes, it never interprets them
//!
//! ## Architecture Overview
//!
//! ```text
//!   Producer                                          Consumer
//! (message, uri)                                  (uri, payload)
//!       │                                                ▲
//!       ▼                                                │
//! ┌─────────────┐        ┌──────────────┐        ┌─────────────┐
//! │  LogWriter  │───────▶│   Log File   │───────▶│  LogReader  │
//! │  (append)   │ frames │  (records*)  │ frames │ (sequential)│
//! └─────────────┘        └──────────────┘        └─────────────┘
//!        └────────────┐                  ┌──────────────┘
//!                     ▼                  ▼
//!                  ┌────────────────────────┐
//!                  │      Record Codec      │
//!                  │ (length-framed fields) │
//!                  └────────────────────────┘
//! ```
//!
//! The file is a bare sequence of self-delimiting record frames: no header,
//! no footer, no index. A writer therefore only ever appends, and a reader
//! replays from the top. See the [`log`] module for the frame layout.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod log;
pub mod uri;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use config::FlushPolicy;
pub use error::{LogError, Result};
pub use log::{scan, LogReader, LogWriter, Record, Records, ScanReport};
pub use uri::Uri;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of evlog
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
