//! Error types for evlog
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using LogError
pub type Result<T> = std::result::Result<T, LogError>;

/// Unified error type for evlog operations
#[derive(Debug, Error)]
pub enum LogError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Lifecycle Errors
    // -------------------------------------------------------------------------
    #[error("log is already open")]
    AlreadyOpen,

    #[error("log is not open")]
    NotOpen,

    #[error("log file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    // -------------------------------------------------------------------------
    // Framing Errors
    // -------------------------------------------------------------------------
    #[error("log corruption detected: {0}")]
    CorruptLog(String),

    #[error("record too large: {field} is {size} bytes (max {max})")]
    RecordTooLarge {
        field: &'static str,
        size: usize,
        max: usize,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("serialization error: {0}")]
    Serialization(String),
}
