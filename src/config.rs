//! Configuration for evlog
//!
//! Flush behavior for the log writer.

/// Flush policy: how often the writer pushes buffered frames to the OS.
///
/// Flushing bounds the window in which a crash can leave a partial frame at
/// the end of the file. Regardless of policy, `close` always flushes and
/// syncs before releasing the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushPolicy {
    /// Flush after every write (safest, slowest)
    EveryWrite,

    /// Flush after N unflushed records (balanced durability/performance)
    EveryNRecords { count: usize },
}

impl Default for FlushPolicy {
    fn default() -> Self {
        FlushPolicy::EveryWrite
    }
}
