//! Stub heap introspection implementation
//!
//! Used when no platform-specific implementation is available.

use super::HeapStats;

/// Get current heap usage in bytes (stub: unavailable)
pub fn get_heap_used() -> Option<usize> {
    None
}

/// Get detailed heap statistics (stub: unavailable)
pub fn get_heap_stats() -> Option<HeapStats> {
    None
}
