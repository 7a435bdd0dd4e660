//! Linux heap introspection implementation
//!
//! Uses glibc's mallinfo() for heap statistics. Its counters are C ints and
//! saturate rather than wrap on very large heaps.

use super::HeapStats;

/// Get current heap usage in bytes
pub fn get_heap_used() -> Option<usize> {
    get_heap_stats().map(|stats| stats.in_use)
}

/// Get detailed heap statistics
#[allow(deprecated)]
pub fn get_heap_stats() -> Option<HeapStats> {
    let info = unsafe { libc::mallinfo() };
    let mmapped = to_bytes(info.hblkhd);
    Some(HeapStats {
        arena: to_bytes(info.arena),
        mmapped,
        in_use: to_bytes(info.uordblks) + mmapped,
        free: to_bytes(info.fordblks),
        free_chunks: to_bytes(info.ordblks),
    })
}

fn to_bytes(value: libc::c_int) -> usize {
    usize::try_from(value).unwrap_or(0)
}
