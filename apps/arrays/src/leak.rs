//! Allocation counting for leak checks.
//!
//! [`TrackingAllocator`] forwards to the system allocator and keeps
//! process-wide counters. It only counts once it is installed with
//! `#[global_allocator]`; the binary does so in debug builds with the
//! `leak-check` feature.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{debug, warn};

/// Allocations at or above this size are also counted separately
pub const LARGE_ALLOCATION: usize = 64 * 1024;

static ALLOCATIONS: AtomicUsize = AtomicUsize::new(0);
static RELEASES: AtomicUsize = AtomicUsize::new(0);
static LIVE_BYTES: AtomicUsize = AtomicUsize::new(0);
static PEAK_BYTES: AtomicUsize = AtomicUsize::new(0);
static LARGE_ALLOCATIONS: AtomicUsize = AtomicUsize::new(0);
static LARGE_RELEASES: AtomicUsize = AtomicUsize::new(0);

/// Counting wrapper around [`System`].
pub struct TrackingAllocator;

impl TrackingAllocator {
    pub const fn new() -> Self {
        TrackingAllocator
    }
}

impl Default for TrackingAllocator {
    fn default() -> Self {
        Self::new()
    }
}

fn record_alloc(size: usize) {
    ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
    let live = LIVE_BYTES.fetch_add(size, Ordering::Relaxed) + size;
    PEAK_BYTES.fetch_max(live, Ordering::Relaxed);
    if size >= LARGE_ALLOCATION {
        LARGE_ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
    }
}

fn record_release(size: usize) {
    RELEASES.fetch_add(1, Ordering::Relaxed);
    LIVE_BYTES.fetch_sub(size, Ordering::Relaxed);
    if size >= LARGE_ALLOCATION {
        LARGE_RELEASES.fetch_add(1, Ordering::Relaxed);
    }
}

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        record_release(layout.size());
    }

    // Counted as a release of the old block and an allocation of the new one.
    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            record_release(layout.size());
            record_alloc(new_size);
        }
        new_ptr
    }
}

/// Counter values at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AllocSnapshot {
    pub allocations: usize,
    pub releases: usize,
    pub live_bytes: usize,
    pub peak_bytes: usize,
    pub large_allocations: usize,
    pub large_releases: usize,
}

impl AllocSnapshot {
    /// Allocations made since `baseline` that have not been released.
    ///
    /// Negative when blocks older than `baseline` were released meanwhile.
    pub fn outstanding_since(&self, baseline: &AllocSnapshot) -> isize {
        let allocated = self.allocations.wrapping_sub(baseline.allocations);
        let released = self.releases.wrapping_sub(baseline.releases);
        allocated as isize - released as isize
    }

    /// Change in live bytes since `baseline`.
    pub fn live_bytes_since(&self, baseline: &AllocSnapshot) -> isize {
        self.live_bytes as isize - baseline.live_bytes as isize
    }

    /// Every allocation since `baseline` has a matching release.
    pub fn is_balanced_since(&self, baseline: &AllocSnapshot) -> bool {
        self.outstanding_since(baseline) == 0 && self.live_bytes_since(baseline) == 0
    }

    /// True when no allocation has ever been counted, i.e. the tracker is
    /// not the global allocator.
    pub fn is_idle(&self) -> bool {
        self.allocations == 0
    }
}

/// Read the current counters.
pub fn snapshot() -> AllocSnapshot {
    AllocSnapshot {
        allocations: ALLOCATIONS.load(Ordering::Relaxed),
        releases: RELEASES.load(Ordering::Relaxed),
        live_bytes: LIVE_BYTES.load(Ordering::Relaxed),
        peak_bytes: PEAK_BYTES.load(Ordering::Relaxed),
        large_allocations: LARGE_ALLOCATIONS.load(Ordering::Relaxed),
        large_releases: LARGE_RELEASES.load(Ordering::Relaxed),
    }
}

/// Log allocations made after `baseline` that were never released.
///
/// Returns false if any are found. Reallocations count as a release plus an
/// allocation, so buffers that only grew are not reported.
pub fn report(baseline: &AllocSnapshot) -> bool {
    report_between(baseline, &snapshot())
}

fn report_between(baseline: &AllocSnapshot, now: &AllocSnapshot) -> bool {
    if now.is_idle() {
        return true;
    }

    let outstanding = now.outstanding_since(baseline);
    if outstanding > 0 {
        warn!(
            outstanding,
            live_bytes = now.live_bytes_since(baseline),
            "detected unreleased allocations"
        );
        return false;
    }

    debug!(
        allocations = now.allocations - baseline.allocations,
        peak_bytes = now.peak_bytes,
        "no leaks detected"
    );
    true
}
