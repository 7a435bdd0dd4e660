//! Heap introspection HAL
//!
//! Provides allocator-level heap statistics.
//! Implementation is selected at compile time based on platform feature.

// glibc exposes mallinfo(); other C libraries get the stub
#[cfg(all(feature = "platform-linux", target_env = "gnu"))]
mod linux;
#[cfg(all(feature = "platform-linux", target_env = "gnu"))]
pub use linux::*;

#[cfg(not(all(feature = "platform-linux", target_env = "gnu")))]
mod none;
#[cfg(not(all(feature = "platform-linux", target_env = "gnu")))]
pub use none::*;

/// Heap statistics, all in bytes except `free_chunks`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeapStats {
    /// Non-mmapped space obtained from the system
    pub arena: usize,
    /// Space held in mmapped regions (large allocations)
    pub mmapped: usize,
    /// Allocated space, including mmapped regions
    pub in_use: usize,
    /// Free space inside the arena
    pub free: usize,
    /// Number of free chunks
    pub free_chunks: usize,
}
