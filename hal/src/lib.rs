//! Hardware Abstraction Layer
//!
//! Platform-specific implementations are selected at compile time via Cargo features:
//! - `platform-linux`: `/proc` and libc
//! - `platform-windows`: kernel32 `GlobalMemoryStatusEx`
//! - neither: stubs that report the query as unsupported
//!
//! Apps pick the modules they need with the `heap` and `memory` features.

#[cfg(feature = "heap")]
pub mod heap;
#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "heap")]
pub use heap::{get_heap_stats, get_heap_used, HeapStats};
#[cfg(feature = "memory")]
pub use memory::{query_memory_status, MemoryError, MemoryResult, MemoryStatus, MIB};
