//! Stub memory status implementation
//!
//! Used when no platform-specific implementation is available.

use super::{MemoryError, MemoryResult, MemoryStatus};

/// Query memory status (stub: always unsupported)
pub fn query_memory_status() -> MemoryResult<MemoryStatus> {
    Err(MemoryError::NotSupported)
}
