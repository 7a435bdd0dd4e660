//! Memory status HAL
//!
//! Provides a point-in-time snapshot of system and process memory figures.
//! Implementation is selected at compile time based on platform feature.
//!
//! - Linux: `/proc/meminfo`, `/proc/self/status` and `getrlimit(RLIMIT_AS)`
//! - Windows: `GlobalMemoryStatusEx`

pub mod procfs;

// Platform-specific implementations
#[cfg(feature = "platform-linux")]
mod linux;
#[cfg(feature = "platform-linux")]
pub use linux::*;

#[cfg(all(feature = "platform-windows", not(feature = "platform-linux")))]
mod windows;
#[cfg(all(feature = "platform-windows", not(feature = "platform-linux")))]
pub use windows::*;

// Fallback stub for other platforms
#[cfg(not(any(feature = "platform-linux", feature = "platform-windows")))]
mod none;
#[cfg(not(any(feature = "platform-linux", feature = "platform-windows")))]
pub use none::*;

use std::io;

use thiserror::Error;

/// Bytes per mebibyte.
pub const MIB: u64 = 1024 * 1024;

/// Memory status query errors
#[derive(Debug, Error)]
pub enum MemoryError {
    /// No memory status source on this platform
    #[error("memory status not supported on this platform")]
    NotSupported,
    /// A status file could not be read
    #[error("failed to read {path}")]
    Read {
        path: &'static str,
        #[source]
        source: io::Error,
    },
    /// A required field was absent from a status file
    #[error("field `{field}` missing from {source_name}")]
    MissingField {
        field: &'static str,
        source_name: &'static str,
    },
    /// A field was present but its value could not be used
    #[error("malformed value for `{field}`: {value:?}")]
    Malformed { field: String, value: String },
    /// OS call failed with the given error code
    #[error("system error: {0}")]
    SystemError(i32),
}

/// Result type for memory status operations
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Snapshot of memory figures, in bytes unless noted.
///
/// Mirrors the "extended" memory status record: physical memory,
/// the commit limit (page file) and the user-mode virtual address space
/// of the calling process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryStatus {
    /// Percentage of physical memory in use (0..=100)
    pub memory_load: u32,
    pub total_phys: u64,
    pub avail_phys: u64,
    /// Commit limit of the system
    pub total_page_file: u64,
    /// Maximum amount of memory the current process can still commit
    pub avail_page_file: u64,
    /// Size of the user-mode portion of the address space
    pub total_virtual: u64,
    /// Unreserved and uncommitted address space of the calling process
    pub avail_virtual: u64,
}

impl MemoryStatus {
    /// Available commit headroom in MiB.
    pub fn avail_page_file_mib(&self) -> u64 {
        self.avail_page_file / MIB
    }

    /// Available virtual address space in MiB.
    pub fn avail_virtual_mib(&self) -> u64 {
        self.avail_virtual / MIB
    }

    /// Physical memory in use as a whole percentage.
    pub fn load_percent(total_phys: u64, avail_phys: u64) -> u32 {
        if total_phys == 0 {
            return 0;
        }
        let used = u128::from(total_phys.saturating_sub(avail_phys));
        // used <= total, so the quotient is at most 100
        (used * 100 / u128::from(total_phys)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mib_conversion_truncates() {
        let status = MemoryStatus {
            avail_page_file: 10 * MIB + MIB / 2,
            avail_virtual: MIB - 1,
            ..Default::default()
        };
        assert_eq!(status.avail_page_file_mib(), 10);
        assert_eq!(status.avail_virtual_mib(), 0);
    }

    #[test]
    fn load_percent_bounds() {
        assert_eq!(MemoryStatus::load_percent(0, 0), 0);
        assert_eq!(MemoryStatus::load_percent(100, 100), 0);
        assert_eq!(MemoryStatus::load_percent(100, 0), 100);
        assert_eq!(MemoryStatus::load_percent(1000, 250), 75);
        // avail larger than total is clamped rather than underflowing
        assert_eq!(MemoryStatus::load_percent(100, 200), 0);
    }

    #[test]
    fn error_display() {
        let err = MemoryError::MissingField {
            field: "MemTotal",
            source_name: "/proc/meminfo",
        };
        assert_eq!(err.to_string(), "field `MemTotal` missing from /proc/meminfo");
        assert_eq!(MemoryError::SystemError(5).to_string(), "system error: 5");
    }
}
