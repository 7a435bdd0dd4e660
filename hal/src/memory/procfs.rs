//! Parsers for the `/proc` text formats read by the Linux backend.
//!
//! Both `/proc/meminfo` and `/proc/<pid>/status` use `Key:   value [kB]`
//! lines. Values carrying a `kB` unit are normalized to bytes. The parsers are
//! platform independent so they can be exercised against captured text.

use std::collections::HashMap;

use super::{MemoryError, MemoryResult, MemoryStatus};

pub const MEMINFO: &str = "/proc/meminfo";
pub const SELF_STATUS: &str = "/proc/self/status";

/// Figures consumed from `/proc/meminfo`, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemInfo {
    pub mem_total: u64,
    pub mem_available: u64,
    pub commit_limit: u64,
    pub committed_as: u64,
}

impl MemInfo {
    /// Combine with process figures into a [`MemoryStatus`].
    ///
    /// `address_space` is the ceiling of the process's virtual address space
    /// and `vm_size` the amount of it currently mapped.
    pub fn into_status(self, vm_size: u64, address_space: u64) -> MemoryStatus {
        let avail_phys = self.mem_available.min(self.mem_total);
        MemoryStatus {
            memory_load: MemoryStatus::load_percent(self.mem_total, avail_phys),
            total_phys: self.mem_total,
            avail_phys,
            total_page_file: self.commit_limit,
            avail_page_file: self.commit_limit.saturating_sub(self.committed_as),
            total_virtual: address_space,
            avail_virtual: address_space.saturating_sub(vm_size),
        }
    }
}

/// Parse the contents of `/proc/meminfo`.
///
/// `MemAvailable` is missing on kernels older than 3.14; `MemFree` stands in.
pub fn parse_meminfo(text: &str) -> MemoryResult<MemInfo> {
    let table = KeyValues::parse(text)?;
    let mem_available = match table.get("MemAvailable") {
        Some(value) => value,
        None => table.require("MemFree", MEMINFO)?,
    };

    Ok(MemInfo {
        mem_total: table.require("MemTotal", MEMINFO)?,
        mem_available,
        commit_limit: table.require("CommitLimit", MEMINFO)?,
        committed_as: table.require("Committed_AS", MEMINFO)?,
    })
}

/// Parse `VmSize` (bytes) out of `/proc/<pid>/status`.
pub fn parse_status_vm_size(text: &str) -> MemoryResult<u64> {
    KeyValues::parse(text)?.require("VmSize", SELF_STATUS)
}

/// Numeric `Key: value` lines. Non-numeric lines are skipped.
struct KeyValues<'a> {
    entries: HashMap<&'a str, u64>,
}

impl<'a> KeyValues<'a> {
    fn parse(text: &'a str) -> MemoryResult<Self> {
        let mut entries = HashMap::new();

        for line in text.lines() {
            let Some((key, rest)) = line.split_once(':') else {
                continue;
            };
            let mut fields = rest.split_whitespace();
            let Some(Ok(value)) = fields.next().map(str::parse::<u64>) else {
                continue;
            };

            let bytes = match fields.next() {
                Some("kB") => value.checked_mul(1024).ok_or_else(|| MemoryError::Malformed {
                    field: key.trim().to_string(),
                    value: rest.trim().to_string(),
                })?,
                _ => value,
            };
            entries.insert(key.trim(), bytes);
        }

        Ok(Self { entries })
    }

    fn get(&self, key: &str) -> Option<u64> {
        self.entries.get(key).copied()
    }

    fn require(&self, field: &'static str, source_name: &'static str) -> MemoryResult<u64> {
        self.get(field)
            .ok_or(MemoryError::MissingField { field, source_name })
    }
}
