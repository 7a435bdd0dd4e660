//! Linux memory status implementation
//!
//! System figures come from `/proc/meminfo`. Process figures come from
//! `/proc/self/status` and the `RLIMIT_AS` resource limit.

use std::fs;
use std::io;

use tracing::trace;

use super::procfs::{parse_meminfo, parse_status_vm_size, MEMINFO, SELF_STATUS};
use super::{MemoryError, MemoryResult, MemoryStatus};

/// User-mode address space size used when `RLIMIT_AS` is unlimited
#[cfg(target_pointer_width = "64")]
const USER_ADDRESS_SPACE: u64 = 1 << 47;
#[cfg(not(target_pointer_width = "64"))]
const USER_ADDRESS_SPACE: u64 = 3 << 30;

/// Query the current memory status
pub fn query_memory_status() -> MemoryResult<MemoryStatus> {
    let meminfo = parse_meminfo(&read(MEMINFO)?)?;
    let vm_size = parse_status_vm_size(&read(SELF_STATUS)?)?;
    let address_space = address_space_limit()?;
    trace!(?meminfo, vm_size, address_space, "raw memory figures");

    Ok(meminfo.into_status(vm_size, address_space))
}

fn read(path: &'static str) -> MemoryResult<String> {
    fs::read_to_string(path).map_err(|source| MemoryError::Read { path, source })
}

/// Soft `RLIMIT_AS` limit, capped at the user-mode address space size
fn address_space_limit() -> MemoryResult<u64> {
    let mut limit = libc::rlimit {
        rlim_cur: 0,
        rlim_max: 0,
    };

    let ret = unsafe { libc::getrlimit(libc::RLIMIT_AS, &mut limit) };
    if ret != 0 {
        let errno = io::Error::last_os_error().raw_os_error().unwrap_or(0);
        return Err(MemoryError::SystemError(errno));
    }

    if limit.rlim_cur == libc::RLIM_INFINITY {
        Ok(USER_ADDRESS_SPACE)
    } else {
        Ok(u64::from(limit.rlim_cur).min(USER_ADDRESS_SPACE))
    }
}
