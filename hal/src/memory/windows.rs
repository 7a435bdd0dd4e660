//! Windows memory status implementation
//!
//! Uses kernel32's GlobalMemoryStatusEx().

use super::{MemoryError, MemoryResult, MemoryStatus};

/// MEMORYSTATUSEX layout
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
struct MemoryStatusEx {
    length: u32,
    memory_load: u32,
    total_phys: u64,
    avail_phys: u64,
    total_page_file: u64,
    avail_page_file: u64,
    total_virtual: u64,
    avail_virtual: u64,
    avail_extended_virtual: u64,
}

#[allow(non_snake_case)]
#[link(name = "kernel32")]
extern "system" {
    fn GlobalMemoryStatusEx(buffer: *mut MemoryStatusEx) -> i32;
    fn GetLastError() -> u32;
}

/// Query the extended memory status
pub fn query_memory_status() -> MemoryResult<MemoryStatus> {
    let mut raw = MemoryStatusEx {
        length: std::mem::size_of::<MemoryStatusEx>() as u32,
        ..Default::default()
    };

    let ok = unsafe { GlobalMemoryStatusEx(&mut raw) };
    if ok == 0 {
        let code = unsafe { GetLastError() };
        return Err(MemoryError::SystemError(code as i32));
    }

    Ok(MemoryStatus {
        memory_load: raw.memory_load,
        total_phys: raw.total_phys,
        avail_phys: raw.avail_phys,
        total_page_file: raw.total_page_file,
        avail_page_file: raw.avail_page_file,
        total_virtual: raw.total_virtual,
        avail_virtual: raw.avail_virtual,
    })
}
