//! Memory status reporter.

use std::io::{self, Write};

use hal::{MemoryResult, MemoryStatus};
use tracing::{debug, warn};

/// Query the platform and print the available page-file and virtual
/// address-space figures in MiB, one per line.
///
/// A failed query is not fatal: a single diagnostic line is printed instead.
pub fn show_system_memory<W: Write>(out: &mut W) -> io::Result<()> {
    write_memory_status(out, &hal::query_memory_status())
}

/// Print an already-taken snapshot.
pub fn write_memory_status<W: Write>(
    out: &mut W,
    status: &MemoryResult<MemoryStatus>,
) -> io::Result<()> {
    match status {
        Ok(status) => {
            debug!(
                memory_load = status.memory_load,
                total_phys = status.total_phys,
                avail_phys = status.avail_phys,
                total_page_file = status.total_page_file,
                total_virtual = status.total_virtual,
                "memory status"
            );
            writeln!(out, "{}", status.avail_page_file_mib())?;
            writeln!(out, "{}", status.avail_virtual_mib())
        }
        Err(err) => {
            warn!(error = %err, "memory status query failed");
            writeln!(out, "memory status unavailable: {err}")
        }
    }
}
