//! The walkthrough itself: sequence initialization, then a large heap
//! buffer with memory status printed around its lifetime.

use std::io::Write;

use hal::{MemoryResult, MemoryStatus};
use tracing::debug;

use crate::buffer::{UninitBuffer, FILL_BYTE, LARGE_BUFFER_LEN};
use crate::error::DemoResult;
use crate::report::write_memory_status;
use crate::sequence::{self, print_sequence, ARRAY_SIZE};

/// Write the full walkthrough to `out`.
pub fn run_demo<W: Write>(out: &mut W) -> DemoResult<()> {
    run_demo_with(out, hal::query_memory_status)
}

/// Write the full walkthrough, taking memory snapshots from `query`.
pub fn run_demo_with<W, Q>(out: &mut W, mut query: Q) -> DemoResult<()>
where
    W: Write,
    Q: FnMut() -> MemoryResult<MemoryStatus>,
{
    // A: stack array assigned in a loop
    writeln!(out, "A:")?;
    let a: [i32; ARRAY_SIZE] = sequence::loop_assigned();
    print_sequence(out, &a, ARRAY_SIZE)?;

    // B: literal list
    writeln!(out, "B:")?;
    let b = sequence::literal();
    print_sequence(out, &b, ARRAY_SIZE)?;

    // C: partial literal, trailing elements zeroed
    writeln!(out, "C:")?;
    let c: [i32; ARRAY_SIZE] = sequence::partial_literal(&[1]);
    print_sequence(out, &c, ARRAY_SIZE)?;

    // D: heap bytes, released straight away
    writeln!(out, "D:")?;
    let d = UninitBuffer::allocate(ARRAY_SIZE)?;
    debug!(len = d.len(), "allocated small buffer");
    drop(d);

    writeln!(out, "\nBefore array:")?;
    write_memory_status(out, &query())?;

    let heap_before = hal::get_heap_used();
    let e = UninitBuffer::allocate(LARGE_BUFFER_LEN)?.fill(FILL_BYTE);
    debug!(len = e.len(), "filled large buffer");

    writeln!(out, "\nBefore delete:")?;
    write_memory_status(out, &query())?;
    let heap_during = hal::get_heap_used();

    drop(e);

    writeln!(out, "\nAfter delete:")?;
    write_memory_status(out, &query())?;

    if let (Some(before), Some(during), Some(after)) =
        (heap_before, heap_during, hal::get_heap_used())
    {
        debug!(
            allocated = during as isize - before as isize,
            freed = during as isize - after as isize,
            "heap usage around large buffer"
        );
    }

    if let Some(stats) = hal::get_heap_stats() {
        debug!(
            arena = stats.arena,
            mmapped = stats.mmapped,
            in_use = stats.in_use,
            free = stats.free,
            free_chunks = stats.free_chunks,
            "heap after release"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_section_is_deterministic() {
        let mut out = Vec::new();
        run_demo(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("A:\n0 1 2\nB:\n1 2 3\nC:\n1 0 0\nD:\n\nBefore array:\n"));
    }

    #[test]
    fn failed_query_keeps_walkthrough_going() {
        let mut out = Vec::new();
        run_demo_with(&mut out, || Err(hal::MemoryError::NotSupported)).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.matches("memory status unavailable").count(), 3);
        assert!(text.contains("\nAfter delete:\nmemory status unavailable"));
    }

    #[test]
    fn snapshots_in_order() {
        let mut out = Vec::new();
        run_demo(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let before_array = text.find("\nBefore array:\n").unwrap();
        let before_delete = text.find("\nBefore delete:\n").unwrap();
        let after_delete = text.find("\nAfter delete:\n").unwrap();
        assert!(before_array < before_delete);
        assert!(before_delete < after_delete);
    }
}
