//! Heap byte buffers.
//!
//! A buffer starts as an [`UninitBuffer`], which offers no way to read its
//! contents. Filling it produces a [`ByteBuffer`]. Both release their
//! allocation exactly once, on drop.

use std::mem::{ManuallyDrop, MaybeUninit};

use crate::error::{DemoError, DemoResult};

/// Byte written into every slot of a filled buffer
pub const FILL_BYTE: u8 = b' ';

/// Size of the large walkthrough buffer (1 MiB)
pub const LARGE_BUFFER_LEN: usize = 1_048_576;

/// Allocated bytes that have not been written yet.
pub struct UninitBuffer {
    bytes: Vec<MaybeUninit<u8>>,
}

impl UninitBuffer {
    /// Allocate `len` bytes from the heap.
    pub fn allocate(len: usize) -> DemoResult<Self> {
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(len)
            .map_err(|source| DemoError::Allocation {
                requested: len,
                source,
            })?;
        // SAFETY: capacity >= len and MaybeUninit needs no initialization.
        unsafe { bytes.set_len(len) };
        Ok(Self { bytes })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write `value` to every byte, making the buffer readable.
    pub fn fill(mut self, value: u8) -> ByteBuffer {
        let len = self.bytes.len();
        fill_bytes(&mut self.bytes, len, value);

        let mut bytes = ManuallyDrop::new(self.bytes);
        let (ptr, len, capacity) = (bytes.as_mut_ptr(), bytes.len(), bytes.capacity());
        // SAFETY: every element was written above, and MaybeUninit<u8> has
        // the layout of u8. Ownership of the allocation moves to the new Vec.
        let bytes = unsafe { Vec::from_raw_parts(ptr.cast::<u8>(), len, capacity) };
        ByteBuffer { bytes }
    }
}

/// Fully initialized heap bytes.
#[derive(Debug)]
pub struct ByteBuffer {
    bytes: Vec<u8>,
}

impl ByteBuffer {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

/// Write `value` into slots `[0, count)`.
///
/// Panics if `count` exceeds the buffer length.
pub fn fill_bytes(buf: &mut [MaybeUninit<u8>], count: usize, value: u8) {
    for slot in &mut buf[..count] {
        slot.write(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn large_buffer_fills_with_spaces() {
        let buffer = UninitBuffer::allocate(LARGE_BUFFER_LEN).unwrap().fill(FILL_BYTE);
        assert_eq!(buffer.len(), LARGE_BUFFER_LEN);
        assert!(buffer.as_slice().iter().all(|&b| b == b' '));
    }

    #[test]
    fn empty_buffer() {
        let buffer = UninitBuffer::allocate(0).unwrap();
        assert!(buffer.is_empty());
        assert!(buffer.fill(FILL_BYTE).is_empty());
    }

    #[test]
    fn oversized_request_is_an_error() {
        match UninitBuffer::allocate(usize::MAX) {
            Err(DemoError::Allocation { requested, .. }) => assert_eq!(requested, usize::MAX),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("usize::MAX bytes should not be allocatable"),
        }
    }

    #[test]
    fn partial_fill_touches_prefix_only() {
        let mut slots = [MaybeUninit::new(0u8); 8];
        fill_bytes(&mut slots, 5, FILL_BYTE);

        // SAFETY: every slot was initialized by the array expression.
        let bytes = slots.map(|slot| unsafe { slot.assume_init() });
        assert_eq!(&bytes, b"     \0\0\0");
    }

    #[test]
    #[should_panic]
    fn fill_past_end_panics() {
        let mut slots = [MaybeUninit::<u8>::uninit(); 2];
        fill_bytes(&mut slots, 3, FILL_BYTE);
    }

    proptest! {
        #[test]
        fn every_index_reads_back_the_fill_byte(len in 0usize..8192, value in any::<u8>()) {
            let buffer = UninitBuffer::allocate(len).unwrap().fill(value);
            prop_assert_eq!(buffer.len(), len);
            for i in 0..len {
                prop_assert_eq!(buffer.as_slice()[i], value);
            }
        }
    }
}
