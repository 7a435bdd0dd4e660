//! Fixed-size integer sequences and the line printer.

use std::fmt::Display;
use std::io::{self, Write};

/// Length of every fixed-size sequence in the walkthrough
pub const ARRAY_SIZE: usize = 3;

/// Stack array filled by an explicit loop: element `i` holds `i`.
pub fn loop_assigned<const N: usize>() -> [i32; N] {
    let mut seq = [0i32; N];
    for (i, slot) in seq.iter_mut().enumerate() {
        *slot = i as i32;
    }
    seq
}

/// Stack array from a full literal list.
pub fn literal() -> [i32; ARRAY_SIZE] {
    [1, 2, 3]
}

/// Stack array whose leading elements come from `prefix`; the rest are zero.
/// A prefix longer than `N` is cut to `N`.
pub fn partial_literal<const N: usize>(prefix: &[i32]) -> [i32; N] {
    let mut seq = [0i32; N];
    let n = prefix.len().min(N);
    seq[..n].copy_from_slice(&prefix[..n]);
    seq
}

/// First `count` elements, space separated.
///
/// Panics if `count` exceeds `seq.len()`.
pub fn format_sequence<T: Display>(seq: &[T], count: usize) -> String {
    seq[..count]
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Write the first `count` elements of `seq` as one line.
pub fn print_sequence<W: Write, T: Display>(out: &mut W, seq: &[T], count: usize) -> io::Result<()> {
    writeln!(out, "{}", format_sequence(seq, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn printed(seq: &[i32]) -> String {
        let mut out = Vec::new();
        print_sequence(&mut out, seq, seq.len()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn loop_assigned_is_index_valued() {
        assert_eq!(printed(&loop_assigned::<ARRAY_SIZE>()), "0 1 2\n");
    }

    #[test]
    fn literal_list() {
        assert_eq!(printed(&literal()), "1 2 3\n");
    }

    #[test]
    fn partial_literal_zero_fills() {
        assert_eq!(printed(&partial_literal::<ARRAY_SIZE>(&[1])), "1 0 0\n");
        assert_eq!(partial_literal::<2>(&[7, 8, 9]), [7, 8]);
        assert_eq!(partial_literal::<4>(&[]), [0; 4]);
    }

    #[test]
    fn count_limits_output() {
        assert_eq!(format_sequence(&[4, 5, 6], 2), "4 5");
        assert_eq!(format_sequence::<i32>(&[4, 5, 6], 0), "");
    }

    #[test]
    #[should_panic]
    fn count_past_end_panics() {
        format_sequence(&[1, 2], 3);
    }

    #[test]
    fn negative_values() {
        assert_eq!(format_sequence(&[-1, 0, 10], 3), "-1 0 10");
    }

    proptest! {
        #[test]
        fn one_token_per_element(seq in proptest::collection::vec(any::<i32>(), 0..64)) {
            let line = printed(&seq);
            prop_assert!(line.ends_with('\n'));

            let tokens: Vec<i32> = line
                .split_whitespace()
                .map(|t| t.parse().unwrap())
                .collect();
            prop_assert_eq!(tokens, seq);
        }
    }
}
