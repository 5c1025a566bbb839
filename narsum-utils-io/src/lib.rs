// SPDX-FileCopyrightText: 2026 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Synchronous byte-sink utilities for narsum.
//!
//! A [`Sink`] consumes successive byte chunks. Sinks compose by decoration:
//! [`BufferedSink`] coalesces small writes in front of any inner sink, and a
//! terminal sink (such as the hashing sink in `narsum-utils-hash`) consumes
//! the stream for good. There is no trait hierarchy beyond the single narrow
//! capability; buffering and finalization are separate types.

mod buffered_sink;
mod sink;

pub use buffered_sink::BufferedSink;
pub use sink::Sink;

/// Default capacity of [`BufferedSink`].
pub const DEFAULT_BUF_SIZE: usize = 32 * 1024;

/// Wire protocol utilities.
pub mod wire {
    /// Zero bytes for padding.
    pub const ZEROS: [u8; 8] = [0u8; 8];

    pub const fn calc_aligned(len: u64) -> u64 {
        len.wrapping_add(7) & !7
    }

    pub const fn calc_padding(len: u64) -> usize {
        let aligned = calc_aligned(len);
        aligned.wrapping_sub(len) as usize
    }
}

#[cfg(test)]
mod unittests {
    use rstest::rstest;

    use super::wire::{calc_aligned, calc_padding};

    #[rstest]
    #[case::zero(0, 0, 0)]
    #[case::one(1, 8, 7)]
    #[case::seven(7, 8, 1)]
    #[case::eight(8, 8, 0)]
    #[case::nine(9, 16, 7)]
    #[case::large(4097, 4104, 7)]
    fn test_alignment(#[case] len: u64, #[case] aligned: u64, #[case] padding: usize) {
        assert_eq!(calc_aligned(len), aligned);
        assert_eq!(calc_padding(len), padding);
    }
}
