//! Canonical field framing for the archive wire format.
//!
//! Every string field is written as an 8-byte little-endian length prefix,
//! the raw payload, then zero padding so the total is a multiple of 8.
//! Integers are exactly 8 raw little-endian bytes, unframed. The `contents`
//! size field in particular goes through [`write_u64`], never through the
//! string framing; the asymmetry is part of the bit-exact format.

use narsum_utils_io::{Sink, wire};

/// Write `n` as 8 raw little-endian bytes.
pub fn write_u64<S: Sink + ?Sized>(sink: &mut S, n: u64) {
    sink.accept(&n.to_le_bytes());
}

/// Write zero padding for a field of `len` payload bytes, up to the next
/// 8-byte boundary.
pub fn write_padding<S: Sink + ?Sized>(sink: &mut S, len: u64) {
    let padding = wire::calc_padding(len);
    if padding != 0 {
        sink.accept(&wire::ZEROS[..padding]);
    }
}

/// Write a framed field: length prefix, payload, padding.
pub fn write_bytes<S: Sink + ?Sized>(sink: &mut S, data: &[u8]) {
    write_u64(sink, data.len() as u64);
    sink.accept(data);
    write_padding(sink, data.len() as u64);
}

/// Write a framed string token.
pub fn write_str<S: Sink + ?Sized>(sink: &mut S, data: &str) {
    write_bytes(sink, data.as_bytes());
}

#[cfg(test)]
mod unittests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn framed_token_layout() {
        let mut out = Vec::new();
        write_str(&mut out, "type");
        assert_eq!(
            out,
            [4, 0, 0, 0, 0, 0, 0, 0, b't', b'y', b'p', b'e', 0, 0, 0, 0]
        );
    }

    #[test]
    fn empty_token_is_just_the_length_prefix() {
        let mut out = Vec::new();
        write_str(&mut out, "");
        assert_eq!(out, [0u8; 8]);
    }

    #[test]
    fn integers_are_raw_little_endian() {
        let mut out = Vec::new();
        write_u64(&mut out, 0x0102_0304_0506_0708);
        assert_eq!(out, [8, 7, 6, 5, 4, 3, 2, 1]);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(7)]
    #[case(8)]
    #[case(9)]
    #[case(4095)]
    #[case(4096)]
    #[case(4097)]
    fn framed_field_is_multiple_of_eight(#[case] payload_len: usize) {
        let payload = vec![0xabu8; payload_len];
        let mut out = Vec::new();
        write_bytes(&mut out, &payload);

        assert_eq!(out.len() % 8, 0);
        assert_eq!(&out[..8], &(payload_len as u64).to_le_bytes());
        assert_eq!(&out[8..8 + payload_len], &payload[..]);
        assert!(out[8 + payload_len..].iter().all(|&b| b == 0));
        // Padding never inflates the field past the next boundary.
        assert!(out.len() - (8 + payload_len) < 8);
    }
}
