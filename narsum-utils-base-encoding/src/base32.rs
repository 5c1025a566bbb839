//! Nix base32 encoding/decoding.
//!
//! Not the RFC 4648 base32: Nix uses its own alphabet, extracts 5-bit groups
//! least-significant-bit first and prints the groups in reverse, so the
//! most-significant group comes out first. Groups may span two adjacent
//! bytes; the group past the final byte is zero-extended.

use std::sync::LazyLock;

use data_encoding::{BitOrder, DecodeError, Encoding, Specification};

/// The 32-character alphabet used by Nix's base32 encoding.
///
/// Digits and lowercase letters with `e`, `o`, `u` and `t` omitted. This is
/// the canonical source for the alphabet across the workspace.
pub const ALPHABET: &str = "0123456789abcdfghijklmnpqrsvwxyz";

/// Nix base32 encoding (lowercase, no padding, LSB first, reversed).
static NIX_BASE32: LazyLock<Encoding> = LazyLock::new(|| {
    let mut spec = Specification::new();
    spec.symbols.push_str(ALPHABET);
    spec.bit_order = BitOrder::LeastSignificantFirst;
    spec.encoding().expect("static base32 specification is valid")
});

/// Number of characters needed to encode `len` bytes.
pub const fn encode_len(len: usize) -> usize {
    (8 * len).div_ceil(5)
}

/// Encode `input` as a Nix base32 string of [`encode_len`] characters.
pub fn encode_string(input: &[u8]) -> String {
    let mut encoded = NIX_BASE32.encode(input).into_bytes();
    // data-encoding emits the least-significant group first; Nix prints the
    // groups in the opposite order.
    encoded.reverse();
    String::from_utf8(encoded).expect("base32 symbols are ASCII")
}

/// Decode a Nix base32 string produced by [`encode_string`].
///
/// Error positions refer to the reversed input.
pub fn decode_string(input: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut reversed = input.to_vec();
    reversed.reverse();
    NIX_BASE32.decode(&reversed)
}


#[cfg(test)]
mod proptests {
    use proptest::{prop_assert, prop_assert_eq, proptest};

    use super::*;

    proptest! {
        #[test]
        fn proptest_roundtrip(data: Vec<u8>) {
            let encoded = encode_string(&data);
            prop_assert_eq!(encoded.len(), encode_len(data.len()));
            let decoded = decode_string(encoded.as_bytes()).unwrap();
            prop_assert_eq!(data, decoded);
        }

        #[test]
        fn proptest_digest_encoding_shape(digest: [u8; 32]) {
            let encoded = encode_string(&digest);
            prop_assert_eq!(encoded.len(), 52);
            prop_assert!(encoded.chars().all(|c| ALPHABET.contains(c)));
        }
    }
}
