// SPDX-FileCopyrightText: 2026 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! SHA-256 digest type and streaming hash sink for narsum.
//!
//! The digest of an archive stream is computed incrementally: bytes flow
//! through a [`HashSink`] (usually behind a `BufferedSink`), and a single
//! [`HashSink::finish`] call yields the digest together with the total byte
//! count. The hasher is value-owned and released at end of scope; there is
//! no manual context lifetime anywhere.

use std::fmt;

use sha2::Digest as _;
use thiserror::Error;

use narsum_utils_io::Sink;

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
#[error("hash has wrong length {length} != {}", Sha256::SIZE)]
pub struct InvalidHashError {
    length: usize,
}

/// A SHA-256 digest value.
///
/// Immutable once produced; the [`Default`] value is all-zero bytes.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Default)]
pub struct Sha256([u8; Sha256::SIZE]);

impl Sha256 {
    pub const SIZE: usize = 32;

    pub const fn new(digest: [u8; Self::SIZE]) -> Self {
        Self(digest)
    }

    pub fn from_slice(digest: &[u8]) -> Result<Self, InvalidHashError> {
        let data: [u8; Self::SIZE] = digest.try_into().map_err(|_| InvalidHashError {
            length: digest.len(),
        })?;
        Ok(Self(data))
    }

    /// Returns the digest of `data`.
    ///
    /// ```
    /// # use narsum_utils_hash::Sha256;
    /// let hash = Sha256::digest("abc");
    ///
    /// assert_eq!(hash.to_base32(), "1b8m03r63zqhnjf7l5wnldhh7c134ap5vpj0850ymkq1iyzicy5s");
    /// ```
    pub fn digest<B: AsRef<[u8]>>(data: B) -> Self {
        let mut ctx = Context::new();
        ctx.update(data);
        ctx.finish()
    }

    #[inline]
    pub fn digest_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Render the digest in Nix base32 (52 characters).
    pub fn to_base32(&self) -> String {
        narsum_utils_base_encoding::base32::encode_string(&self.0)
    }
}

impl AsRef<[u8]> for Sha256 {
    fn as_ref(&self) -> &[u8] {
        self.digest_bytes()
    }
}

impl fmt::Display for Sha256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base32())
    }
}

impl fmt::Debug for Sha256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Sha256").field(&self.to_base32()).finish()
    }
}

/// A context for multi-step (Init-Update-Finish) digest calculation.
///
/// ```
/// use narsum_utils_hash::{Context, Sha256};
///
/// let mut ctx = Context::new();
/// ctx.update("hello");
/// ctx.update(", ");
/// ctx.update("world");
/// let multi_step = ctx.finish();
///
/// assert_eq!(multi_step, Sha256::digest("hello, world"));
/// ```
#[derive(Clone)]
pub struct Context(sha2::Sha256);

impl Context {
    pub fn new() -> Self {
        Self(sha2::Sha256::new())
    }

    /// Update the digest with all the data in `data`.
    /// May be called zero or more times before `finish`.
    pub fn update<D: AsRef<[u8]>>(&mut self, data: D) {
        self.0.update(data.as_ref());
    }

    /// Finalizes the digest calculation and returns the [`Sha256`] value.
    /// Consumes the context to prevent misuse.
    pub fn finish(self) -> Sha256 {
        Sha256::new(self.0.finalize().into())
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Context").finish()
    }
}

/// Digest plus the total number of bytes the sink consumed.
///
/// Produced exactly once, at finalize time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashResult {
    pub hash: Sha256,
    pub bytes_written: u64,
}

/// The terminal [`Sink`]: feeds every chunk into an incremental SHA-256 and
/// counts the bytes.
///
/// [`finish`](HashSink::finish) consumes the sink, so finalizing twice is
/// unrepresentable. Callers composing with a `BufferedSink` must drain the
/// buffer first (`into_inner` does); bytes only count once they reach this
/// sink.
///
/// ```
/// use narsum_utils_hash::{HashSink, Sha256};
/// use narsum_utils_io::Sink as _;
///
/// let mut sink = HashSink::new();
/// sink.accept(b"hello, ");
/// sink.accept(b"world");
/// let result = sink.finish();
///
/// assert_eq!(result.bytes_written, 12);
/// assert_eq!(result.hash, Sha256::digest("hello, world"));
/// ```
#[derive(Debug, Default)]
pub struct HashSink {
    ctx: Context,
    bytes_written: u64,
}

impl HashSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finalizes the digest and returns it with the byte count.
    pub fn finish(self) -> HashResult {
        HashResult {
            hash: self.ctx.finish(),
            bytes_written: self.bytes_written,
        }
    }
}

impl Sink for HashSink {
    fn accept(&mut self, data: &[u8]) {
        self.ctx.update(data);
        self.bytes_written += data.len() as u64;
    }
}

#[cfg(test)]
mod unittests {
    use hex_literal::hex;
    use rstest::rstest;

    use narsum_utils_io::BufferedSink;

    use super::*;

    /// value taken from: https://tools.ietf.org/html/rfc4634
    const SHA256_ABC: Sha256 = Sha256::new(hex!(
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    ));
    /// value taken from: https://tools.ietf.org/html/rfc4634
    const SHA256_LONG: Sha256 = Sha256::new(hex!(
        "248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1"
    ));
    const SHA256_EMPTY: Sha256 = Sha256::new(hex!(
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    ));

    #[rstest]
    #[case::empty(&SHA256_EMPTY, "")]
    #[case::abc(&SHA256_ABC, "abc")]
    #[case::long(&SHA256_LONG, "abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq")]
    fn test_digest(#[case] expected: &Sha256, #[case] input: &str) {
        assert_eq!(Sha256::digest(input), *expected);
    }

    #[test]
    fn default_is_all_zero() {
        assert_eq!(Sha256::default().digest_bytes(), &[0u8; 32]);
        assert_eq!(
            Sha256::default().to_base32(),
            "0".repeat(52),
            "all-zero digest renders as 52 zeros"
        );
    }

    #[rstest]
    #[case::short(31)]
    #[case::long(33)]
    #[case::empty(0)]
    fn from_slice_rejects_wrong_length(#[case] len: usize) {
        let bytes = vec![0u8; len];
        assert_eq!(Sha256::from_slice(&bytes), Err(InvalidHashError { length: len }));
    }

    #[test]
    fn from_slice_accepts_exact_length() {
        let hash = Sha256::from_slice(SHA256_ABC.digest_bytes()).unwrap();
        assert_eq!(hash, SHA256_ABC);
    }

    #[test]
    fn sink_counts_bytes_and_matches_one_shot() {
        let mut sink = HashSink::new();
        sink.accept(b"abc");
        sink.accept(b"");
        sink.accept(b"def");
        let result = sink.finish();
        assert_eq!(result.bytes_written, 6);
        assert_eq!(result.hash, Sha256::digest("abcdef"));
    }

    #[test]
    fn buffered_sink_does_not_change_the_digest() {
        let payload: Vec<u8> = (0..=255u8).cycle().take(100_000).collect();

        let mut buffered = BufferedSink::with_capacity(4096, HashSink::new());
        for chunk in payload.chunks(77) {
            buffered.accept(chunk);
        }
        let result = buffered.into_inner().finish();

        assert_eq!(result.bytes_written, payload.len() as u64);
        assert_eq!(result.hash, Sha256::digest(&payload));
    }

    #[test]
    fn display_is_base32() {
        assert_eq!(
            SHA256_ABC.to_string(),
            "1b8m03r63zqhnjf7l5wnldhh7c134ap5vpj0850ymkq1iyzicy5s"
        );
    }
}
