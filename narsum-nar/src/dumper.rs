//! Serialization of a classified entry into the canonical archive stream.
//!
//! The stream is only ever fed into a hash sink, so ordering and framing
//! must be byte-identical to the reference encoding: the digest is the
//! product, and any deviation changes it silently.

use std::fs::File;
use std::io::{self, Read as _};
use std::path::Path;

use bstr::BStr;
use log::debug;

use narsum_utils_hash::{HashResult, HashSink};
use narsum_utils_io::{BufferedSink, Sink};

use crate::entry::{Entry, classify};
use crate::error::DumpError;
use crate::wire;

/// Magic string opening every archive stream, framed like any other token.
pub const NAR_VERSION_MAGIC_1: &str = "nix-archive-1";

/// Files are read and forwarded in fixed blocks of this size.
const READ_CHUNK_SIZE: usize = 64 * 1024;

/// Hash the canonical archive encoding of the entry at `path`.
///
/// Classifies the path, streams its encoding through a buffered SHA-256
/// sink, and returns the digest together with the total stream length.
pub fn hash_path(path: &Path) -> Result<HashResult, DumpError> {
    let mut sink = BufferedSink::new(HashSink::new());
    dump(path, &mut sink)?;
    Ok(sink.into_inner().finish())
}

/// Serialize the entry at `path`, preceded by the format magic, into `sink`.
///
/// Classification runs first, so an unsupported or unreadable path fails
/// before a single byte reaches the sink.
pub fn dump<S: Sink>(path: &Path, sink: &mut S) -> Result<(), DumpError> {
    let entry = classify(path)?;
    wire::write_str(sink, NAR_VERSION_MAGIC_1);
    dump_entry(&entry, path, sink)
}

/// Serialize a classified entry into `sink`.
///
/// `path` supplies the content bytes for regular entries; a symlink entry
/// is serialized from the entry alone.
pub fn dump_entry<S: Sink>(entry: &Entry, path: &Path, sink: &mut S) -> Result<(), DumpError> {
    wire::write_str(sink, "(");
    match entry {
        Entry::Regular { executable, size } => {
            debug!("dumping regular file '{}' ({size} bytes)", path.display());
            wire::write_str(sink, "type");
            wire::write_str(sink, "regular");
            if *executable {
                wire::write_str(sink, "executable");
                wire::write_str(sink, "");
            }
            dump_contents(path, *size, sink)?;
        }
        Entry::Symlink { target } => {
            debug!(
                "dumping symlink '{}' -> '{}'",
                path.display(),
                BStr::new(target)
            );
            wire::write_str(sink, "type");
            wire::write_str(sink, "symlink");
            wire::write_str(sink, "target");
            wire::write_bytes(sink, target);
        }
    }
    wire::write_str(sink, ")");
    Ok(())
}

/// Stream exactly `size` bytes of file content as the `contents` field:
/// the size as a bare integer, the raw bytes, padding to the 8-byte
/// boundary.
fn dump_contents<S: Sink>(path: &Path, size: u64, sink: &mut S) -> Result<(), DumpError> {
    wire::write_str(sink, "contents");
    wire::write_u64(sink, size);

    // Scoped so the descriptor is released on every exit path.
    let mut file = File::open(path).map_err(|source| DumpError::Read {
        path: path.to_owned(),
        source,
    })?;

    let mut buf = vec![0u8; READ_CHUNK_SIZE];
    let mut left = size;
    while left > 0 {
        let want = left.min(buf.len() as u64) as usize;
        read_block(&mut file, &mut buf[..want], path, size, size - left)?;
        sink.accept(&buf[..want]);
        left -= want as u64;
    }

    wire::write_padding(sink, size);
    Ok(())
}

/// Fill `buf` completely, retrying interrupted reads. EOF before the block
/// is full means the file is shorter than its classified size.
fn read_block(
    file: &mut File,
    buf: &mut [u8],
    path: &Path,
    expected: u64,
    done: u64,
) -> Result<(), DumpError> {
    let mut filled = 0;
    while filled < buf.len() {
        match file.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(DumpError::ShortRead {
                    path: path.to_owned(),
                    expected,
                    actual: done + filled as u64,
                });
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(DumpError::Read {
                    path: path.to_owned(),
                    source,
                });
            }
        }
    }
    Ok(())
}


#[cfg(test)]
mod proptests {
    use std::fs;
    use std::path::Path;

    use proptest::prelude::*;
    use tempfile::tempdir;

    use narsum_utils_hash::Sha256;

    use super::unittests::reference_regular_stream;
    use super::*;

    proptest! {
        #[test]
        fn proptest_digest_matches_reference_stream(
            contents in proptest::collection::vec(any::<u8>(), 0..2048),
            executable: bool,
        ) {
            let dir = tempdir().unwrap();
            let path = dir.path().join("file");
            fs::write(&path, &contents).unwrap();
            set_mode(&path, if executable { 0o755 } else { 0o644 });

            let result = hash_path(&path).unwrap();
            let reference = reference_regular_stream(&contents, executable);
            prop_assert_eq!(result.bytes_written, reference.len() as u64);
            prop_assert_eq!(result.hash, Sha256::digest(&reference));
        }
    }

    fn set_mode(path: &Path, mode: u32) {
        use std::os::unix::fs::PermissionsExt as _;
        fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
    }
}
