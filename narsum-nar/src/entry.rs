//! Classification of a filesystem path into an archivable entry.

use std::ffi::CString;
use std::fs;
use std::io;
use std::os::unix::ffi::OsStrExt as _;
use std::os::unix::fs::PermissionsExt as _;
use std::path::Path;

use crate::error::DumpError;

/// A filesystem entry classified at the moment of inspection.
///
/// Only regular files and symbolic links are representable. Any other kind
/// (directory, device, socket, FIFO) is a classification error, never a
/// variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Regular { executable: bool, size: u64 },
    /// Target bytes exactly as stored in the link, unvalidated and
    /// unresolved.
    Symlink { target: Vec<u8> },
}

/// Classify `path` without following a top-level symlink.
pub fn classify(path: &Path) -> Result<Entry, DumpError> {
    let metadata = fs::symlink_metadata(path).map_err(|source| DumpError::Stat {
        path: path.to_owned(),
        source,
    })?;

    let file_type = metadata.file_type();
    if file_type.is_file() {
        Ok(Entry::Regular {
            executable: metadata.permissions().mode() & 0o100 != 0,
            size: metadata.len(),
        })
    } else if file_type.is_symlink() {
        Ok(Entry::Symlink {
            target: read_target(path)?,
        })
    } else {
        Err(DumpError::UnsupportedEntryKind {
            path: path.to_owned(),
        })
    }
}

/// Smallest buffer tried by [`read_target`].
const READLINK_SEED_SIZE: usize = libc::PATH_MAX as usize / 4;

/// Read a symlink's target, retrying with a geometrically growing buffer
/// until the reported target fits strictly inside it.
///
/// `readlink(2)` truncates silently when the buffer is too small, so a
/// result that fills the buffer completely cannot be trusted; the buffer
/// grows by half each round until the target fits with room to spare.
#[allow(unsafe_code)]
pub fn read_target(path: &Path) -> Result<Vec<u8>, DumpError> {
    let c_path =
        CString::new(path.as_os_str().as_bytes()).map_err(|e| DumpError::SymlinkRead {
            path: path.to_owned(),
            source: io::Error::new(io::ErrorKind::InvalidInput, e),
        })?;

    let mut capacity = READLINK_SEED_SIZE;
    loop {
        let mut buf = vec![0u8; capacity];
        // SAFETY: c_path is a valid null-terminated string and buf is a
        // writable allocation of buf.len() bytes; readlink writes at most
        // buf.len() bytes into it and requires no terminator.
        let len =
            unsafe { libc::readlink(c_path.as_ptr(), buf.as_mut_ptr().cast(), buf.len()) };
        if len < 0 {
            let source = io::Error::last_os_error();
            return Err(if source.raw_os_error() == Some(libc::EINVAL) {
                DumpError::NotASymlink {
                    path: path.to_owned(),
                }
            } else {
                DumpError::SymlinkRead {
                    path: path.to_owned(),
                    source,
                }
            });
        }
        let len = len as usize;
        if len < buf.len() {
            buf.truncate(len);
            return Ok(buf);
        }
        capacity += capacity / 2;
    }
}
