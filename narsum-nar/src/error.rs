use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised while classifying, reading, or serializing an entry.
///
/// None of these are recovered locally; each aborts the whole dump and is
/// reported once by the top-level caller. The only retries anywhere are the
/// transparent EINTR retry during block reads and the buffer-growth retry
/// while reading a symlink target.
#[derive(Error, Debug)]
pub enum DumpError {
    #[error("getting status of '{path}': {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("file '{path}' has an unsupported type")]
    UnsupportedEntryKind { path: PathBuf },

    #[error("'{path}' is not a symlink")]
    NotASymlink { path: PathBuf },

    #[error("reading symbolic link '{path}': {source}")]
    SymlinkRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("reading file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("file '{path}' ended unexpectedly after {actual} of {expected} bytes")]
    ShortRead {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },
}
