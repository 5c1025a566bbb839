// SPDX-FileCopyrightText: 2026 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! NAR (Nix ARchive) serialization and content hashing for single
//! filesystem entries.
//!
//! A regular file or symlink is classified, serialized into the canonical
//! NAR byte stream, and fed incrementally into a SHA-256 sink; the digest
//! identifies the entry's content the way a content-addressed store would
//! for deduplication. Directories and special files are rejected, not
//! generalized.
//!
//! # Key Features
//!
//! - Streaming serialization (bounded memory usage; file contents are never
//!   materialized)
//! - Bit-exact NAR framing: any `Sink` sees the reference encoding
//! - Explicit, fatal error taxonomy; nothing below the caller terminates
//!   the process
//!
//! # Design Principles
//!
//! 1. **Streaming**: content flows through fixed-size blocks into the sink
//! 2. **Composable sinks**: buffering and hashing are decorations, not
//!    subclasses
//! 3. **Format-focused**: this crate only knows the archive structure and
//!    the filesystem inspection it needs

pub mod wire;

mod dumper;
mod entry;
mod error;

pub use dumper::{NAR_VERSION_MAGIC_1, dump, dump_entry, hash_path};
pub use entry::{Entry, classify, read_target};
pub use error::DumpError;
