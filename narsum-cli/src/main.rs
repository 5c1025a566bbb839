// SPDX-FileCopyrightText: 2026 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! `narsum` — print the NAR content digest of one file or symlink.
//!
//! Takes exactly one positional path argument and writes the 52-character
//! base32 digest to stdout without a trailing newline. Every failure is
//! reported as a single diagnostic line on stderr and a non-zero exit
//! status; nothing is ever written to stdout on failure.

use std::env;
use std::ffi::OsString;
use std::io::{self, Write as _};
use std::path::Path;
use std::process::exit;

use log::debug;

use narsum_nar::hash_path;

fn run(args: Vec<OsString>) -> i32 {
    let [path] = args.as_slice() else {
        eprintln!("usage: narsum <path>");
        return 1;
    };

    match hash_path(Path::new(path)) {
        Ok(result) => {
            debug!("hashed {} archive bytes", result.bytes_written);
            print!("{}", result.hash);
            if let Err(e) = io::stdout().flush() {
                eprintln!("narsum: writing to stdout: {e}");
                return 1;
            }
            0
        }
        Err(e) => {
            eprintln!("narsum: {e}");
            1
        }
    }
}

fn main() {
    env_logger::init();
    exit(run(env::args_os().skip(1).collect()));
}
