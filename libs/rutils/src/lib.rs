// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! rutils - Rustux Utilities Library
//!
//! Shared file and subprocess helpers for the command-line tools.

pub mod auth;
pub mod config;
pub mod file;
pub mod process;

pub use auth::{effective_uid, is_root};
pub use config::{env_nonempty, env_path};
pub use file::{
    ensure_dir, read_optional, remove_if_exists, safe_write, safe_write_mode,
    set_mode,
};
pub use process::{is_executable, Process, ProcessOutput};

#[cfg(feature = "checksum")]
pub use file::{compute_checksum, copy_verified};
