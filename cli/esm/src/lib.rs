// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! esm - Ubuntu Extended Security Maintenance toggle
//!
//! Adds or removes the ESM archive from APT's configuration: the sources
//! list entry, the archive credentials and the signing keyring.

pub mod apt;
pub mod archive;
pub mod config;
pub mod error;
pub mod repo;
pub mod token;

pub use config::Settings;
pub use error::{EsmError, Result};
pub use token::Token;
