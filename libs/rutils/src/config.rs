// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Configuration utilities
//!
//! Tools read their settings from the process environment, falling back to
//! the system defaults. Empty values count as unset.

use std::path::PathBuf;

/// Value of `key`, or `None` if unset, empty, or not valid UTF-8.
pub fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Path from `key`, or `default` when the variable is unset or empty.
pub fn env_path(key: &str, default: impl Into<PathBuf>) -> PathBuf {
    match std::env::var_os(key) {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => default.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_path_falls_back_when_unset() {
        let path = env_path("RUTILS_TEST_SURELY_UNSET_VAR", "/etc/apt/auth.conf");
        assert_eq!(path, PathBuf::from("/etc/apt/auth.conf"));
        assert!(env_nonempty("RUTILS_TEST_SURELY_UNSET_VAR").is_none());
    }

    #[test]
    fn env_path_ignores_empty_value() {
        std::env::set_var("RUTILS_TEST_EMPTY_VAR", "");
        assert_eq!(env_path("RUTILS_TEST_EMPTY_VAR", "/x"), PathBuf::from("/x"));
        assert!(env_nonempty("RUTILS_TEST_EMPTY_VAR").is_none());
    }

    #[test]
    fn env_path_reads_value() {
        std::env::set_var("RUTILS_TEST_SET_VAR", "/tmp/esm.list");
        assert_eq!(env_path("RUTILS_TEST_SET_VAR", "/x"), PathBuf::from("/tmp/esm.list"));
    }
}
