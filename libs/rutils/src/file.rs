// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! File utilities

use anyhow::{Context, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

pub fn safe_write(path: &Path, content: &[u8]) -> Result<()> {
    write_atomic(path, content, None)
}

/// Atomically replace `path` with `content` and the given permission bits.
///
/// The mode is applied to the temporary file before the rename, so the
/// target never exists with wider permissions than requested.
pub fn safe_write_mode(path: &Path, content: &[u8], mode: u32) -> Result<()> {
    write_atomic(path, content, Some(mode))
}

fn write_atomic(path: &Path, content: &[u8], mode: Option<u32>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }

    // Write to temporary file first
    let temp_path = temp_path_for(path);
    if let Err(err) = write_and_rename(&temp_path, path, content, mode) {
        // The temp file may hold credentials; never leave it behind.
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }

    log::debug!("wrote {} ({} bytes)", path.display(), content.len());
    Ok(())
}

fn write_and_rename(temp_path: &Path, path: &Path, content: &[u8], mode: Option<u32>) -> Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    if let Some(mode) = mode {
        options.mode(mode);
    }
    options
        .open(temp_path)
        .and_then(|mut file| file.write_all(content))
        .with_context(|| format!("failed to write temp file: {}", temp_path.display()))?;

    // Creation mode is filtered by the umask; an existing temp file keeps its own.
    if let Some(mode) = mode {
        set_mode(temp_path, mode)?;
    }

    // Atomic rename
    fs::rename(temp_path, path)
        .with_context(|| format!("failed to rename {} to {}", temp_path.display(), path.display()))
}

pub fn set_mode(path: &Path, mode: u32) -> Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .with_context(|| format!("failed to set mode {:o} on {}", mode, path.display()))
}

/// Read a file, treating a missing file as `None`.
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => {
            Err(err).with_context(|| format!("failed to read file: {}", path.display()))
        }
    }
}

/// Remove a file if present. Returns whether anything was removed.
pub fn remove_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => {
            log::debug!("removed {}", path.display());
            Ok(true)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
        Err(err) => {
            Err(err).with_context(|| format!("failed to remove file: {}", path.display()))
        }
    }
}

#[cfg(feature = "checksum")]
pub fn compute_checksum(data: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Copy `src` to `dst` and check the copy against the source checksum.
#[cfg(feature = "checksum")]
pub fn copy_verified(src: &Path, dst: &Path) -> Result<String> {
    let data = fs::read(src).with_context(|| format!("failed to read file: {}", src.display()))?;
    let expected = compute_checksum(&data);

    safe_write(dst, &data)?;

    let written = fs::read(dst).with_context(|| format!("failed to read file: {}", dst.display()))?;
    let actual = compute_checksum(&written);
    if actual != expected {
        anyhow::bail!(
            "checksum mismatch for {}: expected {}, got {}",
            dst.display(),
            expected,
            actual
        );
    }

    Ok(actual)
}
