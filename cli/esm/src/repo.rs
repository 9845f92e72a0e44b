// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! The on-disk artifacts of an enabled ESM archive: the sources list entry,
//! the credentials line in APT's auth file and the archive keyring.

use rutils::{copy_verified, read_optional, remove_if_exists, safe_write, safe_write_mode, set_mode};

use crate::config::{Settings, ESM_HOST, ESM_REPO_URL};
use crate::error::Result;
use crate::token::Token;

/// APT refuses credentials files readable by others.
const AUTH_FILE_MODE: u32 = 0o600;

pub fn sources_list_entry(series: &str) -> String {
    format!(
        "deb {url} {series} main\n# deb-src {url} {series} main\n",
        url = ESM_REPO_URL,
        series = series
    )
}

/// The archive is enabled when its list file carries an active `deb` line.
pub fn is_enabled(settings: &Settings) -> Result<bool> {
    let prefix = format!("deb {} ", ESM_REPO_URL);
    let enabled = read_optional(&settings.repo_list)?
        .map(|content| content.lines().any(|line| line.trim_start().starts_with(&prefix)))
        .unwrap_or(false);
    Ok(enabled)
}

pub fn write_sources_list(settings: &Settings) -> Result<()> {
    safe_write(
        &settings.repo_list,
        sources_list_entry(&settings.series).as_bytes(),
    )?;
    log::info!("wrote {}", settings.repo_list.display());
    Ok(())
}

pub fn remove_sources_list(settings: &Settings) -> Result<()> {
    if remove_if_exists(&settings.repo_list)? {
        log::info!("removed {}", settings.repo_list.display());
    }
    Ok(())
}

fn auth_machine() -> String {
    format!("{}/ubuntu/", ESM_HOST)
}

fn auth_line(token: &Token) -> String {
    format!(
        "machine {} login {} password {}",
        auth_machine(),
        token.user(),
        token.password()
    )
}

fn is_esm_auth_line(line: &str) -> bool {
    let mut words = line.split_whitespace();
    words.next() == Some("machine") && words.next() == Some(auth_machine().as_str())
}

/// Existing content with any previous ESM credentials replaced by `token`.
fn merge_auth(existing: &str, token: &Token) -> String {
    let mut merged = strip_auth(existing);
    if !merged.is_empty() && !merged.ends_with('\n') {
        merged.push('\n');
    }
    merged.push_str(&auth_line(token));
    merged.push('\n');
    merged
}

/// Existing content without ESM credentials; other lines kept verbatim.
fn strip_auth(existing: &str) -> String {
    existing
        .split_inclusive('\n')
        .filter(|line| !is_esm_auth_line(line))
        .collect()
}

pub fn write_credentials(settings: &Settings, token: &Token) -> Result<()> {
    let existing = read_optional(&settings.auth_file)?.unwrap_or_default();
    let content = merge_auth(&existing, token);
    safe_write_mode(&settings.auth_file, content.as_bytes(), AUTH_FILE_MODE)?;
    log::info!("stored credentials for {} in {}", token.user(), settings.auth_file.display());
    Ok(())
}

pub fn remove_credentials(settings: &Settings) -> Result<()> {
    let Some(existing) = read_optional(&settings.auth_file)? else {
        return Ok(());
    };

    let content = strip_auth(&existing);
    if content == existing {
        set_mode(&settings.auth_file, AUTH_FILE_MODE)?;
        return Ok(());
    }
    safe_write_mode(&settings.auth_file, content.as_bytes(), AUTH_FILE_MODE)?;
    log::info!("removed credentials from {}", settings.auth_file.display());
    Ok(())
}

pub fn install_keyring(settings: &Settings) -> Result<()> {
    let source = settings.keyring_source();
    let target = settings.keyring_target();
    let checksum = copy_verified(&source, &target)?;
    log::info!("installed {} (sha256 {})", target.display(), checksum);
    Ok(())
}

pub fn remove_keyring(settings: &Settings) -> Result<()> {
    let target = settings.keyring_target();
    if remove_if_exists(&target)? {
        log::info!("removed {}", target.display());
    }
    Ok(())
}
