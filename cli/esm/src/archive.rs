// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Enable, disable and query the ESM archive.
//!
//! Each step either succeeds or aborts the whole operation; nothing is
//! rolled back and nothing is retried.

use crate::apt::{self, TokenCheck};
use crate::config::{Settings, ESM_REPO_URL};
use crate::error::{EsmError, Result};
use crate::repo;
use crate::token::Token;

fn ensure_supported(settings: &Settings) -> Result<()> {
    if settings.is_supported_series() {
        Ok(())
    } else {
        Err(EsmError::UnsupportedSeries(settings.series.clone()))
    }
}

fn ensure_root() -> Result<()> {
    if rutils::is_root()? {
        Ok(())
    } else {
        Err(EsmError::NotRoot)
    }
}

pub fn enable(settings: &Settings, token: Option<&str>) -> Result<()> {
    ensure_supported(settings)?;
    ensure_root()?;
    if repo::is_enabled(settings)? {
        return Err(EsmError::AlreadyEnabled);
    }
    let token = Token::from_arg(token)?;
    log::debug!("enabling ESM on {} with {:?}", settings.series, token);

    apt::install_missing_dependencies(settings)?;
    if apt::check_token(settings, &token, ESM_REPO_URL)? == TokenCheck::Skipped {
        log::info!("token could not be verified, continuing");
    }

    repo::write_sources_list(settings)?;
    repo::write_credentials(settings, &token)?;
    repo::install_keyring(settings)?;

    println!("Ubuntu ESM repository enabled");
    Ok(())
}

pub fn disable(settings: &Settings) -> Result<()> {
    ensure_supported(settings)?;
    ensure_root()?;
    if !repo::is_enabled(settings)? {
        return Err(EsmError::NotEnabled);
    }

    repo::remove_sources_list(settings)?;
    repo::remove_keyring(settings)?;
    repo::remove_credentials(settings)?;

    println!("Ubuntu ESM repository disabled");
    Ok(())
}

pub fn is_enabled(settings: &Settings) -> Result<bool> {
    repo::is_enabled(settings)
}
