// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Calls into the APT toolchain: apt-get for dependency installs and
//! apt-helper for checking a token against the archive.

use anyhow::Context;
use rutils::{is_executable, Process};
use std::io::{self, Write};
use std::path::Path;

use crate::config::Settings;
use crate::error::{EsmError, Result};
use crate::token::Token;

const APT_GET_OPTIONS: [&str; 3] = ["-y", "-o", "Dpkg::Options::=--force-confold"];

/// Run `apt-get` non-interactively, keeping existing config files.
fn apt_get(settings: &Settings, args: &[&str]) -> Result<rutils::ProcessOutput> {
    let output = Process::new(&settings.apt_get)
        .args(APT_GET_OPTIONS)
        .args(args.iter().copied())
        .env("DEBIAN_FRONTEND", "noninteractive")
        .run()?;
    Ok(output)
}

/// Install the packages the ESM archive needs (https transport and CA
/// certificates) when their marker files are missing, then refresh the
/// package lists.
pub fn install_missing_dependencies(settings: &Settings) -> Result<Vec<&'static str>> {
    let dependencies: [(&Path, &'static str); 2] = [
        (settings.apt_method_https.as_path(), "apt-transport-https"),
        (settings.ca_certificates.as_path(), "ca-certificates"),
    ];

    let mut installed = Vec::new();
    for (marker, package) in dependencies {
        if marker.exists() {
            log::debug!("{} present ({})", package, marker.display());
            continue;
        }

        println!("Installing missing dependency {}", package);
        let output = apt_get(settings, &["install", package])?;
        if !output.success {
            return Err(EsmError::DependencyInstall {
                package: package.to_string(),
                stderr: output.stderr,
            });
        }
        log::info!("installed {}", package);
        installed.push(package);
    }

    if !installed.is_empty() {
        let output = apt_get(settings, &["update"])?;
        if !output.success {
            return Err(EsmError::DependencyInstall {
                package: installed.join(" "),
                stderr: output.stderr,
            });
        }
    }

    Ok(installed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCheck {
    Valid,
    Skipped,
}

/// Check the token by fetching the archive root with apt-helper. Skipped
/// when apt-helper is not installed.
pub fn check_token(settings: &Settings, token: &Token, repo_url: &str) -> Result<TokenCheck> {
    print!("Checking token... ");
    // The verdict follows on the same line.
    let _ = io::stdout().flush();

    if !is_executable(&settings.apt_helper) {
        println!("SKIPPED");
        log::info!("{} not found, token not checked", settings.apt_helper.display());
        return Ok(TokenCheck::Skipped);
    }

    let target = tempfile::NamedTempFile::new().context("failed to create temp file")?;
    let url = credentials_url(repo_url, token);
    let output = Process::new(&settings.apt_helper)
        .arg("download-file")
        .arg(url)
        .arg(target.path())
        .sensitive()
        .run()?;

    if output.success {
        println!("OK");
        return Ok(TokenCheck::Valid);
    }

    println!("ERROR");
    Err(classify_failure(&output.combined()))
}

/// `https://host/path/` with `user:password@` spliced in after the scheme.
/// Both halves are percent-encoded so `@`, `/`, `#` or `%` survive.
fn credentials_url(repo_url: &str, token: &Token) -> String {
    let (scheme, rest) = repo_url.split_once("://").unwrap_or(("https", repo_url));
    format!(
        "{}://{}:{}@{}/",
        scheme,
        urlencoding::encode(token.user()),
        urlencoding::encode(token.password()),
        rest.trim_end_matches('/')
    )
}

/// Map apt-helper output to the error reported to the user.
fn classify_failure(output: &str) -> EsmError {
    let message = fetch_error_message(output);
    if message.starts_with("401") || output.contains("HttpError401") {
        EsmError::InvalidToken
    } else {
        EsmError::TokenCheckFailed(message)
    }
}

/// Text after the URL on apt's `E: Failed to fetch <url>  <reason>` line,
/// or the whole output if there is no such line.
fn fetch_error_message(output: &str) -> String {
    output
        .lines()
        .find_map(|line| line.split_once("Failed to fetch ").map(|(_, rest)| rest))
        .map(|rest| {
            let rest = rest.trim_start();
            match rest.find(char::is_whitespace) {
                Some(end) if rest[..end].contains("://") => rest[end..].trim().to_string(),
                _ => rest.trim().to_string(),
            }
        })
        .unwrap_or_else(|| output.trim().to_string())
}
