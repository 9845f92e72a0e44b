// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Runtime settings: the release series and the system paths the tool
//! touches. Every path can be overridden through the environment.

use anyhow::{anyhow, Context};
use rutils::{env_nonempty, env_path, Process};
use std::path::PathBuf;

use crate::error::Result;

/// The only series the ESM archive serves.
pub const SUPPORTED_SERIES: &str = "precise";

pub const ESM_HOST: &str = "esm.ubuntu.com";
pub const ESM_REPO_URL: &str = "https://esm.ubuntu.com/ubuntu";
pub const ESM_KEYRING: &str = "ubuntu-esm-keyring.gpg";

#[derive(Debug, Clone)]
pub struct Settings {
    pub series: String,
    pub repo_list: PathBuf,
    pub auth_file: PathBuf,
    pub keyrings_dir: PathBuf,
    pub trusted_keys_dir: PathBuf,
    pub apt_helper: PathBuf,
    pub apt_get: String,
    pub apt_method_https: PathBuf,
    pub ca_certificates: PathBuf,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let series = match env_nonempty("SERIES") {
            Some(series) => series,
            None => detect_series()?,
        };
        Ok(Self::with_series(series))
    }

    fn with_series(series: String) -> Self {
        let repo_list = env_path(
            "ESM_REPO_LIST",
            format!("/etc/apt/sources.list.d/ubuntu-esm-{}.list", series),
        );

        Self {
            repo_list,
            auth_file: env_path("APT_AUTH_FILE", "/etc/apt/auth.conf"),
            keyrings_dir: env_path("KEYRINGS_DIR", "/usr/share/keyrings"),
            trusted_keys_dir: env_path("APT_KEYS_DIR", "/etc/apt/trusted.gpg.d"),
            apt_helper: env_path("APT_HELPER", "/usr/lib/apt/apt-helper"),
            apt_get: env_nonempty("APT_GET").unwrap_or_else(|| "apt-get".to_string()),
            apt_method_https: env_path("APT_METHOD_HTTPS", "/usr/lib/apt/methods/https"),
            ca_certificates: env_path("CA_CERTIFICATES", "/usr/sbin/update-ca-certificates"),
            series,
        }
    }

    pub fn is_supported_series(&self) -> bool {
        self.series == SUPPORTED_SERIES
    }

    pub fn keyring_source(&self) -> PathBuf {
        self.keyrings_dir.join(ESM_KEYRING)
    }

    pub fn keyring_target(&self) -> PathBuf {
        self.trusted_keys_dir.join(ESM_KEYRING)
    }
}

fn detect_series() -> Result<String> {
    let output = Process::new("lsb_release")
        .arg("-cs")
        .run()
        .context("failed to detect the release series")?;
    if !output.success {
        return Err(anyhow!("lsb_release failed: {}", output.stderr.trim()).into());
    }

    let series = output.stdout.trim().to_string();
    if series.is_empty() {
        return Err(anyhow!("lsb_release returned an empty series").into());
    }
    log::debug!("detected series {}", series);
    Ok(series)
}
