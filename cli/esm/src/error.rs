// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Error types and their process exit codes.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EsmError>;

#[derive(Debug, Error)]
pub enum EsmError {
    #[error("Extended Security Maintenance is not supported on {0}")]
    UnsupportedSeries(String),

    #[error("This command must be run as root (try using sudo)")]
    NotRoot,

    #[error("Extended Security Maintenance is already enabled")]
    AlreadyEnabled,

    #[error("Extended Security Maintenance is not enabled")]
    NotEnabled,

    #[error("Invalid token, it must be in the form \"user:password\"")]
    InvalidTokenFormat,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Failed checking token ({0})")]
    TokenCheckFailed(String),

    /// Package manager failure; carries the subprocess stderr verbatim.
    #[error("{stderr}")]
    DependencyInstall { package: String, stderr: String },

    #[error("{0:#}")]
    Io(#[from] anyhow::Error),
}

impl EsmError {
    pub fn exit_code(&self) -> i32 {
        match self {
            EsmError::InvalidTokenFormat
            | EsmError::InvalidToken
            | EsmError::TokenCheckFailed(_) => 3,
            EsmError::NotRoot => 2,
            EsmError::UnsupportedSeries(_) => 4,
            EsmError::AlreadyEnabled => 6,
            EsmError::NotEnabled => 8,
            EsmError::DependencyInstall { .. } | EsmError::Io(_) => 1,
        }
    }
}
