// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! ESM access token (`user:password`).

use std::fmt;
use std::str::FromStr;

use crate::error::EsmError;

#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    user: String,
    password: String,
}

impl Token {
    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Parse an optional command-line argument; a missing token is a
    /// format error like any other.
    pub fn from_arg(arg: Option<&str>) -> Result<Self, EsmError> {
        arg.ok_or(EsmError::InvalidTokenFormat)?.parse()
    }
}

impl FromStr for Token {
    type Err = EsmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(user), Some(password), None) if is_credential(user) && is_credential(password) => {
                Ok(Self {
                    user: user.to_string(),
                    password: password.to_string(),
                })
            }
            _ => Err(EsmError::InvalidTokenFormat),
        }
    }
}

/// Non-empty and free of blanks and control characters, so the auth file
/// entry stays a single `machine ... login ... password ...` line.
fn is_credential(part: &str) -> bool {
    !part.is_empty() && !part.chars().any(|c| c.is_whitespace() || c.is_control())
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
