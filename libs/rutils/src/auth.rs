// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Authentication utilities

use anyhow::{anyhow, Context, Result};

use crate::process::Process;

/// Effective user ID as reported by `id -u`, resolved through `PATH`.
pub fn effective_uid() -> Result<u32> {
    let output = Process::new("id").arg("-u").run()?;
    if !output.success {
        return Err(anyhow!("id -u failed: {}", output.stderr.trim()));
    }

    let uid = output.stdout.trim();
    uid.parse()
        .with_context(|| format!("unexpected output from id -u: {:?}", uid))
}

/// Check if current user is root
pub fn is_root() -> Result<bool> {
    Ok(effective_uid()? == 0)
}
