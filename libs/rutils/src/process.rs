// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Process utilities

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::{Command, Output};

/// Captured result of a finished subprocess.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// Stdout followed by stderr.
    pub fn combined(&self) -> String {
        let mut out = self.stdout.clone();
        if !out.is_empty() && !out.ends_with('\n') && !self.stderr.is_empty() {
            out.push('\n');
        }
        out.push_str(&self.stderr);
        out
    }
}

/// Builder for a blocking subprocess call with captured output.
#[derive(Debug)]
pub struct Process {
    program: OsString,
    args: Vec<OsString>,
    env: Vec<(String, String)>,
    sensitive: bool,
}

impl Process {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            sensitive: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }

    /// Keep arguments out of log output (they carry credentials).
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Command line as it should appear in logs.
    pub fn display(&self) -> String {
        let program = self.program.to_string_lossy();
        if self.sensitive {
            return format!("{} [REDACTED]", program);
        }
        let mut line = program.into_owned();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }

    pub fn run(self) -> Result<ProcessOutput> {
        log::debug!("executing: {}", self.display());

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for (key, value) in &self.env {
            cmd.env(key, value);
        }

        let output = cmd
            .output()
            .with_context(|| format!("failed to execute {}", self.program.to_string_lossy()))?;
        let output = ProcessOutput::from_output(output);

        log::debug!(
            "{} exited with {}",
            self.program.to_string_lossy(),
            output.code.map_or_else(|| "signal".to_string(), |c| c.to_string())
        );
        Ok(output)
    }
}

/// Whether `path` is a regular file with any execute bit set.
pub fn is_executable(path: &Path) -> bool {
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
