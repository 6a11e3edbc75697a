// Copyright (c) 2026 MCU-Debug Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! Invocation of the external binutils (nm, addr2line, c++filt).
//!
//! Every lookup goes through the [`ToolRunner`] trait so the pipeline can be
//! driven by a scripted runner in tests. Lookups that may fail without
//! aborting the report are expressed as [`Resolution`] values, which is also
//! what the per-run caches store.

use anyhow::{bail, Context, Result};
use log::debug;
use std::process::{Command, Stdio};

/// Outcome of a best-effort lookup. `Unresolved` is a normal value, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    Resolved(T),
    Unresolved,
}

impl<T> Resolution<T> {
    pub fn resolved(self) -> Option<T> {
        match self {
            Resolution::Resolved(value) => Some(value),
            Resolution::Unresolved => None,
        }
    }
}

impl<T> From<Option<T>> for Resolution<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Resolution::Unresolved, Resolution::Resolved)
    }
}

pub trait ToolRunner {
    /// Run `program` with `args` and return its standard output.
    /// A non-zero exit status is an error.
    fn run(&mut self, program: &str, args: &[&str]) -> Result<String>;
}

/// Runs the tools as real child processes, blocking until each one exits.
#[derive(Debug, Default)]
pub struct CommandRunner;

impl ToolRunner for CommandRunner {
    fn run(&mut self, program: &str, args: &[&str]) -> Result<String> {
        debug!("running {} {}", program, args.join(" "));
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .with_context(|| format!("Failed to spawn {}", program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("{} exited with {}: {}", program, output.status, stderr.trim());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
