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


use log::debug;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::tools::{Resolution, ToolRunner};

/// A source file and, when known, the line inside it.
pub type SourceLine = (String, Option<u64>);

/// Looks up addresses with addr2line against one ELF image.
/// Results (including misses) are cached per address string for the whole run.
pub struct SourceLocator {
    program: String,
    elf_path: PathBuf,
    cache: HashMap<String, Resolution<SourceLine>>,
}

impl SourceLocator {
    pub fn new(program: impl Into<String>, elf_path: &Path) -> Self {
        Self {
            program: program.into(),
            elf_path: elf_path.to_path_buf(),
            cache: HashMap::new(),
        }
    }

    /// `address` is the 0x-prefixed hex form handed to addr2line.
    pub fn locate(&mut self, runner: &mut dyn ToolRunner, address: &str) -> Option<SourceLine> {
        if let Some(cached) = self.cache.get(address) {
            return cached.clone().resolved();
        }

        let elf = self.elf_path.to_string_lossy().into_owned();
        let resolution = match runner.run(&self.program, &["-e", elf.as_str(), address]) {
            Ok(out) => parse_addr2line_output(&out),
            Err(e) => {
                debug!("addr2line failed for {}: {:#}", address, e);
                Resolution::Unresolved
            }
        };
        self.cache.insert(address.to_string(), resolution.clone());
        resolution.resolved()
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

/// addr2line prints `path:line`, `path:?` or `??:0` / `??:?` for unknown addresses.
fn parse_addr2line_output(out: &str) -> Resolution<SourceLine> {
    let out = out.trim();
    if out.is_empty() || out.starts_with("??") {
        return Resolution::Unresolved;
    }
    match out.rsplit_once(':') {
        Some((path, line)) => {
            let line = if !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit()) {
                line.parse().ok()
            } else {
                None
            };
            Resolution::Resolved((path.to_string(), line))
        }
        None => Resolution::Resolved((out.to_string(), None)),
    }
}
