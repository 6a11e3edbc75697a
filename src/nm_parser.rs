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


//! Turns `nm -S --size-sort -t x -l` output into [`Symbol`] records.
//!
//! A line looks like
//!
//! ```text
//! 00000a4c 00000136 T _ZN17LiquidCrystal_I2C5beginEhhh	/home/dev/ambience/main/LiquidCrystal_I2C.cpp:46
//! ```
//!
//! address, size, type code, mangled name and an optional location. Lines
//! that do not match or describe RAM-only symbols are skipped silently.

use log::{debug, info};
use regex::Regex;
use std::sync::LazyLock;

use crate::classify::PathClassifier;
use crate::demangle::Demangler;
use crate::report::rank_symbols;
use crate::signature::strip_signature;
use crate::source_locator::SourceLocator;
use crate::symbols::{Symbol, SymbolKind, SymbolLocation, SymbolScope};
use crate::tools::ToolRunner;

static NM_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<addr>[0-9A-Fa-f]+)\s+(?P<size>[0-9A-Fa-f]+)\s+(?P<type>\w)\s+(?P<name>\S+)(?:\s+(?P<loc>.+))?$",
    )
    .unwrap()
});

/// One flash-resident line of nm output, before any lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NmEntry<'a> {
    pub address: &'a str,
    pub size: u64,
    pub kind: SymbolKind,
    pub scope: SymbolScope,
    pub name: &'a str,
    pub location: Option<&'a str>,
}

/// `None` for lines that are malformed or not flash-resident.
pub fn parse_nm_line(line: &str) -> Option<NmEntry<'_>> {
    let caps = NM_LINE.captures(line.trim())?;
    let type_code = caps.name("type")?.as_str().chars().next()?;
    let (kind, scope) = SymbolKind::from_type_code(type_code)?;
    let size = u64::from_str_radix(caps.name("size")?.as_str(), 16).ok()?;
    Some(NmEntry {
        address: caps.name("addr")?.as_str(),
        size,
        kind,
        scope,
        name: caps.name("name")?.as_str(),
        location: caps.name("loc").map(|m| m.as_str()),
    })
}

pub struct SymbolTableParser<'r> {
    runner: &'r mut dyn ToolRunner,
    demangler: Demangler,
    locator: SourceLocator,
    classifier: PathClassifier,
}

impl<'r> SymbolTableParser<'r> {
    pub fn new(
        runner: &'r mut dyn ToolRunner,
        demangler: Demangler,
        locator: SourceLocator,
        classifier: PathClassifier,
    ) -> Self {
        Self {
            runner,
            demangler,
            locator,
            classifier,
        }
    }

    /// Every flash-resident symbol in `nm_output`, in input order.
    pub fn parse(&mut self, nm_output: &str) -> Vec<Symbol> {
        let mut symbols = Vec::new();
        let mut skipped = 0usize;
        for line in nm_output.lines() {
            match parse_nm_line(line) {
                Some(entry) => symbols.push(self.resolve(&entry)),
                None => {
                    if !line.trim().is_empty() {
                        debug!("skipping nm line: {}", line);
                    }
                    skipped += 1;
                }
            }
        }
        info!(
            "parsed {} flash symbols ({} lines skipped, {} names demangled, {} addresses looked up)",
            symbols.len(),
            skipped,
            self.demangler.cache_len(),
            self.locator.cache_len()
        );
        symbols
    }

    /// The `top` largest symbols, biggest first, ties by name.
    pub fn parse_top(&mut self, nm_output: &str, top: usize) -> Vec<Symbol> {
        let mut symbols = self.parse(nm_output);
        rank_symbols(&mut symbols, top);
        symbols
    }

    fn resolve(&mut self, entry: &NmEntry<'_>) -> Symbol {
        let mut location = entry
            .location
            .map(SymbolLocation::from_token)
            .unwrap_or_default();

        if !location.has_path() {
            let address = format!("0x{}", entry.address);
            location = match self.locator.locate(&mut *self.runner, &address) {
                Some((path, line)) => SymbolLocation {
                    path: Some(path),
                    line,
                },
                None => SymbolLocation::default(),
            };
        }

        let demangled = self.demangler.demangle(&mut *self.runner, entry.name);
        let mut name = strip_signature(&demangled);
        if name.is_empty() {
            name = entry.name.to_string();
        }

        let (origin, location) = self
            .classifier
            .classify(location.path.as_deref(), location.line);

        Symbol {
            size: entry.size,
            name,
            origin,
            location,
            kind: entry.kind,
            scope: entry.scope,
        }
    }
}
