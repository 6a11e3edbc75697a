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


use anyhow::Result;
use serde::Serialize;
use std::io::Write;

use crate::classify::TAG_ORDER;
use crate::symbols::Symbol;

/// Sort by size descending then name ascending, and keep the first `top`.
pub fn rank_symbols(symbols: &mut Vec<Symbol>, top: usize) {
    symbols.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.name.cmp(&b.name)));
    symbols.truncate(top);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OriginTotal {
    pub origin: &'static str,
    pub bytes: u64,
}

/// Summed sizes per report tag, in `TAG_ORDER`, for tags that occur in `symbols`.
pub fn origin_totals(symbols: &[Symbol]) -> Vec<OriginTotal> {
    TAG_ORDER
        .iter()
        .filter_map(|&origin| {
            let mut present = false;
            let mut bytes = 0u64;
            for sym in symbols.iter().filter(|s| s.tag() == origin) {
                present = true;
                bytes += sym.size;
            }
            present.then_some(OriginTotal { origin, bytes })
        })
        .collect()
}

pub fn write_text_report(out: &mut dyn Write, symbols: &[Symbol]) -> Result<()> {
    for sym in symbols {
        writeln!(
            out,
            "{:6}  {}  {}  {}",
            sym.size,
            sym.tag(),
            sym.name,
            sym.location
        )?;
    }
    let totals = origin_totals(symbols);
    if !totals.is_empty() {
        writeln!(out)?;
        for total in totals {
            writeln!(out, "{}: {} bytes", total.origin, total.bytes)?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonSymbol<'a> {
    origin: &'static str,
    #[serde(flatten)]
    symbol: &'a Symbol,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    symbols: Vec<JsonSymbol<'a>>,
    totals: Vec<OriginTotal>,
}

pub fn write_json_report(out: &mut dyn Write, symbols: &[Symbol]) -> Result<()> {
    let report = JsonReport {
        symbols: symbols
            .iter()
            .map(|symbol| JsonSymbol {
                origin: symbol.tag(),
                symbol,
            })
            .collect(),
        totals: origin_totals(symbols),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}
