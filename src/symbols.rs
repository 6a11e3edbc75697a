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


use serde::Serialize;

use crate::classify::OriginCategory;

/// Flash-resident nm type codes. Everything else (b/B, U, A, ...) lives in RAM
/// or is not part of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Code,
    ReadOnly,
    Data,
    Weak,
    WeakObject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolScope {
    Global,
    Local,
}

impl SymbolKind {
    /// `None` for type codes that do not occupy flash.
    pub fn from_type_code(code: char) -> Option<(SymbolKind, SymbolScope)> {
        let kind = match code.to_ascii_lowercase() {
            't' => SymbolKind::Code,
            'r' => SymbolKind::ReadOnly,
            'd' => SymbolKind::Data,
            'w' => SymbolKind::Weak,
            'v' => SymbolKind::WeakObject,
            _ => return None,
        };
        let scope = if code.is_ascii_uppercase() {
            SymbolScope::Global
        } else {
            SymbolScope::Local
        };
        Some((kind, scope))
    }
}

/// One reported flash consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    pub size: u64,
    pub name: String,
    #[serde(rename = "category")]
    pub origin: OriginCategory,
    pub location: String,
    pub kind: SymbolKind,
    pub scope: SymbolScope,
}

impl Symbol {
    pub fn tag(&self) -> &'static str {
        self.origin.tag()
    }
}

/// Source position carried by an nm `-l` line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SymbolLocation {
    pub path: Option<String>,
    pub line: Option<u64>,
}

impl SymbolLocation {
    /// `path:line` splits on the last colon only when the tail is a number;
    /// otherwise the whole token is the path (keeps `C:/x/y.c` intact).
    pub fn from_token(token: &str) -> Self {
        if let Some((path, line)) = token.rsplit_once(':') {
            if !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit()) {
                return Self {
                    path: Some(path.to_string()),
                    line: line.parse().ok(),
                };
            }
        }
        Self {
            path: Some(token.to_string()),
            line: None,
        }
    }

    pub fn has_path(&self) -> bool {
        self.path.as_deref().is_some_and(|p| !p.is_empty())
    }
}
