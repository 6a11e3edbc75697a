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


//! Reduces a demangled C++ signature to the short name shown in the report.
//!
//! `Foo::bar(int, char*) const [clone .part.0]` becomes
//! `Foo::bar [clone .part.0]`: the parameter list and cv-qualifier go, the
//! clone annotation stays so specialised copies remain distinguishable.

use regex::Regex;
use std::sync::LazyLock;

const CLONE_MARKER: &str = " [clone ";
const ANON_NAMESPACE: &str = "(anonymous namespace)";
const ANON_PLACEHOLDER: &str = "__ANON_NS__";

static TRAILING_QUALIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+(const|volatile)\s*$").unwrap());
static PAREN_GROUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)").unwrap());
static SPACE_BEFORE_SCOPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+::").unwrap());
static SPACE_AFTER_SCOPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"::\s+").unwrap());
static SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

pub fn strip_signature(demangled: &str) -> String {
    let (base, clone) = match demangled.find(CLONE_MARKER) {
        Some(idx) => demangled.split_at(idx),
        None => (demangled, ""),
    };

    // The namespace marker looks like a parameter list; hide it first.
    let mut base = base.replace(ANON_NAMESPACE, ANON_PLACEHOLDER);
    base = TRAILING_QUALIFIER.replace(&base, "").into_owned();

    if base.ends_with(')') {
        if let Some(open) = outermost_open_paren(&base) {
            base.truncate(open);
        }
    }

    // Whatever is left (function-pointer return types) is not nested.
    base = PAREN_GROUP.replace_all(&base, "").into_owned();
    base = base.replace(ANON_PLACEHOLDER, ANON_NAMESPACE);

    base = SPACE_BEFORE_SCOPE.replace_all(&base, "::").into_owned();
    base = SPACE_AFTER_SCOPE.replace_all(&base, "::").into_owned();
    base = SPACE_RUN.replace_all(&base, " ").into_owned();

    format!("{}{}", base.trim(), clone)
}

/// Index of the `(` matching the final `)`, scanning backwards.
fn outermost_open_paren(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, ch) in s.char_indices().rev() {
        match ch {
            ')' => depth += 1,
            '(' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}
