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

use crate::config::DemanglerKind;
use crate::tools::{Resolution, ToolRunner};

enum Backend {
    /// One c++filt process per unique name.
    External { program: String },
    /// cpp_demangle / rustc-demangle, no subprocess.
    Builtin,
}

/// Memoizing demangler. A name that cannot be demangled maps to itself, and
/// that outcome is cached like any other so the tool is asked at most once.
pub struct Demangler {
    backend: Backend,
    cache: HashMap<String, Resolution<String>>,
}

impl Demangler {
    pub fn external(program: impl Into<String>) -> Self {
        Self {
            backend: Backend::External {
                program: program.into(),
            },
            cache: HashMap::new(),
        }
    }

    pub fn builtin() -> Self {
        Self {
            backend: Backend::Builtin,
            cache: HashMap::new(),
        }
    }

    pub fn from_kind(kind: DemanglerKind, cxxfilt: &str) -> Self {
        match kind {
            DemanglerKind::External => Self::external(cxxfilt),
            DemanglerKind::Builtin => Self::builtin(),
        }
    }

    pub fn demangle(&mut self, runner: &mut dyn ToolRunner, name: &str) -> String {
        let resolution = match self.cache.get(name) {
            Some(cached) => cached.clone(),
            None => {
                let fresh = self.lookup(runner, name);
                self.cache.insert(name.to_string(), fresh.clone());
                fresh
            }
        };
        resolution.resolved().unwrap_or_else(|| name.to_string())
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    fn lookup(&self, runner: &mut dyn ToolRunner, name: &str) -> Resolution<String> {
        match &self.backend {
            Backend::External { program } => match runner.run(program, &[name]) {
                Ok(out) => {
                    let out = out.trim();
                    if out.is_empty() {
                        Resolution::Unresolved
                    } else {
                        Resolution::Resolved(out.to_string())
                    }
                }
                Err(e) => {
                    debug!("demangling {} failed: {:#}", name, e);
                    Resolution::Unresolved
                }
            },
            Backend::Builtin => demangle_builtin(name).into(),
        }
    }
}

fn demangle_builtin(name: &str) -> Option<String> {
    if name.starts_with("_R") || looks_like_legacy_rust(name) {
        // {:#} drops the trailing ::h<hash>
        return rustc_demangle::try_demangle(name)
            .ok()
            .map(|sym| format!("{:#}", sym));
    }
    if name.starts_with("_Z") {
        return cpp_demangle::Symbol::new(name)
            .ok()
            .and_then(|sym| sym.demangle().ok());
    }
    None
}

fn looks_like_legacy_rust(name: &str) -> bool {
    name.starts_with("_ZN") && name.contains("17h") && name.ends_with('E')
}
