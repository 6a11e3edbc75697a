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


use clap::ValueEnum;
use std::path::{Path, PathBuf};

pub const DEFAULT_TOP: usize = 100;
pub const DEFAULT_TOOLCHAIN_PREFIX: &str = "avr-";
pub const DEFAULT_CXXFILT: &str = "c++filt";
/// Arduino CLI build output of the main sketch, relative to the repo root.
pub const DEFAULT_ELF: &str = "main/build/arduino.avr.nano/main.ino.elf";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DemanglerKind {
    /// Run c++filt once per symbol name
    #[default]
    External,
    /// Demangle in-process (Itanium C++ and Rust)
    Builtin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct FlashUsageConfig {
    pub elf: PathBuf,
    pub top: usize,
    pub repo_root: PathBuf,
    pub nm: String,
    pub addr2line: String,
    pub cxxfilt: String,
    pub demangler: DemanglerKind,
    pub format: OutputFormat,
}

impl FlashUsageConfig {
    /// Defaults for a repository checkout at `repo_root` with the AVR toolchain on PATH.
    pub fn for_repo(repo_root: &Path) -> Self {
        Self {
            elf: repo_root.join(DEFAULT_ELF),
            top: DEFAULT_TOP,
            repo_root: repo_root.to_path_buf(),
            nm: tool_name(DEFAULT_TOOLCHAIN_PREFIX, "nm"),
            addr2line: tool_name(DEFAULT_TOOLCHAIN_PREFIX, "addr2line"),
            cxxfilt: DEFAULT_CXXFILT.to_string(),
            demangler: DemanglerKind::default(),
            format: OutputFormat::default(),
        }
    }

    /// The tool lives in `<repo>/tools/<crate>`, so the repo is two levels up.
    pub fn default_repo_root() -> PathBuf {
        let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
        manifest_dir
            .ancestors()
            .nth(2)
            .unwrap_or(manifest_dir)
            .to_path_buf()
    }

    /// Build output next to the tool's own checkout; `--repo-root` does not move it.
    pub fn default_elf() -> PathBuf {
        Self::default_repo_root().join(DEFAULT_ELF)
    }
}

impl Default for FlashUsageConfig {
    fn default() -> Self {
        Self::for_repo(&Self::default_repo_root())
    }
}

/// `tool_name("avr-", "nm")` is `avr-nm`.
pub fn tool_name(prefix: &str, tool: &str) -> String {
    format!("{}{}", prefix, tool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_repo_root() {
        let config = FlashUsageConfig::for_repo(Path::new("/work/ambience"));
        assert_eq!(
            config.elf,
            Path::new("/work/ambience/main/build/arduino.avr.nano/main.ino.elf")
        );
        assert_eq!(config.top, 100);
        assert_eq!(config.nm, "avr-nm");
        assert_eq!(config.addr2line, "avr-addr2line");
        assert_eq!(config.cxxfilt, "c++filt");
        assert_eq!(config.demangler, DemanglerKind::External);
        assert_eq!(config.format, OutputFormat::Text);
    }

    #[test]
    fn default_elf_is_anchored_to_the_tool() {
        let config = FlashUsageConfig::default();
        assert_eq!(config.elf, FlashUsageConfig::default_elf());
        assert!(config.elf.starts_with(FlashUsageConfig::default_repo_root()));
    }

    #[test]
    fn arm_prefix() {
        assert_eq!(tool_name("arm-none-eabi-", "nm"), "arm-none-eabi-nm");
    }
}
