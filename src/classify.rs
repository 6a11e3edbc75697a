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


//! Attributes a source path to the place it came from: this repository, the
//! Arduino core, the toolchain runtime or some other package.

use serde::Serialize;

use crate::utils::normalize_separators;

pub const VENDOR_MARKER: &str = "/.arduino15/packages/arduino/";
pub const LIBGCC_MARKER: &str = "/libgcc/";
pub const GCC_BUILD_MARKER: &str = "/gcc-build/";
pub const PACKAGE_MARKER: &str = "/.arduino15/packages/";
pub const USER_LIBRARY_MARKER: &str = "/Arduino/libraries/";

/// Location shown when neither nm nor addr2line knows the source.
pub const UNKNOWN_LOCATION: &str = "PACKAGE/unknown";

/// Report column order of the per-origin totals.
pub const TAG_ORDER: [&str; 4] = ["REPO", "ARDU", "PACK", "TOOL"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OriginCategory {
    Repository,
    VendorPackage,
    ThirdPartyPackage,
    Toolchain,
    Unknown,
}

impl OriginCategory {
    /// Four-letter report tag. Unlocated symbols are reported with the
    /// packages, which is where they have always been totalled.
    pub fn tag(self) -> &'static str {
        match self {
            OriginCategory::Repository => "REPO",
            OriginCategory::VendorPackage => "ARDU",
            OriginCategory::ThirdPartyPackage | OriginCategory::Unknown => "PACK",
            OriginCategory::Toolchain => "TOOL",
        }
    }
}

/// Returns the display path (without line) when the rule applies.
type Relocate = fn(path: &str, repo_root: &str) -> Option<String>;

struct Rule {
    category: OriginCategory,
    relocate: Relocate,
}

/// Evaluated top to bottom, first match wins.
const RULES: [Rule; 5] = [
    Rule {
        category: OriginCategory::Repository,
        relocate: in_repository,
    },
    Rule {
        category: OriginCategory::VendorPackage,
        relocate: in_vendor_core,
    },
    Rule {
        category: OriginCategory::Toolchain,
        relocate: in_toolchain,
    },
    Rule {
        category: OriginCategory::ThirdPartyPackage,
        relocate: in_package,
    },
    Rule {
        category: OriginCategory::ThirdPartyPackage,
        relocate: in_user_library,
    },
];

fn after_marker<'a>(path: &'a str, marker: &str) -> Option<&'a str> {
    path.split_once(marker).map(|(_, rel)| rel)
}

fn in_repository(path: &str, repo_root: &str) -> Option<String> {
    let rel = path.strip_prefix(repo_root)?.strip_prefix('/')?;
    Some(format!("REPO/{}", rel))
}

fn in_vendor_core(path: &str, _: &str) -> Option<String> {
    after_marker(path, VENDOR_MARKER).map(|rel| format!("ARDUINO/{}", rel))
}

fn in_toolchain(path: &str, _: &str) -> Option<String> {
    if !path.contains(LIBGCC_MARKER) && !path.contains(GCC_BUILD_MARKER) {
        return None;
    }
    let rel = after_marker(path, GCC_BUILD_MARKER).unwrap_or_else(|| path.trim_start_matches('/'));
    Some(format!("TOOLCHAIN/{}", rel))
}

fn in_package(path: &str, _: &str) -> Option<String> {
    after_marker(path, PACKAGE_MARKER).map(|rel| format!("PACKAGE/{}", rel))
}

fn in_user_library(path: &str, _: &str) -> Option<String> {
    after_marker(path, USER_LIBRARY_MARKER).map(|rel| format!("PACKAGE/libraries/{}", rel))
}

fn anywhere(path: &str) -> String {
    format!("PACKAGE/{}", path.trim_start_matches('/'))
}

pub struct PathClassifier {
    repo_root: String,
}

impl PathClassifier {
    /// `repo_root` should already be canonical; only separators are normalized here.
    pub fn new(repo_root: &str) -> Self {
        let mut repo_root = normalize_separators(repo_root);
        if repo_root.len() > 1 && repo_root.ends_with('/') {
            repo_root.pop();
        }
        Self { repo_root }
    }

    /// Never fails: anything not matched by a marker is a package.
    pub fn classify(&self, path: Option<&str>, line: Option<u64>) -> (OriginCategory, String) {
        let path = match path {
            Some(p) if !p.is_empty() => normalize_separators(p),
            _ => return (OriginCategory::Unknown, UNKNOWN_LOCATION.to_string()),
        };

        let (category, mut location) = RULES
            .iter()
            .find_map(|rule| (rule.relocate)(&path, &self.repo_root).map(|loc| (rule.category, loc)))
            .unwrap_or_else(|| (OriginCategory::ThirdPartyPackage, anywhere(&path)));

        if let Some(line) = line.filter(|l| *l > 0) {
            location.push_str(&format!(":{}", line));
        }
        (category, location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> PathClassifier {
        PathClassifier::new("/home/dev/ambience")
    }

    #[test]
    fn repository_paths() {
        let c = classifier();
        assert_eq!(
            c.classify(Some("/home/dev/ambience/main/pumps.cpp"), Some(17)),
            (OriginCategory::Repository, "REPO/main/pumps.cpp:17".to_string())
        );
        // A sibling directory sharing the prefix is not inside the repo
        assert_eq!(
            c.classify(Some("/home/dev/ambience2/x.c"), None).0,
            OriginCategory::ThirdPartyPackage
        );
    }

    #[test]
    fn missing_path_is_unknown_with_package_location() {
        let c = classifier();
        assert_eq!(
            c.classify(None, None),
            (OriginCategory::Unknown, "PACKAGE/unknown".to_string())
        );
        assert_eq!(
            c.classify(Some(""), Some(3)),
            (OriginCategory::Unknown, "PACKAGE/unknown".to_string())
        );
        assert_eq!(OriginCategory::Unknown.tag(), "PACK");
    }

    #[test]
    fn vendor_core_wins_over_generic_package() {
        let c = classifier();
        let path = "/home/dev/.arduino15/packages/arduino/hardware/avr/1.8.6/cores/arduino/wiring.c";
        assert_eq!(
            c.classify(Some(path), Some(52)),
            (
                OriginCategory::VendorPackage,
                "ARDUINO/hardware/avr/1.8.6/cores/arduino/wiring.c:52".to_string()
            )
        );
    }

    #[test]
    fn toolchain_wins_over_generic_package() {
        let c = classifier();
        let path = "/home/dev/.arduino15/packages/other/tools/gcc/libgcc/config/avr/lib1funcs.S";
        let (category, location) = c.classify(Some(path), None);
        assert_eq!(category, OriginCategory::Toolchain);
        assert_eq!(
            location,
            "TOOLCHAIN/home/dev/.arduino15/packages/other/tools/gcc/libgcc/config/avr/lib1funcs.S"
        );
    }

    #[test]
    fn gcc_build_segment_is_stripped() {
        let c = classifier();
        assert_eq!(
            c.classify(Some("/build/gcc-build/avr/libgcc/../../libgcc/fixed-bit.c"), Some(9)),
            (
                OriginCategory::Toolchain,
                "TOOLCHAIN/avr/libgcc/../../libgcc/fixed-bit.c:9".to_string()
            )
        );
    }

    #[test]
    fn packages_and_libraries() {
        let c = classifier();
        assert_eq!(
            c.classify(Some("/home/dev/.arduino15/packages/MiniCore/hardware/avr/Wire.cpp"), None),
            (
                OriginCategory::ThirdPartyPackage,
                "PACKAGE/MiniCore/hardware/avr/Wire.cpp".to_string()
            )
        );
        assert_eq!(
            c.classify(Some("/home/dev/Arduino/libraries/RTClib/src/RTClib.cpp"), Some(88)),
            (
                OriginCategory::ThirdPartyPackage,
                "PACKAGE/libraries/RTClib/src/RTClib.cpp:88".to_string()
            )
        );
    }

    #[test]
    fn fallback_strips_leading_slash_and_normalizes_separators() {
        let c = classifier();
        assert_eq!(
            c.classify(Some("/usr/lib/avr/include/stdlib.h"), Some(0)),
            (
                OriginCategory::ThirdPartyPackage,
                "PACKAGE/usr/lib/avr/include/stdlib.h".to_string()
            )
        );
        assert_eq!(
            c.classify(Some(r"C:\Users\dev\Arduino\libraries\LCD\LCD.cpp"), None).1,
            "PACKAGE/libraries/LCD/LCD.cpp"
        );
    }

    #[test]
    fn windows_repo_root() {
        let c = PathClassifier::new(r"C:\work\ambience\");
        assert_eq!(
            c.classify(Some("C:/work/ambience"), None).0,
            OriginCategory::ThirdPartyPackage
        );
        assert_eq!(
            c.classify(Some(r"C:\work\ambience\main\ui.cpp"), Some(4)).1,
            "REPO/main/ui.cpp:4"
        );
    }
}
