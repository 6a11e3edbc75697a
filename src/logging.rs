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


//! Logging setup. Diagnostics go to stderr; stdout carries only the report.

use anyhow::Result;
use flexi_logger::{Logger, LoggerHandle};

/// Pick the default log spec from the CLI flags. `RUST_LOG` still overrides it.
pub fn log_spec(verbose: bool, debug: bool) -> &'static str {
    if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    }
}

/// Initialize logging once at startup. Keep the handle alive for the whole run.
pub fn init_logging(verbose: bool, debug: bool) -> Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str(log_spec(verbose, debug))?
        .log_to_stderr()
        .start()?;
    Ok(handle)
}
