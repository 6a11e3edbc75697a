use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

use flash_usage::config::{tool_name, DEFAULT_CXXFILT, DEFAULT_TOOLCHAIN_PREFIX, DEFAULT_TOP};
use flash_usage::logging::init_logging;
use flash_usage::{DemanglerKind, FlashUsageConfig, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "flash-usage", version, about = "Report top flash users from an ELF.")]
struct Cli {
    /// Path to ELF file (default: main/build/arduino.avr.nano/main.ino.elf in the tool's checkout)
    #[arg(long)]
    elf: Option<PathBuf>,

    /// Number of entries to show
    #[arg(long, default_value_t = DEFAULT_TOP)]
    top: usize,

    /// Repo root path
    #[arg(long = "repo-root")]
    repo_root: Option<PathBuf>,

    /// Prefix of the binutils to run (<prefix>nm, <prefix>addr2line)
    #[arg(long, default_value = DEFAULT_TOOLCHAIN_PREFIX)]
    toolchain_prefix: String,

    /// Override the nm executable
    #[arg(long)]
    nm: Option<String>,

    /// Override the addr2line executable
    #[arg(long)]
    addr2line: Option<String>,

    /// c++filt executable used by the external demangler
    #[arg(long, default_value = DEFAULT_CXXFILT)]
    cxxfilt: String,

    #[arg(long, value_enum, default_value_t = DemanglerKind::External)]
    demangler: DemanglerKind,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log progress to stderr
    #[arg(short = 'v', long = "verbose", default_value_t = false)]
    verbose: bool,

    /// Enable debug output
    #[arg(short = 'd', long = "debug", default_value_t = false)]
    debug: bool,
}

impl Cli {
    fn into_config(self) -> FlashUsageConfig {
        let repo_root = self
            .repo_root
            .unwrap_or_else(FlashUsageConfig::default_repo_root);
        let mut config = FlashUsageConfig::for_repo(&repo_root);
        config.elf = self.elf.unwrap_or_else(FlashUsageConfig::default_elf);
        config.top = self.top;
        config.nm = self
            .nm
            .unwrap_or_else(|| tool_name(&self.toolchain_prefix, "nm"));
        config.addr2line = self
            .addr2line
            .unwrap_or_else(|| tool_name(&self.toolchain_prefix, "addr2line"));
        config.cxxfilt = self.cxxfilt;
        config.demangler = self.demangler;
        config.format = self.format;
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = init_logging(cli.verbose, cli.debug)?;
    let config = cli.into_config();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    flash_usage::run(&config, &mut out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_root_alone_keeps_default_elf() {
        let cli = Cli::parse_from(["flash-usage", "--repo-root", "/elsewhere/checkout"]);
        let config = cli.into_config();
        assert_eq!(config.repo_root, PathBuf::from("/elsewhere/checkout"));
        assert_eq!(config.elf, FlashUsageConfig::default_elf());
    }

    #[test]
    fn explicit_elf_and_tools() {
        let cli = Cli::parse_from([
            "flash-usage",
            "--elf",
            "/tmp/fw.elf",
            "--toolchain-prefix",
            "arm-none-eabi-",
            "--addr2line",
            "llvm-addr2line",
            "--top",
            "5",
        ]);
        let config = cli.into_config();
        assert_eq!(config.elf, PathBuf::from("/tmp/fw.elf"));
        assert_eq!(config.nm, "arm-none-eabi-nm");
        assert_eq!(config.addr2line, "llvm-addr2line");
        assert_eq!(config.top, 5);
    }
}
