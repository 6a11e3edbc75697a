// Crate root: declare modules and control visibility
pub mod classify;
pub mod config;
pub mod demangle;
pub mod logging;
pub mod nm_parser;
pub mod report;
pub mod signature;
pub mod source_locator;
pub mod symbols;
pub mod tools;
pub mod utils;

use anyhow::{bail, Context, Result};
use log::info;
use std::io::Write;

// Re-export commonly used API from the library for binaries/tests
pub use classify::{OriginCategory, PathClassifier};
pub use config::{DemanglerKind, FlashUsageConfig, OutputFormat};
pub use symbols::Symbol;
pub use tools::{CommandRunner, Resolution, ToolRunner};

use demangle::Demangler;
use nm_parser::SymbolTableParser;
use source_locator::SourceLocator;

/// Run nm on the configured ELF and return the top symbols.
pub fn collect_symbols(config: &FlashUsageConfig, runner: &mut dyn ToolRunner) -> Result<Vec<Symbol>> {
    if !config.elf.exists() {
        bail!("ELF not found: {}", config.elf.display());
    }

    let elf = config.elf.to_string_lossy().into_owned();
    let nm_output = runner
        .run(&config.nm, &["-S", "--size-sort", "-t", "x", "-l", elf.as_str()])
        .with_context(|| format!("Failed to read the symbol table with {}", config.nm))?;

    let repo_root = utils::canonical_repo_root(&config.repo_root);
    info!("repo root: {}", repo_root);

    let mut parser = SymbolTableParser::new(
        runner,
        Demangler::from_kind(config.demangler, &config.cxxfilt),
        SourceLocator::new(config.addr2line.as_str(), &config.elf),
        PathClassifier::new(&repo_root),
    );
    Ok(parser.parse_top(&nm_output, config.top))
}

/// Full pipeline with an injectable tool runner, writing the report to `out`.
pub fn run_with_runner(
    config: &FlashUsageConfig,
    runner: &mut dyn ToolRunner,
    out: &mut dyn Write,
) -> Result<()> {
    let symbols = collect_symbols(config, runner)?;
    match config.format {
        OutputFormat::Text => report::write_text_report(out, &symbols),
        OutputFormat::Json => report::write_json_report(out, &symbols),
    }
}

pub fn run(config: &FlashUsageConfig, out: &mut dyn Write) -> Result<()> {
    run_with_runner(config, &mut CommandRunner, out)
}
