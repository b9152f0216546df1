//! Patch compilation command.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, ValueEnum};
use kabel_compiler::{CompileOptions, CompileResult, Compiler};
use kabel_registry::{Addressing, OperationRegistry};

use crate::patches::find_patch;

/// Addressing convention for CLI
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CliAddressing {
    Identifiers,
    Registers,
}

impl From<CliAddressing> for Addressing {
    fn from(a: CliAddressing) -> Self {
        match a {
            CliAddressing::Identifiers => Addressing::Identifiers,
            CliAddressing::Registers => Addressing::Registers,
        }
    }
}

#[derive(Args)]
pub struct CompileArgs {
    /// Built-in patch to compile (see `kabel patches`)
    #[arg(value_name = "PATCH")]
    patch: String,

    /// How generated code names node values
    #[arg(long, value_enum)]
    addressing: Option<CliAddressing>,

    /// Identifier prefix (identifier addressing only)
    #[arg(long)]
    prefix: Option<String>,

    /// Operation used for unregistered node types
    #[arg(long)]
    fallback: Option<String>,

    /// Node type treated as an inlined constant
    #[arg(long)]
    const_type: Option<String>,

    /// Register a processing unit, as KIND=TAG (repeatable)
    #[arg(long = "unit", value_name = "KIND=TAG")]
    units: Vec<String>,

    /// TOML file with compile options; flags override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log compile diagnostics
    #[arg(long)]
    pub log: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

impl CompileArgs {
    fn options(&self) -> anyhow::Result<CompileOptions> {
        let mut options = match &self.config {
            Some(path) => CompileOptions::load(path)?,
            None => CompileOptions::default(),
        };
        if let Some(addressing) = self.addressing {
            options = options.with_addressing(addressing.into());
        }
        if let Some(prefix) = &self.prefix {
            options = options.with_identifier_prefix(prefix);
        }
        if let Some(fallback) = &self.fallback {
            options = options.with_fallback_type(fallback);
        }
        if let Some(const_type) = &self.const_type {
            options = options.with_const_type(const_type);
        }
        if self.log {
            options = options.with_log(true);
        }
        Ok(options)
    }
}

/// Builtin registry plus every `KIND=TAG` unit given on the command line.
pub(crate) fn registry_with_units(units: &[String]) -> anyhow::Result<OperationRegistry> {
    let mut registry = OperationRegistry::new();
    for spec in units {
        let (kind, tag) = parse_unit(spec)?;
        registry.register_unit(kind, tag);
    }
    Ok(registry)
}

/// Parses a `KIND=TAG` unit registration.
fn parse_unit(spec: &str) -> anyhow::Result<(&str, &str)> {
    let (kind, tag) = spec
        .split_once('=')
        .with_context(|| format!("Invalid unit '{spec}', expected KIND=TAG"))?;
    let (kind, tag) = (kind.trim(), tag.trim());
    if kind.is_empty() || tag.is_empty() {
        anyhow::bail!("Invalid unit '{spec}', expected KIND=TAG");
    }
    Ok((kind, tag))
}

pub fn run(args: CompileArgs) -> anyhow::Result<()> {
    let patch = find_patch(&args.patch)
        .ok_or_else(|| anyhow::anyhow!("Unknown patch: {}", args.patch))?;

    let compiler = Compiler::new(registry_with_units(&args.units)?, args.options()?);
    let root = (patch.build)();
    let result = compiler
        .compile(&root)
        .with_context(|| format!("Failed to compile patch '{}'", patch.name))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }
    Ok(())
}

fn print_result(result: &CompileResult) {
    println!("{}", result.program);
    println!();
    println!("Stateful units ({}):", result.stateful_units.len());
    for (i, unit) in result.stateful_units.iter().enumerate() {
        println!("  [{i}] {:12} ({})", unit.tag, unit.inputs.join(", "));
    }
    println!();
    println!("Slots: {}", result.slot_count);
}
