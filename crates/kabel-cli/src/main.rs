//! Kabel CLI - compile patch graphs into block programs.

mod commands;
mod patches;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kabel")]
#[command(author, version, about = "Kabel patch compiler CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a built-in patch and print the program
    Compile(commands::compile::CompileArgs),

    /// List built-in demo patches
    Patches(commands::patches::PatchesArgs),

    /// List registered operations
    Ops(commands::ops::OpsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // --log promotes compile diagnostics to info; RUST_LOG still wins
    let default_level = match &cli.command {
        Commands::Compile(args) if args.log => "info",
        _ => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Compile(args) => commands::compile::run(args),
        Commands::Patches(args) => commands::patches::run(args),
        Commands::Ops(args) => commands::ops::run(args),
    }
}
