//! Demo patch listing command.

use clap::Args;

use crate::patches::available_patches;

#[derive(Args)]
pub struct PatchesArgs {}

pub fn run(_args: PatchesArgs) -> anyhow::Result<()> {
    println!("Available Patches");
    println!("=================");
    println!();

    for patch in available_patches() {
        println!("  {:15} - {}", patch.name, patch.description);
    }

    println!();
    println!("Use 'kabel compile <name>' to compile one.");
    Ok(())
}
