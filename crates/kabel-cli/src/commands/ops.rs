//! Operation listing command.

#![allow(clippy::print_literal)]

use clap::Args;
use kabel_registry::OperationCategory;

use super::compile::registry_with_units;

#[derive(Args)]
pub struct OpsArgs {
    /// Only list operations in this category
    #[arg(long)]
    category: Option<String>,

    /// Also list a processing unit, as KIND=TAG (repeatable)
    #[arg(long = "unit", value_name = "KIND=TAG")]
    units: Vec<String>,
}

pub fn run(args: OpsArgs) -> anyhow::Result<()> {
    let registry = registry_with_units(&args.units)?;

    let ops = match &args.category {
        Some(name) => {
            let category = OperationCategory::from_name(name).ok_or_else(|| {
                let known: Vec<&str> = OperationCategory::ALL.iter().map(|c| c.name()).collect();
                anyhow::anyhow!("Unknown category: {} (expected one of {})", name, known.join(", "))
            })?;
            registry.operations_in_category(category)
        }
        None => registry.all_operations(),
    };

    println!("  {:16}  {:10}  {:10}  {}", "Type", "Category", "Unit", "Description");
    println!("  {:16}  {:10}  {:10}  {}", "----", "--------", "----", "-----------");
    for op in ops {
        let unit = registry
            .lookup(&op.id)
            .and_then(|s| s.stateful_tag.as_deref())
            .unwrap_or("-");
        println!(
            "  {:16}  {:10}  {:10}  {}",
            op.id,
            op.category.name(),
            unit,
            op.description
        );
    }
    Ok(())
}
