//! Statement generation over a linearized graph.
//!
//! Each non-constant node gets a slot named by the active [`Addressing`]
//! convention. Operands are resolved to either a slot reference or, for
//! constant nodes and immediates, the literal itself. The node's schema then
//! turns the resolved operands into at most one statement, and stateful
//! schemas append a [`StatefulUnit`].

use kabel_graph::{Input, Node};
use kabel_registry::{Addressing, CodegenContext, OperationRegistry, Schema};

use crate::error::CompileError;
use crate::options::CompileOptions;
use crate::order::Linearized;
use crate::result::{CompileResult, StatefulUnit};

/// Logs at `info` when the caller asked for a compile log, `debug` otherwise.
macro_rules! diag {
    ($log:expr, $($arg:tt)+) => {
        if $log {
            tracing::info!($($arg)+);
        } else {
            tracing::debug!($($arg)+);
        }
    };
}
pub(crate) use diag;

/// Literal text of a constant node. A constant without a payload reads as `0`.
fn inline_literal(node: &Node) -> String {
    node.value().map_or_else(|| "0".to_string(), ToString::to_string)
}

/// Resolves every node's own reference: a slot for ordinary nodes, the
/// literal for constants. Returns the names and the number of slots used.
fn name_nodes(seq: &Linearized<'_>, options: &CompileOptions) -> (Vec<String>, usize) {
    let mut names = Vec::with_capacity(seq.len());
    let mut slots = 0;
    for (id, node) in seq.iter() {
        if node.kind() == options.const_type {
            names.push(inline_literal(node));
            continue;
        }
        let index = match options.addressing {
            Addressing::Identifiers => id,
            // registers are packed: constants don't take one
            Addressing::Registers => slots,
        };
        names.push(options.addressing.slot(&options.identifier_prefix, index));
        slots += 1;
    }
    (names, slots)
}

fn resolve_schema<'r>(
    registry: &'r OperationRegistry,
    options: &CompileOptions,
    kind: &str,
) -> Result<&'r Schema, CompileError> {
    if let Some(schema) = registry.lookup(kind) {
        return Ok(schema);
    }
    tracing::warn!(
        "unhandled node type \"{}\". falling back to \"{}\"",
        kind,
        options.fallback_type
    );
    registry
        .lookup(&options.fallback_type)
        .ok_or_else(|| CompileError::MissingFallback {
            kind: kind.to_string(),
            fallback: options.fallback_type.clone(),
        })
}

/// Generates the program and stateful-unit list for a linearized graph.
pub(crate) fn generate(
    seq: &Linearized<'_>,
    registry: &OperationRegistry,
    options: &CompileOptions,
) -> Result<CompileResult, CompileError> {
    let nodes = seq.nodes();
    let (names, slot_count) = name_nodes(seq, options);

    let mut lines: Vec<String> = Vec::new();
    let mut units: Vec<StatefulUnit> = Vec::new();
    let mut unit_indices: Vec<Option<usize>> = vec![None; nodes.len()];
    let mut operands: Vec<Vec<String>> = Vec::with_capacity(nodes.len());

    for (id, node) in seq.iter() {
        if node.kind() == options.const_type {
            operands.push(Vec::new());
            continue;
        }

        let mut vars = Vec::with_capacity(node.ins().len());
        let mut input_ids = Vec::with_capacity(node.ins().len());
        for input in node.ins() {
            match input {
                Input::Node(producer) => {
                    let pid = seq
                        .id_of(producer)
                        .expect("inputs of a linearized node are linearized");
                    vars.push(names[pid].clone());
                    input_ids.push(Some(pid));
                }
                Input::Immediate(lit) => {
                    vars.push(lit.to_string());
                    input_ids.push(None);
                }
            }
        }

        let schema = resolve_schema(registry, options, node.kind())?;
        let unit_index = units.len();

        if let Some(codegen) = schema.codegen {
            let ctx = CodegenContext {
                vars: &vars,
                node,
                nodes,
                id,
                unit_index,
                stateful_tag: schema.stateful_tag.as_deref(),
                name: &names[id],
                addressing: options.addressing,
                input_ids: &input_ids,
                unit_indices: &unit_indices,
                operands: &operands,
            };
            if let Some(line) = codegen(&ctx) {
                tracing::trace!(id, kind = node.kind(), "{line}");
                lines.push(line);
            }
        }

        if let Some(tag) = &schema.stateful_tag {
            unit_indices[id] = Some(unit_index);
            units.push(StatefulUnit {
                tag: tag.clone(),
                inputs: vars.clone(),
            });
        }
        operands.push(vars);
    }

    diag!(
        options.log,
        "codegen: {} statements, {} stateful units, {} slots",
        lines.len(),
        units.len(),
        slot_count
    );

    Ok(CompileResult {
        program: lines.join("\n"),
        stateful_units: units,
        slot_count,
    })
}
