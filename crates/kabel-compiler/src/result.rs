//! Compile output handed to the block runtime.

use serde::Serialize;

/// A persistent processing unit the runtime allocates once and updates every
/// block.
///
/// Units are addressed by their position in
/// [`CompileResult::stateful_units`]; generated code refers to them as
/// `nodes[<position>]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatefulUnit {
    /// Unit type, e.g. `"SineOsc"`.
    pub tag: String,
    /// Resolved operands of the node that requested the unit.
    pub inputs: Vec<String>,
}

/// A compiled patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompileResult {
    /// Newline-joined statements, executed once per block.
    pub program: String,
    /// Units in the order their nodes were linearized.
    pub stateful_units: Vec<StatefulUnit>,
    /// Number of addressable slots (non-constant nodes). Under register
    /// addressing this is the size of the register file.
    pub slot_count: usize,
}

impl CompileResult {
    /// Unit tags in order.
    pub fn unit_tags(&self) -> Vec<&str> {
        self.stateful_units.iter().map(|u| u.tag.as_str()).collect()
    }

    /// Program statements, one per line.
    pub fn statements(&self) -> impl Iterator<Item = &str> {
        self.program.lines().filter(|l| !l.is_empty())
    }
}
