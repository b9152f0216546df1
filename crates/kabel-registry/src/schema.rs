//! Schema contract between the compiler and individual operations.
//!
//! A [`Schema`] says two things about an operation kind: whether it needs a
//! persistent processing unit at runtime, and how to turn one node of that
//! kind into a statement. Statement generation is a plain function over a
//! [`CodegenContext`] that the compiler fills with already-resolved operand
//! strings. Schemas never format slot references themselves; they go through
//! [`CodegenContext::assign`] so the same schema works under every
//! [`Addressing`] convention.

use kabel_graph::Node;
use serde::{Deserialize, Serialize};

/// Name of the flat register file used by [`Addressing::Registers`].
pub const REGISTER_FILE: &str = "r";

/// Statement generator for one node. Returns `None` when the node emits
/// nothing.
pub type CodegenFn = fn(&CodegenContext<'_>) -> Option<String>;

/// How generated code refers to a node's computed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Addressing {
    /// One identifier per node: `n3`, declared with `const n3 = ...;`.
    #[default]
    Identifiers,
    /// One flat register file shared by all nodes: `r[3]`, assigned with
    /// `r[3] = ...;`.
    Registers,
}

impl Addressing {
    /// Short tag naming the convention.
    pub const fn tag(self) -> &'static str {
        match self {
            Addressing::Identifiers => "identifiers",
            Addressing::Registers => "registers",
        }
    }

    /// Renders the reference to slot `index`.
    ///
    /// `prefix` only applies to [`Addressing::Identifiers`].
    pub fn slot(self, prefix: &str, index: usize) -> String {
        match self {
            Addressing::Identifiers => format!("{prefix}{index}"),
            Addressing::Registers => format!("{REGISTER_FILE}[{index}]"),
        }
    }

    /// Renders a statement storing `expr` into the slot named `name`.
    pub fn assign(self, name: &str, expr: &str) -> String {
        match self {
            Addressing::Identifiers => format!("const {name} = {expr};"),
            Addressing::Registers => format!("{name} = {expr};"),
        }
    }
}

/// Compilation schema for one operation kind.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    /// Runtime processing unit this operation needs, e.g. `"SineOsc"`.
    pub stateful_tag: Option<String>,
    /// Statement generator. `None` means the kind never emits code.
    pub codegen: Option<CodegenFn>,
}

impl Schema {
    /// A schema that emits code but holds no runtime state.
    pub fn stateless(codegen: CodegenFn) -> Self {
        Self {
            stateful_tag: None,
            codegen: Some(codegen),
        }
    }

    /// A schema backed by a runtime processing unit.
    pub fn stateful(tag: impl Into<String>, codegen: CodegenFn) -> Self {
        Self {
            stateful_tag: Some(tag.into()),
            codegen: Some(codegen),
        }
    }

    /// A schema that emits nothing.
    pub fn silent() -> Self {
        Self::default()
    }
}

/// Everything a schema may use to generate one statement.
///
/// Borrowed from the compiler for the duration of a single
/// [`CodegenFn`] call.
#[derive(Debug, Clone, Copy)]
pub struct CodegenContext<'a> {
    /// Resolved operand for each entry of the node's `ins`, in order.
    pub vars: &'a [String],
    /// The node being compiled.
    pub node: &'a Node,
    /// The whole linearized sequence; `nodes[id]` is `node`.
    pub nodes: &'a [&'a Node],
    /// Position of `node` in `nodes`.
    pub id: usize,
    /// Number of stateful units emitted before this node.
    ///
    /// If the schema is stateful, this is the index its own unit will get.
    pub unit_index: usize,
    /// The schema's stateful tag, if any.
    pub stateful_tag: Option<&'a str>,
    /// This node's own resolved slot reference.
    pub name: &'a str,
    /// Active addressing convention.
    pub addressing: Addressing,
    /// Sequence position of the producer behind each `ins` entry; `None` for
    /// immediates.
    pub input_ids: &'a [Option<usize>],
    /// Stateful unit index of every node compiled so far, by sequence position.
    pub unit_indices: &'a [Option<usize>],
    /// Resolved operands of every node compiled so far, by sequence position.
    /// Constants have none.
    pub operands: &'a [Vec<String>],
}

impl CodegenContext<'_> {
    /// Renders a statement storing `expr` into this node's slot.
    pub fn assign(&self, expr: &str) -> String {
        self.addressing.assign(self.name, expr)
    }

    /// Operand `i`, if the node has that many inputs.
    #[inline]
    pub fn var(&self, i: usize) -> Option<&str> {
        self.vars.get(i).map(String::as_str)
    }

    /// Operand `i`, or `default` when absent.
    #[inline]
    pub fn var_or<'s>(&'s self, i: usize, default: &'s str) -> &'s str {
        self.var(i).unwrap_or(default)
    }

    /// All operands joined with `,`.
    pub fn args(&self) -> String {
        self.vars.join(",")
    }

    /// Sequence position of the node feeding input `i`.
    pub fn input_id(&self, i: usize) -> Option<usize> {
        self.input_ids.get(i).copied().flatten()
    }

    /// Stateful unit index of the node feeding input `i`, if that node owns
    /// a unit.
    pub fn unit_index_of_input(&self, i: usize) -> Option<usize> {
        let id = self.input_id(i)?;
        self.unit_indices.get(id).copied().flatten()
    }

    /// Resolved operands of the already-compiled node at position `id`.
    pub fn operands_of(&self, id: usize) -> &[String] {
        self.operands.get(id).map_or(&[], Vec::as_slice)
    }
}
