//! Node types for the dataflow graph.
//!
//! A [`Node`] is one operation instance: a kind tag, an ordered list of
//! [`Input`]s, and an optional [`Literal`] payload used by constant nodes.
//! Nodes are shared through [`NodeRef`] (`Arc<Node>`); two references denote
//! the same node exactly when they point at the same allocation, which is how
//! fan-out is expressed.

use core::fmt;
use std::sync::Arc;

/// Shared handle to an immutable [`Node`].
pub type NodeRef = Arc<Node>;

/// Kind tag used by the builder for constant nodes.
pub const CONST_KIND: &str = "n";

/// Literal payload carried by constant nodes and immediate inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A numeric literal.
    Number(f64),
    /// A string literal.
    Text(String),
}

impl fmt::Display for Literal {
    /// Formats the literal the way it appears inlined in generated code.
    ///
    /// Numbers use the shortest representation that round-trips (`200.0`
    /// prints as `200`); strings are quoted and escaped.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(v) => write!(f, "{v}"),
            Literal::Text(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<f64> for Literal {
    fn from(v: f64) -> Self {
        Literal::Number(v)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::Text(s.to_owned())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::Text(s)
    }
}

/// One entry in a node's ordered input list.
#[derive(Debug, Clone)]
pub enum Input {
    /// Output of another node.
    Node(NodeRef),
    /// A bare value that is not a node. Contributes no ordering constraint.
    Immediate(Literal),
}

impl Input {
    /// Returns the producer node, if this input refers to one.
    #[inline]
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Input::Node(node) => Some(&**node),
            Input::Immediate(_) => None,
        }
    }

    /// Returns the immediate value, if this input is not a node.
    #[inline]
    pub fn as_immediate(&self) -> Option<&Literal> {
        match self {
            Input::Node(_) => None,
            Input::Immediate(lit) => Some(lit),
        }
    }
}

impl From<NodeRef> for Input {
    fn from(node: NodeRef) -> Self {
        Input::Node(node)
    }
}

impl From<Literal> for Input {
    fn from(lit: Literal) -> Self {
        Input::Immediate(lit)
    }
}

/// An operation instance in the dataflow graph.
///
/// Nodes are never mutated once built. Because a node can only refer to nodes
/// that already exist, a graph of `Node`s is always acyclic; loops are
/// expressed with paired `feedback_read`/`feedback_write` nodes instead.
#[derive(Debug, Clone)]
pub struct Node {
    kind: String,
    ins: Vec<Input>,
    value: Option<Literal>,
}

impl Node {
    /// Creates a node of the given kind with ordered inputs.
    pub fn new(kind: impl Into<String>, ins: Vec<Input>) -> NodeRef {
        Arc::new(Self {
            kind: kind.into(),
            ins,
            value: None,
        })
    }

    /// Creates an input-less node of the given kind carrying a literal value.
    pub fn with_value(kind: impl Into<String>, value: impl Into<Literal>) -> NodeRef {
        Arc::new(Self {
            kind: kind.into(),
            ins: Vec::new(),
            value: Some(value.into()),
        })
    }

    /// Creates a constant node tagged [`CONST_KIND`].
    pub fn constant(value: impl Into<Literal>) -> NodeRef {
        Self::with_value(CONST_KIND, value)
    }

    /// The operation kind tag.
    #[inline]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Ordered inputs.
    #[inline]
    pub fn ins(&self) -> &[Input] {
        &self.ins
    }

    /// Literal payload, present on constant nodes.
    #[inline]
    pub fn value(&self) -> Option<&Literal> {
        self.value.as_ref()
    }

    /// Iterates over the producer nodes among this node's inputs, in order.
    pub fn input_nodes(&self) -> impl Iterator<Item = &Node> {
        self.ins.iter().filter_map(Input::as_node)
    }
}

/// Returns true if `a` and `b` are the same node (same allocation).
#[inline]
pub fn same_node(a: &Node, b: &Node) -> bool {
    core::ptr::eq(a, b)
}
