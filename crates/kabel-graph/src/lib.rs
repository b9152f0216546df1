//! Immutable dataflow graph for kabel patches.
//!
//! A patch is a directed acyclic graph of [`Node`]s. Each node has an
//! operation kind tag, ordered inputs, and an optional literal payload. Nodes
//! are reference counted and shared, so one producer can feed any number of
//! consumers.
//!
//! The [`Signal`] builder constructs graphs with chained calls. Nothing is ever
//! mutated after construction: loops are expressed as a `feedback_read` /
//! `feedback_write` pair that share one runtime state cell, and the graph
//! itself stays acyclic.
//!
//! # Example
//!
//! ```rust
//! use kabel_graph::{sine, kinds};
//!
//! let root = sine(200.0).out().exit();
//! assert_eq!(root.kind(), kinds::EXIT);
//! assert_eq!(root.input_nodes().next().unwrap().kind(), kinds::OUT);
//! ```

pub mod kinds;
mod node;
mod signal;

pub use node::{CONST_KIND, Input, Literal, Node, NodeRef, same_node};
pub use signal::{Signal, exit, feedback, n, noise, pulse, saw, sine, tri};
