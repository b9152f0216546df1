//! Topological ordering of a node graph.
//!
//! [`linearize`] walks the graph depth-first from the root and appends each
//! node after all of its inputs (postorder). Inputs are visited in declared
//! order, so sibling subgraphs come out left to right and the same graph
//! always yields the same sequence. Shared nodes are entered once.
//!
//! The walk keeps its own frame stack instead of recursing, so chain length is
//! bounded by memory rather than by the thread's call stack. Node graphs built
//! from immutable [`Node`]s cannot contain cycles; no cycle check is made.

use std::collections::{HashMap, HashSet};

use kabel_graph::Node;

/// A deterministic, dependency-respecting ordering of every node reachable
/// from a root.
///
/// A node's position in the sequence is its id for the compile call that
/// produced it.
#[derive(Debug)]
pub struct Linearized<'a> {
    order: Vec<&'a Node>,
    ids: HashMap<*const Node, usize>,
}

impl<'a> Linearized<'a> {
    /// Nodes in dependency order; the root is last.
    #[inline]
    pub fn nodes(&self) -> &[&'a Node] {
        &self.order
    }

    /// Position of `node` in the sequence, if it is reachable from the root.
    #[inline]
    pub fn id_of(&self, node: &Node) -> Option<usize> {
        self.ids.get(&core::ptr::from_ref(node)).copied()
    }

    /// Number of distinct nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always false: the root itself is part of the sequence.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates over `(id, node)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'a Node)> + '_ {
        self.order.iter().copied().enumerate()
    }
}

/// Linearizes the graph reachable from `root`.
///
/// Every reachable node appears exactly once and after every node it depends
/// on. Immediate (non-node) inputs are skipped.
pub fn linearize(root: &Node) -> Linearized<'_> {
    let mut order: Vec<&Node> = Vec::new();
    let mut ids: HashMap<*const Node, usize> = HashMap::new();
    // Nodes are marked on entry so a shared node is only walked once.
    let mut entered: HashSet<*const Node> = HashSet::new();

    // (node, index of the next input to visit)
    let mut stack: Vec<(&Node, usize)> = vec![(root, 0)];
    entered.insert(core::ptr::from_ref(root));

    while let Some(frame) = stack.last_mut() {
        let node = frame.0;
        match node.ins().get(frame.1) {
            Some(input) => {
                frame.1 += 1;
                if let Some(child) = input.as_node()
                    && entered.insert(core::ptr::from_ref(child))
                {
                    stack.push((child, 0));
                }
            }
            None => {
                stack.pop();
                ids.insert(core::ptr::from_ref(node), order.len());
                order.push(node);
            }
        }
    }

    Linearized { order, ids }
}
