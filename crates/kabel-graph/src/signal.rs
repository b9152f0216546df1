//! Chained patch builder.
//!
//! [`Signal`] is the value a patch author works with. Every combinator
//! returns a fresh `Signal` wrapping a new [`Node`]; existing nodes are never
//! touched. A `Signal` also carries the `feedback_write` nodes created while
//! building it, so that [`Signal::exit`] can root them alongside the outputs
//! even though nothing downstream consumes them.
//!
//! ```rust
//! use kabel_graph::{sine, kinds};
//!
//! let root = sine(200.0).add_feedback(|x| x.mul(0.8)).out().exit();
//! assert_eq!(root.kind(), kinds::EXIT);
//! ```

use std::sync::Arc;

use crate::kinds;
use crate::node::{Input, Literal, Node, NodeRef};

/// A node under construction, plus any feedback writes it depends on.
#[derive(Debug, Clone)]
pub struct Signal {
    node: NodeRef,
    pending: Vec<NodeRef>,
}

impl From<f64> for Signal {
    fn from(v: f64) -> Self {
        n(v)
    }
}

impl From<&Signal> for Signal {
    fn from(s: &Signal) -> Self {
        s.clone()
    }
}

impl From<NodeRef> for Signal {
    fn from(node: NodeRef) -> Self {
        Signal::from_node(node)
    }
}

/// Constant signal.
pub fn n(value: impl Into<Literal>) -> Signal {
    Signal::from_node(Node::constant(value))
}

/// Sine oscillator. Sync and phase offset are fixed at zero.
pub fn sine(freq: impl Into<Signal>) -> Signal {
    let freq = freq.into();
    Signal::build(
        kinds::SINE,
        &[&freq],
        vec![Literal::Number(0.0), Literal::Number(0.0)],
    )
}

/// Sawtooth oscillator.
pub fn saw(freq: impl Into<Signal>) -> Signal {
    Signal::op(kinds::SAW, &[&freq.into()])
}

/// Triangle oscillator.
pub fn tri(freq: impl Into<Signal>) -> Signal {
    Signal::op(kinds::TRI, &[&freq.into()])
}

/// Pulse oscillator with the given duty cycle.
pub fn pulse(freq: impl Into<Signal>, width: impl Into<Signal>) -> Signal {
    Signal::op(kinds::PULSE, &[&freq.into(), &width.into()])
}

/// White noise source.
pub fn noise() -> Signal {
    Signal::op(kinds::NOISE, &[])
}

/// Feedback loop: `f` receives last cycle's value of the signal it returns.
///
/// Produces a `feedback_read` node (no inputs) that `f` can consume and a
/// `feedback_write` node storing `f`'s result for the next cycle. The write
/// takes the read as its second input so both address one state cell.
pub fn feedback(f: impl FnOnce(&Signal) -> Signal) -> Signal {
    let read = Node::new(kinds::FEEDBACK_READ, Vec::new());
    let value = f(&Signal::from_node(read.clone()));
    let write = Node::new(
        kinds::FEEDBACK_WRITE,
        vec![Input::Node(value.node.clone()), Input::Node(read)],
    );
    let mut pending = value.pending.clone();
    pending.push(write);
    Signal {
        node: value.node,
        pending,
    }
}

/// Roots a set of outputs. Pending feedback writes come first, then outputs.
pub fn exit(outputs: &[Signal]) -> NodeRef {
    let mut pending = Vec::new();
    for out in outputs {
        merge_into(&mut pending, &out.pending);
    }
    let ins = pending
        .into_iter()
        .chain(outputs.iter().map(|s| s.node.clone()))
        .map(Input::Node)
        .collect();
    Node::new(kinds::EXIT, ins)
}

#[allow(clippy::should_implement_trait)]
impl Signal {
    /// Wraps an existing node with no pending feedback.
    pub fn from_node(node: NodeRef) -> Self {
        Self {
            node,
            pending: Vec::new(),
        }
    }

    /// Builds a node of arbitrary kind from signal inputs.
    ///
    /// Used for operations without a dedicated combinator, including kinds
    /// that are not registered with the compiler.
    pub fn op(kind: &str, inputs: &[&Signal]) -> Signal {
        Self::build(kind, inputs, Vec::new())
    }

    /// Builds a node from signal inputs followed by immediate values.
    pub fn build(kind: &str, inputs: &[&Signal], immediates: Vec<Literal>) -> Signal {
        let mut pending = Vec::new();
        for input in inputs {
            merge_into(&mut pending, &input.pending);
        }
        let ins = inputs
            .iter()
            .map(|s| Input::Node(s.node.clone()))
            .chain(immediates.into_iter().map(Input::Immediate))
            .collect();
        Signal {
            node: Node::new(kind, ins),
            pending,
        }
    }

    /// The node this signal wraps.
    #[inline]
    pub fn node(&self) -> &NodeRef {
        &self.node
    }

    /// Feedback writes this signal depends on, oldest first.
    #[inline]
    pub fn pending_writes(&self) -> &[NodeRef] {
        &self.pending
    }

    fn binary(&self, kind: &str, rhs: impl Into<Signal>) -> Signal {
        Self::op(kind, &[self, &rhs.into()])
    }

    /// `self + rhs`
    pub fn add(&self, rhs: impl Into<Signal>) -> Signal {
        self.binary(kinds::ADD, rhs)
    }

    /// `self - rhs`
    pub fn sub(&self, rhs: impl Into<Signal>) -> Signal {
        self.binary(kinds::SUB, rhs)
    }

    /// `self * rhs`
    pub fn mul(&self, rhs: impl Into<Signal>) -> Signal {
        self.binary(kinds::MUL, rhs)
    }

    /// `self / rhs`
    pub fn div(&self, rhs: impl Into<Signal>) -> Signal {
        self.binary(kinds::DIV, rhs)
    }

    /// One-pole lowpass filter. Resonance is fixed at zero.
    pub fn lpf(&self, cutoff: impl Into<Signal>) -> Signal {
        Self::build(
            kinds::LPF,
            &[self, &cutoff.into()],
            vec![Literal::Number(0.0)],
        )
    }

    /// Highpass filter. Resonance is fixed at zero.
    pub fn hpf(&self, cutoff: impl Into<Signal>) -> Signal {
        Self::build(
            kinds::HPF,
            &[self, &cutoff.into()],
            vec![Literal::Number(0.0)],
        )
    }

    /// Delay line with a time input in seconds.
    pub fn delay(&self, time: impl Into<Signal>) -> Signal {
        self.binary(kinds::DELAY, time)
    }

    /// Pass-through.
    pub fn thru(&self) -> Signal {
        Self::op(kinds::THRU, &[self])
    }

    /// Applies `kind` to `self` and last cycle's value of `f(result)`.
    ///
    /// `sine(200.0).feedback_op("add", |x| x.mul(0.8))` computes
    /// `y = sine + read` and stores `y * 0.8` for the next cycle. Returns `y`.
    pub fn feedback_op(&self, kind: &str, f: impl FnOnce(&Signal) -> Signal) -> Signal {
        let read = Node::new(kinds::FEEDBACK_READ, Vec::new());
        let y = self.binary(kind, Signal::from_node(read.clone()));
        let fed = f(&y);
        let write = Node::new(
            kinds::FEEDBACK_WRITE,
            vec![Input::Node(fed.node.clone()), Input::Node(read)],
        );
        let mut pending = y.pending.clone();
        merge_into(&mut pending, &fed.pending);
        pending.push(write);
        Signal { node: y.node, pending }
    }

    /// [`feedback_op`](Self::feedback_op) with addition.
    pub fn add_feedback(&self, f: impl FnOnce(&Signal) -> Signal) -> Signal {
        self.feedback_op(kinds::ADD, f)
    }

    /// Mono output, duplicated to both channels.
    pub fn out(&self) -> Signal {
        Self::op(kinds::OUT, &[self])
    }

    /// Stereo output with `self` on the left.
    pub fn out_stereo(&self, right: impl Into<Signal>) -> Signal {
        Self::op(kinds::OUT, &[self, &right.into()])
    }

    /// Roots this signal as the patch's only output.
    pub fn exit(&self) -> NodeRef {
        exit(core::slice::from_ref(self))
    }
}

fn merge_into(dst: &mut Vec<NodeRef>, src: &[NodeRef]) {
    for node in src {
        if !dst.iter().any(|d| Arc::ptr_eq(d, node)) {
            dst.push(node.clone());
        }
    }
}
