//! Graph-to-program compiler for kabel patches.
//!
//! Turns a dataflow graph of [`Node`](kabel_graph::Node)s into a linear block
//! program plus the ordered list of stateful processing units the runtime must
//! allocate.
//!
//! # Pipeline
//!
//! 1. **Linearize** ([`linearize`]): depth-first postorder from the root,
//!    inputs left to right, shared nodes once. A node's position is its id.
//! 2. **Name**: every non-constant node gets a slot under the active
//!    [`Addressing`](kabel_registry::Addressing) convention. Constants get no
//!    slot and are inlined wherever they are used.
//! 3. **Generate**: each node's schema is looked up in the
//!    [`OperationRegistry`](kabel_registry::OperationRegistry) (unregistered
//!    kinds fall back to `options.fallback_type` with a warning) and called with
//!    the resolved operands. Stateful schemas append a [`StatefulUnit`].
//! 4. **Assemble**: statements are joined with newlines into
//!    [`CompileResult::program`].
//!
//! # Example
//!
//! ```rust
//! use kabel_compiler::{CompileOptions, compile};
//! use kabel_graph::sine;
//! use kabel_registry::OperationRegistry;
//!
//! let root = sine(200.0).add_feedback(|x| x.mul(0.8)).out().exit();
//! let unit = compile(&root, &OperationRegistry::new(), &CompileOptions::default()).unwrap();
//!
//! assert_eq!(unit.unit_tags(), vec!["SineOsc", "Feedback"]);
//! assert!(unit.program.ends_with("return [(n3*lvl),(n3*lvl)]"));
//! ```

mod codegen;
mod compiler;
mod error;
mod options;
mod order;
mod result;

pub use compiler::{Compiler, compile};
pub use error::{CompileError, ConfigError};
pub use options::CompileOptions;
pub use order::{Linearized, linearize};
pub use result::{CompileResult, StatefulUnit};
