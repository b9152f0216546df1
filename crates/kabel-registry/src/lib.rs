//! Operation registry and code generation schemas for kabel patches.
//!
//! Every operation kind a patch may contain is bound to a [`Schema`]: an
//! optional stateful-unit tag plus a pure statement generator. The compiler
//! looks schemas up by the node's kind tag and calls the generator with a
//! [`CodegenContext`] holding already-resolved operand strings.
//!
//! # Features
//!
//! - **Built-in library**: oscillators, filters, delay, arithmetic, feedback
//!   cells, outputs, and the `thru` fallback
//! - **Runtime units**: [`OperationRegistry::register_unit`] binds a new kind
//!   to a host-provided processing unit
//! - **Addressing conventions**: per-node identifiers or a shared register
//!   file, selected per compile via [`Addressing`]
//!
//! # Example
//!
//! ```rust
//! use kabel_registry::{OperationRegistry, OperationCategory};
//!
//! let mut registry = OperationRegistry::new();
//! registry.register_unit("grain", "GrainCloud");
//!
//! let schema = registry.lookup("grain").unwrap();
//! assert_eq!(schema.stateful_tag.as_deref(), Some("GrainCloud"));
//!
//! for op in registry.operations_in_category(OperationCategory::Source) {
//!     println!("{}: {}", op.id, op.description);
//! }
//! ```

pub mod builtins;
mod registry;
mod schema;

pub use registry::{OperationCategory, OperationDescriptor, OperationRegistry};
pub use schema::{Addressing, CodegenContext, CodegenFn, REGISTER_FILE, Schema};
