//! Compile entry points.

use kabel_graph::Node;
use kabel_registry::OperationRegistry;

use crate::codegen::{diag, generate};
use crate::error::CompileError;
use crate::options::CompileOptions;
use crate::order::linearize;
use crate::result::CompileResult;

/// Compiles the graph rooted at `root` into a block program.
///
/// The graph is only read. Calling this twice on the same graph (or on a
/// structurally identical one) produces identical results; the only side
/// effects are log events and a warning per unregistered node kind.
///
/// # Errors
///
/// Returns [`CompileError::MissingFallback`] if a node's kind is unregistered
/// and so is `options.fallback_type`.
pub fn compile(
    root: &Node,
    registry: &OperationRegistry,
    options: &CompileOptions,
) -> Result<CompileResult, CompileError> {
    diag!(options.log, "compile: root \"{}\"", root.kind());

    let seq = linearize(root);
    diag!(options.log, "compile_sort: {} nodes in topo order", seq.len());
    for (id, node) in seq.iter() {
        tracing::trace!("  node[{id}]: {}", node.kind());
    }

    let result = generate(&seq, registry, options)?;
    diag!(options.log, "compiled code:\n{}", result.program);
    Ok(result)
}

/// A registry and a set of options, bundled for repeated compiles.
///
/// This is the environment patches are evaluated against: hosts that register
/// their own processing units do so on the compiler's registry instead of on
/// any process-wide table.
///
/// ```rust
/// use kabel_compiler::Compiler;
/// use kabel_graph::sine;
///
/// let compiler = Compiler::default();
/// let unit = compiler.compile(&sine(200.0).out().exit()).unwrap();
/// assert_eq!(unit.unit_tags(), vec!["SineOsc"]);
/// ```
#[derive(Default)]
pub struct Compiler {
    registry: OperationRegistry,
    options: CompileOptions,
}

impl Compiler {
    /// Creates a compiler from a registry and options.
    pub fn new(registry: OperationRegistry, options: CompileOptions) -> Self {
        Self { registry, options }
    }

    /// Replaces the options.
    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    /// The operation registry.
    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    /// Mutable access to the registry, e.g. to register a processing unit.
    pub fn registry_mut(&mut self) -> &mut OperationRegistry {
        &mut self.registry
    }

    /// The active options.
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compiles the graph rooted at `root`. See [`compile`].
    pub fn compile(&self, root: &Node) -> Result<CompileResult, CompileError> {
        compile(root, &self.registry, &self.options)
    }
}
