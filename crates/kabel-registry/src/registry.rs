//! Operation registry: kind tag to [`Schema`] lookup.

use std::collections::HashMap;

use kabel_graph::kinds;

use crate::builtins;
use crate::schema::Schema;

/// Category of operation for organization and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationCategory {
    /// Literal constants
    Constant,
    /// Oscillators and noise
    Source,
    /// Arithmetic
    Math,
    /// Filters
    Filter,
    /// Delay lines
    Time,
    /// Feedback cell read/write pairs
    Feedback,
    /// Outputs, roots and pass-through
    Routing,
    /// Processing units registered at runtime
    Custom,
}

impl OperationCategory {
    /// All categories, in display order.
    pub const ALL: [OperationCategory; 8] = [
        OperationCategory::Constant,
        OperationCategory::Source,
        OperationCategory::Math,
        OperationCategory::Filter,
        OperationCategory::Time,
        OperationCategory::Feedback,
        OperationCategory::Routing,
        OperationCategory::Custom,
    ];

    /// Returns a lowercase name for the category.
    pub const fn name(&self) -> &'static str {
        match self {
            OperationCategory::Constant => "constant",
            OperationCategory::Source => "source",
            OperationCategory::Math => "math",
            OperationCategory::Filter => "filter",
            OperationCategory::Time => "time",
            OperationCategory::Feedback => "feedback",
            OperationCategory::Routing => "routing",
            OperationCategory::Custom => "custom",
        }
    }

    /// Looks a category up by [`name`](Self::name), ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }
}

/// Describes an operation in the registry.
#[derive(Debug, Clone)]
pub struct OperationDescriptor {
    /// Kind tag nodes of this operation carry.
    pub id: String,
    /// Brief description.
    pub description: String,
    /// Category for organization.
    pub category: OperationCategory,
}

impl OperationDescriptor {
    /// Creates a descriptor.
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        category: OperationCategory,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            category,
        }
    }
}

struct RegistryEntry {
    descriptor: OperationDescriptor,
    schema: Schema,
}

/// Registry of operation schemas, keyed by kind tag.
///
/// [`OperationRegistry::new`] registers the built-in library; start from
/// [`OperationRegistry::empty`] to supply every schema yourself.
pub struct OperationRegistry {
    entries: Vec<RegistryEntry>,
    index: HashMap<String, usize>,
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationRegistry {
    /// Create a new registry with all built-in operations registered.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_builtin_operations();
        registry
    }

    /// Create a registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn register_builtin_operations(&mut self) {
        use OperationCategory as C;

        self.register(
            OperationDescriptor::new(
                kinds::CONST,
                "Literal constant, inlined at each use",
                C::Constant,
            ),
            Schema::silent(),
        );

        let sources = [
            (kinds::SINE, "SineOsc", "Sine oscillator"),
            (kinds::SAW, "SawOsc", "Sawtooth oscillator"),
            (kinds::TRI, "TriOsc", "Triangle oscillator"),
            (kinds::PULSE, "PulseOsc", "Pulse oscillator with duty cycle"),
            (kinds::NOISE, "Noise", "White noise"),
        ];
        for (id, unit, description) in sources {
            self.register(
                OperationDescriptor::new(id, description, C::Source),
                Schema::stateful(unit, builtins::unit_update),
            );
        }

        self.register(
            OperationDescriptor::new(kinds::LPF, "Lowpass filter", C::Filter),
            Schema::stateful("Lowpass", builtins::unit_update),
        );
        self.register(
            OperationDescriptor::new(kinds::HPF, "Highpass filter", C::Filter),
            Schema::stateful("Highpass", builtins::unit_update),
        );
        self.register(
            OperationDescriptor::new(kinds::DELAY, "Delay line", C::Time),
            Schema::stateful("Delay", builtins::unit_update),
        );

        self.register(
            OperationDescriptor::new(kinds::ADD, "Sum of two signals", C::Math),
            Schema::stateless(builtins::add),
        );
        self.register(
            OperationDescriptor::new(kinds::SUB, "Difference of two signals", C::Math),
            Schema::stateless(builtins::sub),
        );
        self.register(
            OperationDescriptor::new(kinds::MUL, "Product of two signals", C::Math),
            Schema::stateless(builtins::mul),
        );
        self.register(
            OperationDescriptor::new(kinds::DIV, "Quotient of two signals", C::Math),
            Schema::stateless(builtins::div),
        );

        self.register(
            OperationDescriptor::new(
                kinds::FEEDBACK_READ,
                "Last cycle's feedback value",
                C::Feedback,
            ),
            Schema::stateful("Feedback", builtins::unit_update),
        );
        self.register(
            OperationDescriptor::new(
                kinds::FEEDBACK_WRITE,
                "Store feedback for next cycle",
                C::Feedback,
            ),
            Schema::stateless(builtins::feedback_write),
        );

        self.register(
            OperationDescriptor::new(kinds::THRU, "Pass-through", C::Routing),
            Schema::stateless(builtins::thru),
        );
        self.register(
            OperationDescriptor::new(kinds::OUT, "Stereo output, mixed by the root", C::Routing),
            Schema::silent(),
        );
        self.register(
            OperationDescriptor::new(kinds::EXIT, "Patch root, returns the output mix", C::Routing),
            Schema::stateless(builtins::exit),
        );
    }

    /// Register an operation, replacing any existing one with the same id.
    pub fn register(&mut self, descriptor: OperationDescriptor, schema: Schema) {
        if let Some(&i) = self.index.get(&descriptor.id) {
            self.entries[i] = RegistryEntry { descriptor, schema };
            return;
        }
        self.index.insert(descriptor.id.clone(), self.entries.len());
        self.entries.push(RegistryEntry { descriptor, schema });
    }

    /// Register a runtime-supplied processing unit under `kind`.
    ///
    /// Nodes of this kind compile to a generic `update` call on a unit named
    /// `unit`, taking every operand in order.
    pub fn register_unit(&mut self, kind: &str, unit: &str) {
        self.register(
            OperationDescriptor::new(
                kind,
                format!("{unit} processing unit"),
                OperationCategory::Custom,
            ),
            Schema::stateful(unit, builtins::unit_update),
        );
    }

    /// Schema registered for `kind`.
    pub fn lookup(&self, kind: &str) -> Option<&Schema> {
        self.index.get(kind).map(|&i| &self.entries[i].schema)
    }

    /// Descriptor registered for `kind`.
    pub fn get(&self, kind: &str) -> Option<&OperationDescriptor> {
        self.index.get(kind).map(|&i| &self.entries[i].descriptor)
    }

    /// Returns true if `kind` is registered.
    pub fn contains(&self, kind: &str) -> bool {
        self.index.contains_key(kind)
    }

    /// All descriptors, in registration order.
    pub fn all_operations(&self) -> Vec<&OperationDescriptor> {
        self.entries.iter().map(|e| &e.descriptor).collect()
    }

    /// Descriptors in one category, in registration order.
    pub fn operations_in_category(&self, category: OperationCategory) -> Vec<&OperationDescriptor> {
        self.entries
            .iter()
            .filter(|e| e.descriptor.category == category)
            .map(|e| &e.descriptor)
            .collect()
    }

    /// Returns the number of registered operations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no operations are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
