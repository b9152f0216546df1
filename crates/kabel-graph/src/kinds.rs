//! Operation kind tags produced by the builder.
//!
//! The compiler's built-in operation library registers a schema under each
//! of these tags.

/// Constant. Inlined at every use site, never assigned a slot.
pub const CONST: &str = crate::node::CONST_KIND;

/// Pass-through; the default fallback for unregistered kinds.
pub const THRU: &str = "thru";

/// Sine oscillator.
pub const SINE: &str = "sine";
/// Sawtooth oscillator.
pub const SAW: &str = "saw";
/// Triangle oscillator.
pub const TRI: &str = "tri";
/// Pulse oscillator.
pub const PULSE: &str = "pulse";
/// White noise.
pub const NOISE: &str = "noise";

/// Lowpass filter.
pub const LPF: &str = "lpf";
/// Highpass filter.
pub const HPF: &str = "hpf";
/// Delay line.
pub const DELAY: &str = "delay";

/// Addition.
pub const ADD: &str = "add";
/// Subtraction.
pub const SUB: &str = "sub";
/// Multiplication.
pub const MUL: &str = "mul";
/// Division.
pub const DIV: &str = "div";

/// Reads last cycle's value from a feedback cell.
pub const FEEDBACK_READ: &str = "feedback_read";
/// Stores a value into a feedback cell for the next cycle.
pub const FEEDBACK_WRITE: &str = "feedback_write";

/// Channel output.
pub const OUT: &str = "out";
/// Patch root collecting outputs and feedback writes.
pub const EXIT: &str = "exit";
