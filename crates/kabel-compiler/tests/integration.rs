//! Integration tests for kabel-compiler.
//!
//! Covers the reference patches end to end under both addressing conventions,
//! fan-out handling, determinism, and the unregistered-kind warning path.

use std::io;
use std::sync::{Arc, Mutex};

use kabel_compiler::{CompileOptions, CompileResult, Compiler, compile, linearize};
use kabel_graph::{Node, NodeRef, Signal, exit, feedback, kinds, noise, saw, sine, tri};
use kabel_registry::{Addressing, OperationRegistry};

fn compile_default(root: &Node) -> CompileResult {
    compile(root, &OperationRegistry::new(), &CompileOptions::default()).unwrap()
}

fn compile_registers(root: &Node) -> CompileResult {
    let options = CompileOptions::default().with_addressing(Addressing::Registers);
    compile(root, &OperationRegistry::new(), &options).unwrap()
}

// ---------------------------------------------------------------------------
// Reference patches
// ---------------------------------------------------------------------------

#[test]
fn sine_to_output() {
    let unit = compile_default(&sine(200.0).out().exit());
    assert_eq!(
        unit.program,
        "const n1 = nodes[0].update(200,0,0); /* sine */\n\
         return [(n1*lvl),(n1*lvl)]"
    );
    assert_eq!(unit.unit_tags(), vec!["SineOsc"]);
}

#[test]
fn sine_with_feedback() {
    let unit = compile_default(&sine(200.0).add_feedback(|x| x.mul(0.8)).out().exit());
    assert_eq!(
        unit.program,
        "const n1 = nodes[0].update(200,0,0); /* sine */\n\
         const n2 = nodes[1].update(); /* feedback_read */\n\
         const n3 = n1 + n2;\n\
         const n5 = n3 * 0.8;\n\
         const n6 = nodes[1].write(n5); /* feedback_write */\n\
         return [(n3*lvl),(n3*lvl)]"
    );
    assert_eq!(unit.unit_tags(), vec!["SineOsc", "Feedback"]);
}

#[test]
fn sine_to_output_registers() {
    let unit = compile_registers(&sine(200.0).out().exit());
    assert_eq!(
        unit.program,
        "r[0] = nodes[0].update(200,0,0); /* sine */\n\
         return [(r[0]*lvl),(r[0]*lvl)]"
    );
    assert_eq!(unit.unit_tags(), vec!["SineOsc"]);
}

#[test]
fn sine_with_feedback_registers() {
    let unit = compile_registers(&sine(200.0).add_feedback(|x| x.mul(0.8)).out().exit());
    assert_eq!(
        unit.program,
        "r[0] = nodes[0].update(200,0,0); /* sine */\n\
         r[1] = nodes[1].update(); /* feedback_read */\n\
         r[2] = r[0] + r[1];\n\
         r[3] = r[2] * 0.8;\n\
         r[4] = nodes[1].write(r[3]); /* feedback_write */\n\
         return [(r[2]*lvl),(r[2]*lvl)]"
    );
    assert_eq!(unit.unit_tags(), vec!["SineOsc", "Feedback"]);
}

#[test]
fn conventions_agree_on_everything_but_operand_text() {
    let root = sine(200.0).add_feedback(|x| x.mul(0.8)).out().exit();
    let a = compile_default(&root);
    let b = compile_registers(&root);

    assert_eq!(a.unit_tags(), b.unit_tags());
    assert_eq!(a.statements().count(), b.statements().count());
    assert_eq!(a.slot_count, b.slot_count);
    for (x, y) in a.statements().zip(b.statements()) {
        // same statement shape: the comment tail, if any, is identical
        assert_eq!(x.split("/*").nth(1), y.split("/*").nth(1));
    }
}

// ---------------------------------------------------------------------------
// Fan-out and ordering
// ---------------------------------------------------------------------------

#[test]
fn shared_producer_compiled_once() {
    let osc = sine(110.0);
    for consumers in 2..6 {
        let mut mix = osc.mul(0.5);
        for i in 1..consumers {
            mix = mix.add(osc.mul(0.1 * f64::from(i)));
        }
        let unit = compile_default(&mix.out().exit());
        let sine_lines = unit.statements().filter(|l| l.ends_with("/* sine */")).count();
        assert_eq!(sine_lines, 1, "{consumers} consumers");
        assert_eq!(unit.unit_tags(), vec!["SineOsc"]);
    }
}

#[test]
fn unit_order_follows_linearization_not_construction() {
    // build the saw first, but consume the noise first
    let s = saw(3.0);
    let w = noise();
    let unit = compile_default(&w.add(&s).out().exit());
    assert_eq!(unit.unit_tags(), vec!["Noise", "SawOsc"]);
}

#[test]
fn multiple_outputs_and_loops() {
    let left = sine(220.0).add_feedback(|x| x.mul(0.3)).out();
    let right = feedback(|prev| saw(330.0).add(prev.mul(0.2))).out();
    let unit = compile_default(&exit(&[left, right]));
    assert_eq!(
        unit.unit_tags(),
        vec!["SineOsc", "Feedback", "SawOsc", "Feedback"]
    );
    let writes: Vec<&str> = unit
        .statements()
        .filter(|l| l.ends_with("/* feedback_write */"))
        .collect();
    assert_eq!(writes.len(), 2);
    assert!(writes[0].contains("nodes[1].write("));
    assert!(writes[1].contains("nodes[3].write("));

    let returns: Vec<&str> = unit
        .statements()
        .filter(|l| l.starts_with("return "))
        .collect();
    assert_eq!(returns, vec!["return [((n3 + n12)*lvl),((n3 + n12)*lvl)]"]);
    assert_eq!(unit.statements().last(), Some(returns[0]));
}

#[test]
fn several_outputs_mix_into_one_return() {
    let root = exit(&[sine(220.0).out(), saw(330.0).out()]);
    assert_eq!(
        compile_default(&root).program,
        "const n1 = nodes[0].update(220,0,0); /* sine */\n\
         const n4 = nodes[1].update(330); /* saw */\n\
         return [((n1 + n4)*lvl),((n1 + n4)*lvl)]"
    );
    assert_eq!(
        compile_registers(&root).program,
        "r[0] = nodes[0].update(220,0,0); /* sine */\n\
         r[2] = nodes[1].update(330); /* saw */\n\
         return [((r[0] + r[2])*lvl),((r[0] + r[2])*lvl)]"
    );
}

#[test]
fn stereo_outputs_mix_per_channel() {
    let a = tri(110.0).out_stereo(0.5);
    let b = noise().out();
    let unit = compile_default(&exit(&[a, b]));
    assert_eq!(
        unit.statements().last(),
        Some("return [((n1 + n4)*lvl),((0.5 + n4)*lvl)]")
    );
}

#[test]
fn stateful_units_carry_operands() {
    let unit = compile_default(&sine(200.0).lpf(800.0).delay(0.25).out().exit());
    assert_eq!(unit.unit_tags(), vec!["SineOsc", "Lowpass", "Delay"]);
    assert_eq!(unit.stateful_units[1].inputs, vec!["n1", "800", "0"]);
    assert_eq!(unit.stateful_units[2].inputs, vec!["n3", "0.25"]);
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

fn build_patch() -> NodeRef {
    let lfo = sine(0.5).mul(100.0).add(300.0);
    let voice = saw(&lfo).lpf(lfo.mul(2.0)).add_feedback(|x| x.delay(0.3).mul(0.4));
    voice.out_stereo(voice.mul(0.9)).exit()
}

#[test]
fn repeated_compiles_are_identical() {
    let root = build_patch();
    let compiler = Compiler::default();
    assert_eq!(compiler.compile(&root).unwrap(), compiler.compile(&root).unwrap());
}

#[test]
fn structurally_identical_graphs_compile_identically() {
    let compiler = Compiler::default();
    assert_eq!(
        compiler.compile(&build_patch()).unwrap(),
        compiler.compile(&build_patch()).unwrap()
    );
}

#[test]
fn dependencies_precede_dependents() {
    let root = build_patch();
    let seq = linearize(&root);
    for (id, node) in seq.iter() {
        for input in node.input_nodes() {
            assert!(seq.id_of(input).unwrap() < id);
        }
    }
    assert_eq!(seq.nodes().last().unwrap().kind(), kinds::EXIT);
}

// ---------------------------------------------------------------------------
// Unregistered kinds
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn unregistered_kind_warns_and_degrades() {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();

    let root = Signal::op("wobble", &[&sine(3.0)]).out().exit();
    let unit = tracing::subscriber::with_default(subscriber, || compile_default(&root));

    assert!(unit.program.contains("const n2 = n1;"));
    let log = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
    assert!(log.contains("WARN"), "got: {log}");
    assert!(log.contains("unhandled node type \"wobble\""), "got: {log}");
}

#[test]
fn missing_fallback_returns_no_output() {
    let root = sine(1.0).add(Signal::op("wobble", &[])).out().exit();
    let options = CompileOptions::default().with_fallback_type("missing");
    let result = compile(&root, &OperationRegistry::new(), &options);
    assert!(result.is_err());
}
