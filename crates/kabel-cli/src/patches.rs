//! Built-in demo patches.

use kabel_graph::{NodeRef, Signal, noise, pulse, saw, sine, tri};

/// A named patch the CLI can compile.
#[derive(Debug, Clone, Copy)]
pub struct PatchInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub build: fn() -> NodeRef,
}

/// All built-in patches, in listing order.
pub fn available_patches() -> Vec<PatchInfo> {
    vec![
        PatchInfo {
            name: "sine",
            description: "200 Hz sine straight to the output",
            build: || sine(200.0).out().exit(),
        },
        PatchInfo {
            name: "feedback",
            description: "Sine summed with 80% of its own previous output",
            build: || sine(200.0).add_feedback(|x| x.mul(0.8)).out().exit(),
        },
        PatchInfo {
            name: "fm",
            description: "220 Hz carrier frequency-modulated by a 3 Hz sine",
            build: fm,
        },
        PatchInfo {
            name: "echo",
            description: "Filtered saw through a feedback delay line",
            build: || {
                saw(110.0)
                    .lpf(900.0)
                    .add_feedback(|x| x.delay(0.3).mul(0.5))
                    .out()
                    .exit()
            },
        },
        PatchInfo {
            name: "filtered-noise",
            description: "Noise through a swept lowpass and a fixed highpass",
            build: filtered_noise,
        },
        PatchInfo {
            name: "stereo",
            description: "Triangle left, pulse right",
            build: || tri(220.0).out_stereo(pulse(221.0, 0.3)).exit(),
        },
        PatchInfo {
            name: "unknown-op",
            description: "Sine through an unregistered \"wobble\" operation",
            build: || Signal::op("wobble", &[&sine(3.0)]).out().exit(),
        },
    ]
}

/// Looks a patch up by name, ignoring case.
pub fn find_patch(name: &str) -> Option<PatchInfo> {
    available_patches()
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}

fn fm() -> NodeRef {
    let modulator = sine(3.0).mul(50.0).add(220.0);
    sine(&modulator).mul(0.5).out().exit()
}

fn filtered_noise() -> NodeRef {
    let sweep = sine(0.2).mul(400.0).add(600.0);
    noise().lpf(&sweep).hpf(80.0).mul(0.3).out().exit()
}
