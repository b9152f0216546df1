//! Statement generators for the built-in operation library.
//!
//! Generated code targets the block runtime's script host: stateful units live
//! in a `nodes` array indexed by stateful unit position, and `lvl` is the
//! master output level the host provides.

use kabel_graph::kinds;

use crate::schema::CodegenContext;

/// `const n1 = nodes[0].update(200,0,0); /* sine */`
pub fn unit_update(ctx: &CodegenContext<'_>) -> Option<String> {
    let call = format!("nodes[{}].update({})", ctx.unit_index, ctx.args());
    Some(format!("{} /* {} */", ctx.assign(&call), ctx.node.kind()))
}

/// Stores operand 0 into the feedback cell owned by the read node on input 1.
///
/// A write without a paired read addresses the next unit slot, which is the
/// position a read emitted right before it would occupy.
pub fn feedback_write(ctx: &CodegenContext<'_>) -> Option<String> {
    let cell = ctx.unit_index_of_input(1).unwrap_or(ctx.unit_index);
    let call = format!("nodes[{cell}].write({})", ctx.var_or(0, "0"));
    Some(format!("{} /* {} */", ctx.assign(&call), ctx.node.kind()))
}

fn infix(ctx: &CodegenContext<'_>, op: char, identity: &str) -> Option<String> {
    let lhs = ctx.var_or(0, identity);
    let rhs = ctx.var_or(1, identity);
    Some(ctx.assign(&format!("{lhs} {op} {rhs}")))
}

/// `const n3 = n1 + n2;`
pub fn add(ctx: &CodegenContext<'_>) -> Option<String> {
    infix(ctx, '+', "0")
}

/// `const n3 = n1 - n2;`
pub fn sub(ctx: &CodegenContext<'_>) -> Option<String> {
    infix(ctx, '-', "0")
}

/// `const n3 = n1 * n2;`
pub fn mul(ctx: &CodegenContext<'_>) -> Option<String> {
    infix(ctx, '*', "1")
}

/// `const n3 = n1 / n2;`
pub fn div(ctx: &CodegenContext<'_>) -> Option<String> {
    infix(ctx, '/', "1")
}

/// Copies operand 0, or `0` for an input-less node.
pub fn thru(ctx: &CodegenContext<'_>) -> Option<String> {
    Some(ctx.assign(ctx.var_or(0, "0")))
}

/// Closes the block with `return [(l*lvl),(r*lvl)]`.
///
/// Every `out` input contributes its left operand to the left channel and its
/// right operand (or its left, for a mono output) to the right channel. Several
/// outputs are summed. Without an `out` input the root emits nothing.
pub fn exit(ctx: &CodegenContext<'_>) -> Option<String> {
    let mut left: Vec<&str> = Vec::new();
    let mut right: Vec<&str> = Vec::new();
    for i in 0..ctx.vars.len() {
        let Some(id) = ctx.input_id(i) else { continue };
        if ctx.nodes.get(id).is_none_or(|n| n.kind() != kinds::OUT) {
            continue;
        }
        let channels = ctx.operands_of(id);
        let l = channels.first().map_or("0", String::as_str);
        left.push(l);
        right.push(channels.get(1).map_or(l, String::as_str));
    }
    if left.is_empty() {
        return None;
    }
    Some(format!(
        "return [({}*lvl),({}*lvl)]",
        mix(&left),
        mix(&right)
    ))
}

fn mix(channel: &[&str]) -> String {
    match channel {
        [single] => (*single).to_string(),
        many => format!("({})", many.join(" + ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Addressing;
    use kabel_graph::{Input, Node, NodeRef};

    struct Fixture {
        node: NodeRef,
        vars: Vec<String>,
        input_ids: Vec<Option<usize>>,
        unit_indices: Vec<Option<usize>>,
    }

    impl Fixture {
        fn new(kind: &str, vars: &[&str]) -> Self {
            Self {
                node: Node::new(kind, Vec::new()),
                vars: vars.iter().map(|v| (*v).to_string()).collect(),
                input_ids: Vec::new(),
                unit_indices: Vec::new(),
            }
        }

        fn run(
            &self,
            f: crate::CodegenFn,
            addressing: Addressing,
            name: &str,
            unit: usize,
        ) -> Option<String> {
            let nodes = [&*self.node];
            let ctx = CodegenContext {
                vars: &self.vars,
                node: &self.node,
                nodes: &nodes,
                id: 0,
                unit_index: unit,
                stateful_tag: None,
                name,
                addressing,
                input_ids: &self.input_ids,
                unit_indices: &self.unit_indices,
                operands: &[],
            };
            f(&ctx)
        }
    }

    /// Runs [`exit`] over `inputs`, each given as a kind plus the operands
    /// that node resolved to.
    fn run_exit(inputs: &[(&str, &[&str])]) -> Option<String> {
        let producers: Vec<NodeRef> = inputs
            .iter()
            .map(|(kind, _)| Node::new(*kind, Vec::new()))
            .collect();
        let root = Node::new(
            kinds::EXIT,
            producers.iter().cloned().map(Input::Node).collect(),
        );
        let mut nodes: Vec<&Node> = producers.iter().map(|n| &**n).collect();
        nodes.push(&root);

        let operands: Vec<Vec<String>> = inputs
            .iter()
            .map(|(_, ops)| ops.iter().map(|o| (*o).to_string()).collect())
            .collect();
        let vars: Vec<String> = (0..inputs.len()).map(|i| format!("n{i}")).collect();
        let input_ids: Vec<Option<usize>> = (0..inputs.len()).map(Some).collect();
        let unit_indices = vec![None; inputs.len()];
        let name = format!("n{}", inputs.len());

        let ctx = CodegenContext {
            vars: &vars,
            node: &root,
            nodes: &nodes,
            id: inputs.len(),
            unit_index: 0,
            stateful_tag: None,
            name: &name,
            addressing: Addressing::Identifiers,
            input_ids: &input_ids,
            unit_indices: &unit_indices,
            operands: &operands,
        };
        exit(&ctx)
    }

    #[test]
    fn unit_update_matches_host_form() {
        let fx = Fixture::new("sine", &["200", "0", "0"]);
        assert_eq!(
            fx.run(unit_update, Addressing::Identifiers, "n1", 0).unwrap(),
            "const n1 = nodes[0].update(200,0,0); /* sine */"
        );
        assert_eq!(
            fx.run(unit_update, Addressing::Registers, "r[0]", 0).unwrap(),
            "r[0] = nodes[0].update(200,0,0); /* sine */"
        );
    }

    #[test]
    fn unit_update_without_inputs() {
        let fx = Fixture::new("feedback_read", &[]);
        assert_eq!(
            fx.run(unit_update, Addressing::Identifiers, "n2", 1).unwrap(),
            "const n2 = nodes[1].update(); /* feedback_read */"
        );
    }

    #[test]
    fn feedback_write_targets_paired_read() {
        let mut fx = Fixture::new("feedback_write", &["n5", "n2"]);
        fx.input_ids = vec![Some(5), Some(2)];
        fx.unit_indices = vec![None, Some(0), Some(1), None, None, None];
        assert_eq!(
            fx.run(feedback_write, Addressing::Identifiers, "n6", 2).unwrap(),
            "const n6 = nodes[1].write(n5); /* feedback_write */"
        );
    }

    #[test]
    fn feedback_write_without_read_uses_running_index() {
        let fx = Fixture::new("feedback_write", &["n5"]);
        assert_eq!(
            fx.run(feedback_write, Addressing::Identifiers, "n6", 4).unwrap(),
            "const n6 = nodes[4].write(n5); /* feedback_write */"
        );
    }

    #[test]
    fn infix_ops() {
        let fx = Fixture::new("mul", &["n3", "0.8"]);
        assert_eq!(
            fx.run(mul, Addressing::Identifiers, "n5", 0).unwrap(),
            "const n5 = n3 * 0.8;"
        );
        let fx = Fixture::new("sub", &["r[1]", "r[2]"]);
        assert_eq!(
            fx.run(sub, Addressing::Registers, "r[3]", 0).unwrap(),
            "r[3] = r[1] - r[2];"
        );
    }

    #[test]
    fn missing_operands_fall_back_to_identity() {
        let fx = Fixture::new("mul", &["n1"]);
        assert_eq!(
            fx.run(mul, Addressing::Identifiers, "n2", 0).unwrap(),
            "const n2 = n1 * 1;"
        );
        let fx = Fixture::new("add", &[]);
        assert_eq!(
            fx.run(add, Addressing::Identifiers, "n0", 0).unwrap(),
            "const n0 = 0 + 0;"
        );
    }

    #[test]
    fn thru_copies_first_operand() {
        let fx = Fixture::new("bogus", &["n4", "n5"]);
        assert_eq!(
            fx.run(thru, Addressing::Identifiers, "n6", 0).unwrap(),
            "const n6 = n4;"
        );
        let fx = Fixture::new("bogus", &[]);
        assert_eq!(
            fx.run(thru, Addressing::Registers, "r[0]", 0).unwrap(),
            "r[0] = 0;"
        );
    }

    #[test]
    fn exit_duplicates_mono_output() {
        assert_eq!(
            run_exit(&[(kinds::OUT, &["n3"])]).unwrap(),
            "return [(n3*lvl),(n3*lvl)]"
        );
    }

    #[test]
    fn exit_keeps_stereo_channels_apart() {
        assert_eq!(
            run_exit(&[(kinds::OUT, &["r[1]", "r[2]"])]).unwrap(),
            "return [(r[1]*lvl),(r[2]*lvl)]"
        );
    }

    #[test]
    fn exit_sums_every_output() {
        let line = run_exit(&[
            (kinds::FEEDBACK_WRITE, &["n5", "n2"]),
            (kinds::OUT, &["n3"]),
            (kinds::OUT, &["n8", "n9"]),
        ])
        .unwrap();
        assert_eq!(line, "return [((n3 + n8)*lvl),((n3 + n9)*lvl)]");
    }

    #[test]
    fn exit_without_outputs_emits_nothing() {
        assert!(run_exit(&[]).is_none());
        assert!(run_exit(&[(kinds::FEEDBACK_WRITE, &["n5", "n2"])]).is_none());
    }
}
