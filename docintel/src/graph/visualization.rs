//! Graph visualization utilities.
//!
//! Export a compiled graph to Graphviz DOT or to a plain-text edge listing. Conditional
//! edges carry their router label.

use std::fmt::Write;

use super::{CompiledStateGraph, GraphState};
use super::{END, START};

/// Generate Graphviz DOT format representation of the graph.
///
/// Returns a string in DOT format that can be rendered using Graphviz tools.
pub fn generate_dot<S>(graph: &CompiledStateGraph<S>) -> String
where
    S: GraphState,
{
    let mut dot = String::from("digraph {\n");
    dot.push_str("  rankdir=LR;\n");
    dot.push_str("  node [shape=box];\n\n");

    dot.push_str(&format!(
        "  \"{}\" [label=\"START\", style=bold, fillcolor=lightgreen];\n",
        START
    ));
    dot.push_str(&format!(
        "  \"{}\" [label=\"END\", style=bold, fillcolor=lightcoral];\n",
        END
    ));
    for node_id in graph.node_ids() {
        dot.push_str(&format!("  \"{}\";\n", node_id));
    }
    dot.push('\n');

    for (from, to, label) in graph.edges() {
        match label {
            Some(label) => dot.push_str(&format!(
                "  \"{}\" -> \"{}\" [label=\"{}\", style=dashed];\n",
                from, to, label
            )),
            None => dot.push_str(&format!("  \"{}\" -> \"{}\";\n", from, to)),
        }
    }

    dot.push_str("}\n");
    dot
}

/// Generate a simple text representation of the graph structure.
pub fn generate_text<S>(graph: &CompiledStateGraph<S>) -> String
where
    S: GraphState,
{
    let mut text = String::new();
    let _ = writeln!(text, "Graph Structure:");
    let _ = writeln!(text, "Nodes: {}", graph.node_ids().join(", "));
    let _ = writeln!(text, "\nEdges:");
    for (from, to, label) in graph.edges() {
        match label {
            Some(label) => {
                let _ = writeln!(text, "  {} -> {} [{}]", from, to, label);
            }
            None => {
                let _ = writeln!(text, "  {} -> {}", from, to);
            }
        }
    }
    text
}
