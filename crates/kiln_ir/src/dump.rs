//! Plain-text diagnostic dump of a composed graph.
//!
//! Written only when the caller supplies a dump path; intended for comparing
//! what was handed to the compiler across runs, not for machine consumption.

use std::fmt::Write as _;
use std::path::Path;

use crate::graph::Graph;

/// Renders a structured text dump of the graph.
///
/// One header line, the declared inputs, then one line per node with its
/// operator, inputs, and outputs. Absent optional outputs render as `~`.
pub fn render_graph(graph: &Graph) -> String {
    let mut out = String::new();
    let model = graph.model_file_name().unwrap_or("<unnamed>");
    let _ = writeln!(
        out,
        "graph {} ({} inputs, {} nodes)",
        model,
        graph.inputs.len(),
        graph.nodes.len()
    );
    for input in &graph.inputs {
        let _ = writeln!(out, "  input {input}");
    }
    for node in &graph.nodes {
        let outputs: Vec<&str> = node
            .outputs
            .iter()
            .map(|o| o.as_deref().unwrap_or("~"))
            .collect();
        let _ = writeln!(
            out,
            "  node {} [{}] ({}) -> ({})",
            node.name,
            node.op,
            node.inputs.join(", "),
            outputs.join(", ")
        );
    }
    out
}

/// Writes the graph dump to `path`, when one is supplied.
///
/// A write failure is logged and swallowed; the dump is diagnostic output and
/// must never fail the compile that requested it.
pub fn write_dump(graph: &Graph, path: Option<&Path>) {
    let Some(path) = path else {
        return;
    };
    if let Err(e) = std::fs::write(path, render_graph(graph)) {
        tracing::warn!(path = %path.display(), error = %e, "failed to write graph dump");
    }
}
