//! DOT export for external layout engines
//!
//! The image path does no layout or rasterization of its own: it hands the
//! graph to a layout engine in DOT form and later reads coordinates back
//! (see `imagemap`). Nodes are filled by health so the rendered image carries
//! the same signal as the tree.

use crate::graph::{PodGraph, PodSet};

/// Convert the dependency graph to DOT format for layout and rendering.
/// The synthetic root and its edges are left out.
pub fn to_dot(graph: &PodGraph, pods: &PodSet) -> String {
    let mut lines = Vec::new();
    lines.push("digraph pods {".to_string());
    lines.push("    rankdir=TB;".to_string());
    lines.push("    node [shape=box, style=filled];".to_string());

    for id in graph.pod_ids() {
        let running = pods.get(id).is_some_and(|p| p.running);
        let fill = if running { "palegreen" } else { "lightcoral" };
        lines.push(format!(
            "    \"{}\" [label=\"{}\", fillcolor={}];",
            escape(id),
            escape(id),
            fill
        ));
    }

    for (from, to) in graph.pod_edges() {
        lines.push(format!("    \"{}\" -> \"{}\";", escape(from), escape(to)));
    }

    lines.push("}".to_string());
    lines.join("\n")
}

fn escape(id: &str) -> String {
    id.replace('\\', "\\\\").replace('"', "\\\"")
}
