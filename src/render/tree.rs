//! Indented, status-colored tree rendering
//!
//! Walks the validated graph depth-first from the synthetic root and prints
//! one line per node per distinct path. The graph is treated as undirected
//! here: a pod is worth showing both as something depended upon and as a
//! dependent, so a node can legitimately appear more than once.

use std::collections::BTreeSet;

use crate::graph::{PodGraph, PodSet, ROOT_ID};

/// Style tokens wrapped around node names. The defaults are ANSI escapes;
/// callers rendering HTML or similar substitute their own markers.
#[derive(Debug, Clone)]
pub struct Palette {
    /// Marker for pods with a running process
    pub ok: String,
    /// Marker for pods without a running process
    pub ko: String,
    /// Marker closing either of the above
    pub reset: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            ok: "\x1b[92m".to_string(),
            ko: "\x1b[91m".to_string(),
            reset: "\x1b[0m".to_string(),
        }
    }
}

impl Palette {
    /// A palette with empty tokens, for plain-text output and tests.
    pub fn plain() -> Self {
        Self {
            ok: String::new(),
            ko: String::new(),
            reset: String::new(),
        }
    }
}

/// A rendered tree plus the caveats that go with it
#[derive(Debug, Clone)]
pub struct TreeOutput {
    /// The indented tree, legend included
    pub text: String,
    /// Pods that never reported a dependency field; the graph cannot prove
    /// it is complete while these exist
    pub undeclared: Vec<String>,
}

/// Render the tree for a validated (acyclic) graph.
pub fn tree(graph: &PodGraph, pods: &PodSet, palette: &Palette) -> TreeOutput {
    let mut text = String::new();

    for root in graph.roots() {
        text.push_str(&paint(root, pods, palette));
        text.push('\n');
        let mut path = BTreeSet::from([ROOT_ID, root]);
        draw_children(graph, pods, palette, root, 1, &mut path, &mut text);
        text.push('\n');
    }

    text.push_str(&format!(
        "Pods with a running process are shown in {}green{}, those with a non-running process in {}red{}.\n",
        palette.ok, palette.reset, palette.ko, palette.reset
    ));

    let undeclared: Vec<String> = pods.undeclared().iter().map(|id| id.to_string()).collect();
    if !undeclared.is_empty() {
        text.push_str(
            "\nThe following pods did not report any dependency information, \
             the graph may be incomplete:\n",
        );
        for id in &undeclared {
            text.push_str("  - ");
            text.push_str(id);
            text.push('\n');
        }
    }

    TreeOutput { text, undeclared }
}

fn draw_children<'a>(
    graph: &'a PodGraph,
    pods: &PodSet,
    palette: &Palette,
    parent: &str,
    level: usize,
    path: &mut BTreeSet<&'a str>,
    text: &mut String,
) {
    for neighbor in graph.neighbors_of(parent) {
        // Neighbors already on the path from the root are the nodes we came
        // through; descending into them would never terminate.
        if path.contains(neighbor) {
            continue;
        }
        text.push_str(&"  ".repeat(level));
        text.push_str("+-");
        text.push_str(&paint(neighbor, pods, palette));
        text.push('\n');

        path.insert(neighbor);
        draw_children(graph, pods, palette, neighbor, level + 1, path, text);
        path.remove(neighbor);
    }
}

fn paint(id: &str, pods: &PodSet, palette: &Palette) -> String {
    let running = pods.get(id).is_some_and(|p| p.running);
    let color = if running { &palette.ok } else { &palette.ko };
    format!("{}{}{}", color, id, palette.reset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{PodGraph, PodRecord, PodSet};
    use serde_json::json;

    fn set(specs: &[(&str, serde_json::Value)]) -> PodSet {
        PodSet::from_records(
            specs
                .iter()
                .map(|(id, body)| PodRecord::parse(id, 0, body).unwrap()),
        )
    }

    #[test]
    fn dependency_target_sits_above_its_dependent() {
        let pods = set(&[
            ("dev.a #1", json!({ "dependsOn": [], "process": "running" })),
            ("dev.b #2", json!({ "dependsOn": ["a"], "process": "running" })),
        ]);
        let graph = PodGraph::build(&pods);
        let out = tree(&graph, &pods, &Palette::plain());
        let lines: Vec<&str> = out.text.lines().collect();
        assert_eq!(lines[0], "dev.a #1");
        assert_eq!(lines[1], "  +-dev.b #2");
    }

    #[test]
    fn chains_indent_one_level_per_hop() {
        let pods = set(&[
            ("dev.a #1", json!({ "dependsOn": [] })),
            ("dev.b #2", json!({ "dependsOn": ["a"] })),
            ("dev.c #3", json!({ "dependsOn": ["b"] })),
        ]);
        let graph = PodGraph::build(&pods);
        let out = tree(&graph, &pods, &Palette::plain());
        assert!(out.text.starts_with("dev.a #1\n  +-dev.b #2\n    +-dev.c #3\n"));
    }

    #[test]
    fn health_tokens_wrap_each_node() {
        let pods = set(&[
            ("dev.up #1", json!({ "dependsOn": [], "process": "running" })),
            ("dev.down #2", json!({ "dependsOn": [] })),
        ]);
        let graph = PodGraph::build(&pods);
        let palette = Palette {
            ok: "<ok>".to_string(),
            ko: "<ko>".to_string(),
            reset: "</>".to_string(),
        };
        let out = tree(&graph, &pods, &palette);
        assert!(out.text.contains("<ok>dev.up #1</>"));
        assert!(out.text.contains("<ko>dev.down #2</>"));
    }

    #[test]
    fn undeclared_pods_are_listed_after_the_tree() {
        let pods = set(&[
            ("dev.quiet #1", json!({})),
            ("dev.ok #2", json!({ "dependsOn": [] })),
        ]);
        let graph = PodGraph::build(&pods);
        let out = tree(&graph, &pods, &Palette::plain());
        assert_eq!(out.undeclared, vec!["dev.quiet #1"]);
        assert!(out.text.contains("did not report any dependency information"));
        assert!(out.text.contains("  - dev.quiet #1"));
    }

    #[test]
    fn shared_target_shows_each_dependent_once_per_path() {
        // both b and c depend on a; b also depends on c
        let pods = set(&[
            ("dev.a #1", json!({ "dependsOn": [] })),
            ("dev.b #2", json!({ "dependsOn": ["a", "c"] })),
            ("dev.c #3", json!({ "dependsOn": ["a"] })),
        ]);
        let graph = PodGraph::build(&pods);
        let out = tree(&graph, &pods, &Palette::plain());
        // b appears under a directly and again under c
        let count = out.text.matches("+-dev.b #2").count();
        assert_eq!(count, 2);
    }
}
