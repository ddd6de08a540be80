//! Directed dependency graph construction
//!
//! Wraps a petgraph digraph with an id lookup table. Edges run from a
//! dependent pod to the pod it depends on; pods that resolve no dependencies
//! are anchored under a synthetic root so the whole graph hangs off a single
//! entry point for rendering.

use std::collections::BTreeMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::debug;

use crate::graph::matcher;
use crate::graph::record::PodSet;

/// Identifier of the synthetic root node. Never a real pod (real identifiers
/// always contain `#`) and excluded from node listings, health classification
/// and cycle reports.
pub const ROOT_ID: &str = "ROOT";

/// A directed pod dependency graph, built fresh per snapshot
#[derive(Debug, Clone)]
pub struct PodGraph {
    graph: DiGraph<String, ()>,
    index: BTreeMap<String, NodeIndex>,
    root: NodeIndex,
}

impl PodGraph {
    fn new() -> Self {
        let mut graph = DiGraph::new();
        let root = graph.add_node(ROOT_ID.to_string());
        let index = BTreeMap::from([(ROOT_ID.to_string(), root)]);
        Self { graph, index, root }
    }

    /// Derive the graph from a record snapshot.
    ///
    /// For every pod `Q` and each record `P` its declarations resolve to, an
    /// edge `(Q, P)` is inserted. A pod whose declarations resolve to nothing
    /// (or that declared nothing) gets a root edge instead, so every record
    /// appears in the graph exactly once. Records iterate in id order, which
    /// makes rebuilding from the same snapshot yield identical node and edge
    /// sets.
    pub fn build(pods: &PodSet) -> Self {
        let mut graph = Self::new();
        for pod in pods.iter() {
            let targets = matcher::resolve(pod, pods).unwrap_or_default();
            debug!(
                pod = %pod.id,
                targets = ?targets.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
                "resolved dependencies"
            );
            if targets.is_empty() {
                graph.connect(ROOT_ID, &pod.id);
            } else {
                for target in targets {
                    graph.connect(&pod.id, &target.id);
                }
            }
        }
        graph
    }

    fn intern(&mut self, id: &str) -> NodeIndex {
        if let Some(&ix) = self.index.get(id) {
            return ix;
        }
        let ix = self.graph.add_node(id.to_string());
        self.index.insert(id.to_string(), ix);
        ix
    }

    fn connect(&mut self, from: &str, to: &str) {
        let from = self.intern(from);
        let to = self.intern(to);
        self.graph.update_edge(from, to, ());
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of pod nodes, root excluded.
    pub fn len(&self) -> usize {
        self.index.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pod identifiers in sorted order, root excluded.
    pub fn pod_ids(&self) -> Vec<&str> {
        self.index
            .keys()
            .map(String::as_str)
            .filter(|id| *id != ROOT_ID)
            .collect()
    }

    /// Pod-to-pod edges in sorted order, root edges excluded.
    pub fn pod_edges(&self) -> Vec<(&str, &str)> {
        let mut edges: Vec<(&str, &str)> = self
            .graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .filter(|(from, to)| *from != self.root && *to != self.root)
            .map(|(from, to)| (self.graph[from].as_str(), self.graph[to].as_str()))
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Pods anchored directly under the synthetic root, in sorted order.
    pub fn roots(&self) -> Vec<&str> {
        let mut roots: Vec<&str> = self
            .graph
            .neighbors_directed(self.root, Direction::Outgoing)
            .map(|ix| self.graph[ix].as_str())
            .collect();
        roots.sort_unstable();
        roots
    }

    /// All neighbors of a node, predecessors and successors alike, in sorted
    /// order. Rendering walks the graph undirected because a pod may be
    /// reached either as a dependency target or as a dependent.
    pub fn neighbors_of(&self, id: &str) -> Vec<&str> {
        let Some(&ix) = self.index.get(id) else {
            return Vec::new();
        };
        let mut neighbors: Vec<&str> = self
            .graph
            .neighbors_undirected(ix)
            .map(|n| self.graph[n].as_str())
            .collect();
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }
}
