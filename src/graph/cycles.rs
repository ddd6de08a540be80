//! Elementary circuit enumeration
//!
//! A cyclic dependency graph cannot be drawn: dependency direction, and with
//! it layout and tree depth, is ill-defined inside a cycle. The pipeline
//! therefore gates rendering on this module reporting no circuits.
//!
//! Johnson's blocked-set algorithm, restricted at each start vertex to the
//! vertices ordered after it so every circuit is emitted exactly once,
//! anchored at its smallest vertex.

use crate::graph::builder::PodGraph;

/// Enumerate all elementary circuits among pod nodes, root ignored.
///
/// Returns an empty list for acyclic graphs. Each circuit lists its nodes in
/// traversal order starting from the smallest identifier, without repeating
/// the start node at the end.
pub fn simple_cycles(graph: &PodGraph) -> Vec<Vec<String>> {
    let ids = graph.pod_ids();
    let n = ids.len();

    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (from, to) in graph.pod_edges() {
        // pod_ids is sorted, so binary search recovers the dense index
        let from = ids.binary_search(&from).expect("edge endpoint is a node");
        let to = ids.binary_search(&to).expect("edge endpoint is a node");
        adjacency[from].push(to);
    }
    for targets in &mut adjacency {
        targets.sort_unstable();
        targets.dedup();
    }

    let mut cycles: Vec<Vec<usize>> = Vec::new();
    for start in 0..n {
        let mut search = Search {
            adjacency: &adjacency,
            start,
            blocked: vec![false; n],
            blocked_by: vec![Vec::new(); n],
            stack: Vec::new(),
        };
        search.circuit(start, &mut cycles);
    }

    cycles
        .into_iter()
        .map(|cycle| cycle.into_iter().map(|ix| ids[ix].to_string()).collect())
        .collect()
}

/// Render circuits the way the tree output is read: each node chained to the
/// next, with the starting node repeated at the end for readability.
pub fn cycle_report(cycles: &[Vec<String>]) -> String {
    let mut out = String::from(
        "Cannot draw dependency graph: there is something wrong with your pods config, \
         it seems that you have a circular dependency.\n",
    );
    out.push_str("Details:\n");
    for cycle in cycles {
        let Some(first) = cycle.first() else {
            continue;
        };
        out.push_str("  ");
        for node in cycle {
            out.push_str(node);
            out.push_str(" --> ");
        }
        out.push_str(first);
        out.push('\n');
    }
    out
}

struct Search<'a> {
    adjacency: &'a [Vec<usize>],
    start: usize,
    blocked: Vec<bool>,
    blocked_by: Vec<Vec<usize>>,
    stack: Vec<usize>,
}

impl Search<'_> {
    fn circuit(&mut self, v: usize, cycles: &mut Vec<Vec<usize>>) -> bool {
        let mut closed = false;
        self.stack.push(v);
        self.blocked[v] = true;

        for i in 0..self.adjacency[v].len() {
            let w = self.adjacency[v][i];
            if w < self.start {
                continue;
            }
            if w == self.start {
                cycles.push(self.stack.clone());
                closed = true;
            } else if !self.blocked[w] && self.circuit(w, cycles) {
                closed = true;
            }
        }

        if closed {
            self.unblock(v);
        } else {
            for i in 0..self.adjacency[v].len() {
                let w = self.adjacency[v][i];
                if w >= self.start && !self.blocked_by[w].contains(&v) {
                    self.blocked_by[w].push(v);
                }
            }
        }

        self.stack.pop();
        closed
    }

    fn unblock(&mut self, v: usize) {
        self.blocked[v] = false;
        while let Some(w) = self.blocked_by[v].pop() {
            if self.blocked[w] {
                self.unblock(w);
            }
        }
    }
}
