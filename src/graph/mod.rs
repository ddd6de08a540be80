//! Dependency-resolution and graph-construction pipeline
//!
//! Raw probe records are parsed into [`PodRecord`]s, matched all-pairs into
//! concrete dependencies, assembled into a directed [`PodGraph`] and gated on
//! cycle detection before any rendering happens. The whole pipeline is
//! synchronous and pure over one immutable snapshot; nothing here is shared
//! between requests.

mod builder;
mod cycles;
pub mod matcher;
mod record;

pub use builder::{PodGraph, ROOT_ID};
pub use cycles::{cycle_report, simple_cycles};
pub use record::{DependencyDeclaration, PodRecord, PodSet, RecordError};

/// Outcome of analyzing one record snapshot.
///
/// Callers need to tell "no data" from "something is wrong": an empty
/// snapshot renders a friendly notice, a cyclic one renders a report and
/// nothing else, and only an acyclic graph proceeds to tree or image output.
#[derive(Debug, Clone)]
pub enum Analysis {
    /// Zero pods resolved; nothing to show
    Empty,
    /// The graph contains elementary circuits and was not rendered
    Cyclic(Vec<Vec<String>>),
    /// A validated, render-ready graph
    Acyclic(PodGraph),
}

/// Build and validate the dependency graph for a snapshot.
pub fn analyze(pods: &PodSet) -> Analysis {
    if pods.is_empty() {
        return Analysis::Empty;
    }
    let graph = PodGraph::build(pods);
    let cycles = simple_cycles(&graph);
    if cycles.is_empty() {
        Analysis::Acyclic(graph)
    } else {
        Analysis::Cyclic(cycles)
    }
}
