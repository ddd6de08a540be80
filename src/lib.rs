//! Podgraph library
//!
//! Turns self-reported pod probe data into a directed dependency graph,
//! validates it, and renders it as an indented colored tree or as a
//! layout-engine-ready graph with clickable image regions.

pub mod cli;
pub mod discover;
pub mod graph;
pub mod probe;
pub mod render;

// Re-export the pipeline surface for convenience
pub use graph::{
    Analysis, DependencyDeclaration, PodGraph, PodRecord, PodSet, ROOT_ID, RecordError, analyze,
    cycle_report, simple_cycles,
};
pub use probe::{PodLocation, PodProber, ProbeReply, load_snapshot, probe_all};
pub use render::{ClickRegion, LayoutReport, Palette, TreeOutput, to_dot, tree};
