//! Output rendering for validated dependency graphs
//!
//! Two presentation paths: an indented colored tree for terminals (or any
//! caller that can translate the style tokens), and a DOT export plus
//! click-region mapping for image output via an external layout engine.

mod dot;
mod imagemap;
mod tree;

pub use dot::to_dot;
pub use imagemap::{
    ClickRegion, LayoutBounds, LayoutError, LayoutReport, REGION_HEIGHT, REGION_WIDTH,
};
pub use tree::{Palette, TreeOutput, tree};
