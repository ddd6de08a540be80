//! CLI argument parsing and command dispatch

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::warn;

use crate::discover;
use crate::graph::{self, Analysis, PodSet, cycle_report};
use crate::probe::load_snapshot;
use crate::render::{self, Palette};

/// Draw the dependency graph of your pod clusters
#[derive(Parser, Debug)]
#[command(name = "podgraph")]
#[command(about = "Draw the dependency graph of your pod clusters", long_about = None)]
pub struct Args {
    /// Snapshot file mapping pod identifiers to probe replies
    #[arg(long, short = 's')]
    pub snapshot: PathBuf,

    /// Only include pods whose cluster name matches this glob
    #[arg(long, short = 'c', default_value = "*")]
    pub cluster: String,

    /// Emit a layout-engine-ready DOT graph instead of the tree
    #[arg(long)]
    pub dot: bool,

    /// Enable debug logging
    #[arg(long, short = 'd')]
    pub debug: bool,
}

/// Load the snapshot, run the pipeline, and print whatever it produced.
pub fn run(args: &Args) -> Result<()> {
    let snapshot = load_snapshot(&args.snapshot)?;
    let matcher = discover::cluster_matcher(&args.cluster)?;
    let snapshot: BTreeMap<_, _> = snapshot
        .into_iter()
        .filter(|(id, _)| matcher.is_match(discover::cluster_of(id)))
        .collect();

    let (pods, skipped) = PodSet::from_probes(&snapshot);
    for err in &skipped {
        warn!(%err, "record skipped");
    }

    match graph::analyze(&pods) {
        Analysis::Empty => {
            println!("No pod to show. Have you any pod deployed!?");
        }
        Analysis::Cyclic(cycles) => {
            print!("{}", cycle_report(&cycles));
        }
        Analysis::Acyclic(graph) => {
            if args.dot {
                println!("{}", render::to_dot(&graph, &pods));
            } else {
                let tree = render::tree(&graph, &pods, &Palette::default());
                print!("{}", tree.text);
            }
        }
    }
    Ok(())
}
