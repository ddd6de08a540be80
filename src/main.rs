//! Podgraph - draw the dependency graph of your pod clusters
//!
//! Each pod self-reports the pods it depends on through its probe endpoint;
//! this binary assembles those reports into a directed graph and prints it
//! as a colored tree, or exports it for image rendering.

use anyhow::Result;
use clap::Parser;

use podgraph::cli;

fn main() -> Result<()> {
    let args = cli::Args::parse();

    if let Some(log_path) = cli::init_logging(args.debug) {
        eprintln!("Debug logging to {}", log_path.display());
    }

    cli::run(&args)
}
