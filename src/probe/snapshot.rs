//! Snapshot files
//!
//! A snapshot is a JSON object mapping pod identifiers to probe replies:
//!
//! ```json
//! {
//!   "dev.cr-app #31": { "sequence": 31, "body": { "process": "running" }, "status": 200 }
//! }
//! ```
//!
//! Snapshots stand in for live discovery plus probing: useful for demos,
//! tests, and postmortem inspection of a cluster state somebody saved.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::probe::ProbeReply;

/// Load a probe snapshot from a JSON file.
pub fn load_snapshot(path: &Path) -> Result<BTreeMap<String, ProbeReply>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse snapshot file {}", path.display()))
}
