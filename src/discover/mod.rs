//! Pod discovery collaborator boundary
//!
//! Discovery answers one question: which pods exist, and where can they be
//! probed? How the answer is obtained (coordination service, static file) is
//! deliberately outside the core. Cluster names filter with the same glob
//! semantics dependency patterns use.

use anyhow::{Context, Result};
use globset::{Glob, GlobMatcher};

use crate::probe::PodLocation;

/// Lists known pods and their probe endpoints, filtered by cluster name.
pub trait PodDiscovery: Send + Sync {
    fn lookup(&self, cluster_pattern: &str) -> Result<Vec<PodLocation>>;
}

/// The cluster-name portion of a pod identifier: everything before the
/// sequence marker, trailing separator trimmed.
pub fn cluster_of(id: &str) -> &str {
    match id.rfind('#') {
        Some(hash) => id[..hash].trim_end(),
        None => id.trim_end(),
    }
}

/// Compile a cluster-name glob filter.
pub fn cluster_matcher(pattern: &str) -> Result<GlobMatcher> {
    Ok(Glob::new(pattern)
        .with_context(|| format!("Invalid cluster pattern `{pattern}`"))?
        .compile_matcher())
}

/// Discovery over a fixed, in-memory pod list
#[derive(Debug, Clone, Default)]
pub struct StaticDiscovery {
    pods: Vec<PodLocation>,
}

impl StaticDiscovery {
    pub fn new(pods: Vec<PodLocation>) -> Self {
        Self { pods }
    }
}

impl PodDiscovery for StaticDiscovery {
    fn lookup(&self, cluster_pattern: &str) -> Result<Vec<PodLocation>> {
        let matcher = cluster_matcher(cluster_pattern)?;
        Ok(self
            .pods
            .iter()
            .filter(|pod| matcher.is_match(cluster_of(&pod.id)))
            .cloned()
            .collect())
    }
}
