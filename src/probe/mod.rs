//! Pod probing collaborator boundary
//!
//! The core never performs network calls; it consumes whatever probe replies
//! a [`PodProber`] implementation produced. Probing failures and timeouts are
//! opaque here: a pod that did not answer simply contributes no reply.

mod fetch;
mod snapshot;

pub use fetch::probe_all;
pub use snapshot::load_snapshot;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where a discovered pod can be probed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodLocation {
    /// Full pod identifier, e.g. `"dev.cr-app #34"`
    pub id: String,
    /// Host or address the pod's control endpoint listens on
    pub host: String,
    /// Control port
    pub port: u16,
    /// Instance sequence number assigned by the discovery side
    pub sequence: i64,
}

/// One pod's answer to a probe command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeReply {
    /// Instance sequence number
    pub sequence: i64,
    /// Raw, untyped reply body; decoded later by the record parser
    pub body: Value,
    /// HTTP status the pod answered with
    pub status: u16,
}

impl ProbeReply {
    /// Only successful replies enter the record set.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes one probe command against one pod.
///
/// Implementations own their transport and timeout behavior; `None` covers
/// every flavor of failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PodProber: Send + Sync {
    async fn probe(&self, pod: &PodLocation, command: &str) -> Option<ProbeReply>;
}
