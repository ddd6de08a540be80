//! Concurrent probe fan-out
//!
//! Probing pods one by one gets slow past a handful of instances, so probes
//! run as a bounded concurrent batch and join into a single snapshot before
//! the core pipeline starts. Nothing downstream ever observes a partially
//! probed set.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use tokio::time::timeout;
use tracing::debug;

use crate::probe::{PodLocation, PodProber, ProbeReply};

/// Probe every pod with the given command, at most `parallelism` in flight,
/// each bounded by `per_probe_timeout`. Pods that fail or time out are left
/// out of the returned snapshot.
pub async fn probe_all(
    prober: &dyn PodProber,
    pods: &[PodLocation],
    command: &str,
    parallelism: usize,
    per_probe_timeout: Duration,
) -> BTreeMap<String, ProbeReply> {
    let replies: Vec<(String, Option<ProbeReply>)> = stream::iter(pods)
        .map(|pod| async move {
            let started = Instant::now();
            let reply = match timeout(per_probe_timeout, prober.probe(pod, command)).await {
                Ok(reply) => reply,
                Err(_) => {
                    debug!(pod = %pod.id, "probe timed out");
                    None
                }
            };
            if let Some(reply) = &reply {
                debug!(
                    pod = %pod.id,
                    status = reply.status,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "probe reply"
                );
            }
            (pod.id.clone(), reply)
        })
        .buffer_unordered(parallelism.max(1))
        .collect()
        .await;

    replies
        .into_iter()
        .filter_map(|(id, reply)| reply.map(|r| (id, r)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::MockPodProber;
    use serde_json::json;

    fn location(id: &str, sequence: i64) -> PodLocation {
        PodLocation {
            id: id.to_string(),
            host: "10.0.0.1".to_string(),
            port: 8080,
            sequence,
        }
    }

    #[tokio::test]
    async fn failed_probes_drop_out_of_the_snapshot() {
        let mut prober = MockPodProber::new();
        prober.expect_probe().returning(|pod, _| {
            if pod.id.contains("dead") {
                None
            } else {
                Some(ProbeReply {
                    sequence: pod.sequence,
                    body: json!({ "process": "running" }),
                    status: 200,
                })
            }
        });

        let pods = vec![location("dev.up #1", 1), location("dev.dead #2", 2)];
        let snapshot = probe_all(&prober, &pods, "info", 4, Duration::from_secs(1)).await;

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot["dev.up #1"].sequence, 1);
    }

    #[tokio::test]
    async fn batch_joins_every_reply() {
        let mut prober = MockPodProber::new();
        prober.expect_probe().times(3).returning(|pod, _| {
            Some(ProbeReply {
                sequence: pod.sequence,
                body: json!({}),
                status: 200,
            })
        });

        let pods = vec![
            location("dev.a #1", 1),
            location("dev.b #2", 2),
            location("dev.c #3", 3),
        ];
        let snapshot = probe_all(&prober, &pods, "info", 2, Duration::from_secs(1)).await;
        assert_eq!(
            snapshot.keys().collect::<Vec<_>>(),
            vec!["dev.a #1", "dev.b #2", "dev.c #3"]
        );
    }
}
