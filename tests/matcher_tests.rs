//! Dependency matcher tests
//!
//! Pattern qualification, wildcard scoping, and port-qualified matching
//! against full record sets.

use podgraph::graph::matcher::resolve;
use podgraph::{PodRecord, PodSet};
use serde_json::json;

fn pod(id: &str, body: serde_json::Value) -> PodRecord {
    PodRecord::parse(id, 0, &body).unwrap()
}

fn resolved_ids(requester: &PodRecord, pods: &PodSet) -> Vec<String> {
    resolve(requester, pods)
        .unwrap_or_default()
        .iter()
        .map(|r| r.id.clone())
        .collect()
}

#[test]
fn test_relative_wildcard_is_namespace_scoped() {
    let proxy = pod("dev.ls-reverse-proxy #4", json!({ "dependsOn": ["*-frontend"] }));
    let pods = PodSet::from_records([
        proxy.clone(),
        pod("dev.cr-frontend #8", json!({})),
        pod("prod.cr-frontend #1", json!({})),
        pod("dev.cr-app #31", json!({})),
    ]);

    assert_eq!(resolved_ids(&proxy, &pods), vec!["dev.cr-frontend #8"]);
}

#[test]
fn test_absolute_pattern_ignores_own_namespace() {
    let app = pod("dev.cr-app #31", json!({ "dependsOn": ["/other.db"] }));
    let pods = PodSet::from_records([
        app.clone(),
        pod("other.db #1", json!({})),
        pod("dev.db #2", json!({})),
    ]);

    assert_eq!(resolved_ids(&app, &pods), vec!["other.db #1"]);
}

#[test]
fn test_port_gate_flips_with_exposed_ports() {
    let frontend = pod("dev.cr-frontend #8", json!({ "dependsOn": ["cr-app:8085"] }));

    let with_port = PodSet::from_records([
        frontend.clone(),
        pod("dev.cr-app #31", json!({ "ports": { "8085": 31213 } })),
    ]);
    assert_eq!(resolved_ids(&frontend, &with_port), vec!["dev.cr-app #31"]);

    let wrong_port = PodSet::from_records([
        frontend.clone(),
        pod("dev.cr-app #31", json!({ "ports": { "8086": 31213 } })),
    ]);
    assert!(resolved_ids(&frontend, &wrong_port).is_empty());
}

#[test]
fn test_exact_match_needs_full_equality() {
    let app = pod("dev.app #1", json!({ "dependsOn": ["db"] }));
    let pods = PodSet::from_records([
        app.clone(),
        pod("dev.db-replica #2", json!({})),
        pod("dev.db #3", json!({})),
    ]);

    // "dev.db" must not prefix-match "dev.db-replica"
    assert_eq!(resolved_ids(&app, &pods), vec!["dev.db #3"]);
}

#[test]
fn test_no_declaration_resolves_to_none() {
    let silent = pod("dev.silent #1", json!({}));
    let pods = PodSet::from_records([silent.clone(), pod("dev.other #2", json!({}))]);
    assert!(resolve(&silent, &pods).is_none());
}

#[test]
fn test_zero_match_declaration_is_silent() {
    let app = pod("dev.app #1", json!({ "dependsOn": ["ghost", "db"] }));
    let pods = PodSet::from_records([app.clone(), pod("dev.db #2", json!({}))]);

    // the unmatched "ghost" declaration contributes nothing, the rest still resolves
    assert_eq!(resolved_ids(&app, &pods), vec!["dev.db #2"]);
}

#[test]
fn test_wildcard_collects_all_instances_with_port() {
    let proxy = pod("dev.ls-reverse-proxy #4", json!({ "dependsOn": ["*-frontend:80"] }));
    let pods = PodSet::from_records([
        proxy.clone(),
        pod("dev.cr-frontend #8", json!({ "ports": { "80": 31497, "8080": 31496 } })),
        pod("dev.cr-frontend #9", json!({ "ports": { "80": 31499, "8080": 31500 } })),
        pod("dev.cr-frontend #10", json!({ "ports": { "8080": 31501 } })),
    ]);

    assert_eq!(
        resolved_ids(&proxy, &pods),
        vec!["dev.cr-frontend #8", "dev.cr-frontend #9"]
    );
}
