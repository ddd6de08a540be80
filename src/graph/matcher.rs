//! Dependency pattern resolution
//!
//! Resolves one pod's declared dependency patterns against every known
//! record. Relative patterns are confined to the declaring pod's namespace;
//! absolute (`/`-prefixed) patterns address any namespace.

use globset::{Glob, GlobMatcher};
use tracing::{debug, warn};

use crate::graph::record::{DependencyDeclaration, PodRecord, PodSet};

/// Resolve a pod's declarations to the concrete records they match.
///
/// Returns `None` when the pod never declared a dependency field. A
/// declaration that matches nothing contributes nothing, silently; the
/// returned list may therefore be empty. Matches keep declaration order and
/// are deduplicated by target id.
pub fn resolve<'a>(pod: &PodRecord, pods: &'a PodSet) -> Option<Vec<&'a PodRecord>> {
    let declarations = pod.depends_on.as_ref()?;

    let mut matches: Vec<&PodRecord> = Vec::new();
    for declaration in declarations {
        let target = qualify(declaration, pod);
        let Some(matcher) = pattern_matcher(&target) else {
            continue;
        };

        for candidate in pods.iter() {
            let path = candidate.qualified_path();
            if !matcher.matches(&path) {
                continue;
            }
            if let Some(port) = &declaration.required_port {
                if !candidate.exposed_ports.contains(port) {
                    debug!(
                        pattern = %target,
                        candidate = %candidate.id,
                        port = %port,
                        "pattern matches but required port is not exposed"
                    );
                    continue;
                }
            }
            if !matches.iter().any(|m| m.id == candidate.id) {
                matches.push(candidate);
            }
        }
    }
    Some(matches)
}

/// Compute the fully-qualified target pattern for one declaration.
fn qualify(declaration: &DependencyDeclaration, pod: &PodRecord) -> String {
    if declaration.absolute || pod.namespace.is_empty() {
        declaration.pattern.clone()
    } else {
        format!("{}.{}", pod.namespace, declaration.pattern)
    }
}

enum PatternMatcher {
    Exact(String),
    Wildcard(GlobMatcher),
}

impl PatternMatcher {
    fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(target) => target == path,
            Self::Wildcard(glob) => glob.is_match(path),
        }
    }
}

/// Wildcarded patterns glob-match against candidate paths; anything else
/// requires exact equality.
fn pattern_matcher(target: &str) -> Option<PatternMatcher> {
    if !target.contains('*') {
        return Some(PatternMatcher::Exact(target.to_string()));
    }
    match Glob::new(target) {
        Ok(glob) => Some(PatternMatcher::Wildcard(glob.compile_matcher())),
        Err(err) => {
            warn!(pattern = %target, %err, "ignoring unparseable dependency pattern");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pod(id: &str, body: serde_json::Value) -> PodRecord {
        PodRecord::parse(id, 0, &body).unwrap()
    }

    fn ids(matches: Option<Vec<&PodRecord>>) -> Vec<String> {
        matches
            .unwrap_or_default()
            .iter()
            .map(|r| r.id.clone())
            .collect()
    }

    #[test]
    fn relative_wildcard_stays_in_namespace() {
        let proxy = pod(
            "dev.proxy #1",
            json!({ "dependsOn": ["*-frontend"], "ports": {} }),
        );
        let same_ns = pod("dev.cr-frontend #2", json!({}));
        let other_ns = pod("prod.cr-frontend #3", json!({}));
        let unrelated = pod("dev.cr-app #4", json!({}));
        let pods = PodSet::from_records([
            proxy.clone(),
            same_ns,
            other_ns,
            unrelated,
        ]);

        assert_eq!(ids(resolve(&proxy, &pods)), vec!["dev.cr-frontend #2"]);
    }

    #[test]
    fn absolute_pattern_crosses_namespaces() {
        let app = pod("dev.app #1", json!({ "dependsOn": ["/other.db"] }));
        let db = pod("other.db #2", json!({}));
        let decoy = pod("dev.db #3", json!({}));
        let pods = PodSet::from_records([app.clone(), db, decoy]);

        assert_eq!(ids(resolve(&app, &pods)), vec!["other.db #2"]);
    }

    #[test]
    fn required_port_must_be_exposed() {
        let frontend = pod("dev.cr-frontend #8", json!({ "dependsOn": ["cr-app:8085"] }));
        let app = pod("dev.cr-app #31", json!({ "ports": { "8085": 31213, "8080": 31212 } }));
        let pods = PodSet::from_records([frontend.clone(), app]);
        assert_eq!(ids(resolve(&frontend, &pods)), vec!["dev.cr-app #31"]);

        let app = pod("dev.cr-app #31", json!({ "ports": { "8086": 31213 } }));
        let pods = PodSet::from_records([frontend.clone(), app]);
        assert_eq!(ids(resolve(&frontend, &pods)), Vec::<String>::new());
    }

    #[test]
    fn wildcard_matches_every_instance() {
        let proxy = pod("dev.proxy #1", json!({ "dependsOn": ["*-frontend:80"] }));
        let f8 = pod("dev.cr-frontend #8", json!({ "ports": { "80": 31497 } }));
        let f9 = pod("dev.cr-frontend #9", json!({ "ports": { "80": 31499 } }));
        let pods = PodSet::from_records([proxy.clone(), f8, f9]);

        assert_eq!(
            ids(resolve(&proxy, &pods)),
            vec!["dev.cr-frontend #8", "dev.cr-frontend #9"]
        );
    }

    #[test]
    fn undeclared_and_unmatched_are_distinct() {
        let silent = pod("dev.silent #1", json!({}));
        let unmatched = pod("dev.lonely #2", json!({ "dependsOn": ["nothing-here"] }));
        let pods = PodSet::from_records([silent.clone(), unmatched.clone()]);

        assert!(resolve(&silent, &pods).is_none());
        assert_eq!(resolve(&unmatched, &pods).map(|m| m.len()), Some(0));
    }

    #[test]
    fn duplicate_matches_collapse() {
        let app = pod(
            "dev.app #1",
            json!({ "dependsOn": ["db", "d*"] }),
        );
        let db = pod("dev.db #2", json!({}));
        let pods = PodSet::from_records([app.clone(), db]);

        assert_eq!(ids(resolve(&app, &pods)), vec!["dev.db #2"]);
    }
}
