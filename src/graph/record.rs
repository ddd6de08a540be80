//! Typed decoding of pod probe data
//!
//! Probe replies arrive as untyped JSON. This module turns them into
//! [`PodRecord`] values once per graph build; records are immutable for the
//! rest of the build.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::probe::ProbeReply;

/// Errors raised while decoding a single pod record
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// The pod identifier does not have the `<namespace.name> #<sequence>` shape
    #[error("malformed pod identifier `{0}`: expected `<namespace.name> #<sequence>`")]
    MalformedIdentifier(String),
}

/// One dependency a pod reports, e.g. `"cr-app:8085"` or `"/other.db"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyDeclaration {
    /// Glob-style pattern; relative patterns are later qualified with the
    /// declaring pod's namespace
    pub pattern: String,
    /// A match only counts if the candidate exposes this port
    pub required_port: Option<String>,
    /// Leading `/` marks the pattern as an absolute `namespace.name` path
    pub absolute: bool,
}

impl DependencyDeclaration {
    /// Parse a raw `pattern[:port]` declaration string.
    pub fn parse(raw: &str) -> Self {
        let (pattern, required_port) = match raw.split_once(':') {
            Some((pattern, port)) => (pattern, Some(port.to_string())),
            None => (raw, None),
        };
        match pattern.strip_prefix('/') {
            Some(stripped) => Self {
                pattern: stripped.to_string(),
                required_port,
                absolute: true,
            },
            None => Self {
                pattern: pattern.to_string(),
                required_port,
                absolute: false,
            },
        }
    }
}

/// One instance of a deployed service, decoded from its probe reply
#[derive(Debug, Clone)]
pub struct PodRecord {
    /// Full external identifier, e.g. `"dev.cr-app #34"`
    pub id: String,
    /// Dot-separated prefix of the identifier, without the pod name
    pub namespace: String,
    /// Leaf segment of the identifier
    pub name: String,
    /// Instance sequence number, assigned by the discovery side
    pub sequence: i64,
    /// Whether the probe reported a running process
    pub running: bool,
    /// Declared dependencies. `None` means the pod never reported a
    /// dependency field at all, which is weaker than an empty list: such a
    /// pod cannot prove it has no unseen dependency.
    pub depends_on: Option<Vec<DependencyDeclaration>>,
    /// Port identifiers advertised by the probe reply
    pub exposed_ports: BTreeSet<String>,
}

impl PodRecord {
    /// Decode one record from its identifier, sequence number and raw probe body.
    pub fn parse(id: &str, sequence: i64, body: &Value) -> Result<Self, RecordError> {
        let (namespace, name) = split_identifier(id)?;

        let running = body
            .get("process")
            .and_then(Value::as_str)
            .is_some_and(|p| p == "running");

        let depends_on = dependency_field(body).map(|raw| {
            raw.iter()
                .filter_map(|entry| match entry.as_str() {
                    Some(s) => Some(DependencyDeclaration::parse(s)),
                    None => {
                        warn!(pod = id, ?entry, "ignoring non-string dependency entry");
                        None
                    }
                })
                .collect()
        });

        let exposed_ports = body
            .get("ports")
            .and_then(Value::as_object)
            .map(|ports| ports.keys().cloned().collect())
            .unwrap_or_default();

        Ok(Self {
            id: id.to_string(),
            namespace: namespace.to_string(),
            name: name.to_string(),
            sequence,
            running,
            depends_on,
            exposed_ports,
        })
    }

    /// Fully-qualified `namespace.name` path used for dependency matching.
    pub fn qualified_path(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// True when the probe reply carried no dependency field at all.
    pub fn declares_no_dependencies(&self) -> bool {
        self.depends_on.is_none()
    }
}

/// Split `"dev.cr-app #34"` into namespace and pod name.
fn split_identifier(id: &str) -> Result<(&str, &str), RecordError> {
    let malformed = || RecordError::MalformedIdentifier(id.to_string());

    let hash = id.rfind('#').ok_or_else(malformed)?;
    if id[hash + 1..].is_empty() || !id[hash + 1..].chars().all(|c| c.is_ascii_digit()) {
        return Err(malformed());
    }

    let qualified = id[..hash].trim_end();
    if qualified.is_empty() {
        return Err(malformed());
    }

    let (namespace, name) = match qualified.rsplit_once('.') {
        Some((namespace, name)) => (namespace, name),
        None => ("", qualified),
    };
    if name.is_empty() {
        return Err(malformed());
    }
    Ok((namespace, name))
}

/// Locate the declared dependency list, checking `dependencies`, then
/// `dependsOn`, then `metrics.dependsOn`. The first field present wins; there
/// is no merging across locations.
fn dependency_field(body: &Value) -> Option<&Vec<Value>> {
    const EMPTY: &Vec<Value> = &Vec::new();

    let field = body
        .get("dependencies")
        .or_else(|| body.get("dependsOn"))
        .or_else(|| body.get("metrics").and_then(|m| m.get("dependsOn")))?;

    match field.as_array() {
        Some(list) => Some(list),
        None => {
            debug!("dependency field present but not a list, treating as empty");
            Some(EMPTY)
        }
    }
}

/// An immutable snapshot of parsed pod records, keyed by identifier
#[derive(Debug, Clone, Default)]
pub struct PodSet {
    records: BTreeMap<String, PodRecord>,
}

impl PodSet {
    /// Build a record set from probe replies. Replies without a successful
    /// status are dropped; records with malformed identifiers are skipped and
    /// returned as diagnostics so one bad record never aborts the build.
    pub fn from_probes(probes: &BTreeMap<String, ProbeReply>) -> (Self, Vec<RecordError>) {
        let mut records = BTreeMap::new();
        let mut skipped = Vec::new();

        for (id, reply) in probes {
            if !reply.is_success() {
                debug!(pod = %id, status = reply.status, "dropping unsuccessful probe reply");
                continue;
            }
            match PodRecord::parse(id, reply.sequence, &reply.body) {
                Ok(record) => {
                    records.insert(record.id.clone(), record);
                }
                Err(err) => {
                    warn!(pod = %id, %err, "skipping unparseable pod record");
                    skipped.push(err);
                }
            }
        }

        (Self { records }, skipped)
    }

    /// Build a set directly from records, mainly for tests.
    pub fn from_records(records: impl IntoIterator<Item = PodRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|r| (r.id.clone(), r))
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&PodRecord> {
        self.records.get(id)
    }

    /// Records in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &PodRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Identifiers of pods that never reported a dependency field, in order.
    /// These make the derived graph untrustworthy and are surfaced to users.
    pub fn undeclared(&self) -> Vec<&str> {
        self.records
            .values()
            .filter(|r| r.declares_no_dependencies())
            .map(|r| r.id.as_str())
            .collect()
    }
}
