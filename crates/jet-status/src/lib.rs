//! Availability evaluation over the appjet cluster-status document.
//!
//! The inspect endpoint returns a fixed 4-level shape: a `daemon-responses`
//! sequence whose elements map cluster → group → host → server record,
//! where each record carries a `docker` mapping with `app` and `database`
//! availability flags. [`summarize`] walks that shape and returns one flat,
//! ordered report for the whole document; rendering or alerting on the
//! entries is entirely the caller's concern.

use std::fmt;

use jet_tree::TreeModel;
use thiserror::Error;
use tracing::warn;

/// Top-level key holding the per-daemon responses.
const DAEMON_RESPONSES: &str = "daemon-responses";

/// Errors from status-document evaluation.
#[derive(Debug, Error)]
pub enum StatusError {
    /// The document lacks the expected `daemon-responses` spine.
    #[error("malformed status document: {0}")]
    MalformedDocument(String),
}

/// One availability statement for a single host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    /// Cluster the host belongs to.
    pub cluster: String,
    /// Group within the cluster.
    pub group: String,
    /// Host name.
    pub host: String,
    /// Whether the `app` container reports up.
    pub app_online: bool,
    /// Whether the `database` container reports up.
    pub database_online: bool,
}

impl StatusEntry {
    /// The `[cluster, group, host]` location of this entry.
    pub fn path(&self) -> [&str; 3] {
        [&self.cluster, &self.group, &self.host]
    }
}

impl fmt::Display for StatusEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}: app {}, database {}",
            self.cluster,
            self.group,
            self.host,
            online_word(self.app_online),
            online_word(self.database_online),
        )
    }
}

fn online_word(flag: bool) -> &'static str {
    if flag { "online" } else { "offline" }
}

/// Derive the flat availability report from a status document.
///
/// Descends exactly three mapping levels (cluster, group, host) under each
/// `daemon-responses` element and reads `docker.app` / `docker.database`
/// from the server record. An absent or non-boolean flag reads as offline;
/// a non-mapping node inside the descent is skipped with a warning. The
/// entry order follows document order and is identical across repeated
/// runs on the same document.
///
/// # Errors
///
/// [`StatusError::MalformedDocument`] when the top-level `daemon-responses`
/// key is missing or is not a sequence.
pub fn summarize(document: &TreeModel) -> Result<Vec<StatusEntry>, StatusError> {
    let mut entries = Vec::new();
    for (cluster, groups) in daemon_responses(document)? {
        let Some(group_entries) = groups.entries() else {
            warn!(%cluster, "skipping non-mapping cluster entry");
            continue;
        };
        for (group, hosts) in group_entries {
            let Some(host_entries) = hosts.entries() else {
                warn!(%cluster, %group, "skipping non-mapping group entry");
                continue;
            };
            for (host, record) in host_entries {
                entries.push(StatusEntry {
                    cluster: cluster.clone(),
                    group: group.clone(),
                    host: host.clone(),
                    app_online: container_flag(record, "app"),
                    database_online: container_flag(record, "database"),
                });
            }
        }
    }
    Ok(entries)
}

/// Cluster names across all daemon responses, in document order.
///
/// # Errors
///
/// Same spine requirement as [`summarize`].
pub fn cluster_names(document: &TreeModel) -> Result<Vec<String>, StatusError> {
    Ok(daemon_responses(document)?
        .map(|(cluster, _)| cluster.clone())
        .collect())
}

/// Iterate the `(cluster, groups)` pairs of every daemon response.
fn daemon_responses(
    document: &TreeModel,
) -> Result<impl Iterator<Item = &(String, TreeModel)>, StatusError> {
    let responses = document.get(DAEMON_RESPONSES).ok_or_else(|| {
        StatusError::MalformedDocument(format!("missing top-level '{DAEMON_RESPONSES}' key"))
    })?;
    let TreeModel::Sequence(clusters) = responses else {
        return Err(StatusError::MalformedDocument(format!(
            "'{DAEMON_RESPONSES}' is not a sequence"
        )));
    };
    Ok(clusters.iter().enumerate().flat_map(|(index, response)| {
        let entries = response.entries();
        if entries.is_none() {
            warn!(index, "skipping non-mapping daemon response");
        }
        entries.unwrap_or_default().iter()
    }))
}

fn container_flag(record: &TreeModel, container: &str) -> bool {
    record
        .get("docker")
        .and_then(|docker| docker.get(container))
        .and_then(TreeModel::as_bool)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(raw: serde_json::Value) -> TreeModel {
        TreeModel::classify(raw)
    }

    #[test]
    fn single_host_report() {
        let doc = document(json!({
            "daemon-responses": [
                {"c1": {"g1": {"h1": {"docker": {"app": true, "database": false}}}}}
            ]
        }));
        let entries = summarize(&doc).expect("summarize");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path(), ["c1", "g1", "h1"]);
        assert!(entries[0].app_online);
        assert!(!entries[0].database_online);
    }

    #[test]
    fn missing_database_flag_reads_offline() {
        let doc = document(json!({
            "daemon-responses": [
                {"c1": {"g1": {"h1": {"docker": {"app": true}}}}}
            ]
        }));
        let entries = summarize(&doc).expect("summarize");
        assert_eq!(entries.len(), 1);
        assert!(entries[0].app_online);
        assert!(!entries[0].database_online);
    }

    #[test]
    fn missing_docker_record_reads_all_offline() {
        let doc = document(json!({
            "daemon-responses": [
                {"c1": {"g1": {"h1": {"uptime": 12}}}}
            ]
        }));
        let entries = summarize(&doc).expect("summarize");
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].app_online);
        assert!(!entries[0].database_online);
    }

    #[test]
    fn non_boolean_flag_reads_offline() {
        let doc = document(json!({
            "daemon-responses": [
                {"c1": {"g1": {"h1": {"docker": {"app": "yes", "database": 1}}}}}
            ]
        }));
        let entries = summarize(&doc).expect("summarize");
        assert!(!entries[0].app_online);
        assert!(!entries[0].database_online);
    }

    #[test]
    fn entries_follow_document_order() {
        let doc = document(json!({
            "daemon-responses": [
                {
                    "beta-cluster": {
                        "workers": {
                            "w2": {"docker": {"app": true, "database": true}},
                            "w1": {"docker": {"app": false, "database": true}}
                        },
                        "api": {
                            "a1": {"docker": {"app": true, "database": false}}
                        }
                    }
                },
                {
                    "alpha-cluster": {
                        "db": {"d1": {"docker": {"app": false, "database": false}}}
                    }
                }
            ]
        }));
        let entries = summarize(&doc).expect("summarize");
        let hosts: Vec<&str> = entries.iter().map(|e| e.host.as_str()).collect();
        assert_eq!(hosts, vec!["w2", "w1", "a1", "d1"]);
        assert_eq!(entries[0].cluster, "beta-cluster");
        assert_eq!(entries[3].cluster, "alpha-cluster");
    }

    #[test]
    fn summarize_is_deterministic() {
        let doc = document(json!({
            "daemon-responses": [
                {"c1": {"g1": {"h1": {"docker": {"app": true, "database": false}},
                                "h2": {"docker": {"app": false, "database": true}}}}}
            ]
        }));
        assert_eq!(
            summarize(&doc).expect("first run"),
            summarize(&doc).expect("second run")
        );
    }

    #[test]
    fn missing_spine_is_malformed() {
        let doc = document(json!({"responses": []}));
        assert!(matches!(
            summarize(&doc),
            Err(StatusError::MalformedDocument(_))
        ));
    }

    #[test]
    fn non_sequence_spine_is_malformed() {
        let doc = document(json!({"daemon-responses": {"c1": {}}}));
        assert!(matches!(
            summarize(&doc),
            Err(StatusError::MalformedDocument(_))
        ));
    }

    #[test]
    fn odd_nodes_inside_the_descent_are_skipped() {
        let doc = document(json!({
            "daemon-responses": [
                "not-a-cluster-mapping",
                {"c1": {
                    "g-bad": 42,
                    "g1": {"h1": {"docker": {"app": true, "database": true}}}
                }}
            ]
        }));
        let entries = summarize(&doc).expect("summarize");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path(), ["c1", "g1", "h1"]);
    }

    #[test]
    fn empty_responses_yield_empty_report() {
        let doc = document(json!({"daemon-responses": []}));
        assert!(summarize(&doc).expect("summarize").is_empty());
    }

    #[test]
    fn cluster_name_extraction() {
        let doc = document(json!({
            "daemon-responses": [
                {"c1": {}, "c2": {}},
                {"c3": {}}
            ]
        }));
        assert_eq!(
            cluster_names(&doc).expect("cluster names"),
            vec!["c1", "c2", "c3"]
        );
    }

    #[test]
    fn entry_renders_as_a_summary_line() {
        let entry = StatusEntry {
            cluster: "c1".to_string(),
            group: "g1".to_string(),
            host: "h1".to_string(),
            app_online: true,
            database_online: false,
        };
        assert_eq!(entry.to_string(), "c1/g1/h1: app online, database offline");
    }
}
