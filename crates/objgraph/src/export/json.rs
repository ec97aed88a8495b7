//! JSON format export.
//!
//! Generates JSON with "nodes" and "links" arrays. Links are undirected and
//! listed once per label.

use super::undirected_edges;
use crate::error::{GraphError, Result};
use crate::graph::{ObjectGraph, ObjectId};
use serde_json::{json, Value};

/// Export the current graph state to pretty-printed JSON.
pub fn export_json(graph: &ObjectGraph) -> Result<String> {
    let snapshot = graph.snapshot();

    let nodes_array: Vec<Value> = snapshot.keys().map(node_to_json).collect();
    let links_array: Vec<Value> = undirected_edges(&snapshot)
        .map(|(src, dst, label)| {
            json!({
                "source": src,
                "target": dst,
                "label": label,
            })
        })
        .collect();

    let result = json!({
        "nodes": nodes_array,
        "links": links_array,
    });

    serde_json::to_string_pretty(&result)
        .map_err(|e| GraphError::serialization("Failed to serialize graph", Some(e)))
}

fn node_to_json(id: &ObjectId) -> Value {
    json!({
        "id": id,
        "group": id.group(),
        "kind": id.kind(),
        "namespace": id.namespace(),
        "name": id.name(),
    })
}
