//! Basic usage example for objgraph
//!
//! This example demonstrates:
//! - Feeding full connection sets for a few objects
//! - Replacing a set and letting the graph diff it
//! - Two-phase link queries and group/kind narrowing

use objgraph::{EdgeLabel, ObjectGraph, ObjectId};
use std::sync::Arc;

fn main() -> objgraph::Result<()> {
    let graph = Arc::new(ObjectGraph::new());

    let db = ObjectId::new("kubedb.com", "Postgres", "demo", "pg");
    let sts = ObjectId::new("apps", "StatefulSet", "demo", "pg");
    let pvc = ObjectId::new("", "PersistentVolumeClaim", "demo", "data-pg-0");
    let svc = ObjectId::new("", "Service", "demo", "pg");
    let old_svc = ObjectId::new("", "Service", "demo", "pg-legacy");

    println!("Feeding relationships...\n");

    graph.update_label(&db, EdgeLabel::OFFSHOOT, [sts.clone()]);
    graph.update_label(&sts, EdgeLabel::STORAGE, [pvc.clone()]);
    let summary = graph.update_label(&sts, EdgeLabel::EXPOSED_BY, [svc.clone(), old_svc.clone()]);
    println!("✓ {sts} exposed by 2 services (+{} edges)", summary.edges_added);

    let summary = graph.update_label(&sts, EdgeLabel::EXPOSED_BY, [svc.clone()]);
    println!("✓ Replaced set: +{} -{} edges", summary.edges_added, summary.edges_removed);

    println!("\nGraph: {} objects, {} edges", graph.node_count(), graph.edge_count());

    for label in [EdgeLabel::STORAGE, EdgeLabel::EXPOSED_BY] {
        println!("\nLinks of {} via {label}:", db.object_key());
        for (gk, ids) in graph.links(&db, &label)? {
            for id in ids {
                println!("  {gk}: {}", id.object_key());
            }
        }
    }

    let services = graph
        .query(&db)
        .label(EdgeLabel::EXPOSED_BY)
        .kind("Service")
        .execute()?;
    println!("\nServices only: {services:?}");

    println!("\nJSON snapshot:\n{}", objgraph::export::export_json(&graph)?);

    Ok(())
}
