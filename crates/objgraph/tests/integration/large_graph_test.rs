//! Integration test for large graph handling.

use objgraph::{EdgeLabel, GroupKind, ObjectGraph, ObjectId};

fn pod(i: usize) -> ObjectId {
    ObjectId::new("", "Pod", "bulk", format!("pod-{i}"))
}

#[test]
#[ignore] // This test is slow, run with --ignored flag
fn test_large_graph_100k_objects() {
    let graph = ObjectGraph::new();
    let num_objects = 100_000;

    // Ring of owners: every pod reports its successor.
    for i in 0..num_objects {
        graph.update_label(&pod(i), EdgeLabel::new("owns"), [pod((i + 1) % num_objects)]);
    }

    assert_eq!(graph.node_count(), num_objects);
    assert_eq!(graph.edge_count(), num_objects);

    let reachable = graph.connected_set([pod(0)], &EdgeLabel::new("owns"));
    assert_eq!(reachable.len(), num_objects);
}

#[test]
fn test_medium_graph_10k_objects() {
    let graph = ObjectGraph::new();
    let num_units = 1_000;
    let parts_per_unit = 10;

    for u in 0..num_units {
        let unit = ObjectId::new("apps", "Deployment", "bulk", format!("app-{u}"));
        let parts = (0..parts_per_unit).map(|p| pod(u * parts_per_unit + p));
        graph.update_label(&unit, EdgeLabel::OFFSHOOT, parts);
    }

    assert_eq!(graph.node_count(), num_units * (parts_per_unit + 1));
    assert_eq!(graph.edge_count(), num_units * parts_per_unit);

    let sample = ObjectId::new("apps", "Deployment", "bulk", "app-500");
    let links = graph.links(&sample, &EdgeLabel::OFFSHOOT).unwrap();
    assert_eq!(links[&GroupKind::new("", "Pod")].len(), parts_per_unit);
}
