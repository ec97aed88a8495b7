//! Unit tests for LinkQuery
//!
//! These tests verify group/kind narrowing on top of two-phase link lookups.

use objgraph::{EdgeLabel, GraphError, GroupKind, ObjectGraph, ObjectId};

struct Fixture {
    graph: ObjectGraph,
    db: ObjectId,
    primary: ObjectId,
    pods: ObjectId,
    ingress: ObjectId,
}

fn create_test_graph() -> Fixture {
    let graph = ObjectGraph::new();
    let db = ObjectId::new("kubedb.com", "Postgres", "demo", "pg");
    let sts = ObjectId::new("apps", "StatefulSet", "demo", "pg");
    let primary = ObjectId::new("", "Service", "demo", "pg");
    let pods = ObjectId::new("", "Service", "demo", "pg-pods");
    let ingress = ObjectId::new("networking.k8s.io", "Ingress", "demo", "pg");

    graph.update_label(&db, EdgeLabel::OFFSHOOT, [sts.clone()]);
    graph.update_label(&db, EdgeLabel::EXPOSED_BY, [primary.clone()]);
    graph.update_label(&sts, EdgeLabel::EXPOSED_BY, [pods.clone(), ingress.clone()]);

    Fixture {
        graph,
        db,
        primary,
        pods,
        ingress,
    }
}

#[test]
fn test_query_kind_filter_core_group() {
    let f = create_test_graph();

    let results = f
        .graph
        .query(&f.db)
        .label(EdgeLabel::EXPOSED_BY)
        .kind("Service")
        .execute()
        .unwrap();

    assert_eq!(results, vec![f.primary.clone(), f.pods.clone()]);
}

#[test]
fn test_query_group_and_kind_filter() {
    let f = create_test_graph();

    let results = f
        .graph
        .query(&f.db)
        .label(EdgeLabel::EXPOSED_BY)
        .group("networking.k8s.io")
        .kind("Ingress")
        .execute()
        .unwrap();

    assert_eq!(results, vec![f.ingress.clone()]);
}

#[test]
fn test_query_without_filter_returns_everything() {
    let f = create_test_graph();

    let grouped = f
        .graph
        .query(&f.db)
        .label(EdgeLabel::EXPOSED_BY)
        .execute_grouped()
        .unwrap();

    assert_eq!(grouped.len(), 3);
    assert!(grouped.contains_key(&GroupKind::new("apps", "StatefulSet")));
    assert_eq!(grouped[&GroupKind::new("", "Service")].len(), 2);
}

#[test]
fn test_query_group_without_kind_is_rejected() {
    let f = create_test_graph();

    let err = f
        .graph
        .query(&f.db)
        .label(EdgeLabel::EXPOSED_BY)
        .group("apps")
        .execute()
        .unwrap_err();

    assert!(matches!(err, GraphError::InvalidQuery { .. }));
    assert_eq!(err.to_string(), "Invalid query: group is set but kind is not set");
}

#[test]
fn test_query_empty_group_without_kind_is_allowed() {
    let f = create_test_graph();

    let count = f
        .graph
        .query(&f.db)
        .label(EdgeLabel::EXPOSED_BY)
        .group("")
        .count()
        .unwrap();

    assert_eq!(count, 4);
}

#[test]
fn test_query_missing_label_is_rejected() {
    let f = create_test_graph();
    let err = f.graph.query(&f.db).kind("Service").execute().unwrap_err();
    assert!(matches!(err, GraphError::InvalidQuery { .. }));
}

#[test]
fn test_query_limit() {
    let f = create_test_graph();

    let results = f
        .graph
        .query(&f.db)
        .label(EdgeLabel::EXPOSED_BY)
        .limit(2)
        .execute()
        .unwrap();
    assert_eq!(results.len(), 2);

    assert!(f
        .graph
        .query(&f.db)
        .label(EdgeLabel::EXPOSED_BY)
        .kind("Ingress")
        .group("networking.k8s.io")
        .exists()
        .unwrap());
    assert!(!f
        .graph
        .query(&f.db)
        .label(EdgeLabel::EXPOSED_BY)
        .kind("Deployment")
        .exists()
        .unwrap());
}
