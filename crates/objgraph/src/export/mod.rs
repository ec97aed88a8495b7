//! Export module for inspecting the relationship graph in external tools.
//!
//! Both formats dump one consistent snapshot of the edge state:
//! - **DOT**: Graphviz visualization
//! - **JSON**: web-based tools and debugging endpoints

pub mod dot;
pub mod json;

pub use dot::{export_dot, export_dot_styled, DotOptions};
pub use json::export_json;

use crate::graph::{EdgeLabel, ObjectId, Snapshot};

/// Each symmetric edge exactly once, in snapshot order.
pub(crate) fn undirected_edges(
    snapshot: &Snapshot,
) -> impl Iterator<Item = (&ObjectId, &ObjectId, &EdgeLabel)> {
    snapshot.iter().flat_map(|(src, labels)| {
        labels.iter().flat_map(move |(label, dsts)| {
            dsts.iter()
                .filter(move |dst| src <= *dst)
                .map(move |dst| (src, dst, label))
        })
    })
}
