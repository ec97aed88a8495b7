//! Core graph types and operations.
//!
//! This module defines the fundamental building blocks:
//! - [`ObjectId`]: Identifier of an inventory object and its string codec
//! - [`EdgeLabel`]: Relationship kind between two objects
//! - [`ObjectGraph`]: The shared relationship store and its queries

mod algorithms;
mod object_graph;
mod object_id;
mod types;

pub use object_graph::{Links, ObjectGraph, Snapshot};
pub use object_id::ObjectId;
pub use types::{Connections, EdgeLabel, GroupKind, ObjectKey, UpdateSummary};
