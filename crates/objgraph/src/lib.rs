//! # objgraph
//!
//! A live, in-memory map of relationships between inventory objects (for
//! example the resources of a cluster), answering label-filtered
//! reachability queries.
//!
//! ## Core Principles
//!
//! - **Rebuilt, not persisted**: The graph mirrors live state and starts empty
//! - **Full reports, minimal churn**: Feeders send complete sets, the graph diffs
//! - **Symmetric edges**: A relationship is traversable from both ends
//! - **One lock, no torn reads**: Updates are atomic across all their labels
//!
//! ## Architecture
//!
//! ```text
//! Update feeders (watch / reconcile loops)     Query front ends
//!     ↓ update / remove                            ↓ links / query
//! ObjectGraph (edges + last reported sets, RwLock)
//!     ↓
//! Reachability (BFS per label, two-phase seed expansion)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use objgraph::{EdgeLabel, GroupKind, ObjectGraph, ObjectId};
//!
//! # fn main() -> objgraph::Result<()> {
//! let graph = ObjectGraph::new();
//! let db = ObjectId::new("kubedb.com", "Postgres", "demo", "pg");
//! let pod = ObjectId::new("", "Pod", "demo", "pg-0");
//! let svc = ObjectId::new("", "Service", "demo", "pg-pods");
//!
//! // The database owns its pod, and only the pod is exposed by the service.
//! graph.update_label(&db, EdgeLabel::OFFSHOOT, [pod.clone()]);
//! graph.update_label(&pod, EdgeLabel::EXPOSED_BY, [svc.clone()]);
//!
//! let links = graph.links(&db, &EdgeLabel::EXPOSED_BY)?;
//! assert_eq!(links[&GroupKind::new("", "Service")], vec![svc]);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod query;

// Re-export main types
pub use config::{GraphConfig, NoopCheck};
pub use error::{DecodeError, GraphError, Result};
pub use graph::{
    Connections, EdgeLabel, GroupKind, Links, ObjectGraph, ObjectId, ObjectKey, Snapshot,
    UpdateSummary,
};
pub use query::LinkQuery;
