//! Query builder for filtered link lookups.
//!
//! Wraps [`ObjectGraph::links`] with the group/kind narrowing that query
//! front ends expose to users.

use crate::error::{GraphError, Result};
use crate::graph::{EdgeLabel, GroupKind, Links, ObjectGraph, ObjectId};
use log::trace;

/// Fluent link query rooted at one object.
///
/// # Examples
///
/// ```
/// use objgraph::{EdgeLabel, ObjectGraph, ObjectId};
///
/// # fn example() -> objgraph::Result<()> {
/// let graph = ObjectGraph::new();
/// let db = ObjectId::new("kubedb.com", "Postgres", "demo", "pg");
/// let svc = ObjectId::new("", "Service", "demo", "pg");
/// graph.update_label(&db, EdgeLabel::EXPOSED_BY, [svc.clone()]);
///
/// let services = graph
///     .query(&db)
///     .label(EdgeLabel::EXPOSED_BY)
///     .group("")
///     .kind("Service")
///     .execute()?;
/// assert_eq!(services, vec![svc]);
/// # Ok(())
/// # }
/// ```
pub struct LinkQuery<'a> {
    graph: &'a ObjectGraph,
    oid: ObjectId,
    label: Option<EdgeLabel>,
    group: Option<String>,
    kind: Option<String>,
    limit_value: Option<usize>,
}

impl<'a> LinkQuery<'a> {
    /// Create a query for links of `oid` in `graph`.
    pub fn new(graph: &'a ObjectGraph, oid: ObjectId) -> Self {
        Self {
            graph,
            oid,
            label: None,
            group: None,
            kind: None,
            limit_value: None,
        }
    }

    /// Relationship label to follow. Required.
    pub fn label(mut self, label: impl Into<EdgeLabel>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Keep only objects in this API group. Requires [`kind`](Self::kind);
    /// the empty string selects the core group.
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Keep only objects of this kind.
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Return at most `n` objects.
    pub fn limit(mut self, n: usize) -> Self {
        self.limit_value = Some(n);
        self
    }

    /// Run the query and return matching objects grouped by group/kind.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidQuery`] if no label was given, or if a
    /// non-empty group was given without a kind. Decode failures from
    /// [`ObjectGraph::links`] are propagated.
    pub fn execute_grouped(self) -> Result<Links> {
        let label = self
            .label
            .ok_or_else(|| GraphError::invalid_query("label is not set"))?;

        let filter = match (self.group, self.kind) {
            (Some(group), None) if !group.is_empty() => {
                return Err(GraphError::invalid_query(
                    "group is set but kind is not set",
                ));
            }
            (group, Some(kind)) => Some(GroupKind::new(group.unwrap_or_default(), kind)),
            _ => None,
        };

        let mut links = self.graph.links(&self.oid, &label)?;
        if let Some(gk) = filter {
            trace!("Narrowing links of {} to {gk}", self.oid);
            links.retain(|key, _| *key == gk);
        }

        if let Some(limit) = self.limit_value {
            let mut remaining = limit;
            for members in links.values_mut() {
                members.truncate(remaining);
                remaining -= members.len();
            }
            links.retain(|_, members| !members.is_empty());
        }

        Ok(links)
    }

    /// Run the query and return matching objects as one list, sorted by
    /// canonical encoding.
    ///
    /// # Errors
    ///
    /// Same as [`execute_grouped`](Self::execute_grouped).
    pub fn execute(self) -> Result<Vec<ObjectId>> {
        let mut results: Vec<ObjectId> = self.execute_grouped()?.into_values().flatten().collect();
        results.sort_by_cached_key(ObjectId::encode);
        Ok(results)
    }

    /// Count matching objects.
    pub fn count(self) -> Result<usize> {
        Ok(self.execute_grouped()?.values().map(Vec::len).sum())
    }

    /// Whether any object matches.
    pub fn exists(self) -> Result<bool> {
        Ok(self.limit(1).count()? > 0)
    }
}
