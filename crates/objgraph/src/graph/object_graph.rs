//! The shared, lock-protected object relationship graph.

use super::algorithms;
use super::object_id::ObjectId;
use super::types::{EdgeLabel, UpdateSummary};
use crate::config::{GraphConfig, NoopCheck};
use crate::error::Result;
use log::{debug, info, trace};
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

pub(crate) type LabelMap = HashMap<EdgeLabel, HashSet<ObjectId>>;

/// Ordered, owned copy of the edge state. Empty sets are omitted, so two
/// graphs with the same edges compare equal regardless of pruning.
pub type Snapshot = BTreeMap<ObjectId, BTreeMap<EdgeLabel, BTreeSet<ObjectId>>>;

/// Objects reachable from a source, bucketed by group/kind.
pub type Links = BTreeMap<super::types::GroupKind, Vec<ObjectId>>;

/// Everything guarded by the graph lock.
#[derive(Debug, Default)]
pub(crate) struct GraphState {
    /// Symmetric adjacency: `d ∈ edges[s][l]` iff `s ∈ edges[d][l]`
    pub(crate) edges: HashMap<ObjectId, LabelMap>,
    /// Connection set last reported per (source, label); only read by diffing
    pub(crate) last_seen: HashMap<ObjectId, LabelMap>,
}

impl GraphState {
    pub(crate) fn neighbors(&self, id: &ObjectId, label: &EdgeLabel) -> Option<&HashSet<ObjectId>> {
        self.edges.get(id).and_then(|labels| labels.get(label))
    }

    fn apply(
        &mut self,
        src: &ObjectId,
        label: EdgeLabel,
        conns: HashSet<ObjectId>,
        config: &GraphConfig,
        summary: &mut UpdateSummary,
    ) {
        let old = self.last_seen.get(src).and_then(|labels| labels.get(&label));
        let unchanged = match config.noop_check {
            NoopCheck::Equality => match old {
                Some(old) => *old == conns,
                None => conns.is_empty(),
            },
            NoopCheck::Subset => old.is_some_and(|old| old.is_subset(&conns)),
        };
        if unchanged {
            trace!("Skipping unchanged label {label} for {src}");
            summary.labels_skipped += 1;
            return;
        }

        let removed: Vec<ObjectId> = old
            .map(|old| old.difference(&conns).cloned().collect())
            .unwrap_or_default();
        trace!(
            "Diffing label {label} for {src}: {} removed, {} reported",
            removed.len(),
            conns.len()
        );
        summary.labels_changed += 1;

        for dst in &removed {
            if self.unlink(src, dst, &label, config.prune_empty) {
                summary.edges_removed += 1;
            }
        }
        for dst in &conns {
            if self.link(src, dst, &label) {
                summary.edges_added += 1;
            }
        }

        if conns.is_empty() {
            self.forget(src, &label);
        } else {
            self.last_seen
                .entry(src.clone())
                .or_default()
                .insert(label, conns);
        }
    }

    fn link(&mut self, src: &ObjectId, dst: &ObjectId, label: &EdgeLabel) -> bool {
        let inserted = self
            .edges
            .entry(src.clone())
            .or_default()
            .entry(label.clone())
            .or_default()
            .insert(dst.clone());
        self.edges
            .entry(dst.clone())
            .or_default()
            .entry(label.clone())
            .or_default()
            .insert(src.clone());
        inserted
    }

    fn unlink(&mut self, src: &ObjectId, dst: &ObjectId, label: &EdgeLabel, prune: bool) -> bool {
        let removed = self.detach(src, dst, label, prune);
        if src != dst {
            self.detach(dst, src, label, prune);
        }
        removed
    }

    /// Remove `to` from `edges[from][label]`.
    fn detach(&mut self, from: &ObjectId, to: &ObjectId, label: &EdgeLabel, prune: bool) -> bool {
        let Some(labels) = self.edges.get_mut(from) else {
            return false;
        };
        let Some(set) = labels.get_mut(label) else {
            return false;
        };
        let removed = set.remove(to);
        if prune && set.is_empty() {
            labels.remove(label);
            if labels.is_empty() {
                self.edges.remove(from);
            }
        }
        removed
    }

    fn forget(&mut self, src: &ObjectId, label: &EdgeLabel) {
        if let Some(labels) = self.last_seen.get_mut(src) {
            labels.remove(label);
            if labels.is_empty() {
                self.last_seen.remove(src);
            }
        }
    }
}

/// Live relationship graph between inventory objects.
///
/// Every relationship is stored symmetrically per label, so traversal treats
/// edges as undirected even though sources report them directionally. A
/// single read-write lock guards the whole state: each `update` or `remove`
/// is atomic across all labels it touches, and queries never observe a
/// half-applied diff.
///
/// Share one instance between feeders and query handlers with an `Arc`.
///
/// ```
/// use objgraph::{EdgeLabel, ObjectGraph, ObjectId};
///
/// let graph = ObjectGraph::new();
/// let deploy = ObjectId::new("apps", "Deployment", "default", "web");
/// let pod = ObjectId::new("", "Pod", "default", "web-1");
///
/// graph.update_label(&deploy, EdgeLabel::OFFSHOOT, [pod.clone()]);
/// assert!(graph.neighbors(&pod, &EdgeLabel::OFFSHOOT).contains(&deploy));
/// ```
#[derive(Debug, Default)]
pub struct ObjectGraph {
    config: GraphConfig,
    state: RwLock<GraphState>,
}

impl ObjectGraph {
    /// Create an empty graph with the default configuration.
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// Create an empty graph with the given configuration.
    pub fn with_config(config: GraphConfig) -> Self {
        info!(
            "Creating object graph: expansion_label={}, noop_check={:?}",
            config.expansion_label, config.noop_check
        );
        Self {
            config,
            state: RwLock::new(GraphState::default()),
        }
    }

    /// The configuration this graph was built with.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Replace the connection sets reported by `src`.
    ///
    /// Each entry is the complete current set for its label, not a delta. An
    /// empty set clears every connection `src` previously reported under that
    /// label. Labels not mentioned are left untouched.
    pub fn update<I>(&self, src: &ObjectId, connections: I) -> UpdateSummary
    where
        I: IntoIterator<Item = (EdgeLabel, HashSet<ObjectId>)>,
    {
        let mut summary = UpdateSummary::default();
        let mut state = self.state.write();
        for (label, conns) in connections {
            state.apply(src, label, conns, &self.config, &mut summary);
        }
        drop(state);

        debug!(
            "Updated {src}: {} labels changed, {} skipped, +{} -{} edges",
            summary.labels_changed, summary.labels_skipped, summary.edges_added, summary.edges_removed
        );
        summary
    }

    /// Replace the connection set reported by `src` for a single label.
    pub fn update_label<I>(&self, src: &ObjectId, label: EdgeLabel, conns: I) -> UpdateSummary
    where
        I: IntoIterator<Item = ObjectId>,
    {
        self.update(src, [(label, conns.into_iter().collect())])
    }

    /// Withdraw everything `src` has reported, as if it sent an empty set for
    /// every label. Edges that other sources reported towards `src` remain.
    pub fn remove(&self, src: &ObjectId) -> UpdateSummary {
        let mut summary = UpdateSummary::default();
        let mut state = self.state.write();
        if let Some(labels) = state.last_seen.remove(src) {
            for (label, old) in labels {
                summary.labels_changed += 1;
                for dst in &old {
                    if state.unlink(src, dst, &label, self.config.prune_empty) {
                        summary.edges_removed += 1;
                    }
                }
            }
        }
        drop(state);

        debug!("Removed {src}: -{} edges", summary.edges_removed);
        summary
    }

    /// All identifiers reachable from `seeds` over `label`, seeds included.
    pub fn connected_set<I>(&self, seeds: I, label: &EdgeLabel) -> HashSet<ObjectId>
    where
        I: IntoIterator<Item = ObjectId>,
    {
        let state = self.state.read();
        algorithms::connected_set(&state, seeds, label)
    }

    /// Objects linked to `oid` under `label`, grouped by group/kind.
    ///
    /// For the expansion label this is the expansion closure of `oid`. For any
    /// other label the closure is computed first and the requested label is
    /// then followed from `oid` and all of its offshoots together. `oid`
    /// itself is never part of the result. Both phases see the same state.
    /// Each group is sorted by canonical encoding.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Decode`](crate::GraphError::Decode) if a reached
    /// identifier does not survive an encode/decode pass. No partial result
    /// is returned.
    pub fn links(&self, oid: &ObjectId, label: &EdgeLabel) -> Result<Links> {
        let state = self.state.read();
        let links = algorithms::links(&state, oid, label, &self.config.expansion_label)?;
        drop(state);

        debug!(
            "Links of {oid} via {label}: {} objects in {} groups",
            links.values().map(Vec::len).sum::<usize>(),
            links.len()
        );
        Ok(links)
    }

    /// Like [`links`](Self::links), starting from an encoded identifier.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Decode`](crate::GraphError::Decode) if `oid` is
    /// not a valid encoding, or as [`links`](Self::links) does.
    pub fn links_by_str(&self, oid: &str, label: &EdgeLabel) -> Result<Links> {
        let oid = ObjectId::parse(oid)?;
        self.links(&oid, label)
    }

    /// Start a filtered link query from `oid`.
    pub fn query(&self, oid: &ObjectId) -> crate::query::LinkQuery<'_> {
        crate::query::LinkQuery::new(self, oid.clone())
    }

    /// Direct neighbors of `id` under `label`.
    pub fn neighbors(&self, id: &ObjectId, label: &EdgeLabel) -> HashSet<ObjectId> {
        self.state
            .read()
            .neighbors(id, label)
            .cloned()
            .unwrap_or_default()
    }

    /// The set `src` last reported under `label`.
    pub fn last_seen(&self, src: &ObjectId, label: &EdgeLabel) -> HashSet<ObjectId> {
        self.state
            .read()
            .last_seen
            .get(src)
            .and_then(|labels| labels.get(label))
            .cloned()
            .unwrap_or_default()
    }

    /// Labels under which `id` currently has at least one edge.
    pub fn labels(&self, id: &ObjectId) -> BTreeSet<EdgeLabel> {
        self.state
            .read()
            .edges
            .get(id)
            .map(|labels| {
                labels
                    .iter()
                    .filter(|(_, set)| !set.is_empty())
                    .map(|(label, _)| label.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether `id` has any edge under any label.
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.state
            .read()
            .edges
            .get(id)
            .is_some_and(|labels| labels.values().any(|set| !set.is_empty()))
    }

    /// Number of identifiers with at least one edge.
    pub fn node_count(&self) -> usize {
        self.state
            .read()
            .edges
            .values()
            .filter(|labels| labels.values().any(|set| !set.is_empty()))
            .count()
    }

    /// Number of distinct (pair, label) edges, each symmetric pair counted once.
    pub fn edge_count(&self) -> usize {
        let state = self.state.read();
        state
            .edges
            .iter()
            .flat_map(|(src, labels)| labels.values().map(move |set| (src, set)))
            .map(|(src, set)| set.iter().filter(|dst| src <= *dst).count())
            .sum()
    }

    /// Ordered copy of the current edge state.
    pub fn snapshot(&self) -> Snapshot {
        let state = self.state.read();
        let mut snapshot = Snapshot::new();
        for (id, labels) in &state.edges {
            let entry: BTreeMap<EdgeLabel, BTreeSet<ObjectId>> = labels
                .iter()
                .filter(|(_, set)| !set.is_empty())
                .map(|(label, set)| (label.clone(), set.iter().cloned().collect()))
                .collect();
            if !entry.is_empty() {
                snapshot.insert(id.clone(), entry);
            }
        }
        snapshot
    }

    /// Drop every edge and every recorded report.
    pub fn clear(&self) {
        let mut state = self.state.write();
        state.edges.clear();
        state.last_seen.clear();
        info!("Cleared object graph");
    }
}
