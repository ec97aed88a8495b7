//! Label-filtered reachability over a locked graph state.
//!
//! These functions take the already-locked state so that callers can run
//! several traversals against one consistent view.

use super::object_graph::{GraphState, Links};
use super::object_id::ObjectId;
use super::types::{EdgeLabel, GroupKind};
use crate::error::Result;
use std::collections::{BTreeMap, HashSet, VecDeque};

/// Breadth-first closure of `seeds` over edges labelled `label`.
///
/// Seeds are always part of the result, including seeds with no edges at
/// all. The visited set bounds the work on cyclic graphs.
pub(crate) fn connected_set<I>(state: &GraphState, seeds: I, label: &EdgeLabel) -> HashSet<ObjectId>
where
    I: IntoIterator<Item = ObjectId>,
{
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();

    for seed in seeds {
        if visited.insert(seed.clone()) {
            queue.push_back(seed);
        }
    }

    while let Some(current) = queue.pop_front() {
        let Some(neighbors) = state.neighbors(&current, label) else {
            continue;
        };
        for neighbor in neighbors {
            if !visited.contains(neighbor) {
                visited.insert(neighbor.clone());
                queue.push_back(neighbor.clone());
            }
        }
    }

    visited
}

/// Two-phase link lookup.
///
/// Phase one closes `oid` over `expansion`, collecting the offshoots that
/// make up its logical unit. Unless `label` is the expansion label itself,
/// phase two follows `label` from `oid` and every offshoot at once, since a
/// unit often relates to other units only through its parts.
pub(crate) fn links(
    state: &GraphState,
    oid: &ObjectId,
    label: &EdgeLabel,
    expansion: &EdgeLabel,
) -> Result<Links> {
    let unit = connected_set(state, [oid.clone()], expansion);
    let mut reachable = if label == expansion {
        unit
    } else {
        connected_set(state, unit, label)
    };
    reachable.remove(oid);
    group_by_kind(reachable)
}

/// Bucket identifiers by group/kind, each bucket sorted by encoding.
///
/// Every identifier goes through the codec on the way in; the first one
/// that does not decode fails the whole grouping.
pub(crate) fn group_by_kind(ids: impl IntoIterator<Item = ObjectId>) -> Result<Links> {
    let mut grouped: BTreeMap<GroupKind, Vec<(String, ObjectId)>> = BTreeMap::new();
    for id in ids {
        let encoded = id.encode();
        let decoded = ObjectId::parse(&encoded)?;
        grouped
            .entry(decoded.group_kind())
            .or_default()
            .push((encoded, decoded));
    }

    Ok(grouped
        .into_iter()
        .map(|(gk, mut members)| {
            members.sort_unstable_by(|a, b| a.0.cmp(&b.0));
            (gk, members.into_iter().map(|(_, id)| id).collect())
        })
        .collect())
}
