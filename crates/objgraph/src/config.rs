//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::graph::EdgeLabel;

/// How `update` decides that a reported connection set is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoopCheck {
    /// Skip only when the new set equals the last reported one.
    #[default]
    Equality,
    /// Skip whenever the last reported set is a subset of the new one.
    ///
    /// This misses pure additions and exists only to reproduce legacy
    /// behavior; do not use it for live graphs.
    Subset,
}

/// Tunables for an [`ObjectGraph`](crate::ObjectGraph).
///
/// ```
/// use objgraph::{EdgeLabel, GraphConfig, NoopCheck};
///
/// let config = GraphConfig::default()
///     .with_expansion_label(EdgeLabel::new("member_of"))
///     .with_noop_check(NoopCheck::Equality);
/// assert_eq!(config.expansion_label.as_str(), "member_of");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Label closed over first by two-phase `links` queries
    pub expansion_label: EdgeLabel,
    /// Unchanged-set detection strategy
    pub noop_check: NoopCheck,
    /// Drop empty edge sets and label maps once their last edge is removed
    pub prune_empty: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            expansion_label: EdgeLabel::OFFSHOOT,
            noop_check: NoopCheck::Equality,
            prune_empty: true,
        }
    }
}

impl GraphConfig {
    /// Load a config from JSON. Absent keys take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Serialization`] if the JSON is invalid.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| GraphError::serialization("Failed to parse graph config", Some(e)))
    }

    /// Set the expansion label.
    pub fn with_expansion_label(mut self, label: impl Into<EdgeLabel>) -> Self {
        self.expansion_label = label.into();
        self
    }

    /// Set the unchanged-set detection strategy.
    pub fn with_noop_check(mut self, check: NoopCheck) -> Self {
        self.noop_check = check;
        self
    }

    /// Enable or disable pruning of empty sets.
    pub fn with_prune_empty(mut self, prune: bool) -> Self {
        self.prune_empty = prune;
        self
    }
}
