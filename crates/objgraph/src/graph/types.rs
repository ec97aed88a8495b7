//! Core graph value types: labels, group/kind keys, and object keys.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use super::object_id::ObjectId;

/// Name of a relationship kind between two objects.
///
/// The set of labels is open: any string is accepted and the engine never
/// validates it. The associated constants are the labels the resource
/// registry ships with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeLabel(Cow<'static, str>);

impl EdgeLabel {
    /// Membership of an object in a higher-level logical unit. Used as the
    /// default expansion label.
    pub const OFFSHOOT: EdgeLabel = EdgeLabel::from_static("offshoot");
    /// Backup target reached through a backup configuration
    pub const BACKUP_VIA: EdgeLabel = EdgeLabel::from_static("backup_via");
    /// Catalog entry describing the object
    pub const CATALOG: EdgeLabel = EdgeLabel::from_static("catalog");
    /// Connection endpoint (e.g. app binding)
    pub const CONNECT_VIA: EdgeLabel = EdgeLabel::from_static("connect_via");
    /// Service or ingress exposing the object
    pub const EXPOSED_BY: EdgeLabel = EdgeLabel::from_static("exposed_by");
    /// Monitoring resource watching the object
    pub const MONITORED_BY: EdgeLabel = EdgeLabel::from_static("monitored_by");
    /// Multi-cluster binding
    pub const OCM_BIND: EdgeLabel = EdgeLabel::from_static("ocm_bind");
    /// Policy applied to the object
    pub const POLICY: EdgeLabel = EdgeLabel::from_static("policy");
    /// Recommendation targeting the object
    pub const RECOMMENDED_FOR: EdgeLabel = EdgeLabel::from_static("recommended_for");
    /// Restore session writing into the object
    pub const RESTORE_INTO: EdgeLabel = EdgeLabel::from_static("restore_into");
    /// Source the object was created from
    pub const SOURCE: EdgeLabel = EdgeLabel::from_static("source");
    /// Storage mounted or claimed by the object
    pub const STORAGE: EdgeLabel = EdgeLabel::from_static("storage");
    /// Aggregated view over the object
    pub const VIEW: EdgeLabel = EdgeLabel::from_static("view");

    /// Create a label from a static string without allocating.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Create a label from any string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// The label's string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EdgeLabel {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for EdgeLabel {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// API group and kind of an object. Key for grouped link results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct GroupKind {
    /// API group (empty for the core group)
    pub group: String,
    /// Object kind
    pub kind: String,
}

impl GroupKind {
    /// Create a group/kind pair.
    pub fn new(group: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            kind: kind.into(),
        }
    }
}

impl std::fmt::Display for GroupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}.{}", self.kind, self.group)
        }
    }
}

/// Namespace and name of an object, the handle used to fetch its body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct ObjectKey {
    /// Namespace (empty for cluster-scoped objects)
    pub namespace: String,
    /// Object name
    pub name: String,
}

impl std::fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}/{}", self.namespace, self.name)
        }
    }
}

/// Complete current connection sets of one source object, per label.
pub type Connections = HashMap<EdgeLabel, HashSet<ObjectId>>;

/// Outcome counters of one `update` or `remove` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    /// Labels whose connection set differed from the last report
    pub labels_changed: usize,
    /// Labels short-circuited as unchanged
    pub labels_skipped: usize,
    /// Symmetric edges newly inserted
    pub edges_added: usize,
    /// Symmetric edges deleted
    pub edges_removed: usize,
}

impl UpdateSummary {
    /// True when the call left the edge state untouched.
    pub fn is_noop(&self) -> bool {
        self.edges_added == 0 && self.edges_removed == 0
    }
}
