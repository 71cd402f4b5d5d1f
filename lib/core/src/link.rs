use serde::{Deserialize, Serialize};

use crate::node::NodeId;

/// Stable identifier of a link inside a [`Graph`](crate::Graph)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkId(pub u64);

impl std::fmt::Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "l{}", self.0)
    }
}

/// Activation state of a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkState {
    /// Exists structurally, ignored by the search
    #[default]
    Inactive,
    /// Inactive link under the pointer
    Highlighted,
    /// Usable by the search
    Active,
    /// Active link that is part of the last computed path
    PathLeg,
}

/// Undirected candidate connection between two distinct nodes.
///
/// Endpoint order carries no meaning. Length is not stored: it is derived
/// from the endpoint positions by the graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub(crate) id: LinkId,
    pub(crate) ends: (NodeId, NodeId),
    pub(crate) state: LinkState,
}

impl Link {
    #[inline]
    #[must_use]
    pub(crate) fn new(id: LinkId, a: NodeId, b: NodeId) -> Self {
        debug_assert_ne!(a, b, "a link needs two distinct endpoints");
        Self {
            id,
            ends: (a, b),
            state: LinkState::Inactive,
        }
    }

    #[inline]
    pub fn id(&self) -> LinkId {
        self.id
    }

    #[inline]
    pub fn ends(&self) -> (NodeId, NodeId) {
        self.ends
    }

    #[inline]
    pub fn state(&self) -> LinkState {
        self.state
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == LinkState::Active
    }

    #[inline]
    pub fn touches(&self, node: NodeId) -> bool {
        self.ends.0 == node || self.ends.1 == node
    }

    /// Does this link join `a` and `b`, in either order?
    #[inline]
    pub fn joins(&self, a: NodeId, b: NodeId) -> bool {
        self.ends == (a, b) || self.ends == (b, a)
    }

    /// The endpoint opposite `node`, or `None` if `node` is not an endpoint
    #[inline]
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if node == self.ends.0 {
            Some(self.ends.1)
        } else if node == self.ends.1 {
            Some(self.ends.0)
        } else {
            None
        }
    }
}
