use serde::{Deserialize, Serialize};

use crate::geometry::{in_node_zone, Point};
use crate::link::LinkId;

/// Stable identifier of a node inside a [`Graph`](crate::Graph)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Role of a node in a path search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    #[default]
    Normal,
    Start,
    Finish,
}

/// A placed point and the links touching it.
///
/// `links` only records incidence for traversal. The links themselves are
/// owned by the graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) position: Point,
    pub(crate) state: NodeState,
    pub(crate) links: Vec<LinkId>,
}

impl Node {
    #[inline]
    #[must_use]
    pub(crate) fn new(id: NodeId, position: Point) -> Self {
        Self {
            id,
            position,
            state: NodeState::Normal,
            links: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.position.y
    }

    #[inline]
    pub fn state(&self) -> NodeState {
        self.state
    }

    /// Incident links in the order they were created
    #[inline]
    pub fn links(&self) -> &[LinkId] {
        &self.links
    }

    /// Is the pointer over this node's circle?
    #[inline]
    pub fn in_zone(&self, point: Point) -> bool {
        in_node_zone(self.position, point)
    }

    pub(crate) fn attach(&mut self, link: LinkId) {
        self.links.push(link);
    }

    pub(crate) fn detach(&mut self, link: LinkId) {
        self.links.retain(|&l| l != link);
    }
}
