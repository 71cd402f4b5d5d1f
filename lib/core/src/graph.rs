// Graph store - owns every node and link, keeps the link set complete
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::geometry::{LinkZone, Point};
use crate::link::{Link, LinkId, LinkState};
use crate::node::{Node, NodeId, NodeState};
use crate::pathfinder::Path;
use crate::{Error, Result};

/// Arena of nodes and links referenced by stable integer ids.
///
/// The link set is always the complete graph over the current nodes: every
/// pair of nodes has exactly one link record, whatever its state. Ids are
/// handed out in increasing order and never reused, so iterating the arenas
/// visits nodes and links in creation order.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: BTreeMap<NodeId, Node>,
    links: BTreeMap<LinkId, Link>,
    next_node: u64,
    next_link: u64,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    #[inline]
    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(&id)
    }

    #[inline]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.values()
    }

    /// Ids of the links currently in state [`LinkState::Active`]
    pub fn active_links(&self) -> Vec<LinkId> {
        self.links
            .values()
            .filter(|l| l.is_active())
            .map(|l| l.id)
            .collect()
    }

    /// Active links incident to `node`, in the node's incidence order
    pub fn active_links_of(&self, node: NodeId) -> impl Iterator<Item = &Link> + '_ {
        self.nodes
            .get(&node)
            .map(|n| n.links.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(|id| self.links.get(id))
            .filter(|l| l.is_active())
    }

    /// The link record joining `a` and `b`, if both nodes exist
    pub fn link_between(&self, a: NodeId, b: NodeId) -> Option<LinkId> {
        self.nodes
            .get(&a)?
            .links
            .iter()
            .filter_map(|id| self.links.get(id))
            .find(|l| l.joins(a, b))
            .map(|l| l.id)
    }

    /// Euclidean length of a link, computed from the current endpoint positions
    pub fn link_length(&self, id: LinkId) -> Option<f64> {
        let link = self.links.get(&id)?;
        let a = self.nodes.get(&link.ends.0)?;
        let b = self.nodes.get(&link.ends.1)?;
        Some(a.position.distance_to(&b.position))
    }

    /// Sum of link lengths along `path`. An empty path has length 0.
    ///
    /// Ids no longer present in the graph contribute nothing.
    pub fn path_length(&self, path: &[LinkId]) -> f64 {
        path.iter().filter_map(|&id| self.link_length(id)).sum()
    }

    /// Place a node and create an inactive link to every existing node
    pub fn add_node(&mut self, x: i32, y: i32) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;

        let mut node = Node::new(id, Point::new(x, y));
        let existing: Vec<NodeId> = self.nodes.keys().copied().collect();
        for other in existing {
            let link_id = LinkId(self.next_link);
            self.next_link += 1;
            self.links.insert(link_id, Link::new(link_id, id, other));
            node.attach(link_id);
            if let Some(other) = self.nodes.get_mut(&other) {
                other.attach(link_id);
            }
        }

        debug!(node = %id, x, y, links = node.links.len(), "node added");
        self.nodes.insert(id, node);
        id
    }

    /// Remove a node together with every link touching it.
    ///
    /// Returns `false` (and changes nothing) if the node is absent.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let Some(node) = self.nodes.remove(&id) else {
            return false;
        };

        for link_id in &node.links {
            if let Some(link) = self.links.remove(link_id) {
                if let Some(other) = link.other(id).and_then(|o| self.nodes.get_mut(&o)) {
                    other.detach(*link_id);
                }
            }
        }

        debug!(node = %id, links = node.links.len(), "node removed");
        true
    }

    /// Move a node in place. Its id, state and links are kept.
    pub fn move_node(&mut self, id: NodeId, x: i32, y: i32) -> Result<()> {
        let node = self.nodes.get_mut(&id).ok_or(Error::NodeNotFound(id))?;
        node.position = Point::new(x, y);
        debug!(node = %id, x, y, "node moved");
        Ok(())
    }

    /// Assign a role to a node.
    ///
    /// Start and Finish are unique: any other node holding the same role is
    /// demoted to Normal first.
    pub fn set_node_state(&mut self, id: NodeId, state: NodeState) -> Result<()> {
        if !self.nodes.contains_key(&id) {
            return Err(Error::NodeNotFound(id));
        }

        if state != NodeState::Normal {
            for node in self.nodes.values_mut() {
                if node.id != id && node.state == state {
                    debug!(node = %node.id, ?state, "role demoted");
                    node.state = NodeState::Normal;
                }
            }
        }

        if let Some(node) = self.nodes.get_mut(&id) {
            node.state = state;
        }
        Ok(())
    }

    /// Demote whichever node holds `state` back to Normal and return it
    pub fn clear_state(&mut self, state: NodeState) -> Option<NodeId> {
        if state == NodeState::Normal {
            return None;
        }
        let holder = self.nodes.values_mut().find(|n| n.state == state)?;
        holder.state = NodeState::Normal;
        debug!(node = %holder.id, ?state, "role cleared");
        Some(holder.id)
    }

    pub fn start_node(&self) -> Option<NodeId> {
        self.node_with_state(NodeState::Start)
    }

    pub fn finish_node(&self) -> Option<NodeId> {
        self.node_with_state(NodeState::Finish)
    }

    fn node_with_state(&self, state: NodeState) -> Option<NodeId> {
        self.nodes.values().find(|n| n.state == state).map(|n| n.id)
    }

    /// Make a link usable by the search. Returns whether the state changed.
    pub fn activate_link(&mut self, id: LinkId) -> Result<bool> {
        self.set_link_state(id, LinkState::Active)
    }

    /// Withdraw a link from the search. Inactive links, highlighted ones
    /// included, are left alone.
    pub fn deactivate_link(&mut self, id: LinkId) -> Result<bool> {
        let link = self.links.get(&id).ok_or(Error::LinkNotFound(id))?;
        if !matches!(link.state, LinkState::Active | LinkState::PathLeg) {
            return Ok(false);
        }
        self.set_link_state(id, LinkState::Inactive)
    }

    /// Click activation: only a highlighted link becomes active
    pub fn activate_highlighted(&mut self, id: LinkId) -> Result<bool> {
        let link = self.links.get(&id).ok_or(Error::LinkNotFound(id))?;
        if link.state != LinkState::Highlighted {
            return Ok(false);
        }
        self.set_link_state(id, LinkState::Active)
    }

    fn set_link_state(&mut self, id: LinkId, state: LinkState) -> Result<bool> {
        let link = self.links.get_mut(&id).ok_or(Error::LinkNotFound(id))?;
        if link.state == state {
            return Ok(false);
        }
        debug!(link = %id, from = ?link.state, to = ?state, "link state changed");
        link.state = state;
        Ok(true)
    }

    /// Flag every active link of `path` as a path leg
    pub fn mark_path(&mut self, path: &Path) {
        self.swap_path_state(path, LinkState::Active, LinkState::PathLeg);
    }

    /// Return path legs of `path` to plain active links
    pub fn unmark_path(&mut self, path: &Path) {
        self.swap_path_state(path, LinkState::PathLeg, LinkState::Active);
    }

    fn swap_path_state(&mut self, path: &Path, from: LinkState, to: LinkState) {
        for id in path.links() {
            if let Some(link) = self.links.get_mut(id) {
                if link.state == from {
                    link.state = to;
                }
            }
        }
    }

    /// Click zone of a link, `None` when its endpoints coincide
    pub fn link_zone(&self, id: LinkId) -> Option<LinkZone> {
        let link = self.links.get(&id)?;
        let a = self.nodes.get(&link.ends.0)?;
        let b = self.nodes.get(&link.ends.1)?;
        LinkZone::between(a.position, b.position)
    }

    /// Topmost (most recently added) node under the pointer
    pub fn node_at(&self, point: Point) -> Option<NodeId> {
        self.nodes
            .values()
            .rev()
            .find(|n| n.in_zone(point))
            .map(|n| n.id)
    }

    /// Every link whose zone contains the pointer
    pub fn links_at(&self, point: Point) -> Vec<LinkId> {
        self.links
            .keys()
            .copied()
            .filter(|&id| self.link_zone(id).is_some_and(|z| z.contains(point)))
            .collect()
    }

    /// Hover feedback: inactive links under the pointer become highlighted,
    /// highlighted links elsewhere go back to inactive. Active links and
    /// path legs are untouched.
    ///
    /// Returns whether any link changed, i.e. whether a redraw is needed.
    pub fn highlight_at(&mut self, point: Point) -> bool {
        let under: Vec<LinkId> = self.links_at(point);
        let mut changed = false;
        for link in self.links.values_mut() {
            if matches!(link.state, LinkState::Active | LinkState::PathLeg) {
                continue;
            }
            let next = if under.contains(&link.id) {
                LinkState::Highlighted
            } else {
                LinkState::Inactive
            };
            if link.state != next {
                link.state = next;
                changed = true;
            }
        }
        changed
    }

    /// Serializable view of the whole graph
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self
                .nodes
                .values()
                .map(|n| NodeSnapshot {
                    id: n.id,
                    x: n.position.x,
                    y: n.position.y,
                    state: n.state,
                })
                .collect(),
            links: self
                .links
                .values()
                .map(|l| LinkSnapshot {
                    id: l.id,
                    ends: [l.ends.0, l.ends.1],
                    state: l.state,
                    length: self.link_length(l.id).unwrap_or(0.0),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub x: i32,
    pub y: i32,
    pub state: NodeState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSnapshot {
    pub id: LinkId,
    pub ends: [NodeId; 2],
    pub state: LinkState,
    pub length: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<NodeSnapshot>,
    pub links: Vec<LinkSnapshot>,
}
