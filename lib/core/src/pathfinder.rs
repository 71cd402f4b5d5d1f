// Exhaustive depth-bounded shortest path search over active links
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::graph::Graph;
use crate::link::LinkId;
use crate::node::{NodeId, NodeState};

/// An ordered walk of links where consecutive links share an endpoint and
/// no link appears twice
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    links: Vec<LinkId>,
}

impl Path {
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn from_links(links: Vec<LinkId>) -> Self {
        Self { links }
    }

    #[inline]
    pub fn links(&self) -> &[LinkId] {
        &self.links
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    #[inline]
    pub fn into_links(self) -> Vec<LinkId> {
        self.links
    }
}

/// Counters gathered during one search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// Number of recursive steps taken, including the root call
    pub branches: u64,
    /// Number of complete paths reaching a finish node
    pub arrivals: u64,
}

/// Result of [`PathFinder::search`]
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub path: Option<Path>,
    pub length: f64,
    pub stats: SearchStats,
}

/// Backtracking search from a start node to any node in state Finish.
///
/// Every active link leaving the current node that is not already on the
/// current path is tried in turn, so a node may be crossed more than once
/// through different links. The only bound is `max_depth`, the number of
/// links one branch may traverse. Among complete branches the one with the
/// strictly smallest length wins, so on ties the first one found is kept.
///
/// Cost grows exponentially with the number of active links. A `None`
/// result cannot tell "unreachable" apart from "not reachable within
/// `max_depth`".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathFinder {
    max_depth: usize,
}

impl PathFinder {
    #[inline]
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn search(&self, graph: &Graph, start: NodeId) -> SearchOutcome {
        let mut search = Search {
            graph,
            path: Vec::with_capacity(self.max_depth.min(64)),
            on_path: AHashSet::new(),
            stats: SearchStats::default(),
        };

        let path = search.explore(start, self.max_depth).map(Path::from_links);
        let length = path.as_ref().map_or(0.0, |p| graph.path_length(p.links()));
        let stats = search.stats;

        match &path {
            Some(p) => debug!(
                start = %start,
                links = p.len(),
                length,
                branches = stats.branches,
                arrivals = stats.arrivals,
                "shortest path found"
            ),
            None => warn!(
                start = %start,
                max_depth = self.max_depth,
                branches = stats.branches,
                "no path to a finish node within the depth budget (or none exists)"
            ),
        }

        SearchOutcome { path, length, stats }
    }
}

/// Shortest walk of active links from `start` to a Finish node.
///
/// A start node that is itself in state Finish yields the empty path.
pub fn shortest_path(graph: &Graph, start: NodeId, max_depth: usize) -> Option<Path> {
    PathFinder::new(max_depth).search(graph, start).path
}

struct Search<'g> {
    graph: &'g Graph,
    path: Vec<LinkId>,
    on_path: AHashSet<LinkId>,
    stats: SearchStats,
}

impl Search<'_> {
    fn explore(&mut self, node: NodeId, depth_left: usize) -> Option<Vec<LinkId>> {
        self.stats.branches += 1;
        let graph = self.graph;

        if graph.node(node)?.state() == NodeState::Finish {
            self.stats.arrivals += 1;
            return Some(self.path.clone());
        }
        if depth_left == 0 {
            return None;
        }

        let mut best: Option<(Vec<LinkId>, f64)> = None;
        for link in graph.active_links_of(node) {
            let id = link.id();
            if self.on_path.contains(&id) {
                continue;
            }
            let Some(next) = link.other(node) else {
                continue;
            };

            self.path.push(id);
            self.on_path.insert(id);
            let found = self.explore(next, depth_left - 1);
            self.path.pop();
            self.on_path.remove(&id);

            if let Some(candidate) = found {
                let length = graph.path_length(&candidate);
                match &best {
                    Some((_, best_length)) if length >= *best_length => {}
                    _ => best = Some((candidate, length)),
                }
            }
        }

        best.map(|(path, _)| path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A(0,0), B(3,4), C(6,8) with A-B and B-C active, A-C inactive
    fn line() -> (Graph, NodeId, NodeId, NodeId, LinkId, LinkId) {
        let mut graph = Graph::new();
        let a = graph.add_node(0, 0);
        let b = graph.add_node(3, 4);
        let c = graph.add_node(6, 8);
        let ab = graph.link_between(a, b).unwrap();
        let bc = graph.link_between(b, c).unwrap();
        graph.activate_link(ab).unwrap();
        graph.activate_link(bc).unwrap();
        graph.set_node_state(a, NodeState::Start).unwrap();
        graph.set_node_state(c, NodeState::Finish).unwrap();
        (graph, a, b, c, ab, bc)
    }

    #[test]
    fn test_two_hop_path() {
        let (graph, a, _, _, ab, bc) = line();
        let outcome = PathFinder::new(10).search(&graph, a);
        assert_eq!(outcome.path, Some(Path::from_links(vec![ab, bc])));
        assert_eq!(outcome.length, 10.0);
    }

    #[test]
    fn test_depth_budget_cuts_search() {
        let (graph, a, ..) = line();
        assert_eq!(shortest_path(&graph, a, 1), None);
        assert!(shortest_path(&graph, a, 2).is_some());
    }

    #[test]
    fn test_start_already_finish() {
        let (mut graph, a, ..) = line();
        graph.set_node_state(a, NodeState::Finish).unwrap();
        let outcome = PathFinder::new(10).search(&graph, a);
        assert_eq!(outcome.path, Some(Path::empty()));
        assert_eq!(outcome.length, 0.0);

        // Even a zero budget allows the empty path
        assert_eq!(shortest_path(&graph, a, 0), Some(Path::empty()));
    }

    #[test]
    fn test_inactive_links_are_ignored() {
        let (mut graph, a, _, _, ab, _) = line();
        graph.deactivate_link(ab).unwrap();
        assert_eq!(shortest_path(&graph, a, 10), None);
    }

    #[test]
    fn test_path_legs_are_not_traversed() {
        let (mut graph, a, _, _, ab, bc) = line();
        graph.mark_path(&Path::from_links(vec![ab, bc]));
        assert_eq!(shortest_path(&graph, a, 10), None);
    }

    #[test]
    fn test_unknown_start_has_no_path() {
        let (graph, ..) = line();
        assert_eq!(shortest_path(&graph, NodeId(99), 10), None);
    }

    #[test]
    fn test_direct_link_beats_detour() {
        let (mut graph, a, _, c, ..) = line();
        let ac = graph.link_between(a, c).unwrap();
        graph.activate_link(ac).unwrap();
        // Straight A-C has the same length as A-B-C here; it is also found first
        let path = shortest_path(&graph, a, 10).unwrap();
        assert_eq!(graph.path_length(path.links()), 10.0);

        graph.move_node(c, 0, 9).unwrap();
        let path = shortest_path(&graph, a, 10).unwrap();
        assert_eq!(path.links(), &[ac]);
    }

    #[test]
    fn test_ties_keep_first_found() {
        // Square: S(0,0) - U(0,10) - F(10,10) and S - R(10,0) - F, equal lengths
        let mut graph = Graph::new();
        let s = graph.add_node(0, 0);
        let u = graph.add_node(0, 10);
        let r = graph.add_node(10, 0);
        let f = graph.add_node(10, 10);
        let su = graph.link_between(s, u).unwrap();
        let uf = graph.link_between(u, f).unwrap();
        let sr = graph.link_between(s, r).unwrap();
        let rf = graph.link_between(r, f).unwrap();
        // Activate the second route first; the search follows incidence order
        for link in [sr, rf, su, uf] {
            graph.activate_link(link).unwrap();
        }
        graph.set_node_state(f, NodeState::Finish).unwrap();

        let path = shortest_path(&graph, s, 10).unwrap();
        assert_eq!(path.links(), &[su, uf]);
    }

    #[test]
    fn test_nodes_may_be_revisited_through_other_links() {
        // Triangle S-X-Y with F hanging off S: reaching F again through S is
        // allowed as long as no link repeats, but the direct S-F wins.
        let mut graph = Graph::new();
        let s = graph.add_node(0, 0);
        let x = graph.add_node(10, 0);
        let y = graph.add_node(0, 10);
        let f = graph.add_node(-5, 0);
        for (p, q) in [(s, x), (x, y), (y, s), (s, f)] {
            let link = graph.link_between(p, q).unwrap();
            graph.activate_link(link).unwrap();
        }
        graph.set_node_state(f, NodeState::Finish).unwrap();

        let outcome = PathFinder::new(10).search(&graph, s);
        assert_eq!(outcome.path.unwrap().links(), &[graph.link_between(s, f).unwrap()]);
        // Both directions around the triangle come back to S and reach F again
        assert_eq!(outcome.stats.arrivals, 3);
    }

    #[test]
    fn test_two_node_back_and_forth_terminates() {
        let mut graph = Graph::new();
        let a = graph.add_node(0, 0);
        let b = graph.add_node(1, 0);
        let ab = graph.link_between(a, b).unwrap();
        graph.activate_link(ab).unwrap();

        let outcome = PathFinder::new(1000).search(&graph, a);
        assert_eq!(outcome.path, None);
        // a -> b, then the only link is already used
        assert_eq!(outcome.stats.branches, 2);
    }
}
