// Random graph generation for initial setup
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::graph::Graph;
use crate::link::LinkId;
use crate::node::NodeId;
use crate::{Error, Result};

/// Nodes are placed in `[PLACEMENT_MIN, PLACEMENT_MAX)` on both axes,
/// which keeps them clear of the edges of a 500x500 canvas.
pub const PLACEMENT_MIN: i32 = 25;
pub const PLACEMENT_MAX: i32 = 475;

/// Parameters for [`generate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomGraphConfig {
    pub min_nodes: usize,
    pub max_nodes: usize,
    /// Target average number of active links per node
    pub links_per_node: usize,
}

impl RandomGraphConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_nodes > self.max_nodes {
            return Err(Error::InvalidConfig(format!(
                "min_nodes ({}) is greater than max_nodes ({})",
                self.min_nodes, self.max_nodes
            )));
        }
        Ok(())
    }
}

/// Probability of activating each candidate link so that every node ends up
/// with `links_per_node` active links on average.
///
/// Each link has two endpoints, hence the halving. With no candidate links
/// the probability is 0.
pub fn activation_probability(links_per_node: usize, nodes: usize, links: usize) -> f64 {
    if links == 0 {
        return 0.0;
    }
    links_per_node as f64 / 2.0 * nodes as f64 / links as f64
}

/// Build a random graph.
///
/// Between `min_nodes` and `max_nodes` (inclusive) nodes are placed at
/// random, each candidate link is activated independently with
/// [`activation_probability`], and finally every node left without an
/// active link is removed.
pub fn generate<R: Rng + ?Sized>(config: &RandomGraphConfig, rng: &mut R) -> Result<Graph> {
    config.validate()?;

    let mut graph = Graph::new();
    let node_total = rng.random_range(config.min_nodes..=config.max_nodes);
    for _ in 0..node_total {
        let x = rng.random_range(PLACEMENT_MIN..PLACEMENT_MAX);
        let y = rng.random_range(PLACEMENT_MIN..PLACEMENT_MAX);
        graph.add_node(x, y);
    }

    let probability =
        activation_probability(config.links_per_node, node_total, graph.link_count());
    let candidates: Vec<LinkId> = graph.links().map(|l| l.id()).collect();
    for id in candidates {
        if rng.random::<f64>() < probability {
            graph.activate_link(id)?;
        }
    }

    let orphans: Vec<NodeId> = graph
        .nodes()
        .filter(|n| graph.active_links_of(n.id()).next().is_none())
        .map(|n| n.id())
        .collect();
    for id in &orphans {
        graph.remove_node(*id);
    }

    info!(
        placed = node_total,
        kept = graph.node_count(),
        orphans = orphans.len(),
        active_links = graph.active_links().len(),
        probability,
        "random graph generated"
    );
    Ok(graph)
}
