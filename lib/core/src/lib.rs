//! # linkpath Core
//!
//! Core library for linkpath.
//!
//! This crate provides the graph model and the search over it:
//!
//! - [`Node`] - A placed point with a role (normal, start, finish)
//! - [`Link`] - A candidate connection between two nodes, active or not
//! - [`Graph`] - Arena owning every node and link; the link set is always complete
//! - [`PathFinder`] - Exhaustive, depth-bounded backtracking search over active links
//! - [`generator`] - Random graphs for initial setup
//!
//! ## Example
//!
//! ```rust
//! use linkpath_core::{Graph, NodeState, shortest_path};
//!
//! let mut graph = Graph::new();
//! let a = graph.add_node(0, 0);
//! let b = graph.add_node(3, 4);
//! let c = graph.add_node(6, 8);
//!
//! let ab = graph.link_between(a, b).unwrap();
//! let bc = graph.link_between(b, c).unwrap();
//! graph.activate_link(ab).unwrap();
//! graph.activate_link(bc).unwrap();
//! graph.set_node_state(c, NodeState::Finish).unwrap();
//!
//! let path = shortest_path(&graph, a, 10).unwrap();
//! assert_eq!(path.links(), &[ab, bc]);
//! assert_eq!(graph.path_length(path.links()), 10.0);
//! ```

pub mod error;
pub mod geometry;
pub mod node;
pub mod link;
pub mod graph;
pub mod pathfinder;
pub mod generator;

pub use error::{Error, Result};
pub use geometry::{LinkZone, Point};
pub use node::{Node, NodeId, NodeState};
pub use link::{Link, LinkId, LinkState};
pub use graph::{Graph, GraphSnapshot, LinkSnapshot, NodeSnapshot};
pub use pathfinder::{shortest_path, Path, PathFinder, SearchOutcome, SearchStats};
pub use generator::RandomGraphConfig;
