//! # linkpath
//!
//! Build a small spatial graph and search it for the shortest walk between a
//! start and a finish node, using only the links the user has activated.
//!
//! Every pair of nodes has a candidate link; only active links count. The
//! search is an exhaustive backtracking walk bounded by a depth budget, not
//! a Dijkstra-style optimal algorithm, and a "no path" answer does not say
//! whether the budget or the graph itself was the obstacle.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! # depth budget 10, random graph of 8..12 nodes with ~2 links each
//! linkpath 10 8 12 2 --seed 7 --script session.txt
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use linkpath::prelude::*;
//!
//! let mut state = AppState::new(Graph::new(), 10);
//! let graph = state.graph_mut();
//! let a = graph.add_node(0, 0);
//! let b = graph.add_node(30, 40);
//! let link = graph.link_between(a, b).unwrap();
//! graph.activate_link(link).unwrap();
//! graph.set_node_state(a, NodeState::Start).unwrap();
//! graph.set_node_state(b, NodeState::Finish).unwrap();
//!
//! let (state, feedback) = state.handle(Event::FindPath);
//! assert!(matches!(feedback.unwrap(), Feedback::PathFound { .. }));
//! assert_eq!(state.last_path().map(|p| p.len()), Some(1));
//! ```
//!
//! ## Crate Structure
//!
//! - `linkpath-core` - Nodes, links, the graph store, hit-testing and the path search
//! - `linkpath-session` - Startup configuration, application state, command scripts

// Re-export core types
pub use linkpath_core::{
    generator, shortest_path, Error, Graph, GraphSnapshot, Link, LinkId, LinkState, Node,
    NodeId, NodeState, Path, PathFinder, Point, RandomGraphConfig, Result, SearchOutcome,
    SearchStats,
};

// Re-export session
pub use linkpath_session::{
    script, AppState, Command, Event, Feedback, InteractionMode, PointerButton, SessionError,
    SharedState, StartupConfig, StateView, DEFAULT_MAX_DEPTH,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        shortest_path, AppState, Event, Feedback, Graph, InteractionMode, LinkId, LinkState,
        NodeId, NodeState, Path, PathFinder, Point, PointerButton, StartupConfig,
    };
}
