use linkpath_core::generator::{self, RandomGraphConfig};
use linkpath_core::Graph;
use rand::Rng;
use tracing::info;

use crate::error::{Result, SessionError};
use crate::state::AppState;

/// Depth budget used when none is given on the command line
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Settings consumed once at process start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupConfig {
    pub max_depth: usize,
    pub random: Option<RandomGraphConfig>,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            random: None,
        }
    }
}

impl StartupConfig {
    /// Interpret the positional startup arguments.
    ///
    /// Accepted shapes:
    /// - `[]`
    /// - `[max_depth]`
    /// - `[min_nodes, max_nodes, links_per_node]`
    /// - `[max_depth, min_nodes, max_nodes, links_per_node]`
    ///
    /// Any other count is rejected.
    pub fn from_args(values: &[usize]) -> Result<Self> {
        let config = match *values {
            [] => Self::default(),
            [max_depth] => Self { max_depth, random: None },
            [min_nodes, max_nodes, links_per_node] => Self {
                max_depth: DEFAULT_MAX_DEPTH,
                random: Some(RandomGraphConfig { min_nodes, max_nodes, links_per_node }),
            },
            [max_depth, min_nodes, max_nodes, links_per_node] => Self {
                max_depth,
                random: Some(RandomGraphConfig { min_nodes, max_nodes, links_per_node }),
            },
            _ => return Err(SessionError::ArgumentCount(values.len())),
        };

        if let Some(random) = &config.random {
            random
                .validate()
                .map_err(|e| SessionError::InvalidConfig(e.to_string()))?;
        }
        Ok(config)
    }

    /// The initial graph: random when requested, empty otherwise
    pub fn initial_graph<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Graph> {
        match &self.random {
            Some(random) => Ok(generator::generate(random, rng)?),
            None => Ok(Graph::new()),
        }
    }

    /// Build the application state this configuration describes
    pub fn into_state<R: Rng + ?Sized>(self, rng: &mut R) -> Result<AppState> {
        let graph = self.initial_graph(rng)?;
        info!(
            max_depth = self.max_depth,
            nodes = graph.node_count(),
            random = self.random.is_some(),
            "session configured"
        );
        Ok(AppState::new(graph, self.max_depth))
    }
}
