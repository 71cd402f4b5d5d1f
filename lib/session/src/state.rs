// Application state and the handlers that drive graph edits
use linkpath_core::{
    Graph, GraphSnapshot, LinkId, NodeId, NodeState, Path, PathFinder, Point,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;

/// What a pointer click means right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    /// Add and remove nodes, activate and deactivate links
    #[default]
    EditNetwork,
    /// Choose the node the search starts from
    PickStart,
    /// Choose the node the search must reach
    PickFinish,
}

impl InteractionMode {
    fn role(self) -> Option<NodeState> {
        match self {
            InteractionMode::EditNetwork => None,
            InteractionMode::PickStart => Some(NodeState::Start),
            InteractionMode::PickFinish => Some(NodeState::Finish),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Input delivered by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    SetMode(InteractionMode),
    PointerMoved(Point),
    Click { button: PointerButton, point: Point },
    Drag { from: Point, to: Point },
    FindPath,
}

/// Outcome of one event, for the presentation layer to display
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    ModeChanged(InteractionMode),
    Hover { repaint: bool },
    NodeAdded(NodeId),
    NodeRemoved(NodeId),
    NodeMoved(NodeId),
    LinksActivated(Vec<LinkId>),
    LinksDeactivated(Vec<LinkId>),
    RoleAssigned { node: NodeId, role: NodeState },
    RoleCleared(NodeState),
    Nothing,
    /// A search was requested without both a start and a finish node
    MissingEndpoints,
    PathFound { path: Path, length: f64 },
    /// No path within the depth budget. This is also what a search
    /// returns when the finish node is unreachable altogether.
    NoPath { max_depth: usize },
}

impl Feedback {
    /// Text for the status line
    pub fn message(&self) -> String {
        match self {
            Feedback::ModeChanged(InteractionMode::EditNetwork) => {
                "Left-click to add nodes and links, right-click to remove them".to_string()
            }
            Feedback::ModeChanged(InteractionMode::PickStart) => {
                "Please select a beginning node".to_string()
            }
            Feedback::ModeChanged(InteractionMode::PickFinish) => {
                "Please select an ending node".to_string()
            }
            Feedback::Hover { repaint } => format!("Hover (repaint: {})", repaint),
            Feedback::NodeAdded(id) => format!("Added node {}", id),
            Feedback::NodeRemoved(id) => format!("Removed node {}", id),
            Feedback::NodeMoved(id) => format!("Moved node {}", id),
            Feedback::LinksActivated(links) => format!("Activated {} link(s)", links.len()),
            Feedback::LinksDeactivated(links) => format!("Deactivated {} link(s)", links.len()),
            Feedback::RoleAssigned { node, role } => format!("Node {} is now {:?}", node, role),
            Feedback::RoleCleared(role) => format!("No {:?} node selected", role),
            Feedback::Nothing => "Nothing here".to_string(),
            Feedback::MissingEndpoints => {
                "Please select a beginning node and an ending node".to_string()
            }
            Feedback::PathFound { path, length } => {
                format!("Shortest path: {} link(s), length {:.2}", path.len(), length)
            }
            Feedback::NoPath { max_depth } => format!(
                "No path found within {} link(s); the finish may also be unreachable",
                max_depth
            ),
        }
    }
}

/// Serializable picture of the application state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateView {
    pub mode: InteractionMode,
    pub max_depth: usize,
    pub graph: GraphSnapshot,
    pub last_path: Option<Path>,
    pub last_path_length: Option<f64>,
}

/// Everything the user can change: the interaction mode, the graph and the
/// most recent search result.
///
/// Handlers take the state by value and hand it back with the feedback for
/// the event, see [`AppState::handle`].
#[derive(Debug, Clone, Default)]
pub struct AppState {
    mode: InteractionMode,
    graph: Graph,
    last_path: Option<Path>,
    max_depth: usize,
}

impl AppState {
    pub fn new(graph: Graph, max_depth: usize) -> Self {
        Self {
            mode: InteractionMode::default(),
            graph,
            last_path: None,
            max_depth,
        }
    }

    #[inline]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    #[inline]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    #[inline]
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    #[inline]
    pub fn last_path(&self) -> Option<&Path> {
        self.last_path.as_ref()
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Apply one event, returning the updated state and what happened
    pub fn handle(mut self, event: Event) -> (Self, Result<Feedback>) {
        let feedback = self.dispatch(event);
        (self, feedback)
    }

    /// In-place form of [`AppState::handle`]
    pub fn dispatch(&mut self, event: Event) -> Result<Feedback> {
        debug!(?event, mode = ?self.mode, "event");
        match event {
            Event::SetMode(mode) => Ok(self.set_mode(mode)),
            Event::PointerMoved(point) => Ok(self.pointer_moved(point)),
            Event::Click { button, point } => match self.mode.role() {
                None => self.edit_click(button, point),
                Some(role) => self.pick_click(role, button, point),
            },
            Event::Drag { from, to } => self.drag(from, to),
            Event::FindPath => Ok(self.find_path()),
        }
    }

    pub fn view(&self) -> StateView {
        StateView {
            mode: self.mode,
            max_depth: self.max_depth,
            graph: self.graph.snapshot(),
            last_path: self.last_path.clone(),
            last_path_length: self
                .last_path
                .as_ref()
                .map(|p| self.graph.path_length(p.links())),
        }
    }

    fn set_mode(&mut self, mode: InteractionMode) -> Feedback {
        self.unmark_last_path();
        self.mode = mode;
        Feedback::ModeChanged(mode)
    }

    fn pointer_moved(&mut self, point: Point) -> Feedback {
        let repaint = self.mode == InteractionMode::EditNetwork && self.graph.highlight_at(point);
        Feedback::Hover { repaint }
    }

    // A primary click on links only activates highlighted ones; links that
    // are already active stay active instead of being reset.
    fn edit_click(&mut self, button: PointerButton, point: Point) -> Result<Feedback> {
        match button {
            PointerButton::Primary => {
                let under = self.graph.links_at(point);
                if under.is_empty() {
                    let id = self.graph.add_node(point.x, point.y);
                    return Ok(Feedback::NodeAdded(id));
                }
                let mut activated = Vec::new();
                for link in under {
                    if self.graph.activate_highlighted(link)? {
                        activated.push(link);
                    }
                }
                Ok(Feedback::LinksActivated(activated))
            }
            PointerButton::Secondary => {
                if let Some(node) = self.graph.node_at(point) {
                    self.graph.remove_node(node);
                    self.drop_broken_path();
                    return Ok(Feedback::NodeRemoved(node));
                }
                let mut deactivated = Vec::new();
                for link in self.graph.links_at(point) {
                    if self.graph.deactivate_link(link)? {
                        deactivated.push(link);
                    }
                }
                Ok(Feedback::LinksDeactivated(deactivated))
            }
        }
    }

    // Any click in a pick mode demotes the current holder of the role; a
    // primary click on a node then hands the role to that node.
    fn pick_click(&mut self, role: NodeState, button: PointerButton, point: Point) -> Result<Feedback> {
        let target = self.graph.node_at(point);
        match (button, target) {
            (PointerButton::Primary, Some(node)) => {
                self.graph.set_node_state(node, role)?;
                Ok(Feedback::RoleAssigned { node, role })
            }
            (PointerButton::Secondary, Some(node)) => {
                self.graph.set_node_state(node, NodeState::Normal)?;
                self.graph.clear_state(role);
                Ok(Feedback::RoleCleared(role))
            }
            (_, None) => Ok(match self.graph.clear_state(role) {
                Some(_) => Feedback::RoleCleared(role),
                None => Feedback::Nothing,
            }),
        }
    }

    fn drag(&mut self, from: Point, to: Point) -> Result<Feedback> {
        if self.mode != InteractionMode::EditNetwork {
            return Ok(Feedback::Nothing);
        }
        match self.graph.node_at(from) {
            Some(node) => {
                self.graph.move_node(node, to.x, to.y)?;
                Ok(Feedback::NodeMoved(node))
            }
            None => Ok(Feedback::Nothing),
        }
    }

    fn find_path(&mut self) -> Feedback {
        self.unmark_last_path();
        self.last_path = None;

        let (Some(start), Some(_)) = (self.graph.start_node(), self.graph.finish_node()) else {
            return Feedback::MissingEndpoints;
        };

        let outcome = PathFinder::new(self.max_depth).search(&self.graph, start);
        match outcome.path {
            Some(path) => {
                self.graph.mark_path(&path);
                info!(links = path.len(), length = outcome.length, "path marked");
                self.last_path = Some(path.clone());
                Feedback::PathFound { path, length: outcome.length }
            }
            None => Feedback::NoPath { max_depth: self.max_depth },
        }
    }

    // A removed node takes its links with it; a path through them is gone
    fn drop_broken_path(&mut self) {
        let broken = self
            .last_path
            .as_ref()
            .is_some_and(|p| p.links().iter().any(|&id| self.graph.link(id).is_none()));
        if broken {
            debug!("last path broken by node removal");
            self.unmark_last_path();
            self.last_path = None;
        }
    }

    fn unmark_last_path(&mut self) {
        if let Some(path) = &self.last_path {
            self.graph.unmark_path(path);
        }
    }
}
