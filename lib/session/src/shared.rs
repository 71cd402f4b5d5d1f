// Thread-safe handle serializing every mutation and search
use linkpath_core::Graph;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::error::Result;
use crate::state::{AppState, Event, Feedback, StateView};

/// Cloneable handle to one [`AppState`].
///
/// A search reads node and link state that edits can change, so the whole
/// state sits behind a single lock: events, searches and reads never
/// interleave.
#[derive(Clone, Default)]
pub struct SharedState {
    inner: Arc<Mutex<AppState>>,
}

impl SharedState {
    pub fn new(state: AppState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    pub fn dispatch(&self, event: Event) -> Result<Feedback> {
        self.inner.lock().dispatch(event)
    }

    /// Run `f` against the graph while holding the lock
    pub fn with_graph<T>(&self, f: impl FnOnce(&Graph) -> T) -> T {
        f(self.inner.lock().graph())
    }

    /// Run `f` against the whole state while holding the lock
    pub fn update<T>(&self, f: impl FnOnce(&mut AppState) -> T) -> T {
        f(&mut self.inner.lock())
    }

    pub fn view(&self) -> StateView {
        self.inner.lock().view()
    }

    /// Take the state back out, cloning it if other handles are still alive
    pub fn into_inner(self) -> AppState {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => mutex.into_inner(),
            Err(shared) => shared.lock().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::InteractionMode;
    use linkpath_core::NodeState;
    use std::thread;

    #[test]
    fn test_concurrent_edits_are_serialized() {
        let shared = SharedState::new(AppState::new(Graph::new(), 10));

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..10 {
                        shared.update(|state| {
                            state.graph_mut().add_node(t * 100 + i, i * 7);
                        });
                        // Searches interleave with the edits but never observe half an edit
                        shared.dispatch(Event::FindPath).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let state = shared.into_inner();
        assert_eq!(state.graph().node_count(), 40);
        assert_eq!(state.graph().link_count(), 40 * 39 / 2);
        for node in state.graph().nodes() {
            assert_eq!(node.links().len(), 39);
        }
    }

    #[test]
    fn test_search_through_handle() {
        let shared = SharedState::default();
        shared.update(|state| {
            let graph = state.graph_mut();
            let a = graph.add_node(0, 0);
            let b = graph.add_node(30, 40);
            let link = graph.link_between(a, b).unwrap();
            graph.activate_link(link).unwrap();
            graph.set_node_state(a, NodeState::Start).unwrap();
            graph.set_node_state(b, NodeState::Finish).unwrap();
        });

        // Default state has a zero depth budget
        assert_eq!(
            shared.dispatch(Event::FindPath).unwrap(),
            Feedback::NoPath { max_depth: 0 }
        );

        let other = SharedState::new(AppState::new(shared.with_graph(Graph::clone), 5));
        let feedback = other.dispatch(Event::FindPath).unwrap();
        assert!(matches!(feedback, Feedback::PathFound { length, .. } if length == 50.0));
        assert_eq!(other.view().mode, InteractionMode::EditNetwork);
    }
}
