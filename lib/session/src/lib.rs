//! # linkpath Session
//!
//! Application layer on top of [`linkpath_core`]:
//!
//! - [`StartupConfig`] - Positional startup arguments (depth budget, random graph)
//! - [`AppState`] - Interaction mode, graph and last path, updated by [`Event`]s
//! - [`script`] - Line-oriented commands for driving a session without a GUI
//! - [`SharedState`] - Lock-serialized handle for use across threads

pub mod error;
pub mod config;
pub mod state;
pub mod script;
pub mod shared;

pub use error::{Result, SessionError};
pub use config::{StartupConfig, DEFAULT_MAX_DEPTH};
pub use state::{AppState, Event, Feedback, InteractionMode, PointerButton, StateView};
pub use script::Command;
pub use shared::SharedState;
