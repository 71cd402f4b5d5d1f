use thiserror::Error;

use crate::{LinkId, NodeId};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Link not found: {0}")]
    LinkNotFound(LinkId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
