use thiserror::Error;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid number of arguments: expected 0, 1, 3 or 4, got {0}")]
    ArgumentCount(usize),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid command on line {line}: {reason}")]
    InvalidCommand { line: usize, reason: String },

    #[error(transparent)]
    Core(#[from] linkpath_core::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
