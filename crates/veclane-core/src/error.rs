//! Workspace-wide error type.

/// Errors surfaced by veclane crates.
#[derive(Debug, thiserror::Error)]
pub enum VeclaneError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Kernel error: {0}")]
    Kernel(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VeclaneError>;
