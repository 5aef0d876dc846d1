use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewerError {
    /// The registry failed to converge on the host list. Always a bug in the
    /// reconciler, never a host mistake.
    #[error("marker registry holds {registry} slots but the host list has {expected}")]
    Alignment { registry: usize, expected: usize },

    #[error("invalid viewer config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
