use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown scope: {0}")]
    UnknownScope(String),
    #[error("unknown tier: {0}")]
    UnknownTier(String),
    #[error("unknown flag: {0}")]
    UnknownFlag(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
