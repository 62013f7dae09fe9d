use thiserror::Error;

/// Top-level error type for the DBT Dost workspace.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for DostError` so that `?` works across crate
/// boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DostError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Knowledge base error: {0}")]
    KnowledgeBase(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for DostError {
    fn from(err: toml::de::Error) -> Self {
        DostError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for DostError {
    fn from(err: toml::ser::Error) -> Self {
        DostError::Config(err.to_string())
    }
}

/// A specialized `Result` type for DBT Dost operations.
pub type Result<T> = std::result::Result<T, DostError>;
