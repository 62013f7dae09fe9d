//! Error types for the chat assistant.

use dost_core::error::DostError;

use crate::messages::Message;

/// Errors raised while building or loading a knowledge base.
///
/// Resolution itself never fails; these only surface at startup.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("category id cannot be empty")]
    EmptyCategoryId,
    #[error("duplicate category id: {0}")]
    DuplicateCategory(String),
    #[error("category '{0}' has no responses")]
    EmptyResponses(String),
    #[error("category '{0}' has an empty keyword")]
    EmptyKeyword(String),
    #[error("failed to read knowledge base: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid knowledge base file: {0}")]
    Parse(String),
}

impl From<toml::de::Error> for ChatError {
    fn from(err: toml::de::Error) -> Self {
        ChatError::Parse(err.to_string())
    }
}

impl From<ChatError> for DostError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::Io(e) => DostError::Io(e),
            other => DostError::KnowledgeBase(other.to_string()),
        }
    }
}

/// Why a remote answer could not be relayed.
///
/// Callers never see this as an error value; it is mapped to a localized
/// string and kept alongside it for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    /// The request never completed at the transport layer.
    #[error("remote service unreachable: {0}")]
    Unavailable(String),
    /// The service answered with a non-success status.
    #[error("remote service rejected the request with status {0}")]
    Rejected(u16),
    /// The service answered successfully but without a usable `answer`.
    #[error("remote service returned no answer")]
    Malformed,
}

impl RemoteError {
    /// The user-facing message substituted for this failure.
    pub fn message(&self) -> Message {
        match self {
            RemoteError::Unavailable(_) => Message::NetworkError,
            RemoteError::Rejected(_) => Message::ServerError,
            RemoteError::Malformed => Message::NoAnswer,
        }
    }
}
