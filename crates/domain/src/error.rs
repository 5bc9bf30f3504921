//! Domain error types.

use thiserror::Error;

/// Errors raised while interpreting stream payloads.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The payload does not match the schema of its type.
    #[error("Malformed {message_type} payload: {source}")]
    MalformedPayload {
        message_type: String,
        #[source]
        source: serde_json::Error,
    },

    /// The payload parsed but violates a command invariant.
    #[error("Invalid {command_type} command: {reason}")]
    InvalidCommand {
        command_type: &'static str,
        reason: String,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DomainError {
    pub(crate) fn malformed(message_type: &str, source: serde_json::Error) -> Self {
        DomainError::MalformedPayload {
            message_type: message_type.to_string(),
            source,
        }
    }
}
