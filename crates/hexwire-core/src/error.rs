//! Shared error type across hexwire crates.

use thiserror::Error;

/// Boxed cause carried by handler and transport failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Stable error codes (what error sinks and logs see).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Not JSON, not an envelope, or an unrecognized `type`.
    MalformedEnvelope,
    /// Known type with a missing or mistyped field.
    InvalidPayload,
    /// A presentation handler failed on a validated payload.
    HandlerFailure,
    /// The underlying connection failed.
    Transport,
    /// No local player id yet.
    SessionUnavailable,
    /// Bad configuration.
    Config,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MalformedEnvelope => "MALFORMED_ENVELOPE",
            ErrorCode::InvalidPayload => "INVALID_PAYLOAD",
            ErrorCode::HandlerFailure => "HANDLER_FAILURE",
            ErrorCode::Transport => "TRANSPORT",
            ErrorCode::SessionUnavailable => "SESSION_UNAVAILABLE",
            ErrorCode::Config => "CONFIG",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, HexwireError>;

/// Unified error type used by core and client.
#[derive(Debug, Error)]
pub enum HexwireError {
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),
    #[error("unknown message type: {0}")]
    UnknownType(String),
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
    #[error("handler for {tag} failed: {source}")]
    HandlerFailure {
        tag: &'static str,
        #[source]
        source: BoxError,
    },
    #[error("transport failure: {0}")]
    Transport(#[source] BoxError),
    #[error("player session unavailable")]
    SessionUnavailable,
    #[error("config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl HexwireError {
    /// Map an error to its stable code. Unknown tags are malformed envelopes.
    pub fn code(&self) -> ErrorCode {
        match self {
            HexwireError::MalformedEnvelope(_) | HexwireError::UnknownType(_) => {
                ErrorCode::MalformedEnvelope
            }
            HexwireError::InvalidPayload(_) => ErrorCode::InvalidPayload,
            HexwireError::HandlerFailure { .. } => ErrorCode::HandlerFailure,
            HexwireError::Transport(_) => ErrorCode::Transport,
            HexwireError::SessionUnavailable => ErrorCode::SessionUnavailable,
            HexwireError::Config(_) => ErrorCode::Config,
            HexwireError::Internal(_) => ErrorCode::Internal,
        }
    }

    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        HexwireError::InvalidPayload(msg.into())
    }

    pub fn transport(cause: impl Into<BoxError>) -> Self {
        HexwireError::Transport(cause.into())
    }
}
