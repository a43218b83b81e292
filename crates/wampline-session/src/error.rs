//! Error types for the session layer.

use wampline_protocol::ProtocolError;
use wampline_transport::TransportError;

/// Errors surfaced by session operations.
///
/// The variants keep the caller's failure classes distinct: "my input was
/// invalid" (`InvalidUri`, and `Protocol(MissingCode)`), "the peer
/// misbehaved" (the malformed `Protocol` variants), "the connection
/// failed" (`Transport`), "I cancelled" (`Cancelled`), so embedding
/// applications can attach different retry policies to each. This library
/// never retries connects or sends on its own.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A protocol-level failure: malformed response or code-table
    /// configuration.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A transport-level failure, passed through unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The connect URI argument was empty or not an absolute URI.
    #[error("invalid connect URI {value:?}: {reason}")]
    InvalidUri { value: String, reason: String },

    /// A suspending operation was cancelled before completion. In-flight
    /// I/O is abandoned, not retried.
    #[error("operation cancelled")]
    Cancelled,
}
