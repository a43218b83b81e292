//! Error types for the transport layer.

use crate::SocketState;

/// Errors that can occur on a client socket.
///
/// Transport failures are wrapped for uniformity but never reinterpreted:
/// the source chain still leads to the underlying WebSocket/TLS error, and
/// upper layers pass these through to the caller unchanged.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The connection attempt failed (DNS, TCP, TLS, or WebSocket
    /// handshake).
    #[error("connect failed: {0}")]
    ConnectFailed(#[source] std::io::Error),

    /// Building the TLS connector failed.
    #[error("TLS configuration failed: {0}")]
    Tls(#[source] std::io::Error),

    /// A configured header name or value is not valid HTTP.
    #[error("invalid header {name:?}")]
    InvalidHeader { name: String },

    /// Writing a frame failed.
    #[error("send failed: {0}")]
    SendFailed(#[source] std::io::Error),

    /// Reading a frame failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] std::io::Error),

    /// The peer closed the connection.
    #[error("connection closed by peer")]
    Closed,

    /// The socket is in the wrong state for the operation, e.g. sending
    /// before connect, or mutating options after a connect attempt.
    #[error("socket is {0}")]
    InvalidState(SocketState),
}
