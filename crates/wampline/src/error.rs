//! Unified error type for the Wampline stack.

use wampline_protocol::ProtocolError;
use wampline_session::SessionError;
use wampline_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `wampline` meta-crate, you deal with this single error
/// type instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant auto-generates `From` impls, so the `?`
/// operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum WamplineError {
    /// A protocol-level error (code tables, encode, malformed response).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A transport-level error (connect, send, receive, close).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A session-level error (URI arguments, cancellation, or a wrapped
    /// protocol/transport failure).
    #[error(transparent)]
    Session(#[from] SessionError),
}
