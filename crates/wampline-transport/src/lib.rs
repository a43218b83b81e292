//! Client-side transport abstraction for Wampline.
//!
//! Provides the [`ClientSocket`] trait (the narrow contract the session
//! layer consumes) and [`WebSocketClient`], its `tokio-tungstenite`
//! implementation.
//!
//! A [`ClientSocket`] is a one-shot device: it starts in
//! [`SocketState::None`], can attempt exactly one connect, and cannot be
//! re-armed once it leaves that initial state. Reconnecting means
//! allocating a fresh socket (the session layer does this), which is also
//! why [`ConnectOptions`] are only writable before the first connect
//! attempt.

#![allow(async_fn_in_trait)]

mod error;
mod options;
mod websocket;

pub use error::TransportError;
pub use options::{ConnectOptions, Credentials};
pub use websocket::WebSocketClient;

/// The URI type used for connect targets, re-exported from the HTTP stack
/// `tokio-tungstenite` is built on.
pub use tokio_tungstenite::tungstenite::http::Uri;

use std::fmt;

/// The lifecycle state of a client socket.
///
/// ```text
///   None ──(connect)──→ Connecting ──→ Open ──(close)──→ CloseSent ──→ Closed
///                            │
///                            └──(handshake failure)──→ Aborted
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocketState {
    /// Freshly allocated; no connect attempt yet. The only state in which
    /// options may be mutated.
    None,
    /// A connect attempt is in flight.
    Connecting,
    /// Connected; frames can flow.
    Open,
    /// A close handshake has been initiated locally.
    CloseSent,
    /// The connection is fully closed.
    Closed,
    /// The connection failed or was torn down without a close handshake.
    Aborted,
}

impl fmt::Display for SocketState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SocketState::None => "none",
            SocketState::Connecting => "connecting",
            SocketState::Open => "open",
            SocketState::CloseSent => "close-sent",
            SocketState::Closed => "closed",
            SocketState::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// A client socket that can connect once, exchange text frames, and close.
///
/// All I/O methods suspend; cancellation is the caller's concern (the
/// session layer races these futures against its cancellation token).
pub trait ClientSocket: Send + 'static {
    /// Attempts the connection handshake against an absolute URI.
    ///
    /// Exactly one underlying attempt is made; no retry or backoff.
    ///
    /// # Errors
    /// [`TransportError::InvalidState`] if a connect was already
    /// attempted on this socket; [`TransportError::ConnectFailed`] if the
    /// attempt itself fails (the socket is then [`SocketState::Aborted`]).
    async fn connect(&mut self, uri: &Uri) -> Result<(), TransportError>;

    /// Writes one text frame, returning once the transport has accepted it.
    async fn send_text(&mut self, frame: &str) -> Result<(), TransportError>;

    /// Reads one text frame, which may legitimately be empty.
    ///
    /// Empty frames are returned verbatim; the bounded retry for peers
    /// that emit them lives in the session layer, not here.
    async fn receive_text(&mut self) -> Result<String, TransportError>;

    /// Initiates a normal-closure handshake.
    ///
    /// Not guaranteed idempotent: a second close may fail depending on
    /// what state the transport is in by then.
    async fn close(&mut self) -> Result<(), TransportError>;

    /// The socket's current lifecycle state.
    fn state(&self) -> SocketState;

    /// The mutable pre-connect configuration.
    ///
    /// # Errors
    /// [`TransportError::InvalidState`] once the socket has left
    /// [`SocketState::None`].
    fn options_mut(&mut self) -> Result<&mut ConnectOptions, TransportError>;
}
