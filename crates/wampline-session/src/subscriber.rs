//! The subscriber role session: the minimal generic surface every role
//! shares (send, receive, close, state) plus the subscriber's own
//! convenience operations.
//!
//! A session owns exactly one socket and one immutable code table. It
//! assumes one exchange in flight at a time: all operations take
//! `&mut self`, so frames sent and received on one session are FIFO
//! relative to each other by construction. Pipelining across a single
//! socket is not supported.

use tokio_util::sync::CancellationToken;
use wampline_protocol::{codec, Request, Response, SubscriberCodes, EMPTY_FRAME_RETRY_LIMIT};
use wampline_transport::{ClientSocket, SocketState, Uri};

use crate::SessionError;

/// A subscriber-role session over any [`ClientSocket`].
///
/// Generic over the socket so tests can script one; production code uses
/// [`SubscriberClient`](crate::SubscriberClient), which layers the connect
/// lifecycle on top.
///
/// Dropping the session drops the owned socket unconditionally, whether or
/// not any exchange happened.
pub struct Subscriber<S: ClientSocket> {
    socket: S,
    codes: SubscriberCodes,
    cancel: CancellationToken,
}

impl<S: ClientSocket> Subscriber<S> {
    /// A session owning the given socket and code table.
    pub fn new(socket: S, codes: SubscriberCodes) -> Self {
        Self {
            socket,
            codes,
            cancel: CancellationToken::new(),
        }
    }

    /// Replaces the cancellation token. Every suspending operation races
    /// against it and reports [`SessionError::Cancelled`] when it fires.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// The session's code table.
    pub fn codes(&self) -> &SubscriberCodes {
        &self.codes
    }

    /// Read-only projection of the socket's connection state.
    pub fn state(&self) -> SocketState {
        self.socket.state()
    }

    pub(crate) fn socket(&self) -> &S {
        &self.socket
    }

    pub(crate) fn socket_mut(&mut self) -> &mut S {
        &mut self.socket
    }

    /// Swaps in a fresh socket, dropping (and thereby releasing) the old
    /// one. The client session calls this on reconnect.
    pub(crate) fn replace_socket(&mut self, socket: S) {
        self.socket = socket;
    }

    pub(crate) async fn connect_socket(&mut self, uri: &Uri) -> Result<(), SessionError> {
        let cancel = self.cancel.clone();
        tokio::select! {
            _ = cancel.cancelled() => Err(SessionError::Cancelled),
            result = self.socket.connect(uri) => Ok(result?),
        }
    }

    /// Encodes and writes one frame, returning once the transport has
    /// accepted it. Transport failures propagate unchanged.
    pub async fn send(&mut self, request: &Request) -> Result<(), SessionError> {
        let frame = codec::encode(request)?;
        tracing::debug!(code = request.code(), "sending frame");
        let cancel = self.cancel.clone();
        tokio::select! {
            _ = cancel.cancelled() => Err(SessionError::Cancelled),
            result = self.socket.send_text(&frame) => Ok(result?),
        }
    }

    /// Reads, validates, and decodes one response frame.
    ///
    /// Some peers transiently emit an empty text frame where a JSON array
    /// belongs; each empty read is followed by a fresh blocking read, up
    /// to [`EMPTY_FRAME_RETRY_LIMIT`] attempts with no imposed delay. If
    /// the ceiling is exhausted the last (empty) read is decoded anyway,
    /// so the caller sees a malformed-response error instead of an
    /// unbounded loop.
    pub async fn receive(&mut self) -> Result<Response, SessionError> {
        let cancel = self.cancel.clone();
        let mut frame = String::new();
        for _ in 0..EMPTY_FRAME_RETRY_LIMIT {
            frame = tokio::select! {
                _ = cancel.cancelled() => return Err(SessionError::Cancelled),
                result = self.socket.receive_text() => result?,
            };
            if !frame.is_empty() {
                break;
            }
        }
        let response = codec::decode(&frame)?;
        tracing::debug!(
            code = response.code(),
            elements = response.elements().len(),
            "received frame"
        );
        Ok(response)
    }

    /// Requests a normal-closure handshake on the socket.
    ///
    /// Not guaranteed idempotent: depending on the transport's state, a
    /// second close may fail.
    pub async fn close(&mut self) -> Result<(), SessionError> {
        let cancel = self.cancel.clone();
        tokio::select! {
            _ = cancel.cancelled() => Err(SessionError::Cancelled),
            result = self.socket.close() => Ok(result?),
        }
    }

    /// Sends `[codes.subscribe, topic]`. A pure composition over
    /// [`send`](Self::send); no extra protocol state.
    pub async fn subscribe(&mut self, topic: &str) -> Result<(), SessionError> {
        let request = Request::new(self.codes.subscribe()).arg(topic);
        self.send(&request).await
    }

    /// Sends `[codes.unsubscribe, topic]`.
    pub async fn unsubscribe(&mut self, topic: &str) -> Result<(), SessionError> {
        let request = Request::new(self.codes.unsubscribe()).arg(topic);
        self.send(&request).await
    }
}
