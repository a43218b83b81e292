//! Scripted socket for session unit tests.
//!
//! `MockSocket` plays back a queue of incoming frames and records
//! everything sent through it. Allocation, connect, and drop counts are
//! tracked in thread-locals so tests can observe the client session
//! discarding one socket and allocating another. Each test runs on its
//! own thread, so the counters don't interfere across tests.

use std::cell::Cell;
use std::collections::VecDeque;

use wampline_transport::{ClientSocket, ConnectOptions, SocketState, TransportError, Uri};

thread_local! {
    static ALLOCATED: Cell<usize> = const { Cell::new(0) };
    static CONNECTED: Cell<usize> = const { Cell::new(0) };
    static DROPPED: Cell<usize> = const { Cell::new(0) };
}

/// Resets all counters; call at the top of each test that reads them.
pub(crate) fn reset_counters() {
    ALLOCATED.with(|c| c.set(0));
    CONNECTED.with(|c| c.set(0));
    DROPPED.with(|c| c.set(0));
}

/// Sockets allocated via `MockSocket::default()` on this thread.
pub(crate) fn allocated() -> usize {
    ALLOCATED.with(Cell::get)
}

/// Successful `connect` calls on this thread.
pub(crate) fn connected() -> usize {
    CONNECTED.with(Cell::get)
}

/// Sockets dropped on this thread.
pub(crate) fn dropped() -> usize {
    DROPPED.with(Cell::get)
}

pub(crate) struct MockSocket {
    pub(crate) incoming: VecDeque<String>,
    pub(crate) sent: Vec<String>,
    pub(crate) state: SocketState,
    pub(crate) options: ConnectOptions,
}

impl MockSocket {
    /// A socket that will play back the given frames, oldest first.
    pub(crate) fn with_incoming(frames: impl IntoIterator<Item = &'static str>) -> Self {
        let mut socket = Self::default();
        socket.incoming = frames.into_iter().map(str::to_owned).collect();
        socket
    }

    /// Options access without the state gate, for assertions.
    pub(crate) fn peek_options(&self) -> &ConnectOptions {
        &self.options
    }
}

impl Default for MockSocket {
    fn default() -> Self {
        ALLOCATED.with(|c| c.set(c.get() + 1));
        Self {
            incoming: VecDeque::new(),
            sent: Vec::new(),
            state: SocketState::None,
            options: ConnectOptions::default(),
        }
    }
}

impl Drop for MockSocket {
    fn drop(&mut self) {
        DROPPED.with(|c| c.set(c.get() + 1));
    }
}

impl ClientSocket for MockSocket {
    async fn connect(&mut self, _uri: &Uri) -> Result<(), TransportError> {
        if self.state != SocketState::None {
            return Err(TransportError::InvalidState(self.state));
        }
        CONNECTED.with(|c| c.set(c.get() + 1));
        self.state = SocketState::Open;
        Ok(())
    }

    async fn send_text(&mut self, frame: &str) -> Result<(), TransportError> {
        self.sent.push(frame.to_owned());
        Ok(())
    }

    async fn receive_text(&mut self) -> Result<String, TransportError> {
        match self.incoming.pop_front() {
            Some(frame) => Ok(frame),
            // No scripted frames left: block forever, like a silent peer.
            None => std::future::pending().await,
        }
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        if self.state == SocketState::Closed {
            return Err(TransportError::Closed);
        }
        self.state = SocketState::Closed;
        Ok(())
    }

    fn state(&self) -> SocketState {
        self.state
    }

    fn options_mut(&mut self) -> Result<&mut ConnectOptions, TransportError> {
        if self.state != SocketState::None {
            return Err(TransportError::InvalidState(self.state));
        }
        Ok(&mut self.options)
    }
}
