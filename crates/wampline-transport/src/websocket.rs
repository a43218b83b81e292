//! WebSocket client socket implementation using `tokio-tungstenite`.

use std::io;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::{self, HeaderName, HeaderValue};
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async_tls_with_config, Connector, MaybeTlsStream, WebSocketStream};

use crate::{ClientSocket, ConnectOptions, SocketState, TransportError, Uri};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A one-shot WebSocket client socket.
///
/// Allocated unconnected, configured through
/// [`options_mut`](ClientSocket::options_mut), connected at most once.
/// After a disconnect the socket cannot be re-armed; the session layer
/// allocates a fresh one (`Default` is the allocation point) and re-applies
/// its configuration.
pub struct WebSocketClient {
    options: ConnectOptions,
    state: SocketState,
    stream: Option<WsStream>,
}

impl WebSocketClient {
    /// A fresh, unconnected socket with default options.
    pub fn new() -> Self {
        Self {
            options: ConnectOptions::default(),
            state: SocketState::None,
            stream: None,
        }
    }

    fn build_request(
        &self,
        uri: &Uri,
    ) -> Result<tokio_tungstenite::tungstenite::handshake::client::Request, TransportError> {
        let mut request = uri.clone().into_client_request().map_err(|e| {
            TransportError::ConnectFailed(io::Error::new(io::ErrorKind::InvalidInput, e))
        })?;

        for (name, value) in self.options.headers() {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                TransportError::InvalidHeader { name: name.clone() }
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|_| {
                TransportError::InvalidHeader { name: name.clone() }
            })?;
            request.headers_mut().insert(header_name, header_value);
        }

        if let Some(auth) = self.options.authorization_header() {
            let header_value = HeaderValue::from_str(&auth).map_err(|_| {
                TransportError::InvalidHeader {
                    name: "Authorization".to_owned(),
                }
            })?;
            request.headers_mut().insert(header::AUTHORIZATION, header_value);
        }

        Ok(request)
    }

    fn build_connector(&self) -> Result<Option<Connector>, TransportError> {
        if !self.options.wants_invalid_certs() {
            return Ok(None);
        }
        let tls = native_tls::TlsConnector::builder()
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true)
            .build()
            .map_err(|e| TransportError::Tls(io::Error::new(io::ErrorKind::InvalidInput, e)))?;
        Ok(Some(Connector::NativeTls(tls)))
    }
}

impl Default for WebSocketClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientSocket for WebSocketClient {
    async fn connect(&mut self, uri: &Uri) -> Result<(), TransportError> {
        if self.state != SocketState::None {
            return Err(TransportError::InvalidState(self.state));
        }

        let request = self.build_request(uri)?;
        let connector = self.build_connector()?;

        self.state = SocketState::Connecting;
        match connect_async_tls_with_config(request, None, false, connector).await {
            Ok((stream, response)) => {
                tracing::debug!(%uri, status = %response.status(), "WebSocket handshake complete");
                self.stream = Some(stream);
                self.state = SocketState::Open;
                Ok(())
            }
            Err(e) => {
                self.state = SocketState::Aborted;
                Err(TransportError::ConnectFailed(io::Error::new(
                    io::ErrorKind::ConnectionRefused,
                    e,
                )))
            }
        }
    }

    async fn send_text(&mut self, frame: &str) -> Result<(), TransportError> {
        let stream = self
            .stream
            .as_mut()
            .ok_or(TransportError::InvalidState(self.state))?;
        stream
            .send(Message::Text(frame.to_owned().into()))
            .await
            .map_err(|e| {
                TransportError::SendFailed(io::Error::new(io::ErrorKind::BrokenPipe, e))
            })
    }

    async fn receive_text(&mut self) -> Result<String, TransportError> {
        let stream = self
            .stream
            .as_mut()
            .ok_or(TransportError::InvalidState(self.state))?;
        loop {
            match stream.next().await {
                // Empty text frames are passed up verbatim; the session's
                // retry loop deals with them.
                Some(Ok(Message::Text(text))) => return Ok(text.as_str().to_owned()),
                Some(Ok(Message::Binary(data))) => {
                    return String::from_utf8(data.to_vec()).map_err(|e| {
                        TransportError::ReceiveFailed(io::Error::new(
                            io::ErrorKind::InvalidData,
                            e,
                        ))
                    });
                }
                Some(Ok(Message::Close(_))) | None => {
                    self.state = SocketState::Closed;
                    return Err(TransportError::Closed);
                }
                Some(Ok(_)) => continue, // skip ping/pong/frame
                Some(Err(e)) => {
                    self.state = SocketState::Aborted;
                    return Err(TransportError::ReceiveFailed(io::Error::new(
                        io::ErrorKind::ConnectionReset,
                        e,
                    )));
                }
            }
        }
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        let stream = self
            .stream
            .as_mut()
            .ok_or(TransportError::InvalidState(self.state))?;
        self.state = SocketState::CloseSent;
        let frame = CloseFrame {
            code: CloseCode::Normal,
            reason: "".into(),
        };
        match stream.close(Some(frame)).await {
            Ok(()) => {
                self.state = SocketState::Closed;
                Ok(())
            }
            Err(tokio_tungstenite::tungstenite::Error::ConnectionClosed)
            | Err(tokio_tungstenite::tungstenite::Error::AlreadyClosed) => {
                self.state = SocketState::Closed;
                Err(TransportError::Closed)
            }
            Err(e) => {
                self.state = SocketState::Aborted;
                Err(TransportError::SendFailed(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    e,
                )))
            }
        }
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
