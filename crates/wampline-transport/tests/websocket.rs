//! Integration tests for the WebSocket client socket.
//!
//! These spin up a real `tokio-tungstenite` server on a loopback port and
//! drive a [`WebSocketClient`] against it, so the full handshake and
//! frame path are exercised rather than mocked.

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;
use wampline_transport::{ClientSocket, SocketState, TransportError, Uri, WebSocketClient};

/// Binds a loopback server and returns its connect URI plus the listener.
async fn bind_server() -> (Uri, TcpListener) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("should bind");
    let addr = listener.local_addr().expect("should have local addr");
    let uri: Uri = format!("ws://{addr}/").parse().expect("valid uri");
    (uri, listener)
}

#[tokio::test]
async fn test_connect_send_receive_close() {
    let (uri, listener) = bind_server().await;

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("should accept");
        let mut ws = tokio_tungstenite::accept_async(stream)
            .await
            .expect("should handshake");

        // Echo the client's frame back, then send one of our own.
        let msg = ws.next().await.unwrap().unwrap();
        assert_eq!(msg.into_text().unwrap().as_str(), "[33,\"topic\"]");
        ws.send(Message::Text("[36,\"event\"]".into()))
            .await
            .unwrap();

        // Drain until the client's close frame arrives.
        while let Some(Ok(msg)) = ws.next().await {
            if matches!(msg, Message::Close(_)) {
                break;
            }
        }
    });

    let mut socket = WebSocketClient::new();
    socket.connect(&uri).await.expect("should connect");
    assert_eq!(socket.state(), SocketState::Open);

    socket.send_text("[33,\"topic\"]").await.expect("should send");
    let frame = socket.receive_text().await.expect("should receive");
    assert_eq!(frame, "[36,\"event\"]");

    socket.close().await.expect("should close");
    assert_eq!(socket.state(), SocketState::Closed);

    server.await.expect("server task should finish");
}

#[tokio::test]
async fn test_receive_passes_empty_frames_through() {
    let (uri, listener) = bind_server().await;

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("should accept");
        let mut ws = tokio_tungstenite::accept_async(stream)
            .await
            .expect("should handshake");
        // An empty text frame, then a real one.
        ws.send(Message::Text("".into())).await.unwrap();
        ws.send(Message::Text("[5]".into())).await.unwrap();
    });

    let mut socket = WebSocketClient::new();
    socket.connect(&uri).await.expect("should connect");

    // The transport does NOT filter empty frames; that policy lives in
    // the session layer's retry loop.
    assert_eq!(socket.receive_text().await.unwrap(), "");
    assert_eq!(socket.receive_text().await.unwrap(), "[5]");

    server.await.expect("server task should finish");
}

#[tokio::test]
async fn test_receive_after_peer_close_reports_closed() {
    let (uri, listener) = bind_server().await;

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("should accept");
        let mut ws = tokio_tungstenite::accept_async(stream)
            .await
            .expect("should handshake");
        ws.close(None).await.unwrap();
    });

    let mut socket = WebSocketClient::new();
    socket.connect(&uri).await.expect("should connect");

    let err = socket.receive_text().await.unwrap_err();
    assert!(matches!(err, TransportError::Closed));
    assert_eq!(socket.state(), SocketState::Closed);

    server.await.expect("server task should finish");
}

#[tokio::test]
async fn test_handshake_carries_configured_headers() {
    let (uri, listener) = bind_server().await;

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("should accept");
        let mut user_agent = None;
        let mut authorization = None;
        let callback = |request: &tokio_tungstenite::tungstenite::handshake::server::Request,
                        response: tokio_tungstenite::tungstenite::handshake::server::Response| {
            user_agent = request
                .headers()
                .get("User-Agent")
                .map(|v| v.to_str().unwrap().to_owned());
            authorization = request
                .headers()
                .get("Authorization")
                .map(|v| v.to_str().unwrap().to_owned());
            Ok(response)
        };
        let _ws = tokio_tungstenite::accept_hdr_async(stream, callback)
            .await
            .expect("should handshake");
        (user_agent, authorization)
    });

    let mut socket = WebSocketClient::new();
    socket
        .options_mut()
        .unwrap()
        .header("User-Agent", "wampline-test/0.1")
        .basic_auth("riot", "sekrit");
    socket.connect(&uri).await.expect("should connect");

    let (user_agent, authorization) = server.await.expect("server task should finish");
    assert_eq!(user_agent.as_deref(), Some("wampline-test/0.1"));
    assert_eq!(authorization.as_deref(), Some("Basic cmlvdDpzZWtyaXQ="));
}
