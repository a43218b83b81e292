//! Pre-connect socket configuration.
//!
//! A client socket's options can only be changed while the socket is still
//! in [`SocketState::None`](crate::SocketState::None). Once a connect
//! attempt has been made they are frozen, which is why the session layer
//! re-applies configuration to every freshly allocated socket instead of
//! setting it once.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

/// Mutable configuration applied to a socket before it connects.
#[derive(Debug, Clone, Default)]
pub struct ConnectOptions {
    headers: Vec<(String, String)>,
    credentials: Option<Credentials>,
    accept_invalid_certs: bool,
}

impl ConnectOptions {
    /// Appends a request header for the WebSocket handshake.
    ///
    /// Later headers with the same name win over earlier ones.
    pub fn header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets basic-auth credentials, sent as an `Authorization: Basic`
    /// header on the handshake request.
    pub fn basic_auth(
        &mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> &mut Self {
        self.credentials = Some(Credentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Disables TLS certificate validation for this connection.
    ///
    /// Needed for peers that present a self-signed certificate on
    /// loopback, such as the League client. Off by default.
    pub fn accept_invalid_certs(&mut self, accept: bool) -> &mut Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// The configured headers, in insertion order.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn wants_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }

    /// The `Authorization` header value for the configured credentials.
    pub(crate) fn authorization_header(&self) -> Option<String> {
        self.credentials.as_ref().map(|c| {
            let token = BASE64.encode(format!("{}:{}", c.username, c.password));
            format!("Basic {token}")
        })
    }
}

/// A username/password pair for basic auth.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// The password stays out of Debug output so credentials don't leak into
/// logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
