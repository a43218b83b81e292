//! The client session: connection lifecycle on top of the subscriber role.

use wampline_protocol::{Request, Response, SubscriberCodes};
use wampline_transport::{ClientSocket, ConnectOptions, SocketState, Uri, WebSocketClient};

use tokio_util::sync::CancellationToken;

use crate::{SessionError, Subscriber, UserAgent};

/// The pre-connect configuration callback. At most one is registered;
/// registering another replaces it.
type ConfigureOptions = Box<dyn FnMut(&mut ConnectOptions) + Send>;

/// A subscriber session that manages its own socket across connect and
/// reconnect cycles.
///
/// The underlying socket primitive cannot be re-armed once it has left its
/// initial state, so [`connect`](Self::connect) discards an already-used
/// socket and allocates a fresh one. Configuration that must survive that
/// re-allocation (TLS overrides, credentials, headers) goes through
/// [`use_options`](Self::use_options), which is re-applied to every fresh
/// socket immediately before the connect attempt.
///
/// ```no_run
/// # async fn run() -> Result<(), wampline_session::SessionError> {
/// use wampline_session::SubscriberClient;
///
/// let mut client = SubscriberClient::new();
/// client.use_options(|options| {
///     options.basic_auth("riot", "token");
/// });
/// client.connect("wss://127.0.0.1:52345/").await?;
/// client.subscribe("OnJsonApiEvent").await?;
/// let event = client.receive().await?;
/// client.close().await?;
/// # Ok(())
/// # }
/// ```
pub struct SubscriberClient<S: ClientSocket + Default = WebSocketClient> {
    session: Subscriber<S>,
    configure: Option<ConfigureOptions>,
    user_agent: UserAgent,
}

impl SubscriberClient {
    /// A WebSocket client speaking the basic profile.
    pub fn new() -> Self {
        Self::with_codes(SubscriberCodes::basic_profile().clone())
    }
}

impl<S: ClientSocket + Default> SubscriberClient<S> {
    /// A client speaking a custom code table.
    pub fn with_codes(codes: SubscriberCodes) -> Self {
        Self {
            session: Subscriber::new(S::default(), codes),
            configure: None,
            user_agent: UserAgent::library(),
        }
    }

    /// Overrides the identification string sent as the `User-Agent`
    /// header on every connect.
    pub fn user_agent(mut self, user_agent: UserAgent) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Installs a cancellation token raced by every suspending operation.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.session = self.session.with_cancellation(cancel);
        self
    }

    /// Registers the pre-connect configuration callback.
    ///
    /// The callback runs against the socket's mutable options immediately
    /// before each future connect attempt. Once a socket has attempted a
    /// connect its options are frozen, which is why configuration is
    /// replayed per connect rather than set once. Registering a new
    /// callback replaces the previous one; callbacks do not stack.
    pub fn use_options<F>(&mut self, callback: F)
    where
        F: FnMut(&mut ConnectOptions) + Send + 'static,
    {
        self.configure = Some(Box::new(callback));
    }

    /// Connects to a URI given in string form.
    ///
    /// # Errors
    /// [`SessionError::InvalidUri`] if the string is empty, does not
    /// parse, or is not absolute; otherwise as
    /// [`connect_uri`](Self::connect_uri).
    pub async fn connect(&mut self, uri: &str) -> Result<(), SessionError> {
        if uri.is_empty() {
            return Err(SessionError::InvalidUri {
                value: String::new(),
                reason: "URI is empty".to_owned(),
            });
        }
        let parsed: Uri = uri.parse().map_err(|e| SessionError::InvalidUri {
            value: uri.to_owned(),
            reason: format!("{e}"),
        })?;
        self.connect_uri(parsed).await
    }

    /// Connects to an absolute URI.
    ///
    /// If the currently held socket has left its initial state from a
    /// previous connect/close cycle, it is discarded and a fresh socket
    /// allocated first. The user-agent header and the registered options
    /// callback are applied to the socket's options, then exactly one
    /// underlying connect attempt is made; no retry, no backoff.
    pub async fn connect_uri(&mut self, uri: Uri) -> Result<(), SessionError> {
        if uri.scheme().is_none() || uri.authority().is_none() {
            return Err(SessionError::InvalidUri {
                value: uri.to_string(),
                reason: "URI must be absolute".to_owned(),
            });
        }

        if self.session.state() != SocketState::None {
            tracing::debug!(state = %self.session.state(), "discarding used socket");
            self.session.replace_socket(S::default());
        }

        {
            let options = self.session.socket_mut().options_mut()?;
            options.header("User-Agent", self.user_agent.to_string());
            if let Some(configure) = self.configure.as_mut() {
                configure(options);
            }
        }

        tracing::info!(%uri, "connecting");
        self.session.connect_socket(&uri).await
    }

    /// See [`Subscriber::send`].
    pub async fn send(&mut self, request: &Request) -> Result<(), SessionError> {
        self.session.send(request).await
    }

    /// See [`Subscriber::receive`].
    pub async fn receive(&mut self) -> Result<Response, SessionError> {
        self.session.receive().await
    }

    /// See [`Subscriber::close`].
    pub async fn close(&mut self) -> Result<(), SessionError> {
        self.session.close().await
    }

    /// See [`Subscriber::subscribe`].
    pub async fn subscribe(&mut self, topic: &str) -> Result<(), SessionError> {
        self.session.subscribe(topic).await
    }

    /// See [`Subscriber::unsubscribe`].
    pub async fn unsubscribe(&mut self, topic: &str) -> Result<(), SessionError> {
        self.session.unsubscribe(topic).await
    }

    /// The socket's current connection state.
    pub fn state(&self) -> SocketState {
        self.session.state()
    }

    /// The session's code table.
    pub fn codes(&self) -> &SubscriberCodes {
        self.session.codes()
    }

    pub(crate) fn session(&self) -> &Subscriber<S> {
        &self.session
    }
}

impl<S: ClientSocket + Default> Default for SubscriberClient<S> {
    fn default() -> Self {
        Self::with_codes(SubscriberCodes::basic_profile().clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::testing::{self, MockSocket};

    fn client() -> SubscriberClient<MockSocket> {
        SubscriberClient::with_codes(SubscriberCodes::basic_profile().clone())
    }

    // =====================================================================
    // URI validation
    // =====================================================================

    #[tokio::test]
    async fn test_connect_empty_uri_fails_with_invalid_uri() {
        let err = client().connect("").await.unwrap_err();
        assert!(matches!(err, SessionError::InvalidUri { .. }));
    }

    #[tokio::test]
    async fn test_connect_relative_uri_fails_naming_the_value() {
        // "not-a-uri" parses as a bare path; it is not absolute.
        let err = client().connect("not-a-uri").await.unwrap_err();
        match err {
            SessionError::InvalidUri { value, .. } => assert_eq!(value, "not-a-uri"),
            other => panic!("expected InvalidUri, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connect_unparseable_uri_fails_naming_the_value() {
        let err = client().connect("ws://exa mple/").await.unwrap_err();
        match err {
            SessionError::InvalidUri { value, .. } => assert_eq!(value, "ws://exa mple/"),
            other => panic!("expected InvalidUri, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connect_absolute_uri_succeeds_and_opens_socket() {
        let mut client = client();
        client.connect("ws://127.0.0.1:9/").await.unwrap();
        assert_eq!(client.state(), SocketState::Open);
    }

    // =====================================================================
    // Socket lifecycle across reconnects
    // =====================================================================

    #[tokio::test]
    async fn test_reconnect_discards_used_socket_and_allocates_fresh() {
        testing::reset_counters();
        let mut client = client();
        assert_eq!(testing::allocated(), 1);

        client.connect("ws://127.0.0.1:9/").await.unwrap();
        // Still the original socket: it was in None state.
        assert_eq!(testing::allocated(), 1);

        client.connect("ws://127.0.0.1:9/").await.unwrap();
        // The Open socket cannot be re-armed: one dropped, one fresh.
        assert_eq!(testing::allocated(), 2);
        assert_eq!(testing::dropped(), 1);
        assert_eq!(testing::connected(), 2);
    }

    #[tokio::test]
    async fn test_invalid_uri_does_not_touch_the_socket() {
        testing::reset_counters();
        let mut client = client();
        client.connect("ws://127.0.0.1:9/").await.unwrap();
        let _ = client.connect("").await.unwrap_err();
        // Validation failed before any discard or connect attempt.
        assert_eq!(testing::allocated(), 1);
        assert_eq!(testing::connected(), 1);
    }

    #[tokio::test]
    async fn test_options_callback_reapplied_to_each_fresh_socket() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);

        let mut client = client();
        client.use_options(move |options| {
            seen.fetch_add(1, Ordering::SeqCst);
            options.accept_invalid_certs(true);
        });

        client.connect("wss://127.0.0.1:9/").await.unwrap();
        client.connect("wss://127.0.0.1:9/").await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        // The second, fresh socket got the configuration too.
        assert!(client.session().socket().peek_options().wants_invalid_certs());
    }

    #[tokio::test]
    async fn test_use_options_replaces_previous_callback() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let mut client = client();
        let counter = Arc::clone(&first);
        client.use_options(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let counter = Arc::clone(&second);
        client.use_options(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        client.connect("ws://127.0.0.1:9/").await.unwrap();

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_connect_applies_user_agent_header() {
        let mut client = client();
        client.connect("ws://127.0.0.1:9/").await.unwrap();
        let headers = client.session().socket().peek_options().headers().to_vec();
        let expected = UserAgent::library().to_string();
        assert!(headers.contains(&("User-Agent".to_owned(), expected)));
    }

    #[tokio::test]
    async fn test_subscribe_uses_custom_code_table() {
        let codes = SubscriberCodes::builder()
            .subscribe(5)
            .unsubscribe(6)
            .event(8)
            .build()
            .unwrap();
        let mut client: SubscriberClient<MockSocket> = SubscriberClient::with_codes(codes);
        client.connect("ws://127.0.0.1:9/").await.unwrap();
        client.subscribe("OnJsonApiEvent").await.unwrap();
        assert_eq!(
            client.session().socket().sent,
            vec!["[5,\"OnJsonApiEvent\"]".to_owned()]
        );
    }
}
