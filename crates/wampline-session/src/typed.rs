//! Enum-typed session surfaces.
//!
//! These wrappers re-expose the session API with a user [`CodeEnum`]
//! substituted for the raw `u16` message code. They hold no state of
//! their own beyond the inner session: the enum-to-u16 reinterpretation
//! happens exactly once, at the send/receive boundary, and unrecognized
//! inbound codes wrap as [`EnumCode::Unknown`](wampline_protocol::EnumCode)
//! instead of failing.

use std::marker::PhantomData;

use wampline_protocol::{
    CodeEnum, ProtocolError, SubscriberCodes, TypedRequest, TypedResponse,
};
use wampline_transport::{ClientSocket, SocketState, Uri, WebSocketClient};

use crate::{SessionError, Subscriber, SubscriberClient};

// ---------------------------------------------------------------------------
// TypedSubscriber
// ---------------------------------------------------------------------------

/// A [`Subscriber`] whose codes are members of `E`.
pub struct TypedSubscriber<E: CodeEnum, S: ClientSocket> {
    inner: Subscriber<S>,
    _codes: PhantomData<E>,
}

impl<E: CodeEnum, S: ClientSocket> std::fmt::Debug for TypedSubscriber<E, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedSubscriber").finish_non_exhaustive()
    }
}

impl<E: CodeEnum, S: ClientSocket> TypedSubscriber<E, S> {
    /// A typed session over the given socket, with the code table
    /// projected from `E`.
    ///
    /// # Errors
    /// [`ProtocolError::MissingCode`] if `E` does not name all the
    /// subscriber role's required operations.
    pub fn new(socket: S) -> Result<Self, ProtocolError> {
        let codes = SubscriberCodes::from_enum::<E>()?;
        Ok(Self::from_session(Subscriber::new(socket, codes)))
    }

    /// Wraps an existing session without touching its code table.
    pub fn from_session(inner: Subscriber<S>) -> Self {
        Self {
            inner,
            _codes: PhantomData,
        }
    }

    pub fn codes(&self) -> &SubscriberCodes {
        self.inner.codes()
    }

    pub fn state(&self) -> SocketState {
        self.inner.state()
    }

    pub async fn send(&mut self, request: &TypedRequest<E>) -> Result<(), SessionError> {
        self.inner.send(request.as_request()).await
    }

    pub async fn receive(&mut self) -> Result<TypedResponse<E>, SessionError> {
        Ok(TypedResponse::from_response(self.inner.receive().await?))
    }

    pub async fn close(&mut self) -> Result<(), SessionError> {
        self.inner.close().await
    }

    pub async fn subscribe(&mut self, topic: &str) -> Result<(), SessionError> {
        self.inner.subscribe(topic).await
    }

    pub async fn unsubscribe(&mut self, topic: &str) -> Result<(), SessionError> {
        self.inner.unsubscribe(topic).await
    }
}

// ---------------------------------------------------------------------------
// TypedSubscriberClient
// ---------------------------------------------------------------------------

/// A [`SubscriberClient`] whose codes are members of `E`.
///
/// ```no_run
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// use wampline_protocol::code_enum;
/// use wampline_session::TypedSubscriberClient;
///
/// code_enum! {
///     pub enum LeagueCode {
///         Subscribe = 5,
///         Unsubscribe = 6,
///         Event = 8,
///     }
/// }
///
/// let mut client: TypedSubscriberClient<LeagueCode> = TypedSubscriberClient::new()?;
/// client.connect("wss://127.0.0.1:52345/").await?;
/// client.subscribe("OnJsonApiEvent").await?;
/// let event = client.receive().await?;
/// println!("{:?} {:?}", event.code(), event.elements());
/// # Ok(())
/// # }
/// ```
pub struct TypedSubscriberClient<E: CodeEnum, S: ClientSocket + Default = WebSocketClient> {
    inner: SubscriberClient<S>,
    _codes: PhantomData<E>,
}

impl<E: CodeEnum, S: ClientSocket + Default> TypedSubscriberClient<E, S> {
    /// A typed client with the code table projected from `E`.
    ///
    /// # Errors
    /// [`ProtocolError::MissingCode`] if `E` does not name all the
    /// subscriber role's required operations. Surfaced here, at first
    /// use of the projection, rather than at enum definition.
    pub fn new() -> Result<Self, ProtocolError> {
        let codes = SubscriberCodes::from_enum::<E>()?;
        Ok(Self {
            inner: SubscriberClient::with_codes(codes),
            _codes: PhantomData,
        })
    }

    /// See [`SubscriberClient::use_options`].
    pub fn use_options<F>(&mut self, callback: F)
    where
        F: FnMut(&mut wampline_transport::ConnectOptions) + Send + 'static,
    {
        self.inner.use_options(callback);
    }

    /// See [`SubscriberClient::connect`].
    pub async fn connect(&mut self, uri: &str) -> Result<(), SessionError> {
        self.inner.connect(uri).await
    }

    /// See [`SubscriberClient::connect_uri`].
    pub async fn connect_uri(&mut self, uri: Uri) -> Result<(), SessionError> {
        self.inner.connect_uri(uri).await
    }

    pub async fn send(&mut self, request: &TypedRequest<E>) -> Result<(), SessionError> {
        self.inner.send(request.as_request()).await
    }

    pub async fn receive(&mut self) -> Result<TypedResponse<E>, SessionError> {
        Ok(TypedResponse::from_response(self.inner.receive().await?))
    }

    pub async fn close(&mut self) -> Result<(), SessionError> {
        self.inner.close().await
    }

    pub async fn subscribe(&mut self, topic: &str) -> Result<(), SessionError> {
        self.inner.subscribe(topic).await
    }

    pub async fn unsubscribe(&mut self, topic: &str) -> Result<(), SessionError> {
        self.inner.unsubscribe(topic).await
    }

    pub fn state(&self) -> SocketState {
        self.inner.state()
    }

    pub fn codes(&self) -> &SubscriberCodes {
        self.inner.codes()
    }
}
