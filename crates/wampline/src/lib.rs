//! # Wampline
//!
//! A client-side WAMP-like publish/subscribe convention over a text
//! WebSocket transport. Frames are JSON arrays whose first element is a
//! numeric message code: `[code, elem0, elem1, ...]`.
//!
//! The interesting parts live in the sub-crates and are re-exported here:
//! code tables projected from user enums (`wampline-protocol`), a one-shot
//! client socket over `tokio-tungstenite` (`wampline-transport`), and
//! sessions that manage the socket across connect/reconnect cycles
//! (`wampline-session`).
//!
//! ## Quick Start
//!
//! ```no_run
//! use wampline::prelude::*;
//!
//! code_enum! {
//!     pub enum LeagueCode {
//!         Subscribe = 5,
//!         Unsubscribe = 6,
//!         Event = 8,
//!     }
//! }
//!
//! # async fn run() -> Result<(), wampline::WamplineError> {
//! let mut client: TypedSubscriberClient<LeagueCode> = TypedSubscriberClient::new()?;
//! client.use_options(|options| {
//!     options.accept_invalid_certs(true);
//!     options.basic_auth("riot", "token");
//! });
//! client.connect("wss://127.0.0.1:52345/").await?;
//! client.subscribe("OnJsonApiEvent").await?;
//! let event = client.receive().await?;
//! client.close().await?;
//! # Ok(())
//! # }
//! ```

pub use wampline_protocol as protocol;
pub use wampline_session as session;
pub use wampline_transport as transport;

mod error;

pub use error::WamplineError;

/// The user-facing surface in one import.
pub mod prelude {
    pub use wampline_protocol::{
        code_enum, codec, CodeEnum, EnumCode, Operation, ProtocolError, Request, Response,
        SubscriberCodes, SubscriberCodesBuilder, TypedRequest, TypedResponse,
        EMPTY_FRAME_RETRY_LIMIT,
    };
    pub use wampline_session::{
        SessionError, Subscriber, SubscriberClient, TypedSubscriber, TypedSubscriberClient,
        UserAgent,
    };
    pub use wampline_transport::{
        ClientSocket, ConnectOptions, Credentials, SocketState, TransportError, Uri,
        WebSocketClient,
    };

    pub use crate::WamplineError;
}
