//! Subscriber sessions for Wampline.
//!
//! This crate turns the protocol and transport layers into something an
//! application can hold:
//!
//! 1. **Role session** ([`Subscriber`]) — the generic send/receive/close
//!    surface over any socket, with the subscriber's convenience
//!    operations and the bounded empty-frame receive retry.
//! 2. **Typed sessions** ([`TypedSubscriber`], [`TypedSubscriberClient`]) —
//!    the same surfaces with a user code enum substituted for raw `u16`
//!    codes at the boundary.
//! 3. **Client session** ([`SubscriberClient`]) — connect-by-URI,
//!    fresh-socket allocation across reconnects, and the pre-connect
//!    options callback.
//!
//! # How it fits in the stack
//!
//! ```text
//! Application (above)  ← subscribes to topics, interprets event payloads
//!     ↕
//! Session layer (this crate)  ← owns one socket + one code table
//!     ↕
//! Protocol / transport layers (below)  ← frames, codecs, the socket itself
//! ```

mod client;
mod error;
mod subscriber;
#[cfg(test)]
mod testing;
mod typed;
mod user_agent;

pub use client::SubscriberClient;
pub use error::SessionError;
pub use subscriber::Subscriber;
pub use typed::{TypedSubscriber, TypedSubscriberClient};
pub use user_agent::UserAgent;
