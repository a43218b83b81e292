//! Wire protocol for Wampline.
//!
//! This crate defines everything that is *about* the wire but not *on* the
//! wire's socket:
//!
//! - **Code tables** ([`SubscriberCodes`], [`Operation`], the
//!   [`code_enum!`] macro) — which numeric code means which protocol
//!   operation for a given peer.
//! - **Messages** ([`Request`], [`Response`] and their enum-typed
//!   variants) — a code plus an ordered payload, in each direction.
//! - **Codec** ([`codec::encode`], [`codec::decode`]) — the JSON-array
//!   frame format `[code, elem0, elem1, ...]` and its validation.
//! - **Errors** ([`ProtocolError`]) — configuration and malformed-response
//!   failures, with the offending frame text attached.
//!
//! The protocol layer knows nothing about sockets or sessions; it only
//! turns messages into text frames and back.

pub mod codec;
mod codes;
mod error;
mod message;

pub use codec::EMPTY_FRAME_RETRY_LIMIT;
pub use codes::{CodeEnum, Operation, SubscriberCodes, SubscriberCodesBuilder};
pub use error::ProtocolError;
pub use message::{EnumCode, Request, Response, TypedRequest, TypedResponse};
