//! Error types for the protocol layer.

use crate::codes::Operation;

/// Errors that can occur while building code tables or translating
/// messages to and from the wire.
///
/// Every malformed-response variant carries the raw frame text so the
/// embedding application can log exactly what the peer sent.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serializing a request to its wire frame failed.
    #[error("encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// The received frame is not valid JSON at all.
    #[error("response is not valid JSON: {frame:?}")]
    NotJson {
        /// The offending frame text, verbatim.
        frame: String,
        #[source]
        source: serde_json::Error,
    },

    /// The received frame parsed, but the root value is not a JSON array.
    #[error("response is not a JSON array: {frame:?}")]
    NotAnArray {
        /// The offending frame text, verbatim.
        frame: String,
    },

    /// The received JSON array has zero elements.
    #[error("response array is empty: {frame:?}")]
    EmptyResponse {
        /// The offending frame text, verbatim.
        frame: String,
    },

    /// The first array element is missing, non-numeric, or does not fit
    /// an unsigned 16-bit message code.
    #[error("first element is not a u16 message code: {frame:?}")]
    InvalidCode {
        /// The offending frame text, verbatim.
        frame: String,
    },

    /// A required operation has no numeric code assigned. Raised when a
    /// code table is built (including via enum projection) without one of
    /// the subscriber role's required codes.
    #[error("no {0} code configured for the subscriber role")]
    MissingCode(Operation),
}

impl ProtocolError {
    /// The raw frame text of a malformed response, if this error has one.
    pub fn frame(&self) -> Option<&str> {
        match self {
            Self::NotJson { frame, .. }
            | Self::NotAnArray { frame }
            | Self::EmptyResponse { frame }
            | Self::InvalidCode { frame } => Some(frame),
            Self::Encode(_) | Self::MissingCode(_) => None,
        }
    }
}
