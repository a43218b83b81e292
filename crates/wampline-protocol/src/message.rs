//! Wire messages: outbound requests and inbound responses.
//!
//! Both directions are a numeric code plus an ordered payload. The payload
//! elements are `serde_json::Value`s in both cases, but for different
//! reasons: a request accepts anything serializable and freezes it into
//! JSON values so ordering survives encoding exactly, while a response
//! keeps whatever the peer sent *undecoded*, because only the caller knows
//! what shape to expect for a given code.
//!
//! The typed variants ([`TypedRequest`], [`TypedResponse`]) substitute a
//! user [`CodeEnum`] for the raw `u16` at the API boundary. That
//! substitution is a reversible reinterpretation, never a validation
//! step; see [`EnumCode`].

use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde_json::Value;

use crate::CodeEnum;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// An outbound message: numeric code plus ordered payload elements.
///
/// Serializes as the wire array `[code, elem0, elem1, ...]`.
///
/// ```
/// use wampline_protocol::Request;
///
/// let request = Request::new(33).arg("OnJsonApiEvent");
/// assert_eq!(serde_json::to_string(&request).unwrap(), r#"[33,"OnJsonApiEvent"]"#);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    code: u16,
    elements: Vec<Value>,
}

impl Request {
    /// A request with the given code and no payload.
    pub fn new(code: u16) -> Self {
        Self {
            code,
            elements: Vec::new(),
        }
    }

    /// A request with the given code and payload elements.
    pub fn with(code: u16, elements: Vec<Value>) -> Self {
        Self { code, elements }
    }

    /// Appends a payload element, chainable.
    pub fn arg(mut self, element: impl Into<Value>) -> Self {
        self.elements.push(element.into());
        self
    }

    /// Appends a payload element in place.
    pub fn push(&mut self, element: Value) {
        self.elements.push(element);
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    /// The payload elements, in wire order.
    pub fn elements(&self) -> &[Value] {
        &self.elements
    }
}

impl Serialize for Request {
    /// `[code, elem0, elem1, ...]`: the code is element zero, the payload
    /// follows in insertion order.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.elements.len() + 1))?;
        seq.serialize_element(&self.code)?;
        for element in &self.elements {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// An inbound message: numeric code plus the raw, not-yet-interpreted
/// payload elements.
///
/// The codec validates the frame's *shape* (array, non-empty, numeric
/// head) but deliberately leaves the payload as opaque JSON values; per-code
/// payload schemas are the embedding application's business.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    code: u16,
    elements: Vec<Value>,
}

impl Response {
    pub fn new(code: u16, elements: Vec<Value>) -> Self {
        Self { code, elements }
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    /// The raw payload elements, in wire order.
    pub fn elements(&self) -> &[Value] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Value> {
        self.elements
    }
}

// ---------------------------------------------------------------------------
// EnumCode
// ---------------------------------------------------------------------------

/// A wire code reinterpreted through a user enum.
///
/// Codes the enum models come back as [`EnumCode::Known`]; anything else
/// wraps as [`EnumCode::Unknown`] with the raw value preserved. Wrapping
/// instead of failing is a deliberate, permissive policy: peers evolve and
/// introduce codes a deployed client's enum does not model yet, and a
/// subscriber must keep receiving through that. The reinterpretation is
/// lossless; [`raw`](Self::raw) always recovers the wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumCode<E> {
    /// The enum has a member with this code.
    Known(E),
    /// The wire carried a code the enum does not model.
    Unknown(u16),
}

impl<E: CodeEnum> EnumCode<E> {
    /// Reinterprets a raw wire code.
    pub fn from_raw(code: u16) -> Self {
        match E::from_code(code) {
            Some(member) => Self::Known(member),
            None => Self::Unknown(code),
        }
    }

    /// The underlying wire code, whichever side it came from.
    pub fn raw(self) -> u16 {
        match self {
            Self::Known(member) => member.code(),
            Self::Unknown(code) => code,
        }
    }

    /// The enum member, if the code was modelled.
    pub fn known(self) -> Option<E> {
        match self {
            Self::Known(member) => Some(member),
            Self::Unknown(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Typed request/response
// ---------------------------------------------------------------------------

/// A [`Request`] whose code is a user enum member.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedRequest<E: CodeEnum> {
    code: E,
    request: Request,
}

impl<E: CodeEnum> TypedRequest<E> {
    pub fn new(code: E) -> Self {
        Self {
            code,
            request: Request::new(code.code()),
        }
    }

    /// Appends a payload element, chainable.
    pub fn arg(mut self, element: impl Into<Value>) -> Self {
        self.request.push(element.into());
        self
    }

    pub fn code(&self) -> E {
        self.code
    }

    pub fn elements(&self) -> &[Value] {
        self.request.elements()
    }

    /// The numeric-code view of this request. The session sends through
    /// this; no copy is made.
    pub fn as_request(&self) -> &Request {
        &self.request
    }
}

/// A [`Response`] whose code has been reinterpreted through a user enum.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedResponse<E: CodeEnum> {
    code: EnumCode<E>,
    elements: Vec<Value>,
}

impl<E: CodeEnum> TypedResponse<E> {
    /// Reinterprets a numeric response; the payload moves over untouched.
    pub fn from_response(response: Response) -> Self {
        Self {
            code: EnumCode::from_raw(response.code()),
            elements: response.into_elements(),
        }
    }

    pub fn code(&self) -> EnumCode<E> {
        self.code
    }

    /// The wire code, regardless of whether the enum models it.
    pub fn raw_code(&self) -> u16 {
        self.code.raw()
    }

    pub fn elements(&self) -> &[Value] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Value> {
        self.elements
    }
}
