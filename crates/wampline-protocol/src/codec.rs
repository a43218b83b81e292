//! The wire codec: requests to JSON-array text frames and back.
//!
//! One text frame is one JSON array, `[code, elem0, elem1, ...]`. Encoding
//! is infallible in practice (payload elements are already JSON values);
//! decoding validates shape strictly and reports every failure with the
//! offending frame attached, because "the peer sent something weird" is a
//! debugging session waiting to happen.

use serde_json::Value;

use crate::{ProtocolError, Request, Response};

/// How many consecutive empty text frames a receive loop reads before
/// giving up and decoding the last (empty) read.
///
/// At least one real-world peer (the League of Legends client) sometimes
/// emits an empty text frame where a JSON array belongs, and a fresh read
/// returns a proper frame. The retries are plain blocking reads with no
/// delay; the ceiling bounds attempts, not wall-clock time, and an
/// exhausted ceiling surfaces [`ProtocolError::NotJson`] rather than
/// looping forever.
pub const EMPTY_FRAME_RETRY_LIMIT: usize = 100;

/// Encodes a request into its wire frame.
///
/// The request is not mutated and element order is preserved exactly.
///
/// # Errors
/// [`ProtocolError::Encode`] if serialization fails.
pub fn encode(request: &Request) -> Result<String, ProtocolError> {
    serde_json::to_string(request).map_err(ProtocolError::Encode)
}

/// Parses and validates one wire frame into a [`Response`].
///
/// Validation stops at shape: the root must be a JSON array, the array
/// must be non-empty, and the first element must be a number representable
/// as `u16`. Everything after the code is handed back raw.
///
/// # Errors
/// The malformed-response family of [`ProtocolError`], each carrying the
/// frame text.
pub fn decode(frame: &str) -> Result<Response, ProtocolError> {
    let root: Value = serde_json::from_str(frame).map_err(|source| ProtocolError::NotJson {
        frame: frame.to_owned(),
        source,
    })?;

    let Value::Array(mut elements) = root else {
        return Err(ProtocolError::NotAnArray {
            frame: frame.to_owned(),
        });
    };

    if elements.is_empty() {
        return Err(ProtocolError::EmptyResponse {
            frame: frame.to_owned(),
        });
    }

    // as_u64 rejects floats and negatives; try_from rejects > u16::MAX.
    let code = elements[0]
        .as_u64()
        .and_then(|n| u16::try_from(n).ok())
        .ok_or_else(|| ProtocolError::InvalidCode {
            frame: frame.to_owned(),
        })?;

    elements.remove(0);
    Ok(Response::new(code, elements))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_encode_decode_roundtrip_recovers_code_and_payload() {
        let request = Request::new(36)
            .arg("topic")
            .arg(7)
            .arg(json!({"nested": [1, 2]}));

        let response = decode(&encode(&request).unwrap()).unwrap();

        assert_eq!(response.code(), 36);
        assert_eq!(
            response.elements(),
            &[json!("topic"), json!(7), json!({"nested": [1, 2]})]
        );
    }

    #[test]
    fn test_encode_does_not_mutate_request() {
        let request = Request::new(1).arg("a");
        let before = request.clone();
        encode(&request).unwrap();
        assert_eq!(request, before);
    }

    #[test]
    fn test_decode_code_only_frame_succeeds_with_empty_payload() {
        let response = decode("[5]").unwrap();
        assert_eq!(response.code(), 5);
        assert!(response.elements().is_empty());
    }

    #[test]
    fn test_decode_not_json_fails() {
        let err = decode("not json").unwrap_err();
        assert!(matches!(err, ProtocolError::NotJson { .. }));
        assert_eq!(err.frame(), Some("not json"));
    }

    #[test]
    fn test_decode_empty_string_fails_as_not_json() {
        // What an exhausted empty-frame retry loop ends up decoding.
        let err = decode("").unwrap_err();
        assert!(matches!(err, ProtocolError::NotJson { .. }));
    }

    #[test]
    fn test_decode_non_array_root_fails() {
        let err = decode("{\"code\": 5}").unwrap_err();
        assert!(matches!(err, ProtocolError::NotAnArray { .. }));
    }

    #[test]
    fn test_decode_empty_array_fails() {
        let err = decode("[]").unwrap_err();
        assert!(matches!(err, ProtocolError::EmptyResponse { .. }));
    }

    #[test]
    fn test_decode_non_numeric_first_element_fails() {
        let err = decode("[\"x\",1]").unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidCode { .. }));
    }

    #[test]
    fn test_decode_code_above_u16_range_fails() {
        let err = decode("[70000]").unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidCode { .. }));
    }

    #[test]
    fn test_decode_negative_code_fails() {
        let err = decode("[-1]").unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidCode { .. }));
    }

    #[test]
    fn test_decode_fractional_code_fails() {
        let err = decode("[3.5]").unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidCode { .. }));
    }

    #[test]
    fn test_decode_preserves_element_order() {
        let response = decode("[2,\"b\",\"a\",3,1]").unwrap();
        assert_eq!(
            response.elements(),
            &[json!("b"), json!("a"), json!(3), json!(1)]
        );
    }
}
