//! The authentication header contract.
//!
//! | Header | Value |
//! |---|---|
//! | `x-client-id` | client ID, verbatim |
//! | `x-signature` | lowercase hex HMAC-SHA256 |
//! | `x-timestamp` | decimal Unix timestamp |
//! | `Content-Type` | `application/json` |

use http::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use zapman_core::Credentials;

use crate::error::AuthError;
use crate::signature::{SigningInput, compute_signature};

/// Header carrying the client ID.
pub const CLIENT_ID_HEADER: &str = "x-client-id";
/// Header carrying the hex signature.
pub const SIGNATURE_HEADER: &str = "x-signature";
/// Header carrying the signing timestamp.
pub const TIMESTAMP_HEADER: &str = "x-timestamp";
/// Content type of every request, signed or not.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// The three authentication header values for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// Client ID sent in `x-client-id`.
    pub client_id: String,
    /// Unix timestamp sent in `x-timestamp`.
    pub timestamp: u64,
    /// Hex signature sent in `x-signature`.
    pub signature: String,
}

impl SignedHeaders {
    /// Sign a request body and query string at the given timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidInput`] if the body or query string cannot be signed.
    pub fn sign(
        credentials: &Credentials,
        timestamp: u64,
        body_json: &str,
        query_string: &str,
    ) -> Result<Self, AuthError> {
        let input = SigningInput::new(credentials, timestamp, body_json, query_string);
        let signature = compute_signature(&input)?;
        Ok(Self {
            client_id: credentials.client_id().as_str().to_owned(),
            timestamp,
            signature,
        })
    }

    /// Render the headers, including `Content-Type: application/json`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidInput`] if the client ID is not a valid header value.
    pub fn to_header_map(&self) -> Result<HeaderMap, AuthError> {
        let mut headers = HeaderMap::with_capacity(4);
        let client_id = HeaderValue::from_str(&self.client_id).map_err(|_| {
            AuthError::InvalidInput("client id is not a valid header value".to_owned())
        })?;
        headers.insert(CLIENT_ID_HEADER, client_id);
        headers.insert(
            SIGNATURE_HEADER,
            HeaderValue::from_str(&self.signature)
                .map_err(|_| AuthError::InvalidInput("signature is not hex".to_owned()))?,
        );
        headers.insert(TIMESTAMP_HEADER, HeaderValue::from(self.timestamp));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        Ok(headers)
    }

    /// Parse the authentication headers from an incoming request.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingHeader`] if any of the three headers is absent
    /// or not UTF-8, or [`AuthError::InvalidTimestamp`] if `x-timestamp` is not
    /// a plain decimal integer.
    pub fn from_header_map(headers: &HeaderMap) -> Result<Self, AuthError> {
        let client_id = header_str(headers, CLIENT_ID_HEADER)?;
        let signature = header_str(headers, SIGNATURE_HEADER)?;
        let raw_timestamp = header_str(headers, TIMESTAMP_HEADER)?;

        if raw_timestamp.is_empty() || !raw_timestamp.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AuthError::InvalidTimestamp(raw_timestamp.to_owned()));
        }
        let timestamp = raw_timestamp
            .parse()
            .map_err(|_| AuthError::InvalidTimestamp(raw_timestamp.to_owned()))?;

        Ok(Self {
            client_id: client_id.to_owned(),
            timestamp,
            signature: signature.to_owned(),
        })
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, AuthError> {
    headers
        .get(name)
        .ok_or_else(|| AuthError::MissingHeader(name.to_owned()))?
        .to_str()
        .map_err(|_| AuthError::MissingHeader(name.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials::new("abc", "secret").unwrap()
    }

    #[test]
    fn test_should_render_all_four_headers() {
        let signed = SignedHeaders::sign(&creds(), 1_700_000_000, "{}", "").unwrap();
        let headers = signed.to_header_map().unwrap();

        assert_eq!(headers.get(CLIENT_ID_HEADER).unwrap(), "abc");
        assert_eq!(headers.get(TIMESTAMP_HEADER).unwrap(), "1700000000");
        assert_eq!(
            headers.get(SIGNATURE_HEADER).unwrap(),
            "871e4467fc2332b423026817cc5ee79d2c195d60ba224fb4e85af4c78ddbd5e9"
        );
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), JSON_CONTENT_TYPE);
    }

    #[test]
    fn test_should_parse_rendered_headers_back() {
        let signed = SignedHeaders::sign(&creds(), 1_700_000_000, "{}", "skip=0&take=1").unwrap();
        let parsed = SignedHeaders::from_header_map(&signed.to_header_map().unwrap()).unwrap();
        assert_eq!(parsed, signed);
    }

    #[test]
    fn test_should_report_missing_signature_header() {
        let mut headers = HeaderMap::new();
        headers.insert(CLIENT_ID_HEADER, HeaderValue::from_static("abc"));
        headers.insert(TIMESTAMP_HEADER, HeaderValue::from_static("1700000000"));

        let err = SignedHeaders::from_header_map(&headers).unwrap_err();
        assert!(matches!(err, AuthError::MissingHeader(name) if name == SIGNATURE_HEADER));
    }

    #[test]
    fn test_should_reject_signed_or_fractional_timestamp() {
        for bad in ["-1", "+5", "1.5", "", "1e9"] {
            let mut headers = HeaderMap::new();
            headers.insert(CLIENT_ID_HEADER, HeaderValue::from_static("abc"));
            headers.insert(SIGNATURE_HEADER, HeaderValue::from_static("00"));
            headers.insert(TIMESTAMP_HEADER, HeaderValue::from_str(bad).unwrap());
            assert!(
                matches!(
                    SignedHeaders::from_header_map(&headers),
                    Err(AuthError::InvalidTimestamp(_))
                ),
                "timestamp {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_should_reject_client_id_that_is_not_a_header_value() {
        let signed = SignedHeaders {
            client_id: "bad\nid".to_owned(),
            timestamp: 1,
            signature: "00".to_owned(),
        };
        assert!(matches!(
            signed.to_header_map(),
            Err(AuthError::InvalidInput(_))
        ));
    }
}
