//! Signing string construction and signature computation.
//!
//! The signing string joins four fields with `|`, in this fixed order:
//!
//! ```text
//! client_id|timestamp|body_json|query_string
//! ```
//!
//! The timestamp is rendered in plain base-10. The body is the exact JSON text
//! sent on the wire (`{}` when there is no body) and the query string is the
//! raw query without its leading `?` (empty when there is none).

use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::trace;

use crate::error::AuthError;

type HmacSha256 = Hmac<Sha256>;

/// Body signed for requests that carry no payload.
pub const EMPTY_BODY: &str = "{}";

/// Separator between signing string fields.
const SEPARATOR: char = '|';

/// The inputs to one signature computation.
///
/// Built immediately before a request and dropped after it; each request gets
/// a fresh timestamp and therefore a fresh signature.
#[derive(Clone, Copy)]
pub struct SigningInput<'a> {
    /// Client ID issued by Zapman.
    pub client_id: &'a str,
    /// Shared secret used as the HMAC key. Never transmitted.
    pub client_secret: &'a str,
    /// Unix epoch seconds at signing time.
    pub timestamp: u64,
    /// Exact serialized request body.
    pub body_json: &'a str,
    /// Exact raw query string, without the leading `?`.
    pub query_string: &'a str,
}

impl std::fmt::Debug for SigningInput<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningInput")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("timestamp", &self.timestamp)
            .field("body_json", &self.body_json)
            .field("query_string", &self.query_string)
            .finish()
    }
}

impl<'a> SigningInput<'a> {
    /// Borrow the id and secret from a [`Credentials`](zapman_core::Credentials) value.
    #[must_use]
    pub fn new(
        credentials: &'a zapman_core::Credentials,
        timestamp: u64,
        body_json: &'a str,
        query_string: &'a str,
    ) -> Self {
        Self {
            client_id: credentials.client_id().as_str(),
            client_secret: credentials.client_secret(),
            timestamp,
            body_json,
            query_string,
        }
    }

    /// Check the preconditions a signature may be computed under.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidInput`] if the client ID or secret is empty,
    /// the body is not valid JSON, or the query string starts with `?`.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.client_id.is_empty() {
            return Err(AuthError::InvalidInput("client id is empty".to_owned()));
        }
        if self.client_secret.is_empty() {
            return Err(AuthError::InvalidInput("client secret is empty".to_owned()));
        }
        if self.query_string.starts_with('?') {
            return Err(AuthError::InvalidInput(
                "query string must not start with '?'".to_owned(),
            ));
        }
        serde_json::from_str::<serde::de::IgnoredAny>(self.body_json)
            .map_err(|e| AuthError::InvalidInput(format!("body is not valid JSON: {e}")))?;
        Ok(())
    }
}

/// Build the signing string for the given input.
///
/// No validation is performed; see [`compute_signature`].
///
/// # Examples
///
/// ```
/// use zapman_auth::signature::{SigningInput, build_signing_string};
///
/// let input = SigningInput {
///     client_id: "abc",
///     client_secret: "secret",
///     timestamp: 1_700_000_000,
///     body_json: "{}",
///     query_string: "skip=0&take=1",
/// };
/// assert_eq!(build_signing_string(&input), "abc|1700000000|{}|skip=0&take=1");
/// ```
#[must_use]
pub fn build_signing_string(input: &SigningInput<'_>) -> String {
    let timestamp = input.timestamp.to_string();
    let mut s = String::with_capacity(
        input.client_id.len()
            + timestamp.len()
            + input.body_json.len()
            + input.query_string.len()
            + 3,
    );
    s.push_str(input.client_id);
    s.push(SEPARATOR);
    s.push_str(&timestamp);
    s.push(SEPARATOR);
    s.push_str(input.body_json);
    s.push(SEPARATOR);
    s.push_str(input.query_string);
    s
}

/// Compute the `x-signature` value: lowercase hex HMAC-SHA256 of the signing
/// string, keyed by the client secret.
///
/// # Errors
///
/// Returns [`AuthError::InvalidInput`] if the input fails
/// [`SigningInput::validate`]. The hashing step itself cannot fail.
pub fn compute_signature(input: &SigningInput<'_>) -> Result<String, AuthError> {
    input.validate()?;
    let signing_string = build_signing_string(input);
    trace!(signing_string, "built signing string");
    Ok(hmac_sha256_hex(
        input.client_secret.as_bytes(),
        signing_string.as_bytes(),
    ))
}

/// Current Unix time in whole seconds.
#[must_use]
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

/// Compute HMAC-SHA256 and return it hex-encoded.
pub(crate) fn hmac_sha256_hex(key: &[u8], data: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can accept keys of any length");
    mac.update(data);
    hex::encode(mac.finalize().into_bytes())
}
