//! Receiving-side signature verification.
//!
//! The API recomputes the signature from the same four fields and the shared
//! secret, and rejects the request if the signatures differ or the timestamp
//! drifted too far from its own clock. [`verify_signature`] implements that
//! check so the header contract can be exercised end to end, and so callback
//! receivers signed the same way can authenticate requests.
//!
//! Steps:
//!
//! 1. Parse `x-client-id`, `x-timestamp` and `x-signature`.
//! 2. Reject timestamps outside the skew window.
//! 3. Resolve the client secret via the credential provider.
//! 4. Recompute the signature over the raw body (or `{}` when the body is
//!    empty) and the raw URI query.
//! 5. Compare in constant time.

use std::time::Duration;

use subtle::ConstantTimeEq;
use tracing::debug;

use crate::credentials::CredentialProvider;
use crate::error::AuthError;
use crate::headers::SignedHeaders;
use crate::signature::{EMPTY_BODY, SigningInput, compute_signature};

/// Default tolerance between the signer's clock and the verifier's.
pub const DEFAULT_MAX_SKEW: Duration = Duration::from_secs(300);

/// The result of a successful verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    /// The client ID that signed the request.
    pub client_id: String,
    /// The timestamp the request was signed at.
    pub timestamp: u64,
}

/// Verify a signed request.
///
/// `body` is the raw request body exactly as received and `now` is the
/// verifier's Unix time in seconds.
///
/// # Errors
///
/// Returns an [`AuthError`] if:
/// - an authentication header is missing or malformed
/// - the timestamp is more than `max_skew` away from `now`
/// - the client ID is not found
/// - the body is not UTF-8 JSON
/// - the signature does not match
pub fn verify_signature(
    parts: &http::request::Parts,
    body: &[u8],
    credential_provider: &dyn CredentialProvider,
    now: u64,
    max_skew: Duration,
) -> Result<AuthResult, AuthError> {
    let provided = SignedHeaders::from_header_map(&parts.headers)?;

    debug!(
        client_id = %provided.client_id,
        timestamp = provided.timestamp,
        "verifying request signature"
    );

    if provided.timestamp.abs_diff(now) > max_skew.as_secs() {
        return Err(AuthError::RequestExpired {
            timestamp: provided.timestamp,
            now,
        });
    }

    let secret = credential_provider.get_secret(&provided.client_id)?;

    let body_json = if body.is_empty() {
        EMPTY_BODY
    } else {
        std::str::from_utf8(body)
            .map_err(|_| AuthError::InvalidInput("body is not valid UTF-8".to_owned()))?
    };
    let query_string = parts.uri.query().unwrap_or("");

    let expected = compute_signature(&SigningInput {
        client_id: &provided.client_id,
        client_secret: &secret,
        timestamp: provided.timestamp,
        body_json,
        query_string,
    })?;

    if provided.signature.as_bytes().ct_eq(expected.as_bytes()).into() {
        debug!(client_id = %provided.client_id, "signature verification succeeded");
        Ok(AuthResult {
            client_id: provided.client_id,
            timestamp: provided.timestamp,
        })
    } else {
        debug!(
            client_id = %provided.client_id,
            provided = %provided.signature,
            "signature mismatch"
        );
        Err(AuthError::SignatureDoesNotMatch)
    }
}
