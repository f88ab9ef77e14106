//! Error types for request signing and verification.
//!
//! Signing can only fail on bad input. The remaining variants are produced
//! on the receiving side by [`verify_signature`](crate::verify::verify_signature).

/// Errors that can occur while signing or verifying a Zapman request.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// A signing input violated a precondition (empty id or secret,
    /// malformed JSON body, query string with a leading `?`).
    #[error("Invalid signing input: {0}")]
    InvalidInput(String),

    /// A required authentication header is missing or not valid UTF-8.
    #[error("Missing required header: {0}")]
    MissingHeader(String),

    /// The `x-timestamp` header is not a non-negative decimal integer.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// The client ID was not found in the credential store.
    #[error("Client not found: {0}")]
    ClientNotFound(String),

    /// The computed signature does not match the provided signature.
    #[error("Signature does not match")]
    SignatureDoesNotMatch,

    /// The request timestamp is outside the accepted clock-skew window.
    #[error("Request timestamp {timestamp} is outside the allowed window (now {now})")]
    RequestExpired {
        /// Timestamp carried by the request.
        timestamp: u64,
        /// Verifier clock at the time of the check.
        now: u64,
    },
}
