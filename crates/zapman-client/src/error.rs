//! Error types for the Zapman client.

use zapman_auth::AuthError;
use zapman_core::ZapmanError;

/// Errors returned by [`ZapmanClient`](crate::ZapmanClient) calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Required configuration was missing or invalid.
    #[error(transparent)]
    Config(#[from] ZapmanError),

    /// The request could not be signed.
    #[error("signing failed: {0}")]
    Auth(#[from] AuthError),

    /// Transport-level failure (connect, timeout, TLS, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("API returned HTTP {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The API answered 2xx but the envelope code is not a success code.
    #[error("API rejected the request with code {code}: {}", message.as_deref().unwrap_or("no message"))]
    Rejected {
        /// Envelope `code`, e.g. `ZAP40001`.
        code: String,
        /// Envelope `message`, if present.
        message: Option<String>,
    },

    /// A request body or response could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The endpoint and path do not form a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A lookup returned no results.
    #[error("{0} not found")]
    NotFound(&'static str),
}

/// Convenience result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
