//! HMAC-SHA256 request signing and verification for the Zapman API.
//!
//! Every authenticated Zapman request carries three headers: the client ID,
//! the Unix timestamp the request was signed at, and a signature computed as
//!
//! ```text
//! hex(HMAC-SHA256(client_secret, "{client_id}|{timestamp}|{body_json}|{query_string}"))
//! ```
//!
//! The body and query string are signed byte-for-byte as they go on the wire,
//! so callers must sign the already-serialized body rather than a value that is
//! serialized again later.
//!
//! # Usage
//!
//! ```rust
//! use zapman_auth::signature::{SigningInput, compute_signature};
//!
//! let input = SigningInput {
//!     client_id: "abc",
//!     client_secret: "secret",
//!     timestamp: 1_700_000_000,
//!     body_json: "{}",
//!     query_string: "",
//! };
//! let signature = compute_signature(&input).unwrap();
//! assert_eq!(signature.len(), 64);
//! ```
//!
//! # Modules
//!
//! - [`signature`] - Signing string construction and signature computation
//! - [`headers`] - The `x-client-id` / `x-signature` / `x-timestamp` header contract
//! - [`credentials`] - Credential provider trait and in-memory implementation
//! - [`verify`] - Receiving-side verification with a clock-skew window
//! - [`error`] - Authentication error types

pub mod credentials;
pub mod error;
pub mod headers;
pub mod signature;
pub mod verify;

pub use credentials::{CredentialProvider, StaticCredentialProvider};
pub use error::AuthError;
pub use headers::SignedHeaders;
pub use signature::{SigningInput, build_signing_string, compute_signature, current_timestamp};
pub use verify::{AuthResult, DEFAULT_MAX_SKEW, verify_signature};
