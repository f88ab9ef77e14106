//! Integration tests for the Zapman client toolkit.
//!
//! `test_signing` runs the client against a mock API whose request matcher
//! verifies every signature with
//! [`zapman_auth::verify_signature`], the same check the real API performs.
//!
//! `test_live` talks to a real Zapman API and is marked `#[ignore]`. Run it
//! with credentials in the environment (or a `.env` file):
//!
//! ```text
//! cargo test -p zapman-integration -- --ignored
//! ```

use std::sync::{Arc, Once};
use std::time::Duration;

use wiremock::{Match, Request};
use zapman_auth::{
    CredentialProvider, StaticCredentialProvider, current_timestamp, verify_signature,
};
use zapman_client::ZapmanClient;
use zapman_core::Credentials;

static INIT: Once = Once::new();

/// Client ID used against the mock API.
pub const TEST_CLIENT_ID: &str = "test-client";
/// Client secret used against the mock API.
pub const TEST_CLIENT_SECRET: &str = "test-secret";

/// Initialize tracing (once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Credentials the mock API accepts.
#[must_use]
pub fn test_credentials() -> Credentials {
    Credentials::new(TEST_CLIENT_ID, TEST_CLIENT_SECRET)
        .unwrap_or_else(|e| panic!("invalid test credentials: {e}"))
}

/// A client for `endpoint` signing with `credentials`.
#[must_use]
pub fn client_for(endpoint: &str, credentials: Credentials) -> ZapmanClient {
    init_tracing();
    ZapmanClient::new(endpoint, credentials)
        .unwrap_or_else(|e| panic!("failed to build client for {endpoint}: {e}"))
}

/// Wiremock matcher that accepts only correctly signed requests.
#[derive(Clone)]
pub struct ValidSignature {
    provider: Arc<dyn CredentialProvider>,
    max_skew: Duration,
}

impl std::fmt::Debug for ValidSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidSignature")
            .field("max_skew", &self.max_skew)
            .finish_non_exhaustive()
    }
}

impl ValidSignature {
    /// Accept requests signed by any of the given clients.
    #[must_use]
    pub fn for_clients(clients: &[&Credentials]) -> Self {
        let provider = StaticCredentialProvider::new(clients.iter().map(|c| {
            (
                c.client_id().as_str().to_owned(),
                c.client_secret().to_owned(),
            )
        }));
        Self {
            provider: Arc::new(provider),
            max_skew: zapman_auth::DEFAULT_MAX_SKEW,
        }
    }
}

impl Match for ValidSignature {
    fn matches(&self, request: &Request) -> bool {
        let Ok(req) = http::Request::builder()
            .method(request.method.clone())
            .uri(request.url.as_str())
            .body(())
        else {
            return false;
        };
        let (mut parts, ()) = req.into_parts();
        parts.headers = request.headers.clone();

        match verify_signature(
            &parts,
            &request.body,
            self.provider.as_ref(),
            current_timestamp(),
            self.max_skew,
        ) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(error = %e, url = %request.url, "mock API rejected signature");
                false
            }
        }
    }
}

mod test_live;
mod test_signing;
