//! Credential provider trait and implementations.
//!
//! The verifier resolves a client's shared secret through [`CredentialProvider`],
//! so it can be backed by a configuration file, a database, or the static map
//! below.

use std::collections::HashMap;

use zapman_core::Credentials;

use crate::error::AuthError;

/// Trait for looking up client secrets by client ID.
pub trait CredentialProvider: Send + Sync {
    /// Retrieve the secret for the given client ID.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::ClientNotFound`] if the client ID is not recognized.
    fn get_secret(&self, client_id: &str) -> Result<String, AuthError>;
}

/// A simple in-memory credential provider backed by a `HashMap`.
///
/// # Examples
///
/// ```
/// use zapman_auth::credentials::{CredentialProvider, StaticCredentialProvider};
///
/// let provider = StaticCredentialProvider::new(vec![
///     ("abc".to_owned(), "secret".to_owned()),
/// ]);
///
/// assert_eq!(provider.get_secret("abc").unwrap(), "secret");
/// ```
#[derive(Clone)]
pub struct StaticCredentialProvider {
    secrets: HashMap<String, String>,
}

impl StaticCredentialProvider {
    /// Create a provider from an iterable of (client_id, client_secret) pairs.
    pub fn new(secrets: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            secrets: secrets.into_iter().collect(),
        }
    }

    /// Create a provider holding a single client.
    #[must_use]
    pub fn single(credentials: &Credentials) -> Self {
        Self::new([(
            credentials.client_id().as_str().to_owned(),
            credentials.client_secret().to_owned(),
        )])
    }
}

impl std::fmt::Debug for StaticCredentialProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentialProvider")
            .field("clients", &self.secrets.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl CredentialProvider for StaticCredentialProvider {
    fn get_secret(&self, client_id: &str) -> Result<String, AuthError> {
        self.secrets
            .get(client_id)
            .cloned()
            .ok_or_else(|| AuthError::ClientNotFound(client_id.to_owned()))
    }
}
