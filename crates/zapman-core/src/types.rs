//! Credential types shared by the signer, the verifier, and the client.

use std::fmt;

use crate::error::{ZapmanError, ZapmanResult};

/// Client identifier issued by Zapman, sent verbatim in `x-client-id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientId(String);

impl ClientId {
    /// Create a new client ID.
    ///
    /// # Errors
    /// Returns an error if the ID is empty.
    pub fn new(id: impl Into<String>) -> ZapmanResult<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(ZapmanError::EmptyClientId);
        }
        Ok(Self(id))
    }

    /// Get the client ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A client ID paired with the shared secret used to sign its requests.
///
/// The secret never leaves the process; `Debug` output redacts it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: ClientId,
    client_secret: String,
}

impl Credentials {
    /// Create credentials from a client ID and secret.
    ///
    /// # Errors
    /// Returns an error if either value is empty.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> ZapmanResult<Self> {
        let client_id = ClientId::new(client_id)?;
        let client_secret = client_secret.into();
        if client_secret.is_empty() {
            return Err(ZapmanError::Config("client secret must not be empty".to_owned()));
        }
        Ok(Self {
            client_id,
            client_secret,
        })
    }

    /// The client ID.
    #[must_use]
    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// The shared secret used as the HMAC key.
    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}
