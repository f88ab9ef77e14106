//! Error types for the Zapman core.

/// Core error type for Zapman infrastructure.
#[derive(Debug, thiserror::Error)]
pub enum ZapmanError {
    /// A required environment variable is unset or empty.
    #[error("{0} is not defined in the environment or .env")]
    MissingEnv(&'static str),

    /// A client ID was empty.
    #[error("client id must not be empty")]
    EmptyClientId,

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience result type for Zapman operations.
pub type ZapmanResult<T> = Result<T, ZapmanError>;
