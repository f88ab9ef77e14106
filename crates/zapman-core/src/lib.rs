//! Core types, configuration, and errors for the Zapman client toolkit.
//!
//! This crate provides the building blocks shared by the signing, client, and
//! application crates: the [`Credentials`] value that every signed request is
//! computed against, and [`ZapmanConfig`], which loads those credentials and
//! the API endpoint from the environment.

mod config;
mod error;
mod types;

pub use config::ZapmanConfig;
pub use error::{ZapmanError, ZapmanResult};
pub use types::{ClientId, Credentials};
