//! Signed HTTP client for the Zapman payment API.
//!
//! [`ZapmanClient`] owns the credentials and a connection pool. Every call goes
//! through [`SignedRequest`], which serializes the body once, signs exactly
//! those bytes together with the query of the parsed URL and a fresh
//! timestamp, and sends the same bytes on the wire.
//!
//! ```rust,no_run
//! use zapman_client::{ListCustomersQuery, ZapmanClient};
//! use zapman_core::ZapmanConfig;
//!
//! # async fn run() -> Result<(), zapman_client::ClientError> {
//! let client = ZapmanClient::from_config(&ZapmanConfig::load())?;
//! let customers = client.list_customers(&ListCustomersQuery::new(0, 1)).await?;
//! println!("{}", serde_json::to_string_pretty(&customers)?);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod model;
mod request;

pub use client::ZapmanClient;
pub use error::{ClientError, ClientResult};
pub use model::{
    ApiResponse, Bank, CreateCustomerRequest, DepositRequest, ListCustomersQuery, SUCCESS_CODES,
};
pub use request::{PreparedRequest, SignedRequest};
