//! The Zapman API client.

use std::time::Duration;

use http::Method;
use tracing::{debug, info, warn};
use zapman_core::{Credentials, ZapmanConfig};

use crate::error::{ClientError, ClientResult};
use crate::model::{
    ApiResponse, Bank, CreateCustomerRequest, DepositRequest, ListCustomersQuery,
};
use crate::request::{PreparedRequest, SignedRequest};

const BANK_PATH: &str = "/v1/client/bank";
const CUSTOMER_PATH: &str = "/v1/client/customer";
const DEPOSIT_PATH: &str = "/v1/client/tx/deposit";

/// Default per-request timeout when none is configured.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A signed HTTP client for one Zapman merchant account.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ZapmanClient {
    http: reqwest::Client,
    endpoint: String,
    credentials: Credentials,
}

impl ZapmanClient {
    /// Create a client for `endpoint` with the default timeout.
    ///
    /// A trailing `/` on the endpoint is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the endpoint is not an http(s)
    /// URL, or [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, credentials: Credentials) -> ClientResult<Self> {
        Self::with_timeout(endpoint, credentials, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit per-request timeout.
    ///
    /// # Errors
    ///
    /// See [`ZapmanClient::new`].
    pub fn with_timeout(
        endpoint: impl Into<String>,
        credentials: Credentials,
        timeout: Duration,
    ) -> ClientResult<Self> {
        let endpoint = endpoint.into().trim_end_matches('/').to_owned();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ClientError::InvalidUrl(format!(
                "endpoint must be an http(s) URL: {endpoint:?}"
            )));
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint,
            credentials,
        })
    }

    /// Create a client from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if `CLIENT_ID`, `CLIENT_SECRET` or
    /// `API_ENDPOINT` is missing.
    pub fn from_config(config: &ZapmanConfig) -> ClientResult<Self> {
        let credentials = config.credentials()?;
        let endpoint = config.api_endpoint()?;
        Self::with_timeout(endpoint, credentials, config.request_timeout())
    }

    /// The API base URL, without a trailing `/`.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The credentials requests are signed with.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Start building a request for `path` (which must begin with `/`).
    #[must_use]
    pub fn request(&self, method: Method, path: &str) -> SignedRequest<'_> {
        SignedRequest::new(self, method, path)
    }

    /// List the banks available for customer accounts.
    ///
    /// The bank list is public, so the request is sent unsigned.
    pub async fn list_banks(&self) -> ClientResult<Vec<Bank>> {
        let resp: ApiResponse<Vec<Bank>> = self
            .request(Method::GET, BANK_PATH)
            .unsigned()
            .send()
            .await?;
        let banks = resp.into_data()?;
        debug!(count = banks.len(), "listed banks");
        Ok(banks)
    }

    /// The first bank the API lists.
    pub async fn first_bank(&self) -> ClientResult<Bank> {
        self.list_banks()
            .await?
            .into_iter()
            .next()
            .ok_or(ClientError::NotFound("bank"))
    }

    /// List customer accounts. Returns the upstream JSON body unchanged.
    pub async fn list_customers(
        &self,
        query: &ListCustomersQuery,
    ) -> ClientResult<serde_json::Value> {
        self.request(Method::GET, CUSTOMER_PATH)
            .query_string(query.to_query_string())
            .send_raw()
            .await
    }

    /// Register a customer bank account. Returns the upstream JSON body
    /// unchanged.
    pub async fn create_customer(
        &self,
        customer: &CreateCustomerRequest,
    ) -> ClientResult<serde_json::Value> {
        info!(bank_uuid = %customer.bank_uuid, "creating customer account");
        self.request(Method::POST, CUSTOMER_PATH)
            .json(customer)?
            .send_raw()
            .await
    }

    /// Create a deposit transaction. Returns the upstream JSON body unchanged.
    pub async fn create_deposit(
        &self,
        deposit: &DepositRequest,
    ) -> ClientResult<serde_json::Value> {
        info!(
            merchant_order_id = %deposit.merchant_order_id,
            amount = %deposit.amount,
            "creating deposit"
        );
        self.request(Method::POST, DEPOSIT_PATH)
            .json(deposit)?
            .send_raw()
            .await
    }

    /// Send a prepared request and return the response body of a 2xx answer.
    pub(crate) async fn execute(&self, prepared: PreparedRequest) -> ClientResult<String> {
        let PreparedRequest {
            method,
            url,
            headers,
            body,
        } = prepared;

        let mut builder = self.http.request(method.clone(), &url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!(%method, %url, status = status.as_u16(), "API returned error status");
            return Err(ClientError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        debug!(%method, %url, status = status.as_u16(), "API request completed");
        Ok(text)
    }
}
