//! Per-request signing and dispatch.
//!
//! A [`SignedRequest`] collects the method, path, raw query string and body of
//! one call. [`SignedRequest::prepare`] freezes those into a [`PreparedRequest`]
//! whose headers were computed over exactly the bytes that will be sent.
//!
//! The signed query is taken from the parsed URL, not from the caller's
//! input, so any percent-encoding applied during parsing is part of what is
//! signed.

use http::Method;
use http::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::Url;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use zapman_auth::headers::{
    CLIENT_ID_HEADER, JSON_CONTENT_TYPE, SIGNATURE_HEADER, TIMESTAMP_HEADER,
};
use zapman_auth::signature::EMPTY_BODY;
use zapman_auth::{SignedHeaders, current_timestamp};

use crate::client::ZapmanClient;
use crate::error::{ClientError, ClientResult};
use crate::model::ApiResponse;

/// Builder for one call against the API.
///
/// Obtained from [`ZapmanClient::request`].
#[derive(Debug)]
pub struct SignedRequest<'c> {
    client: &'c ZapmanClient,
    method: Method,
    path: String,
    query_string: String,
    body: Option<String>,
    signed: bool,
    timestamp: Option<u64>,
}

/// A fully signed request, ready to be sent.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL including the raw query string.
    pub url: String,
    /// Headers, including the authentication headers for signed requests.
    pub headers: HeaderMap,
    /// Body bytes sent on the wire. `None` for body-less requests.
    pub body: Option<String>,
}

impl<'c> SignedRequest<'c> {
    pub(crate) fn new(client: &'c ZapmanClient, method: Method, path: &str) -> Self {
        Self {
            client,
            method,
            path: path.to_owned(),
            query_string: String::new(),
            body: None,
            signed: true,
            timestamp: None,
        }
    }

    /// Set the raw query string, without the leading `?`.
    ///
    /// Characters that are not valid in a URL query (spaces, non-ASCII) are
    /// percent-encoded when the URL is parsed, and the encoded form is what
    /// gets signed.
    #[must_use]
    pub fn query_string(mut self, query: impl Into<String>) -> Self {
        self.query_string = query.into();
        self
    }

    /// Set the query string from key/value pairs, form-urlencoded in the
    /// given order.
    #[must_use]
    pub fn query<K: AsRef<str>, V: AsRef<str>>(self, pairs: &[(K, V)]) -> Self {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        self.query_string(query)
    }

    /// Serialize `body` as the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Json`] if the body cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ClientResult<Self> {
        self.body = Some(serde_json::to_string(body)?);
        Ok(self)
    }

    /// Use pre-serialized JSON text as the body, sent and signed verbatim.
    #[must_use]
    pub fn raw_body(mut self, body_json: impl Into<String>) -> Self {
        self.body = Some(body_json.into());
        self
    }

    /// Send without authentication headers.
    #[must_use]
    pub fn unsigned(mut self) -> Self {
        self.signed = false;
        self
    }

    /// Sign at a fixed timestamp instead of the current time.
    #[must_use]
    pub fn timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Build the URL and headers for this request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the path is not absolute or the
    /// URL does not parse, or [`ClientError::Auth`] if the body or query
    /// string cannot be signed.
    pub fn prepare(&self) -> ClientResult<PreparedRequest> {
        if !self.path.starts_with('/') {
            return Err(ClientError::InvalidUrl(format!(
                "path must start with '/': {}",
                self.path
            )));
        }
        if self.query_string.starts_with('?') {
            return Err(ClientError::InvalidUrl(
                "query string must not start with '?'".to_owned(),
            ));
        }

        let mut raw_url = format!("{}{}", self.client.endpoint(), self.path);
        if !self.query_string.is_empty() {
            raw_url.push('?');
            raw_url.push_str(&self.query_string);
        }
        let url = Url::parse(&raw_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{raw_url}: {e}")))?;
        let wire_query = url.query().unwrap_or("");

        let headers = if self.signed {
            let timestamp = self.timestamp.unwrap_or_else(current_timestamp);
            let body_json = self.body.as_deref().unwrap_or(EMPTY_BODY);
            let signed = SignedHeaders::sign(
                self.client.credentials(),
                timestamp,
                body_json,
                wire_query,
            )?;
            debug!(
                method = %self.method,
                path = %self.path,
                query = wire_query,
                client_id = %signed.client_id,
                timestamp = signed.timestamp,
                signature = %signed.signature,
                "signed request"
            );
            signed.to_header_map()?
        } else {
            let mut headers = HeaderMap::with_capacity(1);
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
            headers
        };

        Ok(PreparedRequest {
            method: self.method.clone(),
            url: url.as_str().to_owned(),
            headers,
            body: self.body.clone(),
        })
    }

    /// Send the request and decode the response envelope.
    ///
    /// Non-2xx statuses become [`ClientError::Api`] carrying the raw body. The
    /// envelope code is not checked here; see [`ApiResponse::into_data`].
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if signing, the transport, or decoding fails.
    pub async fn send<T: DeserializeOwned>(self) -> ClientResult<ApiResponse<T>> {
        let prepared = self.prepare()?;
        let text = self.client.execute(prepared).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Send the request and return the response body as untyped JSON.
    ///
    /// Every field of the upstream answer is kept, including ones the
    /// [`ApiResponse`] envelope does not model.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if signing, the transport, or decoding fails.
    pub async fn send_raw(self) -> ClientResult<serde_json::Value> {
        let prepared = self.prepare()?;
        let text = self.client.execute(prepared).await?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl PreparedRequest {
    /// Whether the request carries the authentication headers.
    #[must_use]
    pub fn is_signed(&self) -> bool {
        [CLIENT_ID_HEADER, SIGNATURE_HEADER, TIMESTAMP_HEADER]
            .iter()
            .all(|name| self.headers.contains_key(*name))
    }
}
