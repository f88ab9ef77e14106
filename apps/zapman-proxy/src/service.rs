//! Request routing for the proxy.
//!
//! | Path | Response |
//! |---|---|
//! | `/` | HTML page linking to `/getClientCustomer` |
//! | `/getClientCustomer` | pretty JSON of a signed `GET /v1/client/customer?skip=0&take=1` |
//! | `/health`, `/_health` | `{"status":"running"}` (GET only) |
//! | anything else | `404 Not Found` |
//!
//! Routes match the whole request target, so a path followed by any query
//! string is not found.

use std::convert::Infallible;
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderValue};
use http::{Method, StatusCode};
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::service::Service;
use serde_json::{Value, json};
use tracing::{debug, error, info};
use zapman_client::{ClientError, ListCustomersQuery, ZapmanClient};

/// Type-erased response body.
pub type ProxyBody = BoxBody<Bytes, io::Error>;

/// Create a [`ProxyBody`] from a string.
pub fn body_from_string(s: impl Into<String>) -> ProxyBody {
    Full::new(Bytes::from(s.into()))
        .map_err(|never: Infallible| match never {})
        .boxed()
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>API Call Example</title>
</head>
<body>
    <h1>API Call Example</h1>
    <a href="/getClientCustomer" target="_blank">[GET] /v1/client/customer</a>
</body>
</html>
"#;

/// Hyper service that answers the proxy routes.
///
/// Cloned once per connection; clones share the upstream client.
#[derive(Debug, Clone)]
pub struct ProxyService {
    client: Arc<ZapmanClient>,
}

impl ProxyService {
    /// Create a service that forwards to `client`.
    pub fn new(client: ZapmanClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Produce the response for a request line. `target` is the path and
    /// query of the request URI.
    pub async fn route(&self, method: &Method, target: &str) -> http::Response<ProxyBody> {
        debug!(%method, target, "routing request");
        match target {
            "/" => html_response(INDEX_HTML),
            "/getClientCustomer" => self.get_client_customer().await,
            "/health" | "/_health" if *method == Method::GET => health_check_response(),
            _ => not_found_response(),
        }
    }

    async fn get_client_customer(&self) -> http::Response<ProxyBody> {
        let output = match self
            .client
            .list_customers(&ListCustomersQuery::default())
            .await
        {
            Ok(body) => {
                info!(code = ?body.get("code"), "upstream customer request succeeded");
                body
            }
            Err(e) => {
                error!(error = %e, "upstream customer request failed");
                json!({ "error": "Request failed", "details": failure_details(&e) })
            }
        };
        let body = serde_json::to_string_pretty(&output).unwrap_or_else(|_| "null".to_owned());
        json_response(body)
    }
}

/// The upstream error body as JSON when there is one, else the error message.
fn failure_details(err: &ClientError) -> Value {
    match err {
        ClientError::Api { body, .. } => {
            serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.clone()))
        }
        other => Value::String(other.to_string()),
    }
}

impl Service<http::Request<Incoming>> for ProxyService {
    type Response = http::Response<ProxyBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let svc = self.clone();
        let target = req
            .uri()
            .path_and_query()
            .map_or("/", http::uri::PathAndQuery::as_str)
            .to_owned();
        Box::pin(async move { Ok(svc.route(req.method(), &target).await) })
    }
}

fn response(
    status: StatusCode,
    content_type: &'static str,
    body: impl Into<String>,
) -> http::Response<ProxyBody> {
    let mut resp = http::Response::new(body_from_string(body));
    *resp.status_mut() = status;
    resp.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    resp
}

fn html_response(body: &str) -> http::Response<ProxyBody> {
    response(StatusCode::OK, "text/html", body)
}

fn json_response(body: String) -> http::Response<ProxyBody> {
    response(StatusCode::OK, "application/json", body)
}

fn not_found_response() -> http::Response<ProxyBody> {
    response(StatusCode::NOT_FOUND, "text/plain", "404 Not Found")
}

fn health_check_response() -> http::Response<ProxyBody> {
    response(StatusCode::OK, "application/json", r#"{"status":"running"}"#)
}
