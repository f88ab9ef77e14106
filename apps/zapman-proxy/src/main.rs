//! Zapman proxy - a minimal HTTP server that calls the Zapman API on behalf of
//! a browser.
//!
//! The browser never sees the client secret: the proxy signs the upstream
//! request itself and relays the JSON response.
//!
//! # Usage
//!
//! ```text
//! PROXY_LISTEN=127.0.0.1:8080 zapman-proxy
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CLIENT_ID` | *(required)* | Client ID issued by Zapman |
//! | `CLIENT_SECRET` | *(required)* | Shared signing secret |
//! | `API_ENDPOINT` | *(required)* | API base URL |
//! | `PROXY_LISTEN` | `0.0.0.0:80` | Bind address |
//! | `REQUEST_TIMEOUT_SECS` | `30` | Upstream request timeout |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |
//!
//! Variables may also be placed in a `.env` file in the working directory.

mod service;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use zapman_client::ZapmanClient;
use zapman_core::ZapmanConfig;

use crate::service::ProxyService;

/// Server version logged at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Run the accept loop, serving connections until a shutdown signal is received.
async fn serve(listener: TcpListener, service: ProxyService) -> Result<()> {
    let graceful = hyper_util::server::graceful::GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal, draining connections");
    };

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, peer_addr) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                let svc = service.clone();
                let conn = http.serve_connection(TokioIo::new(stream), svc);
                let conn = graceful.watch(conn.into_owned());

                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer_addr = %peer_addr, error = %e, "connection error");
                    }
                });
            }

            () = &mut shutdown => {
                info!("shutting down gracefully");
                break;
            }
        }
    }

    graceful.shutdown().await;
    info!("all connections drained, exiting");

    Ok(())
}

/// Request `/health` from a running proxy.
///
/// Exits with code 0 if healthy, 1 otherwise.
async fn run_health_check(addr: &str) -> Result<()> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    let stream = TcpStream::connect(addr)
        .await
        .with_context(|| format!("cannot connect to {addr}"))?;

    let (mut reader, mut writer) = stream.into_split();

    let request = format!("GET /health HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    writer.write_all(request.as_bytes()).await?;
    writer.shutdown().await?;

    let mut response = String::new();
    reader.read_to_string(&mut response).await?;

    if response.contains("200 OK") && response.contains("\"status\":\"running\"") {
        Ok(())
    } else {
        anyhow::bail!("unhealthy response from {addr}")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = ZapmanConfig::load();

    // Handle --health-check flag for container health probes.
    if std::env::args().any(|a| a == "--health-check") {
        let addr = config.proxy_listen.replace("0.0.0.0", "127.0.0.1");
        let healthy = run_health_check(&addr).await.is_ok();
        std::process::exit(i32::from(!healthy));
    }

    init_tracing(&config.log_level)?;

    let client = ZapmanClient::from_config(&config).context("invalid Zapman configuration")?;

    info!(
        proxy_listen = %config.proxy_listen,
        api_endpoint = %client.endpoint(),
        client_id = %client.credentials().client_id(),
        version = VERSION,
        "starting Zapman proxy",
    );

    let addr: SocketAddr = config
        .proxy_listen
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.proxy_listen))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, "listening for connections");

    serve(listener, ProxyService::new(client)).await
}
