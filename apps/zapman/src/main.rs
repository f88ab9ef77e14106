//! Zapman CLI - sign and send requests to the Zapman payment API.
//!
//! # Usage
//!
//! ```text
//! zapman sign --query 'skip=0&take=1'
//! zapman banks
//! zapman customers list --skip 0 --take 10
//! zapman customers create --account-number 0000000000 \
//!     --account-name 'ปิติ สบายใจ' --account-name-en 'Somchai Sabuydee'
//! zapman deposit --customer 00000000-0000-0000-0000-000000000000 --amount 2 \
//!     --callback-url https://merchant.site/handleCallback \
//!     --redirect-url https://merchant.site/thankyou --order-id ORDER_ID_1234
//! ```
//!
//! Credentials come from `CLIENT_ID`, `CLIENT_SECRET` and `API_ENDPOINT`,
//! read from the environment or a `.env` file. Logs go to stderr; command
//! output goes to stdout.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use zapman_auth::{SignedHeaders, current_timestamp};
use zapman_client::{CreateCustomerRequest, DepositRequest, ListCustomersQuery, ZapmanClient};
use zapman_core::{Credentials, ZapmanConfig};

use crate::cli::{Cli, Command, CustomersCommand};

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
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Render signed headers the way they are sent.
fn render_headers(headers: &SignedHeaders) -> String {
    format!(
        "x-client-id: {}\nx-signature: {}\nx-timestamp: {}",
        headers.client_id, headers.signature, headers.timestamp
    )
}

fn sign(
    credentials: &Credentials,
    body: &str,
    query: &str,
    timestamp: Option<u64>,
) -> Result<String> {
    let timestamp = timestamp.unwrap_or_else(current_timestamp);
    let headers = SignedHeaders::sign(credentials, timestamp, body, query)
        .context("failed to sign request")?;
    Ok(render_headers(&headers))
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn api_client(config: &ZapmanConfig) -> Result<ZapmanClient> {
    let client = ZapmanClient::from_config(config)?;
    debug!(endpoint = client.endpoint(), "client ready");
    Ok(client)
}

async fn run(cli: Cli, config: ZapmanConfig) -> Result<()> {
    let config = match cli.endpoint {
        Some(endpoint) => config.with_api_endpoint(endpoint),
        None => config,
    };

    match cli.command {
        Command::Sign {
            body,
            query,
            timestamp,
        } => {
            let credentials = config.credentials()?;
            println!("{}", sign(&credentials, &body, &query, timestamp)?);
            Ok(())
        }
        Command::Banks => print_json(&api_client(&config)?.list_banks().await?),
        Command::Customers(CustomersCommand::List { skip, take }) => {
            let query = ListCustomersQuery::new(skip, take);
            print_json(&api_client(&config)?.list_customers(&query).await?)
        }
        Command::Customers(CustomersCommand::Create {
            bank_uuid,
            account_number,
            account_name,
            account_name_en,
        }) => {
            let client = api_client(&config)?;
            let bank_uuid = match bank_uuid {
                Some(uuid) => uuid,
                None => {
                    let bank = client.first_bank().await?;
                    debug!(bank_uuid = %bank.uuid, "using first listed bank");
                    bank.uuid
                }
            };
            let customer =
                CreateCustomerRequest::new(bank_uuid, account_number, account_name, account_name_en);
            print_json(&client.create_customer(&customer).await?)
        }
        Command::Deposit {
            customer,
            amount,
            callback_url,
            redirect_url,
            order_id,
        } => {
            let deposit =
                DepositRequest::qr_thb(customer, amount, callback_url, redirect_url, order_id);
            print_json(&api_client(&config)?.create_deposit(&deposit).await?)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ZapmanConfig::load();

    init_tracing(&config.log_level)?;

    run(cli, config).await
}
