//! Command-line arguments.

use clap::{Parser, Subcommand};

/// Sign and send requests to the Zapman payment API.
#[derive(Debug, Parser)]
#[command(name = "zapman", version, about)]
pub struct Cli {
    /// Override `API_ENDPOINT`.
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the authentication headers for a body and query string.
    Sign {
        /// Exact JSON body to sign.
        #[arg(long, default_value = "{}")]
        body: String,
        /// Raw query string, without the leading `?`.
        #[arg(long, default_value = "")]
        query: String,
        /// Unix timestamp to sign at (defaults to now).
        #[arg(long)]
        timestamp: Option<u64>,
    },

    /// List the banks available for customer accounts.
    Banks,

    /// Manage customer accounts.
    #[command(subcommand)]
    Customers(CustomersCommand),

    /// Create a QR deposit in THB.
    Deposit {
        /// UUID of the paying customer account.
        #[arg(long)]
        customer: String,
        /// Amount in baht.
        #[arg(long)]
        amount: serde_json::Number,
        /// URL that receives the success callback.
        #[arg(long)]
        callback_url: String,
        /// URL the payer is redirected to on success.
        #[arg(long)]
        redirect_url: String,
        /// Merchant order reference.
        #[arg(long)]
        order_id: String,
    },
}

/// `customers` subcommands.
#[derive(Debug, Subcommand)]
pub enum CustomersCommand {
    /// List customer accounts.
    List {
        /// Records to skip.
        #[arg(long, default_value_t = 0)]
        skip: u32,
        /// Records to return.
        #[arg(long, default_value_t = 1)]
        take: u32,
    },

    /// Register a customer bank account.
    Create {
        /// Bank UUID (defaults to the first listed bank).
        #[arg(long)]
        bank_uuid: Option<String>,
        /// Bank account number.
        #[arg(long)]
        account_number: String,
        /// Account holder name as registered with the bank.
        #[arg(long)]
        account_name: String,
        /// Account holder name in English.
        #[arg(long)]
        account_name_en: String,
    },
}
