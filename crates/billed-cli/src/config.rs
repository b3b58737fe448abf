use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "billed", about = "Billed expense-report client")]
pub struct Cli {
    /// Backend URL (falls back to BILLED_API_URL, then the default port)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Bearer token for the backend (falls back to BILLED_API_TOKEN)
    #[arg(long)]
    pub api_token: Option<String>,

    /// Path to a JSON file holding the session user,
    /// e.g. {"type": "Employee", "email": "employee@test.tld"}
    #[arg(long, env = "BILLED_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the submitted bills
    List,
    /// Submit a new bill with an attachment
    Submit {
        /// Expense category, e.g. "Transports"
        #[arg(long = "type")]
        expense_type: String,

        /// Expense name
        #[arg(long)]
        name: String,

        /// Bill date, YYYY-MM-DD
        #[arg(long)]
        date: String,

        /// Amount in euros
        #[arg(long)]
        amount: String,

        /// VAT amount
        #[arg(long, default_value = "")]
        vat: String,

        /// Percentage (defaults to 20 when empty)
        #[arg(long, default_value = "")]
        pct: String,

        /// Free-text commentary
        #[arg(long, default_value = "")]
        commentary: String,

        /// Attachment path (jpg, jpeg or png)
        #[arg(long)]
        file: PathBuf,
    },
}
