pub mod accounts;
pub mod import;
pub mod init;
pub mod status;
pub mod summary;
pub mod transactions;

use std::path::Path;

use clap::{Parser, Subcommand};
use rusqlite::Connection;

use crate::db;
use crate::error::Result;

/// Open (and create if needed) the ledger under `data_dir`. Schema init is
/// idempotent, so every command can call this.
pub(crate) fn open_store(data_dir: &Path) -> Result<Connection> {
    let conn = db::get_connection(&data_dir.join("penny.db"))?;
    db::init_db(&conn)?;
    Ok(conn)
}

#[derive(Parser)]
#[command(name = "penny", about = "Personal-finance CSV importer and ledger CLI.")]
pub struct Cli {
    /// Override the configured data directory for this invocation.
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up penny: choose a data directory and initialize the database.
    Init,
    /// Manage accounts.
    Accounts {
        #[command(subcommand)]
        command: AccountsCommands,
    },
    /// Import a transaction CSV export into an account.
    Import {
        /// Path to the CSV file to import
        file: String,
        /// Institution the export came from (currently supported: chase)
        #[arg(long, default_value = "chase")]
        institution: String,
        /// Account name to import into (default: derived from the file name)
        #[arg(long)]
        account: Option<String>,
    },
    /// List recent transactions, newest first.
    Transactions {
        /// Filter by account name
        #[arg(long)]
        account: Option<String>,
        /// Maximum number of rows to show
        #[arg(long, default_value = "25")]
        limit: usize,
    },
    /// Account-level summary statistics.
    Summary {
        /// Summarize a single account by name
        #[arg(long)]
        account: Option<String>,
    },
    /// Show current database location and table counts.
    Status,
}

#[derive(Subcommand)]
pub enum AccountsCommands {
    /// Add a new account (no-op if the name already exists).
    Add {
        /// Account name, e.g. 'Chase Freedom'
        name: String,
        /// Account type, e.g. 'Credit Card' or 'Checking'
        #[arg(long = "type")]
        account_type: String,
        /// Institution name
        #[arg(long, default_value = "")]
        institution: String,
    },
    /// List all accounts.
    List,
}
