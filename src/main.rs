mod cli;
mod db;
mod error;
mod fmt;
mod importer;
mod models;
mod reports;
mod settings;

use std::path::PathBuf;

use clap::Parser;

use cli::{AccountsCommands, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let data_dir = cli
        .data_dir
        .map(PathBuf::from)
        .unwrap_or_else(settings::get_data_dir);

    let result = match cli.command {
        Commands::Init => cli::init::run(&data_dir),
        Commands::Accounts { command } => match command {
            AccountsCommands::Add {
                name,
                account_type,
                institution,
            } => cli::accounts::add(&data_dir, &name, &account_type, &institution),
            AccountsCommands::List => cli::accounts::list(&data_dir),
        },
        Commands::Import {
            file,
            institution,
            account,
        } => cli::import::run(&data_dir, &file, &institution, account.as_deref()),
        Commands::Transactions { account, limit } => {
            cli::transactions::run(&data_dir, account.as_deref(), limit)
        }
        Commands::Summary { account } => cli::summary::run(&data_dir, account.as_deref()),
        Commands::Status => cli::status::run(&data_dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
