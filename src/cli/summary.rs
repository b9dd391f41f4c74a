use std::path::Path;

use colored::Colorize;

use crate::cli::open_store;
use crate::db::get_account_id;
use crate::error::{PennyError, Result};
use crate::fmt::money;
use crate::models::AccountKind;
use crate::reports::get_summary;

pub fn run(data_dir: &Path, account: Option<&str>) -> Result<()> {
    let conn = open_store(data_dir)?;
    let account_id = match account {
        Some(name) => Some(
            get_account_id(&conn, name)?
                .ok_or_else(|| PennyError::UnknownAccount(name.to_string()))?,
        ),
        None => None,
    };

    let summary = get_summary(&conn, account_id)?;
    println!("Total accounts:     {}", summary.total_accounts);
    println!("Total transactions: {}", summary.total_transactions);

    for acc in &summary.accounts {
        println!();
        println!(
            "#{} {} ({}) [{}]",
            acc.account_id,
            acc.account_name.bold(),
            acc.account_type,
            acc.institution
        );
        println!("  Transactions:   {}", acc.transaction_count);
        match acc.kind {
            AccountKind::Credit => {
                println!("  Total charges:  {}", money(acc.outflow_total));
                println!("  Total payments: {}", money(acc.inflow_total));
            }
            AccountKind::Deposit => {
                println!("  Total expenses: {}", money(acc.outflow_total));
                println!("  Total income:   {}", money(acc.inflow_total));
            }
        }
        let net = money(acc.net_change);
        let net = if acc.net_change < 0.0 {
            net.red()
        } else {
            net.green()
        };
        println!("  Net change:     {net}");
    }
    Ok(())
}
