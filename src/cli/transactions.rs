use std::path::Path;

use comfy_table::{Cell, Table};

use crate::cli::open_store;
use crate::db::get_account_id;
use crate::error::{PennyError, Result};
use crate::fmt::money;
use crate::reports::get_transactions;

pub fn run(data_dir: &Path, account: Option<&str>, limit: usize) -> Result<()> {
    let conn = open_store(data_dir)?;
    let account_id = match account {
        Some(name) => Some(
            get_account_id(&conn, name)?
                .ok_or_else(|| PennyError::UnknownAccount(name.to_string()))?,
        ),
        None => None,
    };

    let rows = get_transactions(&conn, account_id, limit)?;
    if rows.is_empty() {
        println!("No transactions.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Date",
        "Description",
        "Amount",
        "Category",
        "Account",
        "Institution",
    ]);
    for row in &rows {
        table.add_row(vec![
            Cell::new(&row.transaction_date),
            Cell::new(&row.description),
            Cell::new(money(row.amount)),
            Cell::new(row.original_category.as_deref().unwrap_or("")),
            Cell::new(&row.account_name),
            Cell::new(&row.institution),
        ]);
    }
    println!("Transactions (newest first)\n{table}");
    Ok(())
}
