use std::path::Path;

use comfy_table::{Cell, Table};

use crate::cli::open_store;
use crate::db::{get_account_id, list_accounts, resolve_account};
use crate::error::Result;
use crate::models::AccountKind;

pub fn add(data_dir: &Path, name: &str, account_type: &str, institution: &str) -> Result<()> {
    let conn = open_store(data_dir)?;
    let existing = get_account_id(&conn, name)?;
    let id = resolve_account(&conn, name, account_type, institution)?;
    match existing {
        Some(_) => println!("Account already exists: {name} (ID: {id})"),
        None => println!("Added account: {name} (ID: {id})"),
    }
    Ok(())
}

pub fn list(data_dir: &Path) -> Result<()> {
    let conn = open_store(data_dir)?;
    let accounts = list_accounts(&conn)?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Type", "Institution", "Kind"]);
    for account in &accounts {
        let kind = AccountKind::classify(&account.account_type);
        table.add_row(vec![
            Cell::new(account.id),
            Cell::new(&account.name),
            Cell::new(&account.account_type),
            Cell::new(&account.institution),
            Cell::new(kind.label()),
        ]);
    }
    println!("Accounts\n{table}");
    Ok(())
}
