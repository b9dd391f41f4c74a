use std::path::Path;

use crate::cli::open_store;
use crate::error::Result;
use crate::fmt::format_bytes;

pub fn run(data_dir: &Path) -> Result<()> {
    let db_path = data_dir.join("penny.db");

    println!("Data dir:   {}", data_dir.display());
    println!("Database:   {}", db_path.display());

    if !db_path.exists() {
        println!();
        println!("Database not found. Run `penny init` or import a file to create it.");
        return Ok(());
    }

    let size = std::fs::metadata(&db_path)?.len();
    println!("DB size:    {}", format_bytes(size));

    let conn = open_store(data_dir)?;
    let accounts: i64 = conn.query_row("SELECT count(*) FROM accounts", [], |r| r.get(0))?;
    let transactions: i64 =
        conn.query_row("SELECT count(*) FROM transactions", [], |r| r.get(0))?;
    let imports: i64 = conn.query_row("SELECT count(*) FROM imports", [], |r| r.get(0))?;

    println!();
    println!("Accounts:      {accounts}");
    println!("Transactions:  {transactions}");
    println!("Imports:       {imports}");
    Ok(())
}
