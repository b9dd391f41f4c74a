use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;
use crate::models::{Account, CleanRow, InsertOutcome};

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS accounts (
    account_id INTEGER PRIMARY KEY AUTOINCREMENT,
    account_name TEXT NOT NULL UNIQUE,
    account_type TEXT NOT NULL,
    institution TEXT NOT NULL,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS transactions (
    transaction_id INTEGER PRIMARY KEY AUTOINCREMENT,
    account_id INTEGER NOT NULL,
    transaction_date TEXT NOT NULL,
    post_date TEXT,
    description TEXT NOT NULL,
    original_category TEXT,
    custom_category TEXT,
    transaction_type TEXT,
    amount REAL NOT NULL,
    memo TEXT,
    imported_at TEXT DEFAULT (datetime('now')),
    FOREIGN KEY (account_id) REFERENCES accounts(account_id),
    UNIQUE(account_id, transaction_date, description, amount)
);

CREATE TABLE IF NOT EXISTS categories (
    category_id INTEGER PRIMARY KEY AUTOINCREMENT,
    category_name TEXT NOT NULL UNIQUE,
    category_type TEXT NOT NULL,
    parent_category TEXT,
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS category_rules (
    rule_id INTEGER PRIMARY KEY AUTOINCREMENT,
    keyword TEXT NOT NULL,
    category_name TEXT NOT NULL,
    priority INTEGER DEFAULT 0,
    created_at TEXT DEFAULT (datetime('now')),
    FOREIGN KEY (category_name) REFERENCES categories(category_name)
);

CREATE TABLE IF NOT EXISTS imports (
    import_id INTEGER PRIMARY KEY AUTOINCREMENT,
    filename TEXT NOT NULL,
    account_id INTEGER NOT NULL,
    record_count INTEGER,
    date_range_start TEXT,
    date_range_end TEXT,
    checksum TEXT,
    imported_at TEXT DEFAULT (datetime('now')),
    FOREIGN KEY (account_id) REFERENCES accounts(account_id)
);
";

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

// UNIQUE violations only; foreign-key and NOT NULL failures still propagate.
fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Get-or-create an account by name. Idempotent on identity: if the name
/// already exists, its id is returned and the type/institution arguments
/// are ignored (the stored attributes win).
pub fn resolve_account(
    conn: &Connection,
    name: &str,
    account_type: &str,
    institution: &str,
) -> Result<i64> {
    match conn.execute(
        "INSERT INTO accounts (account_name, account_type, institution) VALUES (?1, ?2, ?3)",
        rusqlite::params![name, account_type, institution],
    ) {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(e) if is_unique_violation(&e) => Ok(conn.query_row(
            "SELECT account_id FROM accounts WHERE account_name = ?1",
            [name],
            |row| row.get(0),
        )?),
        Err(e) => Err(e.into()),
    }
}

pub fn get_account_id(conn: &Connection, name: &str) -> Result<Option<i64>> {
    let mut stmt = conn.prepare("SELECT account_id FROM accounts WHERE account_name = ?1")?;
    let mut rows = stmt.query_map([name], |row| row.get(0))?;
    Ok(rows.next().transpose()?)
}

/// Insert one cleaned row. The UNIQUE(account_id, transaction_date,
/// description, amount) constraint is the dedup authority: a collision
/// comes back as `DuplicateSkipped`, never as an error.
pub fn insert_transaction(
    conn: &Connection,
    account_id: i64,
    row: &CleanRow,
) -> Result<InsertOutcome> {
    let result = conn.execute(
        "INSERT INTO transactions (
            account_id, transaction_date, post_date, description,
            original_category, transaction_type, amount, memo
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        rusqlite::params![
            account_id,
            row.transaction_date,
            row.post_date,
            row.description,
            row.original_category,
            row.transaction_type,
            row.amount,
            row.memo,
        ],
    );
    match result {
        Ok(_) => Ok(InsertOutcome::Inserted),
        Err(e) if is_unique_violation(&e) => Ok(InsertOutcome::DuplicateSkipped),
        Err(e) => Err(e.into()),
    }
}

pub fn list_accounts(conn: &Connection) -> Result<Vec<Account>> {
    let mut stmt = conn.prepare(
        "SELECT account_id, account_name, account_type, institution \
         FROM accounts ORDER BY account_id",
    )?;
    let accounts = stmt
        .query_map([], |row| {
            Ok(Account {
                id: row.get(0)?,
                name: row.get(1)?,
                account_type: row.get(2)?,
                institution: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(accounts)
}
