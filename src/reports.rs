use rusqlite::Connection;

use crate::error::{PennyError, Result};
use crate::models::AccountKind;

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

pub struct AccountSummary {
    pub account_id: i64,
    pub account_name: String,
    pub account_type: String,
    pub institution: String,
    pub kind: AccountKind,
    pub transaction_count: i64,
    /// Sum of negative amounts, reported as a positive magnitude.
    /// Charges on a credit account, expenses on a deposit account.
    pub outflow_total: f64,
    /// Sum of positive amounts. Payments on a credit account, income on a
    /// deposit account.
    pub inflow_total: f64,
    pub net_change: f64,
}

pub struct Summary {
    pub total_accounts: usize,
    pub total_transactions: i64,
    pub accounts: Vec<AccountSummary>,
}

pub fn get_summary(conn: &Connection, account_id: Option<i64>) -> Result<Summary> {
    let accounts: Vec<(i64, String, String, String)> = match account_id {
        Some(id) => {
            let mut stmt = conn.prepare(
                "SELECT account_id, account_name, account_type, institution \
                 FROM accounts WHERE account_id = ?1",
            )?;
            let rows = stmt
                .query_map([id], |row| {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            if rows.is_empty() {
                return Err(PennyError::UnknownAccountId(id));
            }
            rows
        }
        None => {
            let mut stmt = conn.prepare(
                "SELECT account_id, account_name, account_type, institution \
                 FROM accounts ORDER BY account_id",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
            rows
        }
    };

    let mut summary = Summary {
        total_accounts: accounts.len(),
        total_transactions: 0,
        accounts: Vec::with_capacity(accounts.len()),
    };

    for (id, name, account_type, institution) in accounts {
        let (count, negative_sum, positive_sum, net): (i64, Option<f64>, Option<f64>, Option<f64>) =
            conn.query_row(
                "SELECT COUNT(*), \
                 SUM(CASE WHEN amount < 0 THEN amount ELSE 0 END), \
                 SUM(CASE WHEN amount > 0 THEN amount ELSE 0 END), \
                 SUM(amount) \
                 FROM transactions WHERE account_id = ?1",
                [id],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )?;

        summary.total_transactions += count;
        summary.accounts.push(AccountSummary {
            account_id: id,
            kind: AccountKind::classify(&account_type),
            account_name: name,
            account_type,
            institution,
            transaction_count: count,
            outflow_total: negative_sum.unwrap_or(0.0).abs(),
            inflow_total: positive_sum.unwrap_or(0.0),
            net_change: net.unwrap_or(0.0),
        });
    }

    Ok(summary)
}

// ---------------------------------------------------------------------------
// Transaction register
// ---------------------------------------------------------------------------

pub struct TransactionRow {
    pub transaction_date: String,
    pub description: String,
    pub amount: f64,
    pub original_category: Option<String>,
    pub account_name: String,
    pub institution: String,
}

const TXN_SELECT: &str = "SELECT t.transaction_date, t.description, t.amount, \
     t.original_category, a.account_name, a.institution \
     FROM transactions t JOIN accounts a ON t.account_id = a.account_id";

fn txn_from_row(row: &rusqlite::Row) -> rusqlite::Result<TransactionRow> {
    Ok(TransactionRow {
        transaction_date: row.get(0)?,
        description: row.get(1)?,
        amount: row.get(2)?,
        original_category: row.get(3)?,
        account_name: row.get(4)?,
        institution: row.get(5)?,
    })
}

pub fn get_transactions(
    conn: &Connection,
    account_id: Option<i64>,
    limit: usize,
) -> Result<Vec<TransactionRow>> {
    let rows = match account_id {
        Some(id) => {
            let sql = format!(
                "{TXN_SELECT} WHERE t.account_id = ?1 \
                 ORDER BY t.transaction_date DESC LIMIT ?2"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(rusqlite::params![id, limit as i64], txn_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            rows
        }
        None => {
            let sql = format!("{TXN_SELECT} ORDER BY t.transaction_date DESC LIMIT ?1");
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([limit as i64], txn_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            rows
        }
    };
    Ok(rows)
}
