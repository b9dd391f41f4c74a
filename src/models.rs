#[derive(Debug, Clone)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub account_type: String,
    pub institution: String,
}

/// How an account's free-text type reads for reporting. Derived, never
/// stored; `classify` is the only place the substring test lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    Credit,
    Deposit,
}

impl AccountKind {
    pub fn classify(account_type: &str) -> Self {
        if account_type.to_lowercase().contains("credit") {
            Self::Credit
        } else {
            Self::Deposit
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Credit => "credit_card",
            Self::Deposit => "bank_account",
        }
    }
}

/// A cleaned import row, typed and defaulted, ready for insertion.
/// Dates are ISO `YYYY-MM-DD` strings validated during cleaning.
#[derive(Debug, Clone)]
pub struct CleanRow {
    pub transaction_date: String,
    pub post_date: Option<String>,
    pub description: String,
    pub original_category: Option<String>,
    pub transaction_type: Option<String>,
    pub amount: f64,
    pub memo: String,
}

/// Per-row insert result. A natural-key collision is an outcome, not an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    DuplicateSkipped,
}
