use std::io::BufReader;
use std::path::Path;

use rusqlite::Connection;
use sha2::{Digest, Sha256};

use crate::db::{insert_transaction, resolve_account};
use crate::error::{PennyError, Result};
use crate::models::{CleanRow, InsertOutcome};

// ---------------------------------------------------------------------------
// Value parsing helpers
// ---------------------------------------------------------------------------

// Two-digit years must be tried first: chrono's %Y happily reads "24" as
// year 24, while %y rejects a four-digit year on trailing input.
const DATE_FORMATS: &[&str] = &["%m/%d/%y", "%m/%d/%Y", "%Y-%m-%d", "%Y/%m/%d"];

/// Parse a free-text date into ISO `YYYY-MM-DD`. A value no format accepts
/// aborts the whole import.
pub fn parse_date(raw: &str) -> Result<String> {
    let raw = raw.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, format) {
            return Ok(date.format("%Y-%m-%d").to_string());
        }
    }
    Err(PennyError::InvalidDate(raw.to_string()))
}

/// Coerce an exported amount to a signed float. Strips currency symbols,
/// thousands separators, and stray quotes; `(x)` reads as negative.
pub fn parse_amount(raw: &str) -> Result<f64> {
    let s = raw.replace(',', "").replace('"', "").replace('$', "");
    let s = s.trim();
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        let value: f64 = inner
            .trim()
            .parse()
            .map_err(|_| PennyError::InvalidAmount(raw.to_string()))?;
        return Ok(-value);
    }
    s.parse()
        .map_err(|_| PennyError::InvalidAmount(raw.to_string()))
}

fn compute_checksum(file_path: &Path) -> Result<String> {
    let data = std::fs::read(file_path)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(hex::encode(hasher.finalize()))
}

// ---------------------------------------------------------------------------
// Column normalizer
// ---------------------------------------------------------------------------

/// Map one raw header to its canonical column, if any. Rules are ordered;
/// the first hit wins for a given header.
pub fn canonical_column(header: &str) -> Option<&'static str> {
    let h = header.to_lowercase();
    let h = h.trim();
    if h.contains("transaction") && h.contains("date") {
        Some("transaction_date")
    } else if h.contains("post") && h.contains("date") {
        Some("post_date")
    } else if h.contains("description") {
        Some("description")
    } else if h.contains("category") {
        Some("original_category")
    } else if h.contains("type") {
        Some("transaction_type")
    } else if h.contains("amount") {
        Some("amount")
    } else if h.contains("memo") {
        Some("memo")
    } else {
        None
    }
}

/// Resolved column positions for one file. When two headers normalize to
/// the same canonical column the later one wins; the earlier column is
/// silently lost.
#[derive(Debug, Default)]
struct ColumnLayout {
    transaction_date: Option<usize>,
    post_date: Option<usize>,
    description: Option<usize>,
    original_category: Option<usize>,
    transaction_type: Option<usize>,
    amount: Option<usize>,
    memo: Option<usize>,
}

impl ColumnLayout {
    fn from_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Self {
        let mut layout = Self::default();
        for (i, header) in headers.into_iter().enumerate() {
            match canonical_column(header) {
                Some("transaction_date") => layout.transaction_date = Some(i),
                Some("post_date") => layout.post_date = Some(i),
                Some("description") => layout.description = Some(i),
                Some("original_category") => layout.original_category = Some(i),
                Some("transaction_type") => layout.transaction_type = Some(i),
                Some("amount") => layout.amount = Some(i),
                Some("memo") => layout.memo = Some(i),
                _ => {}
            }
        }
        layout
    }
}

// ---------------------------------------------------------------------------
// Record cleaner
// ---------------------------------------------------------------------------

fn clean_rows(layout: &ColumnLayout, records: &[csv::StringRecord]) -> Result<Vec<CleanRow>> {
    let date_idx = layout
        .transaction_date
        .ok_or(PennyError::MissingColumn("transaction_date"))?;
    let desc_idx = layout
        .description
        .ok_or(PennyError::MissingColumn("description"))?;
    let amount_idx = layout.amount.ok_or(PennyError::MissingColumn("amount"))?;

    let mut rows = Vec::new();
    for record in records {
        // Fully-blank rows are dropped before any value parsing; they count
        // as neither inserted nor skipped.
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let optional = |idx: Option<usize>| -> Option<&str> {
            idx.and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|s| !s.is_empty())
        };

        let transaction_date = parse_date(record.get(date_idx).unwrap_or(""))?;
        let post_date = match optional(layout.post_date) {
            Some(raw) => Some(parse_date(raw)?),
            None => None,
        };
        let amount = parse_amount(record.get(amount_idx).unwrap_or(""))?;

        rows.push(CleanRow {
            transaction_date,
            post_date,
            description: record.get(desc_idx).unwrap_or("").trim().to_string(),
            original_category: optional(layout.original_category).map(str::to_string),
            transaction_type: optional(layout.transaction_type).map(str::to_string),
            amount,
            memo: optional(layout.memo).map(str::to_string).unwrap_or_default(),
        });
    }
    Ok(rows)
}

/// Min/max transaction date across the cleaned rows. ISO strings order
/// lexicographically.
fn date_range(rows: &[CleanRow]) -> Option<(String, String)> {
    let start = rows.iter().map(|r| r.transaction_date.as_str()).min()?;
    let end = rows.iter().map(|r| r.transaction_date.as_str()).max()?;
    Some((start.to_string(), end.to_string()))
}

// ---------------------------------------------------------------------------
// Institutions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Institution {
    Chase,
}

impl Institution {
    /// An unrecognized hint is a typed failure before anything is read or
    /// written.
    pub fn parse(hint: &str) -> Result<Self> {
        match hint.trim().to_lowercase().as_str() {
            "chase" => Ok(Self::Chase),
            other => Err(PennyError::UnsupportedInstitution(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Chase => "Chase",
        }
    }

    pub fn default_account_type(&self) -> &'static str {
        match self {
            Self::Chase => "Credit Card",
        }
    }

    pub fn default_account_name(&self, file_path: &Path) -> String {
        let stem = file_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("import");
        format!("{} - {}", self.name(), stem)
    }
}

// ---------------------------------------------------------------------------
// import_file
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ImportOutcome {
    pub account_id: i64,
    pub account_name: String,
    pub inserted: usize,
    pub skipped: usize,
    pub row_count: usize,
    pub date_range: Option<(String, String)>,
}

pub fn import_file(
    conn: &Connection,
    file_path: &Path,
    institution: Institution,
    account_name: Option<&str>,
) -> Result<ImportOutcome> {
    let file = std::fs::File::open(file_path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(BufReader::new(file));
    let headers = rdr.headers()?.clone();
    let records: Vec<csv::StringRecord> =
        rdr.records().collect::<std::result::Result<_, _>>()?;

    let layout = ColumnLayout::from_headers(headers.iter());
    let rows = clean_rows(&layout, &records)?;
    let range = date_range(&rows);

    let account_name = match account_name {
        Some(name) => name.to_string(),
        None => institution.default_account_name(file_path),
    };
    let account_id = resolve_account(
        conn,
        &account_name,
        institution.default_account_type(),
        institution.name(),
    )?;

    let mut inserted = 0usize;
    let mut skipped = 0usize;
    for row in &rows {
        match insert_transaction(conn, account_id, row)? {
            InsertOutcome::Inserted => inserted += 1,
            InsertOutcome::DuplicateSkipped => skipped += 1,
        }
    }

    // Provenance only. Never consulted on re-import: the natural key on
    // transactions is the sole dedup authority.
    let checksum = compute_checksum(file_path)?;
    conn.execute(
        "INSERT INTO imports (filename, account_id, record_count, date_range_start, date_range_end, checksum) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
            file_path.file_name().and_then(|n| n.to_str()).unwrap_or(""),
            account_id,
            rows.len() as i64,
            range.as_ref().map(|(s, _)| s.as_str()),
            range.as_ref().map(|(_, e)| e.as_str()),
            checksum,
        ],
    )?;

    Ok(ImportOutcome {
        account_id,
        account_name,
        inserted,
        skipped,
        row_count: rows.len(),
        date_range: range,
    })
}
