use std::path::Path;

use colored::Colorize;

use crate::cli::open_store;
use crate::error::Result;
use crate::importer::{import_file, Institution};

pub fn run(data_dir: &Path, file: &str, institution: &str, account: Option<&str>) -> Result<()> {
    let institution = Institution::parse(institution)?;
    let conn = open_store(data_dir)?;

    let outcome = import_file(&conn, Path::new(file), institution, account)?;

    println!(
        "Imported into {} (account ID: {})",
        outcome.account_name.bold(),
        outcome.account_id
    );
    println!("Rows after cleaning: {}", outcome.row_count);
    println!(
        "{} imported, {} skipped (duplicates)",
        outcome.inserted, outcome.skipped
    );
    if let Some((start, end)) = &outcome.date_range {
        println!("Date range: {start} to {end}");
    }
    Ok(())
}
