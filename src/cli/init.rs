use std::path::Path;

use crate::cli::open_store;
use crate::error::Result;
use crate::settings::{save_settings, Settings};

pub fn run(data_dir: &Path) -> Result<()> {
    let _conn = open_store(data_dir)?;
    save_settings(&Settings {
        data_dir: data_dir.display().to_string(),
    })?;
    println!("Initialized database: {}", data_dir.join("penny.db").display());
    Ok(())
}
