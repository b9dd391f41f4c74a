use thiserror::Error;

#[derive(Error, Debug)]
pub enum PennyError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    #[error("Unknown account id: {0}")]
    UnknownAccountId(i64),

    #[error("Unsupported institution: {0} (currently supported: chase)")]
    UnsupportedInstitution(String),

    #[error("Import file has no usable '{0}' column")]
    MissingColumn(&'static str),

    #[error("Unparseable date: '{0}'")]
    InvalidDate(String),

    #[error("Unparseable amount: '{0}'")]
    InvalidAmount(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, PennyError>;
