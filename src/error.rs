use thiserror::Error;

#[derive(Error, Debug)]
pub enum PennyError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Structurally unparseable input. Fatal to the whole operation.
    #[error("{0}")]
    Format(String),

    /// A specific row violated a constraint. `row` is the 1-based source
    /// line number of the offending row.
    #[error("Row {row}: {reason}")]
    Validation { row: u64, reason: String },

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PennyError>;
