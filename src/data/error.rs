use thiserror::Error;

// ---------------------------------------------------------------------------
// DataError – typed failures of the data layer
// ---------------------------------------------------------------------------

/// Errors surfaced by loading, cleaning, filtering and chart preparation.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("column '{0}' is not numeric")]
    NotNumeric(String),

    #[error("column '{0}' is not a timestamp column")]
    NotTimestamp(String),

    #[error("column '{0}' has no finite values")]
    EmptyColumn(String),

    #[error("column length mismatch: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("CSV error")]
    Csv(#[from] csv::Error),

    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DataError>;
