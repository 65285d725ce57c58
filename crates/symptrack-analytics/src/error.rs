use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("required column '{column}' is missing from the upload")]
    MissingColumn { column: String },

    #[error("invalid severity {value:?} in data row {}", .row + 1)]
    InvalidSeverity { row: usize, value: String },

    #[error("invalid date {value:?} in data row {}", .row + 1)]
    InvalidDate { row: usize, value: String },

    #[error("unknown source row {0}")]
    UnknownRow(usize),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}
