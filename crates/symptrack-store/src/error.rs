use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("csv file not found: {0}")]
    CsvNotFound(std::path::PathBuf),

    #[error("parquet file not found: {0}")]
    ParquetNotFound(std::path::PathBuf),

    #[error("upload has no header row")]
    MissingHeader,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("parquet error: {0}")]
    Parquet(#[from] ::parquet::errors::ParquetError),
}
