//! Storage layer: CSV uploads into Arrow tables, Parquet export of enriched tables.

mod csv;
mod error;
mod parquet_io;

pub use csv::{read_csv, read_csv_from};
pub use error::StoreError;
pub use parquet_io::{read_parquet, write_parquet};
