//! Analytics layer: row enrichment, filter selection, and dashboard aggregates.

pub mod aggregate;
mod config;
mod dashboard;
mod dates;
mod enrich;
mod error;
mod filter;
mod report;

pub use config::{AnalysisConfig, DEFAULT_TOP_N, DEFAULT_WORD_LIMIT, SeverityPolicy};
pub use dashboard::Dashboard;
pub use dates::parse_date;
pub use enrich::{EnrichedTable, SkippedRow, enrich};
pub use error::EnrichError;
pub use filter::FilterSelection;
pub use report::{EnrichedReport, Report};
