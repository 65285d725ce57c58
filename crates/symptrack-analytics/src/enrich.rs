//! Row-wise enrichment of an uploaded report table.
//!
//! Input: an Arrow RecordBatch with at least `Text` and `Severity` columns
//! (any type castable to `Utf8`). Output: an [`EnrichedTable`] holding the typed
//! reports and an enriched RecordBatch with the same rows in the same order.
//!
//! Required columns are checked before any row is touched, so a schema error
//! never yields a partial table.

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, Date32Array, Float64Array, StringArray, UInt32Array,
};
use arrow::compute::{cast, filter_record_batch, take_record_batch};
use arrow::datatypes::{DataType, Date32Type};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use serde::Serialize;
use symptrack_core::columns;
use symptrack_core::schema::enriched_schema;
use tracing::{debug, info, warn};

use crate::filter::FilterSelection;
use crate::{EnrichError, EnrichedReport, Report, SeverityPolicy, parse_date};

/// A row dropped under [`SeverityPolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    /// Zero-based index of the source row.
    pub row: usize,
    /// The offending severity cell; `None` when it was empty.
    pub value: Option<String>,
}

/// Enriched reports with their Arrow representation.
#[derive(Debug, Clone)]
pub struct EnrichedTable {
    reports: Vec<EnrichedReport>,
    batch: RecordBatch,
    has_date: bool,
    skipped: Vec<SkippedRow>,
}

impl EnrichedTable {
    /// Enriched reports in source order.
    pub fn reports(&self) -> &[EnrichedReport] {
        &self.reports
    }

    /// Enriched RecordBatch, row-aligned with [`reports`](Self::reports).
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Whether the upload carried a `Date` column.
    pub fn has_date(&self) -> bool {
        self.has_date
    }

    /// Rows dropped for an invalid severity (always empty under `Reject`).
    pub fn skipped(&self) -> &[SkippedRow] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// The enriched RecordBatch restricted to rows matching `selection`.
    pub fn filtered_batch(&self, selection: &FilterSelection) -> Result<RecordBatch, EnrichError> {
        let mask: BooleanArray = self
            .reports
            .iter()
            .map(|r| Some(selection.matches(r)))
            .collect();
        Ok(filter_record_batch(&self.batch, &mask)?)
    }

    /// Enriched rows for the given source rows, projected to `cols`.
    ///
    /// Columns absent from the table are left out.
    pub fn rows_batch(&self, rows: &[usize], cols: &[&str]) -> Result<RecordBatch, EnrichError> {
        let mut positions = Vec::with_capacity(rows.len());
        for &row in rows {
            let pos = self
                .reports
                .binary_search_by_key(&row, |r| r.row())
                .map_err(|_| EnrichError::UnknownRow(row))?;
            positions.push(pos as u32);
        }
        let taken = take_record_batch(&self.batch, &UInt32Array::from(positions))?;

        let schema = taken.schema();
        let projection: Vec<usize> = cols
            .iter()
            .filter_map(|c| schema.index_of(c).ok())
            .collect();
        Ok(taken.project(&projection)?)
    }
}

/// Enrich every row of `batch`.
///
/// Fails with [`EnrichError::MissingColumn`] if `Text` or `Severity` is absent.
/// Invalid severities fail the pass or are skipped according to `policy`;
/// an unparseable non-empty date always fails the pass.
pub fn enrich(batch: &RecordBatch, policy: SeverityPolicy) -> Result<EnrichedTable, EnrichError> {
    let schema = batch.schema();
    for column in columns::REQUIRED {
        if schema.index_of(column).is_err() {
            return Err(EnrichError::MissingColumn {
                column: column.to_string(),
            });
        }
    }

    let text = utf8_column(batch, columns::TEXT)?;
    let severity = utf8_column(batch, columns::SEVERITY)?;
    let symptoms = optional_utf8_column(batch, columns::SYMPTOMS)?;
    let dates = optional_utf8_column(batch, columns::DATE)?;
    let has_date = dates.is_some();

    let n = batch.num_rows();
    let mut reports = Vec::with_capacity(n);
    let mut kept: Vec<u32> = Vec::with_capacity(n);
    let mut skipped = Vec::new();

    for row in 0..n {
        let raw_severity = cell(&severity, row);
        let Some(value) = raw_severity.and_then(symptrack_core::parse_severity) else {
            match policy {
                SeverityPolicy::Reject => {
                    return Err(EnrichError::InvalidSeverity {
                        row,
                        value: raw_severity.unwrap_or_default().to_string(),
                    });
                }
                SeverityPolicy::Skip => {
                    warn!(row, value = ?raw_severity, "skipping row with invalid severity");
                    skipped.push(SkippedRow {
                        row,
                        value: raw_severity.map(str::to_string),
                    });
                    continue;
                }
            }
        };

        let date = match dates.as_ref().and_then(|col| cell(col, row)) {
            Some(raw) if !raw.trim().is_empty() => {
                Some(parse_date(raw).ok_or_else(|| EnrichError::InvalidDate {
                    row,
                    value: raw.to_string(),
                })?)
            }
            _ => None,
        };

        let report = Report {
            row,
            text: cell(&text, row).unwrap_or_default().to_string(),
            symptoms: symptoms
                .as_ref()
                .and_then(|col| cell(col, row))
                .map(str::to_string),
            severity: value,
            date,
        };
        reports.push(EnrichedReport::classify(report));
        kept.push(row as u32);
    }

    let source = if skipped.is_empty() {
        batch.clone()
    } else {
        take_record_batch(batch, &UInt32Array::from(kept))?
    };
    let enriched = build_enriched_batch(&source, &reports)?;

    info!(
        rows = reports.len(),
        skipped = skipped.len(),
        has_date,
        "enriched reports"
    );

    Ok(EnrichedTable {
        reports,
        batch: enriched,
        has_date,
        skipped,
    })
}

/// Rebuild `source` with typed `Severity`/`Date` columns and derived columns appended.
fn build_enriched_batch(
    source: &RecordBatch,
    reports: &[EnrichedReport],
) -> Result<RecordBatch, EnrichError> {
    let source_schema = source.schema();
    let schema = Arc::new(enriched_schema(&source_schema));

    let mut out: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());
    for (idx, field) in source_schema.fields().iter().enumerate() {
        let name = field.name().as_str();
        if columns::is_derived(name) {
            debug!(column = name, "recomputing existing derived column");
            continue;
        }
        let column: ArrayRef = match name {
            columns::SEVERITY => Arc::new(
                reports
                    .iter()
                    .map(|r| r.report.severity)
                    .collect::<Float64Array>(),
            ),
            columns::DATE => Arc::new(
                reports
                    .iter()
                    .map(|r| r.date().map(Date32Type::from_naive_date))
                    .collect::<Date32Array>(),
            ),
            _ => Arc::clone(source.column(idx)),
        };
        out.push(column);
    }

    out.push(Arc::new(
        reports.iter().map(|r| r.polarity).collect::<Float64Array>(),
    ));
    out.push(Arc::new(StringArray::from_iter_values(
        reports.iter().map(|r| r.sentiment.as_str()),
    )));
    out.push(Arc::new(StringArray::from_iter_values(
        reports.iter().map(|r| r.risk.as_str()),
    )));
    out.push(Arc::new(StringArray::from_iter_values(
        reports.iter().map(|r| r.symptom_category.as_str()),
    )));

    Ok(RecordBatch::try_new(schema, out)?)
}

// ── Arrow extraction helpers ──

/// Named column cast to `Utf8`.
fn utf8_column(batch: &RecordBatch, name: &str) -> Result<StringArray, EnrichError> {
    let col = batch
        .column_by_name(name)
        .ok_or_else(|| EnrichError::MissingColumn {
            column: name.to_string(),
        })?;
    let as_utf8 = cast(col, &DataType::Utf8)?;
    as_utf8
        .as_string_opt::<i32>()
        .cloned()
        .ok_or_else(|| {
            EnrichError::Arrow(ArrowError::CastError(format!(
                "column '{name}' did not cast to Utf8"
            )))
        })
}

fn optional_utf8_column(
    batch: &RecordBatch,
    name: &str,
) -> Result<Option<StringArray>, EnrichError> {
    if batch.column_by_name(name).is_none() {
        return Ok(None);
    }
    utf8_column(batch, name).map(Some)
}

fn cell(col: &StringArray, row: usize) -> Option<&str> {
    if col.is_null(row) {
        None
    } else {
        Some(col.value(row))
    }
}
