//! CSV upload reader.
//!
//! Every column is read as nullable `Utf8` with names taken verbatim from the
//! header row. Typing (severity, dates) is the enricher's job, so a malformed
//! cell surfaces as a row-level error there rather than as a CSV parse failure.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use std::sync::Arc;

use arrow::compute::concat_batches;
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use tracing::{debug, info};

use crate::StoreError;

/// Read a CSV upload from disk into a single RecordBatch.
pub fn read_csv(path: &Path) -> Result<RecordBatch, StoreError> {
    if !path.exists() {
        return Err(StoreError::CsvNotFound(path.to_path_buf()));
    }
    let file = File::open(path)?;
    let batch = read_csv_from(file)?;
    info!(
        rows = batch.num_rows(),
        columns = batch.num_columns(),
        path = %path.display(),
        "loaded csv upload"
    );
    Ok(batch)
}

/// Read CSV from any seekable reader into a single RecordBatch.
///
/// The reader is rewound after the header is inspected.
pub fn read_csv_from<R: Read + Seek>(mut reader: R) -> Result<RecordBatch, StoreError> {
    // Short rows (a trailing optional cell left off) read as nulls.
    let format = Format::default()
        .with_header(true)
        .with_truncated_rows(true);
    let (header, _) = format.infer_schema(&mut reader, Some(0))?;
    if header.fields().is_empty() {
        return Err(StoreError::MissingHeader);
    }
    reader.rewind()?;

    let schema = Arc::new(utf8_schema(&header));
    debug!(columns = ?column_names(&schema), "csv header");

    let csv = ReaderBuilder::new(Arc::clone(&schema))
        .with_format(format)
        .build(reader)?;
    let batches = csv.collect::<Result<Vec<RecordBatch>, _>>()?;

    Ok(concat_batches(&schema, &batches)?)
}

/// Same column names, all typed as nullable `Utf8`.
fn utf8_schema(header: &Schema) -> Schema {
    Schema::new(
        header
            .fields()
            .iter()
            .map(|f| Field::new(f.name(), DataType::Utf8, true))
            .collect::<Vec<_>>(),
    )
}

fn column_names(schema: &Schema) -> Vec<&str> {
    schema.fields().iter().map(|f| f.name().as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, StringArray};
    use std::io::{Cursor, Write};

    fn read_str(csv: &str) -> Result<RecordBatch, StoreError> {
        read_csv_from(Cursor::new(csv.as_bytes().to_vec()))
    }

    fn utf8_col<'a>(batch: &'a RecordBatch, name: &str) -> &'a StringArray {
        batch
            .column_by_name(name)
            .unwrap()
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap()
    }

    #[test]
    fn reads_all_columns_as_utf8() {
        let batch = read_str(
            "Text,Symptoms,Severity,Date\n\
             I have a bad cough,cough,5,2024-01-01\n\
             feeling great,-,1,2024-01-02\n",
        )
        .unwrap();

        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 4);
        for field in batch.schema().fields() {
            assert_eq!(field.data_type(), &DataType::Utf8);
        }
        assert_eq!(utf8_col(&batch, "Severity").value(0), "5");
        assert_eq!(utf8_col(&batch, "Text").value(1), "feeling great");
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let batch = read_str(
            "Text,Severity\n\
             \"cough, fever and chills\",4\n",
        )
        .unwrap();
        assert_eq!(utf8_col(&batch, "Text").value(0), "cough, fever and chills");
    }

    #[test]
    fn header_order_and_names_verbatim() {
        let batch = read_str("Severity,Ward,Text\n3,B2,tired\n").unwrap();
        let schema = batch.schema();
        assert_eq!(column_names(&schema), vec!["Severity", "Ward", "Text"]);
    }

    #[test]
    fn non_numeric_severity_is_not_a_read_error() {
        let batch = read_str("Text,Severity\nheadache,high\n").unwrap();
        assert_eq!(utf8_col(&batch, "Severity").value(0), "high");
    }

    #[test]
    fn empty_cell_reads_as_null() {
        let batch = read_str("Text,Severity\n,2\n").unwrap();
        assert!(utf8_col(&batch, "Text").is_null(0));
    }

    #[test]
    fn short_row_fills_missing_trailing_cells_with_null() {
        let batch = read_str(
            "Text,Severity,Date\n\
             bad cough,5,2024-01-01\n\
             Feeling better,0.5\n",
        )
        .unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(utf8_col(&batch, "Severity").value(1), "0.5");
        assert!(utf8_col(&batch, "Date").is_null(1));
        assert_eq!(utf8_col(&batch, "Date").value(0), "2024-01-01");
    }

    #[test]
    fn header_only_gives_zero_rows() {
        let batch = read_str("Text,Severity\n").unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.num_columns(), 2);
    }

    #[test]
    fn empty_input_errors() {
        assert!(read_str("").is_err());
    }

    #[test]
    fn read_missing_file_errors() {
        let err = read_csv(Path::new("/nonexistent/reports.csv")).unwrap_err();
        assert!(matches!(err, StoreError::CsvNotFound(_)));
    }

    #[test]
    fn read_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Text,Severity").unwrap();
        writeln!(file, "migraine,3").unwrap();
        file.flush().unwrap();

        let batch = read_csv(file.path()).unwrap();
        assert_eq!(batch.num_rows(), 1);
        assert_eq!(utf8_col(&batch, "Text").value(0), "migraine");
    }
}
