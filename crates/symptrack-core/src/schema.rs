use arrow::datatypes::{DataType, Field, Schema};

/// Column names of uploaded and enriched report tables.
pub mod columns {
    pub const TEXT: &str = "Text";
    pub const SYMPTOMS: &str = "Symptoms";
    pub const SEVERITY: &str = "Severity";
    pub const DATE: &str = "Date";

    pub const POLARITY: &str = "Polarity";
    pub const SENTIMENT: &str = "Sentiment";
    pub const RISK: &str = "Risk";
    pub const SYMPTOM_CATEGORY: &str = "Symptom_Category";

    /// Columns an upload must carry.
    pub const REQUIRED: &[&str] = &[TEXT, SEVERITY];

    /// Columns computed by enrichment.
    pub const DERIVED: &[&str] = &[POLARITY, SENTIMENT, RISK, SYMPTOM_CATEGORY];

    /// Columns shown in the high-risk detail table, when present.
    pub const DETAIL: &[&str] = &[TEXT, SYMPTOMS, SEVERITY, SENTIMENT, SYMPTOM_CATEGORY];

    pub fn is_derived(name: &str) -> bool {
        DERIVED.contains(&name)
    }
}

/// Fields appended to every enriched table.
pub fn derived_fields() -> Vec<Field> {
    vec![
        Field::new(columns::POLARITY, DataType::Float64, false),
        Field::new(columns::SENTIMENT, DataType::Utf8, false),
        Field::new(columns::RISK, DataType::Utf8, false),
        Field::new(columns::SYMPTOM_CATEGORY, DataType::Utf8, false),
    ]
}

/// Schema of an enriched table built from an upload with `input` schema.
///
/// Input columns keep their order. `Severity` becomes a non-null `Float64`,
/// `Date` becomes a nullable `Date32`, and the derived fields are appended.
/// Derived columns already present in `input` are dropped and recomputed.
pub fn enriched_schema(input: &Schema) -> Schema {
    let mut fields: Vec<Field> = input
        .fields()
        .iter()
        .filter(|f| !columns::is_derived(f.name()))
        .map(|f| match f.name().as_str() {
            columns::SEVERITY => Field::new(columns::SEVERITY, DataType::Float64, false),
            columns::DATE => Field::new(columns::DATE, DataType::Date32, true),
            _ => f.as_ref().clone(),
        })
        .collect();
    fields.extend(derived_fields());
    Schema::new(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload_schema(names: &[&str]) -> Schema {
        Schema::new(
            names
                .iter()
                .map(|n| Field::new(*n, DataType::Utf8, true))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn enriched_schema_retypes_and_appends() {
        let input = upload_schema(&["Text", "Symptoms", "Severity", "Date"]);
        let schema = enriched_schema(&input);

        assert_eq!(schema.fields().len(), 8);
        assert_eq!(
            schema.field_with_name("Severity").unwrap().data_type(),
            &DataType::Float64
        );
        assert_eq!(
            schema.field_with_name("Date").unwrap().data_type(),
            &DataType::Date32
        );
        assert_eq!(schema.field(4).name(), columns::POLARITY);
        assert_eq!(schema.field(7).name(), columns::SYMPTOM_CATEGORY);
    }

    #[test]
    fn enriched_schema_without_date() {
        let input = upload_schema(&["Severity", "Text", "Ward"]);
        let schema = enriched_schema(&input);

        assert_eq!(schema.fields().len(), 7);
        assert!(schema.field_with_name("Date").is_err());
        assert_eq!(schema.field(0).name(), "Severity");
        assert_eq!(schema.field(2).name(), "Ward");
        assert_eq!(
            schema.field_with_name("Ward").unwrap().data_type(),
            &DataType::Utf8
        );
    }

    #[test]
    fn enriched_schema_replaces_existing_derived_columns() {
        let input = upload_schema(&["Text", "Severity", "Risk", "Sentiment"]);
        let schema = enriched_schema(&input);

        assert_eq!(schema.fields().len(), 6);
        let risks = schema
            .fields()
            .iter()
            .filter(|f| f.name() == columns::RISK)
            .count();
        assert_eq!(risks, 1);
    }
}
