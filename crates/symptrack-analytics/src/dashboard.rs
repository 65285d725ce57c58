use serde::Serialize;
use tracing::debug;

use crate::aggregate::{
    self, CategoryCount, CrossTab, RiskSummary, SentimentCount, TrendPoint, WordCount,
};
use crate::{AnalysisConfig, EnrichedReport, EnrichedTable, FilterSelection, SkippedRow};

/// Everything the dashboard renders for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// Rows in the enriched table before filtering.
    pub uploaded: usize,
    pub selection: FilterSelection,
    pub summary: RiskSummary,
    pub sentiment: Vec<SentimentCount>,
    pub categories: Vec<CategoryCount>,
    pub cross_tab: CrossTab,
    /// `None` when the upload has no `Date` column.
    pub trend: Option<Vec<TrendPoint>>,
    pub top_high_risk: Vec<EnrichedReport>,
    pub words: Vec<WordCount>,
    pub skipped: Vec<SkippedRow>,
}

impl Dashboard {
    /// Filter `table` by `selection` and compute every aggregate.
    pub fn build(
        table: &EnrichedTable,
        selection: &FilterSelection,
        config: &AnalysisConfig,
    ) -> Self {
        let rows = selection.apply(table.reports());
        debug!(
            uploaded = table.len(),
            selected = rows.len(),
            "building dashboard"
        );

        Self {
            uploaded: table.len(),
            selection: selection.clone(),
            summary: aggregate::risk_summary(&rows),
            sentiment: aggregate::sentiment_distribution(&rows),
            categories: aggregate::category_distribution(&rows),
            cross_tab: aggregate::cross_tab(&rows),
            trend: table.has_date().then(|| aggregate::trend(&rows)),
            top_high_risk: aggregate::top_high_risk(&rows, config.top_n)
                .into_iter()
                .cloned()
                .collect(),
            words: aggregate::word_frequencies(&rows, config.word_limit),
            skipped: table.skipped().to_vec(),
        }
    }

    /// Dashboard with no filter applied.
    pub fn unfiltered(table: &EnrichedTable, config: &AnalysisConfig) -> Self {
        Self::build(table, &FilterSelection::observed(table.reports()), config)
    }

    /// Source rows of the high-risk detail table.
    pub fn top_high_risk_rows(&self) -> Vec<usize> {
        self.top_high_risk.iter().map(EnrichedReport::row).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use symptrack_core::{RiskTier, Sentiment};
    use symptrack_store::read_csv_from;

    use super::*;
    use crate::{EnrichError, SeverityPolicy, enrich};

    fn table_from(csv: &str, policy: SeverityPolicy) -> Result<EnrichedTable, EnrichError> {
        let batch = read_csv_from(Cursor::new(csv.to_string())).unwrap();
        enrich(&batch, policy)
    }

    const SCENARIO: &str = "\
Text,Symptoms,Severity,Date
I have a bad cough,cough,5,2024-01-01
feeling great,-,1,2024-01-02
";

    const WEEK: &str = "\
Text,Severity,Date
Severe cough and fever,4.5,2024-03-01
Mild headache,1.5,2024-03-01
Very tired today,2.5,2024-03-02
Terrible migraine,4,2024-03-02
Feeling better,0.5,
Cough at night,3,2024-03-03
";

    #[test]
    fn two_row_scenario() {
        let table = table_from(SCENARIO, SeverityPolicy::Reject).unwrap();
        let dash = Dashboard::unfiltered(&table, &AnalysisConfig::default());

        assert_eq!(dash.uploaded, 2);
        assert_eq!(dash.summary.total, 2);
        assert_eq!(dash.summary.high, 1);
        assert_eq!(dash.summary.medium, 0);
        assert_eq!(dash.summary.low, 1);
        assert_eq!(dash.top_high_risk_rows(), vec![0]);
        assert_eq!(dash.top_high_risk[0].symptom_category, "Respiratory");
        assert_eq!(dash.top_high_risk[0].sentiment, Sentiment::Negative);
        assert_eq!(dash.cross_tab.get("Respiratory", RiskTier::High), 1);
        assert_eq!(dash.cross_tab.get("Other", RiskTier::Low), 1);
        assert_eq!(dash.trend.as_ref().map(Vec::len), Some(2));
        assert!(dash.skipped.is_empty());
    }

    #[test]
    fn filtered_aggregates_agree() {
        let table = table_from(WEEK, SeverityPolicy::Reject).unwrap();
        let selection = FilterSelection::observed(table.reports())
            .with_risks([RiskTier::High, RiskTier::Medium]);
        let dash = Dashboard::build(&table, &selection, &AnalysisConfig::default());

        assert_eq!(dash.uploaded, 6);
        assert_eq!(dash.summary.total, 4);
        assert_eq!(dash.summary.low, 0);
        assert_eq!(dash.cross_tab.total(), dash.summary.total);
        assert_eq!(
            dash.categories.iter().map(|c| c.count).sum::<usize>(),
            dash.summary.total
        );
        assert_eq!(
            dash.sentiment.iter().map(|c| c.count).sum::<usize>(),
            dash.summary.total
        );
        assert_eq!(dash.top_high_risk_rows(), vec![0, 3]);
    }

    #[test]
    fn trend_skips_rows_without_dates() {
        let table = table_from(WEEK, SeverityPolicy::Reject).unwrap();
        let dash = Dashboard::unfiltered(&table, &AnalysisConfig::default());
        let trend = dash.trend.unwrap();
        assert_eq!(trend.iter().map(|p| p.count).sum::<usize>(), 5);
        assert!(trend.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn short_row_without_date_counts_outside_trend() {
        let csv = "Text,Severity,Date\nbad cough,5,2024-01-01\nFeeling better,0.5\n";
        let table = table_from(csv, SeverityPolicy::Reject).unwrap();
        let dash = Dashboard::unfiltered(&table, &AnalysisConfig::default());

        assert_eq!(dash.summary.total, 2);
        assert_eq!(dash.summary.low, 1);
        assert_eq!(dash.cross_tab.get("Other", RiskTier::Low), 1);
        let trend = dash.trend.unwrap();
        assert_eq!(trend.len(), 1);
        assert_eq!(trend[0].category, "Respiratory");
        assert_eq!(trend[0].count, 1);
    }

    #[test]
    fn no_date_column_means_no_trend() {
        let csv = "Text,Severity\nbad cough,5\nfine,1\n";
        let table = table_from(csv, SeverityPolicy::Reject).unwrap();
        let dash = Dashboard::unfiltered(&table, &AnalysisConfig::default());
        assert!(dash.trend.is_none());
        assert_eq!(dash.summary.total, 2);
    }

    #[test]
    fn empty_selection_gives_empty_dashboard() {
        let table = table_from(WEEK, SeverityPolicy::Reject).unwrap();
        let selection = FilterSelection::observed(table.reports()).with_categories(["Nausea"]);
        let dash = Dashboard::build(&table, &selection, &AnalysisConfig::default());

        assert_eq!(dash.summary, RiskSummary::default());
        assert!(dash.categories.is_empty());
        assert!(dash.cross_tab.rows.is_empty());
        assert_eq!(dash.trend, Some(Vec::new()));
        assert!(dash.top_high_risk.is_empty());
        assert!(dash.words.is_empty());
    }

    #[test]
    fn config_limits_apply() {
        let table = table_from(WEEK, SeverityPolicy::Reject).unwrap();
        let config = AnalysisConfig::default().with_top_n(1).with_word_limit(2);
        let dash = Dashboard::unfiltered(&table, &config);
        assert_eq!(dash.top_high_risk_rows(), vec![0]);
        assert_eq!(dash.words.len(), 2);
        assert_eq!(dash.words[0].word, "cough");
    }

    #[test]
    fn missing_severity_column_is_rejected() {
        let csv = "Text,Date\nbad cough,2024-01-01\n";
        let err = table_from(csv, SeverityPolicy::Reject).unwrap_err();
        assert!(matches!(err, EnrichError::MissingColumn { ref column } if column == "Severity"));
    }

    #[test]
    fn skipped_rows_are_carried() {
        let csv = "Text,Severity\nbad cough,5\nunknown,n/a\nfine,1\n";
        let table = table_from(csv, SeverityPolicy::Skip).unwrap();
        let dash = Dashboard::unfiltered(&table, &AnalysisConfig::default());
        assert_eq!(dash.summary.total, 2);
        assert_eq!(dash.skipped.len(), 1);
        assert_eq!(dash.skipped[0].row, 1);
        assert_eq!(dash.skipped[0].value.as_deref(), Some("n/a"));
    }

    #[test]
    fn serializes_to_json() {
        let table = table_from(SCENARIO, SeverityPolicy::Reject).unwrap();
        let dash = Dashboard::unfiltered(&table, &AnalysisConfig::default());
        let json = serde_json::to_value(&dash).unwrap();
        assert_eq!(json["summary"]["high"], 1);
        assert_eq!(json["cross_tab"]["risks"][0], "High");
        assert_eq!(json["top_high_risk"][0]["text"], "I have a bad cough");
        assert_eq!(json["trend"][0]["date"], "2024-01-01");
    }
}
