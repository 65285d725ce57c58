use chrono::NaiveDate;
use serde::Serialize;
use symptrack_core::{RiskTier, Sentiment, polarity, risk_tier, symptom_category};

/// One uploaded health report after its cells have been typed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Zero-based index of the source row in the upload.
    pub row: usize,
    /// Free text; a null cell becomes the empty string.
    pub text: String,
    pub symptoms: Option<String>,
    pub severity: f64,
    pub date: Option<NaiveDate>,
}

/// A report with its derived labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedReport {
    #[serde(flatten)]
    pub report: Report,
    pub polarity: f64,
    pub sentiment: Sentiment,
    pub risk: RiskTier,
    /// Composite category label, e.g. `"Respiratory, Fever"` or `"Other"`.
    pub symptom_category: String,
}

impl EnrichedReport {
    /// Derive all labels from the report's own text and severity.
    pub fn classify(report: Report) -> Self {
        let score = polarity(&report.text);
        let sentiment = Sentiment::from_polarity(score);
        let risk = risk_tier(report.severity);
        let symptom_category = symptom_category(&report.text);
        Self {
            report,
            polarity: score,
            sentiment,
            risk,
            symptom_category,
        }
    }

    pub fn row(&self) -> usize {
        self.report.row
    }

    pub fn text(&self) -> &str {
        &self.report.text
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.report.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(text: &str, severity: f64) -> Report {
        Report {
            row: 0,
            text: text.to_string(),
            symptoms: None,
            severity,
            date: None,
        }
    }

    #[test]
    fn classify_derives_all_labels() {
        let enriched = EnrichedReport::classify(report("I have a bad cough", 5.0));
        assert_eq!(enriched.risk, RiskTier::High);
        assert_eq!(enriched.symptom_category, "Respiratory");
        assert_eq!(enriched.sentiment, Sentiment::Negative);
        assert!(enriched.polarity < -0.1);
    }

    #[test]
    fn empty_text_is_neutral_other() {
        let enriched = EnrichedReport::classify(report("", 0.0));
        assert_eq!(enriched.sentiment, Sentiment::Neutral);
        assert_eq!(enriched.polarity, 0.0);
        assert_eq!(enriched.symptom_category, "Other");
        assert_eq!(enriched.risk, RiskTier::Low);
    }

    #[test]
    fn serializes_flat() {
        let enriched = EnrichedReport::classify(report("feeling great", 1.0));
        let json = serde_json::to_value(&enriched).unwrap();
        assert_eq!(json["text"], "feeling great");
        assert_eq!(json["risk"], "Low");
        assert_eq!(json["sentiment"], "Positive");
        assert_eq!(json["symptom_category"], "Other");
    }
}
