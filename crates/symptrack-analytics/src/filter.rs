//! Inclusion filters over enriched reports.
//!
//! A report passes when its risk, composite symptom category, and sentiment
//! are each in the corresponding inclusion set. Composite categories such as
//! `"Respiratory, Fever"` are matched as a whole string, never split.

use std::collections::BTreeSet;

use serde::Serialize;
use symptrack_core::{RiskTier, Sentiment};

use crate::EnrichedReport;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    pub risks: BTreeSet<RiskTier>,
    pub categories: BTreeSet<String>,
    pub sentiments: BTreeSet<Sentiment>,
}

impl FilterSelection {
    /// Selection including every value observed in `reports`.
    ///
    /// This is the selection in effect when the user applies no filter.
    pub fn observed(reports: &[EnrichedReport]) -> Self {
        Self {
            risks: reports.iter().map(|r| r.risk).collect(),
            categories: reports.iter().map(|r| r.symptom_category.clone()).collect(),
            sentiments: reports.iter().map(|r| r.sentiment).collect(),
        }
    }

    /// Replace the risk inclusion set.
    pub fn with_risks(mut self, risks: impl IntoIterator<Item = RiskTier>) -> Self {
        self.risks = risks.into_iter().collect();
        self
    }

    /// Replace the symptom category inclusion set.
    pub fn with_categories<S: Into<String>>(
        mut self,
        categories: impl IntoIterator<Item = S>,
    ) -> Self {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the sentiment inclusion set.
    pub fn with_sentiments(mut self, sentiments: impl IntoIterator<Item = Sentiment>) -> Self {
        self.sentiments = sentiments.into_iter().collect();
        self
    }

    pub fn matches(&self, report: &EnrichedReport) -> bool {
        self.risks.contains(&report.risk)
            && self.categories.contains(&report.symptom_category)
            && self.sentiments.contains(&report.sentiment)
    }

    /// Reports passing the selection, in their original order.
    pub fn apply<'a>(&self, reports: &'a [EnrichedReport]) -> Vec<&'a EnrichedReport> {
        reports.iter().filter(|r| self.matches(r)).collect()
    }
}
