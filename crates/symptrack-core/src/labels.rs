//! Derived labels attached to every health report.
//!
//! Each label has a fixed display string (the value written to the enriched
//! table and shown to users) and a fixed ordering used when labels are listed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Polarity above this is positive.
pub const POSITIVE_THRESHOLD: f64 = 0.1;
/// Polarity below this is negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

// ── Sentiment ──

/// Sentiment label derived from a text's polarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Display order, as used by the sentiment distribution.
    pub const ALL: [Sentiment; 3] = [Self::Positive, Self::Neutral, Self::Negative];

    /// Bucket a polarity score: `> 0.1` positive, `< -0.1` negative, else neutral.
    pub fn from_polarity(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            Self::Positive
        } else if score < NEGATIVE_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseLabelError {
                kind: "sentiment",
                value: s.to_string(),
                expected: "Positive, Neutral, Negative",
            })
    }
}

// ── Risk ──

/// Coarse risk bucket derived from a numeric severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    High,
    Medium,
    Low,
}

impl RiskTier {
    /// Display order, as used by summary metrics and cross-tab columns.
    pub const ALL: [RiskTier; 3] = [Self::High, Self::Medium, Self::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTier {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseLabelError {
                kind: "risk tier",
                value: s.to_string(),
                expected: "High, Medium, Low",
            })
    }
}

// ── Symptom categories ──

/// Keyword-defined symptom category.
///
/// Declaration order is significant: a report matching several categories
/// lists them in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SymptomCategory {
    Respiratory,
    Fever,
    Fatigue,
    Headache,
}

impl SymptomCategory {
    pub const ALL: [SymptomCategory; 4] = [
        Self::Respiratory,
        Self::Fever,
        Self::Fatigue,
        Self::Headache,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Respiratory => "Respiratory",
            Self::Fever => "Fever",
            Self::Fatigue => "Fatigue",
            Self::Headache => "Headache",
        }
    }
}

impl fmt::Display for SymptomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
