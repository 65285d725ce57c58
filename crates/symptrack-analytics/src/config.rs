//! Analysis settings, resolved once at startup and passed into each pass.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default size of the high-risk detail table.
pub const DEFAULT_TOP_N: usize = 10;
/// Default number of words kept for the word cloud.
pub const DEFAULT_WORD_LIMIT: usize = 50;

/// What to do with a row whose severity is missing or not numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityPolicy {
    /// Fail the whole upload on the first invalid row.
    #[default]
    Reject,
    /// Drop invalid rows and report them alongside the enriched table.
    Skip,
}

impl SeverityPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Skip => "skip",
        }
    }
}

impl fmt::Display for SeverityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeverityPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "skip" => Ok(Self::Skip),
            other => Err(format!(
                "unknown severity policy '{other}' (expected reject or skip)"
            )),
        }
    }
}

/// Settings for one enrichment + aggregation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Rows kept in the high-risk detail table.
    pub top_n: usize,
    /// Words kept in the word-frequency list.
    pub word_limit: usize,
    pub severity_policy: SeverityPolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            word_limit: DEFAULT_WORD_LIMIT,
            severity_policy: SeverityPolicy::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_word_limit(mut self, word_limit: usize) -> Self {
        self.word_limit = word_limit;
        self
    }

    pub fn with_severity_policy(mut self, policy: SeverityPolicy) -> Self {
        self.severity_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.top_n, 10);
        assert_eq!(config.word_limit, 50);
        assert_eq!(config.severity_policy, SeverityPolicy::Reject);
    }

    #[test]
    fn builder_overrides() {
        let config = AnalysisConfig::default()
            .with_top_n(3)
            .with_word_limit(0)
            .with_severity_policy(SeverityPolicy::Skip);
        assert_eq!(config.top_n, 3);
        assert_eq!(config.word_limit, 0);
        assert_eq!(config.severity_policy, SeverityPolicy::Skip);
    }

    #[test]
    fn policy_parse() {
        assert_eq!("Skip".parse::<SeverityPolicy>(), Ok(SeverityPolicy::Skip));
        assert_eq!(" reject".parse::<SeverityPolicy>(), Ok(SeverityPolicy::Reject));
        assert!("ignore".parse::<SeverityPolicy>().is_err());
    }
}
