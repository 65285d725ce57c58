//! Dashboard aggregates over a filtered set of reports.
//!
//! Every function here is a pure function of its input slice. Ordering is
//! fixed so that repeated passes over the same rows render identically.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;
use symptrack_core::{RiskTier, Sentiment, tokenize};

use crate::EnrichedReport;

/// Words ignored by [`word_frequencies`].
const STOPWORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "am", "an", "and", "any", "are", "as", "at", "be",
    "been", "but", "by", "can", "did", "do", "does", "for", "from", "had", "has", "have", "having",
    "her", "him", "his", "how", "i", "if", "in", "into", "is", "it", "its", "just", "me", "more",
    "my", "now", "of", "on", "or", "our", "out", "she", "since", "so", "some", "than", "that",
    "the", "their", "them", "then", "there", "they", "this", "to", "too", "today", "up", "very",
    "was", "we", "were", "what", "when", "which", "while", "with", "you", "your",
];

/// Shortest word kept by [`word_frequencies`].
const MIN_WORD_LEN: usize = 3;

// ── Summary metrics ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RiskSummary {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl RiskSummary {
    pub fn count(&self, tier: RiskTier) -> usize {
        match tier {
            RiskTier::High => self.high,
            RiskTier::Medium => self.medium,
            RiskTier::Low => self.low,
        }
    }
}

/// Total count and count per risk tier.
pub fn risk_summary(rows: &[&EnrichedReport]) -> RiskSummary {
    let mut summary = RiskSummary {
        total: rows.len(),
        ..Default::default()
    };
    for r in rows {
        match r.risk {
            RiskTier::High => summary.high += 1,
            RiskTier::Medium => summary.medium += 1,
            RiskTier::Low => summary.low += 1,
        }
    }
    summary
}

// ── Distributions ──

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentimentCount {
    pub sentiment: Sentiment,
    pub count: usize,
}

/// Count per sentiment label: Positive, Neutral, Negative, zero-filled.
pub fn sentiment_distribution(rows: &[&EnrichedReport]) -> Vec<SentimentCount> {
    Sentiment::ALL
        .into_iter()
        .map(|sentiment| SentimentCount {
            sentiment,
            count: rows.iter().filter(|r| r.sentiment == sentiment).count(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Count per composite category, most frequent first (ties by name).
pub fn category_distribution(rows: &[&EnrichedReport]) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for r in rows {
        *counts.entry(r.symptom_category.as_str()).or_insert(0) += 1;
    }

    let mut out: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect();
    // Stable sort keeps the BTreeMap's name order among equal counts.
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

// ── Cross-tabulation ──

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossTabRow {
    pub category: String,
    /// Counts aligned with [`CrossTab::risks`].
    pub counts: Vec<usize>,
}

/// Category x risk count table for the heatmap.
///
/// Rows are the observed categories in name order; columns are always
/// High, Medium, Low, with zeros for absent combinations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossTab {
    pub risks: Vec<RiskTier>,
    pub rows: Vec<CrossTabRow>,
}

impl CrossTab {
    pub fn get(&self, category: &str, risk: RiskTier) -> usize {
        let Some(col) = self.risks.iter().position(|r| *r == risk) else {
            return 0;
        };
        self.rows
            .iter()
            .find(|row| row.category == category)
            .map_or(0, |row| row.counts[col])
    }

    /// Sum over all cells.
    pub fn total(&self) -> usize {
        self.rows.iter().flat_map(|row| row.counts.iter()).sum()
    }
}

pub fn cross_tab(rows: &[&EnrichedReport]) -> CrossTab {
    let risks = RiskTier::ALL.to_vec();
    let mut table: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for r in rows {
        let counts = table
            .entry(r.symptom_category.as_str())
            .or_insert_with(|| vec![0; risks.len()]);
        if let Some(col) = risks.iter().position(|t| *t == r.risk) {
            counts[col] += 1;
        }
    }

    CrossTab {
        rows: table
            .into_iter()
            .map(|(category, counts)| CrossTabRow {
                category: category.to_string(),
                counts,
            })
            .collect(),
        risks,
    }
}

// ── Trend ──

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub category: String,
    pub count: usize,
}

/// Count per (date, category), by ascending date then category.
///
/// Rows without a date are left out.
pub fn trend(rows: &[&EnrichedReport]) -> Vec<TrendPoint> {
    let mut counts: BTreeMap<(NaiveDate, &str), usize> = BTreeMap::new();
    for r in rows {
        if let Some(date) = r.date() {
            *counts
                .entry((date, r.symptom_category.as_str()))
                .or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .map(|((date, category), count)| TrendPoint {
            date,
            category: category.to_string(),
            count,
        })
        .collect()
}

// ── Detail table ──

/// The first `n` high-risk rows, in their original order.
pub fn top_high_risk<'a>(rows: &[&'a EnrichedReport], n: usize) -> Vec<&'a EnrichedReport> {
    rows.iter()
        .filter(|r| r.risk == RiskTier::High)
        .take(n)
        .copied()
        .collect()
}

// ── Word cloud ──

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Most frequent non-stopword words across the rows' text.
///
/// Words are lower-cased alphabetic tokens of at least three letters;
/// contractions are skipped. Sorted by descending count, then ascending word,
/// and truncated to `limit`.
pub fn word_frequencies(rows: &[&EnrichedReport], limit: usize) -> Vec<WordCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for r in rows {
        for token in tokenize(r.text()) {
            let word = token.trim_matches('\'');
            // Contractions ("don't", "can't") are left out whole.
            if word.chars().count() < MIN_WORD_LEN || !word.chars().all(char::is_alphabetic) {
                continue;
            }
            if STOPWORDS.contains(&word) {
                continue;
            }
            *counts.entry(word.to_string()).or_insert(0) += 1;
        }
    }

    let mut out: Vec<WordCount> = counts
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    out.truncate(limit);
    out
}
