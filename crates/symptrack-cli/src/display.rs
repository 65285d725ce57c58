//! Terminal rendering of the dashboard.
//!
//! Each aggregate is printed as its own titled section; the high-risk detail
//! table is rendered from the enriched RecordBatch with Arrow's pretty printer.

use arrow::util::pretty::pretty_format_batches;
use symptrack_analytics::aggregate::{CategoryCount, CrossTab, SentimentCount, TrendPoint};
use symptrack_analytics::{Dashboard, EnrichedTable};
use symptrack_core::{RiskTier, Sentiment, columns};

/// Widest bar drawn for a distribution.
const BAR_WIDTH: usize = 40;

/// Words shown per line in the word list.
const WORDS_PER_LINE: usize = 6;

// ── Public API ──

/// Print every dashboard section for the filtered table.
pub fn print_dashboard(dashboard: &Dashboard, table: &EnrichedTable) -> anyhow::Result<()> {
    println!("=== Health Report Dashboard ===");
    println!(
        "{} of {} reports selected",
        dashboard.summary.total, dashboard.uploaded
    );
    println!();

    print_summary(dashboard);
    print_sentiment(&dashboard.sentiment);
    print_categories(&dashboard.categories);
    print_heatmap(&dashboard.cross_tab);
    match &dashboard.trend {
        Some(points) => print_trend(points),
        None => {
            println!("Trend");
            println!("  (no Date column in upload)");
            println!();
        }
    }
    print_top_high_risk(dashboard, table)?;
    print_words(dashboard);
    print_skipped(dashboard);

    Ok(())
}

/// Print the labels derived for a single text.
pub fn print_classification(
    text: &str,
    polarity: f64,
    sentiment: Sentiment,
    category: &str,
    risk: Option<(f64, RiskTier)>,
) {
    println!("=== {} ===", text);
    println!("  {:<26} {:.3}", "Polarity", polarity);
    println!("  {:<26} {}", columns::SENTIMENT, sentiment);
    println!("  {:<26} {}", columns::SYMPTOM_CATEGORY, category);
    if let Some((severity, tier)) = risk {
        println!("  {:<26} {}", columns::SEVERITY, severity);
        println!("  {:<26} {}", columns::RISK, tier);
    }
}

// ── Sections ──

fn print_summary(dashboard: &Dashboard) {
    let s = &dashboard.summary;
    println!("Summary");
    println!("  {:<26} {}", "Total Reports", s.total);
    for tier in RiskTier::ALL {
        println!("  {:<26} {}", format!("{tier} Risk"), s.count(tier));
    }
    println!();
}

fn print_sentiment(counts: &[SentimentCount]) {
    println!("Sentiment");
    let max = counts.iter().map(|c| c.count).max().unwrap_or(0);
    for c in counts {
        println!(
            "  {:<26} {:>5}  {}",
            c.sentiment.as_str(),
            c.count,
            bar(c.count, max)
        );
    }
    println!();
}

fn print_categories(counts: &[CategoryCount]) {
    println!("Symptom Categories");
    if counts.is_empty() {
        println!("  (none)");
    }
    let max = counts.first().map_or(0, |c| c.count);
    for c in counts {
        println!(
            "  {:<26} {:>5}  {}",
            truncate(&c.category, 26),
            c.count,
            bar(c.count, max)
        );
    }
    println!();
}

fn print_heatmap(tab: &CrossTab) {
    println!("Symptom Category x Risk");
    if tab.rows.is_empty() {
        println!("  (none)");
        println!();
        return;
    }
    print!("  {:<26}", "");
    for risk in &tab.risks {
        print!(" {:>7}", risk.as_str());
    }
    println!();
    for row in &tab.rows {
        print!("  {:<26}", truncate(&row.category, 26));
        for count in &row.counts {
            print!(" {:>7}", count);
        }
        println!();
    }
    println!();
}

fn print_trend(points: &[TrendPoint]) {
    println!("Trend");
    if points.is_empty() {
        println!("  (no dated reports)");
    }
    let mut last_date = None;
    for p in points {
        let date = if last_date == Some(p.date) {
            String::new()
        } else {
            p.date.to_string()
        };
        println!("  {:<12} {:<26} {:>5}", date, truncate(&p.category, 26), p.count);
        last_date = Some(p.date);
    }
    println!();
}

fn print_top_high_risk(dashboard: &Dashboard, table: &EnrichedTable) -> anyhow::Result<()> {
    println!("Top High-Risk Reports");
    let rows = dashboard.top_high_risk_rows();
    if rows.is_empty() {
        println!("  (none)");
        println!();
        return Ok(());
    }
    let batch = table.rows_batch(&rows, columns::DETAIL)?;
    println!("{}", pretty_format_batches(&[batch])?);
    println!();
    Ok(())
}

fn print_words(dashboard: &Dashboard) {
    println!("Common Words");
    if dashboard.words.is_empty() {
        println!("  (none)");
    }
    for line in dashboard.words.chunks(WORDS_PER_LINE) {
        let cells: Vec<String> = line
            .iter()
            .map(|w| format!("{} ({})", w.word, w.count))
            .collect();
        println!("  {}", cells.join("  "));
    }
    println!();
}

fn print_skipped(dashboard: &Dashboard) {
    if dashboard.skipped.is_empty() {
        return;
    }
    println!("Skipped Rows ({})", dashboard.skipped.len());
    for s in &dashboard.skipped {
        // Data rows are numbered from 1, after the header.
        println!(
            "  row {:<6} severity {:?}",
            s.row + 1,
            s.value.as_deref().unwrap_or("")
        );
    }
    println!();
}

// ── Helpers ──

/// Bar scaled so that `max` fills [`BAR_WIDTH`]. Non-zero counts get at least one cell.
fn bar(count: usize, max: usize) -> String {
    if count == 0 || max == 0 {
        return String::new();
    }
    let width = (count * BAR_WIDTH / max).max(1);
    "#".repeat(width)
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}
