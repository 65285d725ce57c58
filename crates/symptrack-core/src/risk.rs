//! Severity to risk tier mapping.
//!
//! Tiers are inclusive at their lower bound:
//!
//! - `s >= 4` → High
//! - `2 <= s < 4` → Medium
//! - `s < 2` → Low

use crate::RiskTier;

pub const HIGH_RISK_MIN: f64 = 4.0;
pub const MEDIUM_RISK_MIN: f64 = 2.0;

/// Map a severity value to its risk tier.
///
/// Callers are expected to reject non-finite severities before classifying
/// (see [`parse_severity`]).
pub fn risk_tier(severity: f64) -> RiskTier {
    if severity >= HIGH_RISK_MIN {
        RiskTier::High
    } else if severity >= MEDIUM_RISK_MIN {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

/// Parse a raw severity cell.
///
/// Returns `None` for empty, non-numeric, or non-finite (`NaN`, `inf`) input.
pub fn parse_severity(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}
