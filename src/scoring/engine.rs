use serde::Serialize;

use super::weights;
use crate::report::types::ScoreTable;

/// RRI value above which an upload starts earning a premium discount.
pub const DISCOUNT_BASELINE: f64 = 0.70;

/// Discount percentage points earned per RRI point above the baseline.
pub const DISCOUNT_MULTIPLIER: f64 = 40.0;

/// Score substituted when a score cell cannot be parsed as a number.
pub const FALLBACK_SCORE: f64 = 70.0;

/// One input row after cleaning, parsing and weighting.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedRow {
    /// Department name, trimmed. No case folding.
    pub department: String,
    /// Parsed score on the 0-100 scale; [`FALLBACK_SCORE`] when unparseable.
    pub score: f64,
    /// Policy weight assigned to the department.
    pub weight: f64,
    /// `(score / 100) * weight`.
    pub contribution: f64,
    /// True when the score text failed numeric parsing and the fallback
    /// was substituted. Informational only; does not affect any value.
    pub defaulted: bool,
}

/// The full result of assessing one uploaded table.
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    /// Weighted risk index, rounded to 3 decimals.
    pub rri: f64,
    /// Projected premium discount percentage, clamped at 0, rounded to 2 decimals.
    pub discount: f64,
    pub rows: Vec<AnnotatedRow>,
}

/// Assess an uploaded score table.
///
/// Per row: the department text is trimmed, every `%` is stripped from the
/// score text before parsing, and unparseable scores silently become
/// [`FALLBACK_SCORE`]. The weighted contributions are summed into the RRI and
/// the discount is derived from it. Pure and total: this function has no
/// failure path, and an empty table yields RRI 0 and discount 0.
pub fn assess(table: &ScoreTable) -> Assessment {
    let rows: Vec<AnnotatedRow> = table
        .rows
        .iter()
        .map(|row| {
            let department = clean_department(&row.department);
            let (score, defaulted) = parse_score(&row.score);
            let weight = weights::weight_for(&department);
            let contribution = (score / 100.0) * weight;
            AnnotatedRow {
                department,
                score,
                weight,
                contribution,
                defaulted,
            }
        })
        .collect();

    let total: f64 = rows.iter().map(|row| row.contribution).sum();
    let rri = round_to(total, 3);
    let discount = round_to(((rri - DISCOUNT_BASELINE) * DISCOUNT_MULTIPLIER).max(0.0), 2);

    Assessment {
        rri,
        discount,
        rows,
    }
}

/// Clean a raw department cell: trim surrounding whitespace, keep case.
pub fn clean_department(raw: &str) -> String {
    raw.trim().to_string()
}

/// Parse a raw score cell. Every `%` is stripped first. Returns the parsed
/// value and whether the fallback was substituted.
///
/// Non-finite parses (NaN, inf) count as failures so the resulting index is
/// always finite.
pub fn parse_score(raw: &str) -> (f64, bool) {
    let stripped = raw.replace('%', "");
    match stripped.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => (value, false),
        _ => (FALLBACK_SCORE, true),
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
