//! Score aggregation over rule results

use std::collections::BTreeMap;
use tailor_core::{round2, RuleCategory, RuleResult};

/// Weighted mean, falling back to the plain mean when every weight is zero.
fn weighted_mean(items: impl Iterator<Item = (f64, f64)>) -> Option<f64> {
    let (mut sum, mut total, mut plain, mut count) = (0.0, 0.0, 0.0, 0usize);
    for (value, weight) in items {
        sum += value * weight;
        total += weight;
        plain += value;
        count += 1;
    }
    match (count, total > 0.0) {
        (0, _) => None,
        (_, true) => Some(sum / total),
        (n, false) => Some(plain / n as f64),
    }
}

/// Per category: weight-normalized mean of `confidence * 100`. Categories
/// without results are absent.
pub fn category_scores(results: &[RuleResult]) -> BTreeMap<RuleCategory, f64> {
    RuleCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let scored = results
                .iter()
                .filter(|r| r.category == category)
                .map(|r| (r.confidence * 100.0, r.weight));
            weighted_mean(scored).map(|score| (category, round2(score)))
        })
        .collect()
}

/// Failed results cannot pull their own contribution below zero; passed
/// results add their impact as-is.
pub fn contribution(result: &RuleResult) -> f64 {
    let raw = result.confidence * 100.0 + result.score_impact as f64;
    if result.passed {
        raw
    } else {
        raw.max(0.0)
    }
}

/// Weighted mean of contributions, clamped to 0-100. No results scores 0.
pub fn overall_score(results: &[RuleResult]) -> u32 {
    weighted_mean(results.iter().map(|r| (contribution(r), r.weight)))
        .map(|score| score.clamp(0.0, 100.0).round() as u32)
        .unwrap_or(0)
}

/// Unweighted mean of confidences.
pub fn mean_confidence(results: &[RuleResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    round2(results.iter().map(|r| r.confidence).sum::<f64>() / results.len() as f64)
}
