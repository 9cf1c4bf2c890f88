//! Tailor Rules: the nine category evaluators
//!
//! Each category maps to a fixed list of checks. A check is a plain function
//! over a [`RuleInput`] that appends zero or more results; checks never fail
//! and never mutate shared state, so categories can run in any order or in
//! parallel.
//!
//! # Example
//!
//! ```ignore
//! use tailor_rules::{evaluate, RuleBook, RuleInput};
//!
//! let input = RuleInput::new(&combination, &context, &snapshot, &RuleBook::default());
//! for category in RuleCategory::ALL {
//!     let results = evaluate(category, &input);
//! }
//! ```

pub mod color;
pub mod cultural;
pub mod formality;
pub mod input;
pub mod pattern;
pub mod rulebook;
pub mod seasonal;
pub mod style;
pub mod texture;
pub mod trend;
pub mod venue;

pub use color::{analyze_contrast, analyze_harmony, ContrastAnalysis, HarmonyAnalysis, HarmonyType};
pub use formality::{analyze_formality, component_formality, ComponentFormality, FormalityAnalysis};
pub use input::RuleInput;
pub use rulebook::{RuleBook, RuleSpec, Tuning};

use tailor_core::{RuleCategory, RuleResult};

/// A single check: reads the input, appends results.
pub type Check = fn(&RuleInput<'_>, &mut Vec<RuleResult>);

const COLOR_CHECKS: &[Check] = &[
    color::never_combine,
    color::conditional_avoid,
    color::harmony,
    color::temperature,
    color::monochromatic,
];

const FORMALITY_CHECKS: &[Check] = &[
    formality::consistency,
    formality::occasion,
    formality::level,
    formality::dress_code,
    formality::time_of_day,
];

const SEASONAL_CHECKS: &[Check] =
    &[seasonal::evaluate_season, seasonal::weather, seasonal::climate_zone];

const STYLE_CHECKS: &[Check] = &[style::profile, style::preference, style::industry];

const VENUE_CHECKS: &[Check] = &[venue::requirements, venue::lighting, venue::photography];

const PATTERN_CHECKS: &[Check] = &[pattern::count, pattern::scale, pattern::stripes];

const TEXTURE_CHECKS: &[Check] = &[texture::balance, texture::shine];

const CULTURAL_CHECKS: &[Check] = &[cultural::color_meanings];

const TREND_CHECKS: &[Check] = &[trend::current, trend::seasonal];

/// Checks for a category, in evaluation order.
pub fn checks(category: RuleCategory) -> &'static [Check] {
    match category {
        RuleCategory::ColorHarmony => COLOR_CHECKS,
        RuleCategory::FormalityMatching => FORMALITY_CHECKS,
        RuleCategory::SeasonalAppropriateness => SEASONAL_CHECKS,
        RuleCategory::StyleConsistency => STYLE_CHECKS,
        RuleCategory::VenueAppropriateness => VENUE_CHECKS,
        RuleCategory::PatternMixing => PATTERN_CHECKS,
        RuleCategory::TextureCompatibility => TEXTURE_CHECKS,
        RuleCategory::CulturalSensitivity => CULTURAL_CHECKS,
        RuleCategory::TrendAlignment => TREND_CHECKS,
    }
}

/// Run every check of one category.
pub fn evaluate(category: RuleCategory, input: &RuleInput<'_>) -> Vec<RuleResult> {
    let mut results = Vec::new();
    for check in checks(category) {
        check(input, &mut results);
    }
    results
}

/// Join a list of names for messages: `a, b and c`.
pub(crate) fn join_names<S: AsRef<str>>(names: &[S]) -> String {
    let names: Vec<String> = names
        .iter()
        .map(|n| n.as_ref().replace('_', " "))
        .collect();
    match names.len() {
        0 => String::new(),
        1 => names[0].clone(),
        n => format!("{} and {}", names[..n - 1].join(", "), names[n - 1]),
    }
}

pub(crate) fn listed(list: &[String], value: &str) -> bool {
    list.iter().any(|item| item == value)
}

/// Empty lists accept anything.
pub(crate) fn accepted(list: &[String], value: &str) -> bool {
    list.is_empty() || listed(list, value)
}

/// Display form of a knowledge key: `light_blue` becomes `light blue`.
pub fn pretty(name: &str) -> String {
    name.replace('_', " ")
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::Arc;
    use tailor_knowledge::KnowledgeSnapshot;

    pub fn knowledge() -> Arc<KnowledgeSnapshot> {
        KnowledgeSnapshot::builtin().expect("builtin pack loads")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tailor_core::{OutfitCombination, ValidationContext};

    #[test]
    fn test_every_category_has_checks() {
        for category in RuleCategory::ALL {
            assert!(!checks(category).is_empty(), "{}", category);
        }
    }

    #[test]
    fn test_results_stay_in_their_category() {
        let knowledge = fixtures::knowledge();
        let book = RuleBook::default();
        let combination = OutfitCombination::new("navy", "white").with_tie("burgundy");
        let context = ValidationContext::default()
            .with_occasion("business_formal")
            .with_season("fall")
            .with_venue("office");
        let input = RuleInput::new(&combination, &context, &knowledge, &book);

        for category in RuleCategory::ALL {
            for result in evaluate(category, &input) {
                assert_eq!(result.category, category, "{}", result.rule_id);
            }
        }
    }

    #[test]
    fn test_disabled_rule_is_skipped() {
        let knowledge = fixtures::knowledge();
        let mut book = RuleBook::default();
        if let Some(spec) = book.rule_mut("TR001") {
            spec.enabled = false;
        }
        let combination = OutfitCombination::new("navy", "white");
        let context = ValidationContext::default();
        let input = RuleInput::new(&combination, &context, &knowledge, &book);

        let results = evaluate(RuleCategory::TrendAlignment, &input);
        assert!(results.iter().all(|r| r.rule_id != "TR001"));
    }

    #[test]
    fn test_join_names() {
        assert_eq!(join_names(&["navy"]), "navy");
        assert_eq!(join_names(&["navy", "light_blue", "white"]), "navy, light blue and white");
        assert_eq!(join_names::<&str>(&[]), "");
    }
}
