//! Rule Book: per-rule configuration and tuning constants
//!
//! Every severity, weight, score impact and threshold used by the evaluators
//! lives here, so tuning never touches evaluation logic. A partial YAML
//! document can be overlaid on the defaults with [`RuleBook::from_yaml`].

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;
use tailor_core::{RuleCategory, RuleResult, Severity, TailorError};

/// Configuration for one rule id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub id: String,
    pub name: String,
    pub category: RuleCategory,
    pub priority: u32,
    pub weight: f64,

    /// Severity of a failed result
    pub fail_severity: Severity,
    /// Severity used instead when the rule's escalation condition holds
    #[serde(default)]
    pub escalated_severity: Option<Severity>,
    #[serde(default)]
    pub escalation_threshold: Option<f64>,

    pub pass_impact: i32,
    pub fail_impact: i32,

    /// Pass threshold, meaning depends on the rule
    #[serde(default)]
    pub threshold: Option<f64>,

    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl RuleSpec {
    pub fn new(
        id: &str,
        name: &str,
        category: RuleCategory,
        priority: u32,
        weight: f64,
        fail_severity: Severity,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category,
            priority,
            weight,
            fail_severity,
            escalated_severity: None,
            escalation_threshold: None,
            pass_impact: 0,
            fail_impact: 0,
            threshold: None,
            enabled: true,
        }
    }

    pub fn impacts(mut self, pass: i32, fail: i32) -> Self {
        self.pass_impact = pass;
        self.fail_impact = fail;
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn escalates(mut self, severity: Severity, threshold: f64) -> Self {
        self.escalated_severity = Some(severity);
        self.escalation_threshold = Some(threshold);
        self
    }

    pub fn threshold_or(&self, default: f64) -> f64 {
        self.threshold.unwrap_or(default)
    }

    pub fn escalation_or(&self, default: f64) -> f64 {
        self.escalation_threshold.unwrap_or(default)
    }

    /// Blank result carrying this rule's identity, priority and weight.
    pub fn result(&self) -> RuleResult {
        self.result_as(&self.id)
    }

    pub fn result_as(&self, rule_id: &str) -> RuleResult {
        RuleResult::new(rule_id, self.name.as_str(), self.category)
            .with_priority(self.priority)
            .with_weight(self.weight)
    }

    pub fn pass(&self, confidence: f64) -> RuleResult {
        self.result()
            .with_outcome(true, Severity::Success)
            .with_confidence(confidence)
            .with_impact(self.pass_impact)
    }

    pub fn fail(&self, confidence: f64) -> RuleResult {
        self.fail_escalated(confidence, false)
    }

    pub fn fail_escalated(&self, confidence: f64, escalate: bool) -> RuleResult {
        let severity = match (escalate, self.escalated_severity) {
            (true, Some(escalated)) => escalated,
            _ => self.fail_severity,
        };
        self.result()
            .with_outcome(false, severity)
            .with_confidence(confidence)
            .with_impact(self.fail_impact)
    }

    /// Pass or fail on one condition.
    pub fn verdict(&self, passed: bool, confidence: f64) -> RuleResult {
        if passed {
            self.pass(confidence)
        } else {
            self.fail(confidence)
        }
    }

    /// Informational result that never affects `validation_passed`.
    pub fn info(&self, confidence: f64) -> RuleResult {
        self.result()
            .with_outcome(true, Severity::Info)
            .with_confidence(confidence)
            .with_impact(0)
    }

    /// A context value with no reference data behind it.
    pub fn unrecognized(&self, field: &str, value: &str, confidence: f64) -> RuleResult {
        tracing::debug!(rule = %self.id, field, value, "unrecognized context value");
        self.info(confidence)
            .with_message(format!("Unrecognized {} '{}'", field.replace('_', " "), value))
            .with_reasoning(format!(
                "No reference data for {} '{}'; the check was skipped",
                field.replace('_', " "),
                value
            ))
            .with_context(format!("{}={}", field, value))
    }
}

/// Color harmony scoring constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarmonyTuning {
    pub monochromatic: f64,
    pub complementary: f64,
    pub analogous: f64,
    pub triadic: f64,
    pub mixed: f64,
    pub formal_monochrome_bonus: f64,
    pub seasonal_bonus: f64,
    /// Occasions at or above this formality count as formal
    pub formal_occasion_min: f64,
    pub forbidden_confidence: f64,
    pub conditional_confidence: f64,
}

impl Default for HarmonyTuning {
    fn default() -> Self {
        Self {
            monochromatic: 0.9,
            complementary: 0.85,
            analogous: 0.8,
            triadic: 0.75,
            mixed: 0.7,
            formal_monochrome_bonus: 0.05,
            seasonal_bonus: 0.05,
            formal_occasion_min: 7.0,
            forbidden_confidence: 0.95,
            conditional_confidence: 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonochromeTuning {
    pub identical_confidence: f64,
    pub info_confidence: f64,
    pub info_weight: f64,
}

impl Default for MonochromeTuning {
    fn default() -> Self {
        Self {
            identical_confidence: 0.6,
            info_confidence: 0.75,
            info_weight: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormalityTuning {
    pub suit_weight: f64,
    pub shirt_weight: f64,
    pub tie_weight: f64,
    pub accessory_weight: f64,
    /// Compliance lost per dress code issue
    pub dress_code_penalty: f64,
}

impl Default for FormalityTuning {
    fn default() -> Self {
        Self {
            suit_weight: 0.4,
            shirt_weight: 0.3,
            tie_weight: 0.2,
            accessory_weight: 0.1,
            dress_code_penalty: 0.25,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonalTuning {
    pub fabric_excellent: f64,
    pub fabric_good: f64,
    pub fabric_avoid: f64,
    pub fabric_unlisted: f64,
    pub suit_fabric_weight: f64,
    pub shirt_fabric_weight: f64,
    pub tie_fabric_weight: f64,

    pub palette_primary: f64,
    pub palette_neutral: f64,
    pub palette_accent: f64,
    pub palette_avoid: f64,
    pub palette_unlisted: f64,

    pub weather_prefer: f64,
    pub weather_avoid: f64,
    pub weather_neutral: f64,
    /// Weather score when no fabric was supplied
    pub weather_no_fabrics: f64,
    pub weather_color_penalty: f64,
    pub climate_penalty: f64,
}

impl Default for SeasonalTuning {
    fn default() -> Self {
        Self {
            fabric_excellent: 0.95,
            fabric_good: 0.8,
            fabric_avoid: 0.2,
            fabric_unlisted: 0.5,
            suit_fabric_weight: 0.5,
            shirt_fabric_weight: 0.3,
            tie_fabric_weight: 0.2,
            palette_primary: 1.0,
            palette_neutral: 0.9,
            palette_accent: 0.8,
            palette_avoid: 0.1,
            palette_unlisted: 0.5,
            weather_prefer: 0.95,
            weather_avoid: 0.3,
            weather_neutral: 0.75,
            weather_no_fabrics: 0.8,
            weather_color_penalty: 0.15,
            climate_penalty: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleTuning {
    pub profile_base: f64,
    pub preferred_color_span: f64,
    pub preferred_pattern_span: f64,
    pub avoided_color_penalty: f64,
    pub avoided_pattern_penalty: f64,
    pub formality_penalty: f64,
    pub industry_base: f64,
}

impl Default for StyleTuning {
    fn default() -> Self {
        Self {
            profile_base: 0.6,
            preferred_color_span: 0.4,
            preferred_pattern_span: 0.1,
            avoided_color_penalty: 0.15,
            avoided_pattern_penalty: 0.1,
            formality_penalty: 0.1,
            industry_base: 0.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureTuning {
    /// Score when fewer than two textures are known
    pub default_balance: f64,
    pub contrast: f64,
    pub uniform: f64,
    pub clash: f64,
}

impl Default for TextureTuning {
    fn default() -> Self {
        Self {
            default_balance: 0.8,
            contrast: 0.9,
            uniform: 0.75,
            clash: 0.55,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendTuning {
    pub base: f64,
    pub span: f64,
    pub seasonal_base: f64,
}

impl Default for TrendTuning {
    fn default() -> Self {
        Self {
            base: 0.6,
            span: 0.4,
            seasonal_base: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlternativeTuning {
    pub base_confidence: f64,
    /// Confidence lost per rank position
    pub rank_decay: f64,
    /// Tie colors tried when nothing more specific applies
    pub fallback_ties: Vec<String>,
    /// Confidence of an alternative that leaves the combination unchanged
    pub unresolved_confidence: f64,
}

impl Default for AlternativeTuning {
    fn default() -> Self {
        Self {
            base_confidence: 0.8,
            rank_decay: 0.03,
            fallback_ties: vec!["navy".into(), "burgundy".into(), "charcoal".into()],
            unresolved_confidence: 0.15,
        }
    }
}

/// Constants that are not tied to a single rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub harmony: HarmonyTuning,
    pub monochrome: MonochromeTuning,
    pub formality: FormalityTuning,
    pub seasonal: SeasonalTuning,
    pub style: StyleTuning,
    pub texture: TextureTuning,
    pub trend: TrendTuning,
    pub alternatives: AlternativeTuning,
    /// Confidence of every unrecognized-input result
    pub unrecognized_confidence: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            harmony: HarmonyTuning::default(),
            monochrome: MonochromeTuning::default(),
            formality: FormalityTuning::default(),
            seasonal: SeasonalTuning::default(),
            style: StyleTuning::default(),
            texture: TextureTuning::default(),
            trend: TrendTuning::default(),
            alternatives: AlternativeTuning::default(),
            unrecognized_confidence: 0.5,
        }
    }
}

/// The full configuration table, keyed by rule id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleBook {
    pub rules: BTreeMap<String, RuleSpec>,
    #[serde(default)]
    pub tuning: Tuning,
}

impl Default for RuleBook {
    fn default() -> Self {
        use RuleCategory::*;
        use Severity::*;

        let specs = vec![
            // Color harmony
            RuleSpec::new("NCR", "Never Combine Rules", ColorHarmony, 1, 1.0, Critical)
                .impacts(5, -30),
            RuleSpec::new("NCA", "Conditional Avoid Rule", ColorHarmony, 2, 0.8, Medium)
                .impacts(0, -15),
            RuleSpec::new("CH001", "Color Harmony", ColorHarmony, 2, 0.8, Medium)
                .impacts(5, -10)
                .threshold(0.7),
            // pass impact is the neutral-bridge bonus; same-temperature passes score 0
            RuleSpec::new("CT001", "Color Temperature Mixing", ColorHarmony, 3, 0.6, Medium)
                .impacts(5, -8),
            RuleSpec::new("MC001", "Monochromatic Elegance", ColorHarmony, 4, 0.7, Low)
                .impacts(8, 0),
            // Formality
            RuleSpec::new("FC001", "Formality Consistency", FormalityMatching, 1, 1.0, Medium)
                .impacts(5, -15)
                .threshold(3.0)
                .escalates(High, 5.0),
            RuleSpec::new("OA001", "Occasion Appropriateness", FormalityMatching, 1, 1.0, High)
                .impacts(10, -20),
            RuleSpec::new("UO001", "Unknown Occasion", FormalityMatching, 3, 0.5, Info),
            RuleSpec::new("FL001", "Formality Level", FormalityMatching, 2, 0.9, Medium)
                .impacts(3, -10)
                .threshold(1.0)
                .escalates(High, 2.0),
            RuleSpec::new("DCC001", "Dress Code Compliance", FormalityMatching, 1, 1.0, Medium)
                .impacts(8, -12)
                .threshold(0.8)
                .escalates(High, 0.6),
            RuleSpec::new("TA001", "Time Appropriateness", FormalityMatching, 2, 0.7, Medium)
                .impacts(3, -8)
                .threshold(1.5),
            // Seasonal
            RuleSpec::new("FS001", "Fabric Seasonality", SeasonalAppropriateness, 2, 0.8, Low)
                .impacts(5, -10)
                .threshold(0.7)
                .escalates(Medium, 0.5),
            RuleSpec::new("CS001", "Color Seasonality", SeasonalAppropriateness, 3, 0.6, Low)
                .impacts(4, -6)
                .threshold(0.6),
            RuleSpec::new(
                "WA001",
                "Weather Appropriateness",
                SeasonalAppropriateness,
                1,
                0.9,
                Medium,
            )
            .impacts(6, -12)
            .threshold(0.7),
            RuleSpec::new("CZ001", "Climate Zone Fit", SeasonalAppropriateness, 4, 0.5, Low)
                .impacts(2, -4)
                .threshold(0.7),
            RuleSpec::new("US001", "Unknown Season", SeasonalAppropriateness, 5, 0.1, Info),
            // Style
            RuleSpec::new("SP001", "Style Profile Consistency", StyleConsistency, 3, 0.7, Low)
                .impacts(4, -6)
                .threshold(0.7),
            RuleSpec::new("SP002", "Style Preference Alignment", StyleConsistency, 4, 0.5, Low)
                .impacts(3, -4)
                .threshold(0.7),
            RuleSpec::new("IC001", "Industry Norms", StyleConsistency, 4, 0.5, Low)
                .impacts(3, -5)
                .threshold(0.7),
            // Venue
            RuleSpec::new("VR001", "Venue Requirements", VenueAppropriateness, 2, 0.8, Medium)
                .impacts(4, -12)
                .threshold(1.0),
            RuleSpec::new("VL001", "Venue Lighting", VenueAppropriateness, 4, 0.4, Low)
                .impacts(1, -3),
            RuleSpec::new("PH001", "Photography Readiness", VenueAppropriateness, 4, 0.4, Low)
                .impacts(2, -4),
            // Pattern
            RuleSpec::new("PM001", "Pattern Count", PatternMixing, 1, 0.9, Medium)
                .impacts(2, -12)
                .threshold(2.0),
            RuleSpec::new("PS001", "Pattern Scale", PatternMixing, 2, 0.7, Medium).impacts(3, -8),
            RuleSpec::new("SC001", "Stripe Compatibility", PatternMixing, 1, 0.8, High)
                .impacts(2, -15),
            // Texture
            RuleSpec::new("TB001", "Texture Balance", TextureCompatibility, 3, 0.5, Low)
                .impacts(2, -3)
                .threshold(0.7),
            RuleSpec::new("SL001", "Shine Level", TextureCompatibility, 2, 0.6, Medium)
                .impacts(1, -8)
                .threshold(1.0),
            // Cultural
            RuleSpec::new("CCM001", "Cultural Color Meanings", CulturalSensitivity, 4, 0.3, Info),
            // Trend
            RuleSpec::new("TR001", "Current Trends", TrendAlignment, 5, 0.4, Info),
            RuleSpec::new("ST001", "Seasonal Trends", TrendAlignment, 4, 0.4, Info),
        ];

        Self {
            rules: specs.into_iter().map(|s| (s.id.clone(), s)).collect(),
            tuning: Tuning::default(),
        }
    }
}

impl RuleBook {
    /// Overlay a partial YAML document on the defaults.
    ///
    /// ```yaml
    /// rules:
    ///   PM001: { threshold: 3 }
    ///   TR001: { enabled: false }
    /// tuning:
    ///   texture: { default_balance: 0.85 }
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, TailorError> {
        let overlay: Value = serde_yaml::from_str(yaml).map_err(config_error)?;
        Self::default().overlay(overlay)
    }

    /// Overlay an already-parsed YAML value on this book.
    pub fn overlay(&self, overlay: Value) -> Result<Self, TailorError> {
        let mut base = serde_yaml::to_value(self).map_err(config_error)?;
        if !overlay.is_null() {
            merge(&mut base, overlay);
        }
        let book: RuleBook = serde_yaml::from_value(base).map_err(config_error)?;
        book.check()?;
        Ok(book)
    }

    pub fn rule(&self, id: &str) -> Option<&RuleSpec> {
        self.rules.get(id)
    }

    pub fn rule_mut(&mut self, id: &str) -> Option<&mut RuleSpec> {
        self.rules.get_mut(id)
    }

    /// Rules in one category, ordered by priority then id.
    pub fn rules_in(&self, category: RuleCategory) -> Vec<&RuleSpec> {
        let mut specs: Vec<&RuleSpec> = self
            .rules
            .values()
            .filter(|s| s.category == category)
            .collect();
        specs.sort_by_key(|s| s.priority);
        specs
    }

    fn check(&self) -> Result<(), TailorError> {
        for (key, spec) in &self.rules {
            if key != &spec.id {
                return Err(TailorError::Config(format!(
                    "rule '{}' is stored under key '{}'",
                    spec.id, key
                )));
            }
            if !(spec.weight.is_finite() && spec.weight >= 0.0) {
                return Err(TailorError::Config(format!(
                    "rule '{}' has invalid weight {}",
                    spec.id, spec.weight
                )));
            }
        }
        Ok(())
    }
}

fn config_error(e: serde_yaml::Error) -> TailorError {
    TailorError::Config(e.to_string())
}

/// Recursive mapping merge; non-mapping values replace.
fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base), Value::Mapping(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_category() {
        let book = RuleBook::default();
        for category in RuleCategory::ALL {
            assert!(!book.rules_in(category).is_empty(), "{}", category);
        }
        let nc = book.rule("NCR").unwrap();
        assert_eq!(nc.fail_severity, Severity::Critical);
        assert_eq!(nc.fail_impact, -30);
    }

    #[test]
    fn test_yaml_overlay_keeps_defaults() {
        let book = RuleBook::from_yaml(
            r#"
rules:
  PM001:
    threshold: 3
  TR001:
    enabled: false
tuning:
  texture:
    default_balance: 0.85
"#,
        )
        .unwrap();

        let pm = book.rule("PM001").unwrap();
        assert_eq!(pm.threshold, Some(3.0));
        assert_eq!(pm.fail_impact, -12);
        assert!(!book.rule("TR001").unwrap().enabled);
        assert_eq!(book.tuning.texture.default_balance, 0.85);
        assert_eq!(book.tuning.texture.clash, 0.55);
        assert_eq!(book.tuning.harmony, HarmonyTuning::default());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(RuleBook::from_yaml("").unwrap(), RuleBook::default());
    }

    #[test]
    fn test_malformed_yaml_is_config_error() {
        let err = RuleBook::from_yaml("rules: [unclosed").unwrap_err();
        assert!(matches!(err, TailorError::Config(_)));

        let err = RuleBook::from_yaml("rules:\n  PM001:\n    weight: -1\n").unwrap_err();
        assert!(err.to_string().starts_with("CONFIG/"));
    }

    #[test]
    fn test_escalation() {
        let book = RuleBook::default();
        let fc = book.rule("FC001").unwrap();
        assert_eq!(fc.fail_escalated(0.3, true).severity, Severity::High);
        assert_eq!(fc.fail(0.3).severity, Severity::Medium);

        let pm = book.rule("PS001").unwrap();
        assert_eq!(pm.fail_escalated(0.3, true).severity, Severity::Medium);
    }

    #[test]
    fn test_unrecognized_result_shape() {
        let book = RuleBook::default();
        let result = book.rule("UO001").unwrap().unrecognized("occasion", "moon_landing", 0.5);
        assert!(result.passed);
        assert_eq!(result.severity, Severity::Info);
        assert_eq!(result.confidence, 0.5);
        assert_eq!(result.score_impact, 0);
        assert!(result.message.contains("moon_landing"));
    }
}
