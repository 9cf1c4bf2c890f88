//! Rule categories and severities
//!
//! The nine categories form a closed set. Their declaration order is the
//! order in which results are assembled into a summary.

use serde::{Deserialize, Serialize};

/// Category a rule result belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    ColorHarmony,
    FormalityMatching,
    SeasonalAppropriateness,
    StyleConsistency,
    VenueAppropriateness,
    PatternMixing,
    TextureCompatibility,
    CulturalSensitivity,
    TrendAlignment,
}

impl RuleCategory {
    /// Every category, in assembly order.
    pub const ALL: [RuleCategory; 9] = [
        RuleCategory::ColorHarmony,
        RuleCategory::FormalityMatching,
        RuleCategory::SeasonalAppropriateness,
        RuleCategory::StyleConsistency,
        RuleCategory::VenueAppropriateness,
        RuleCategory::PatternMixing,
        RuleCategory::TextureCompatibility,
        RuleCategory::CulturalSensitivity,
        RuleCategory::TrendAlignment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCategory::ColorHarmony => "color_harmony",
            RuleCategory::FormalityMatching => "formality_matching",
            RuleCategory::SeasonalAppropriateness => "seasonal_appropriateness",
            RuleCategory::StyleConsistency => "style_consistency",
            RuleCategory::VenueAppropriateness => "venue_appropriateness",
            RuleCategory::PatternMixing => "pattern_mixing",
            RuleCategory::TextureCompatibility => "texture_compatibility",
            RuleCategory::CulturalSensitivity => "cultural_sensitivity",
            RuleCategory::TrendAlignment => "trend_alignment",
        }
    }
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Importance of a rule outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
    Success,
}

impl Severity {
    /// Failed results at this severity block `validation_passed`.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Severity::Critical | Severity::High)
    }

    /// Failed results at this severity are reported as warnings.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Medium | Severity::Low)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "CRITICAL"),
            Severity::High => write!(f, "HIGH"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::Low => write!(f, "LOW"),
            Severity::Info => write!(f, "INFO"),
            Severity::Success => write!(f, "SUCCESS"),
        }
    }
}
