//! Rule outcomes and the aggregated validation summary

use crate::category::{RuleCategory, Severity};
use crate::data_model::OutfitCombination;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of a single rule check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleResult {
    /// Stable identifier (e.g. `NC001`)
    pub rule_id: String,
    pub rule_name: String,
    pub category: RuleCategory,
    pub passed: bool,
    /// Certainty in this verdict, 0.0 to 1.0
    pub confidence: f64,
    pub severity: Severity,
    /// Lower values are more important
    pub priority: u32,
    /// Contribution weight in score aggregation
    pub weight: f64,
    pub message: String,
    pub reasoning: String,
    pub recommendation: String,
    #[serde(default)]
    pub alternatives: Vec<String>,
    /// Additive adjustment applied during aggregation
    pub score_impact: i32,
    /// Facts the rule looked at, for explanation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context_applied: Vec<String>,
}

impl RuleResult {
    pub fn new(
        rule_id: impl Into<String>,
        rule_name: impl Into<String>,
        category: RuleCategory,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            rule_name: rule_name.into(),
            category,
            passed: true,
            confidence: 0.5,
            severity: Severity::Info,
            priority: 5,
            weight: 1.0,
            message: String::new(),
            reasoning: String::new(),
            recommendation: String::new(),
            alternatives: Vec::new(),
            score_impact: 0,
            context_applied: Vec::new(),
        }
    }

    pub fn with_outcome(mut self, passed: bool, severity: Severity) -> Self {
        self.passed = passed;
        self.severity = severity;
        self
    }

    /// Confidence is clamped into [0, 1].
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_impact(mut self, impact: i32) -> Self {
        self.score_impact = impact;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = recommendation.into();
        self
    }

    pub fn with_alternatives(mut self, alternatives: Vec<String>) -> Self {
        self.alternatives = alternatives;
        self
    }

    pub fn with_context(mut self, fact: impl Into<String>) -> Self {
        self.context_applied.push(fact.into());
        self
    }

    /// Failed with critical or high severity.
    pub fn is_violation(&self) -> bool {
        !self.passed && self.severity.is_blocking()
    }

    /// Failed with medium or low severity.
    pub fn is_warning(&self) -> bool {
        !self.passed && self.severity.is_warning()
    }

    pub fn is_suggestion(&self) -> bool {
        self.severity == Severity::Info
    }
}

/// A full replacement combination proposed for one violation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationAlternative {
    pub combination: OutfitCombination,
    /// Certainty that the change resolves the addressed violation
    pub confidence: f64,
    pub reasoning: String,
    pub improvements: Vec<String>,
    /// 0-100
    pub score: u32,
    /// Rule id of the violation this alternative addresses
    pub addresses: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetadata {
    pub rules_processed: usize,
    pub processing_time_ms: f64,
    pub knowledge_version: String,
    pub engine_version: String,
    pub validated_at: DateTime<Utc>,
}

/// Aggregated verdict for one combination and context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// 0-100
    pub overall_score: u32,
    /// Mean of all result confidences
    pub confidence: f64,
    pub validation_passed: bool,
    /// Only categories that produced results appear here.
    pub category_scores: BTreeMap<RuleCategory, f64>,
    pub rule_results: Vec<RuleResult>,
    pub violations: Vec<RuleResult>,
    pub warnings: Vec<RuleResult>,
    pub suggestions: Vec<RuleResult>,
    pub alternatives: Vec<CombinationAlternative>,
    pub improvement_suggestions: Vec<String>,
    pub metadata: SummaryMetadata,
}

impl ValidationSummary {
    /// Results for one category, in evaluation order.
    pub fn results_for(&self, category: RuleCategory) -> impl Iterator<Item = &RuleResult> {
        self.rule_results.iter().filter(move |r| r.category == category)
    }

    pub fn result(&self, rule_id: &str) -> Option<&RuleResult> {
        self.rule_results.iter().find(|r| r.rule_id == rule_id)
    }
}
