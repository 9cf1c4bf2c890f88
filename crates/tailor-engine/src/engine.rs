//! Validation orchestrator
//!
//! Owns the knowledge provider and the active snapshot. `validate` captures
//! the snapshot once per call, so a concurrent `refresh` never changes the
//! data a running validation sees.

use crate::alternatives::AlternativeSynthesizer;
use crate::config::{EngineConfig, MAX_ALTERNATIVES};
use crate::scoring;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tailor_core::{
    OutfitCombination, RuleCategory, RuleResult, SummaryMetadata, TailorError, ValidationContext,
    ValidationSummary, ENGINE_VERSION,
};
use tailor_knowledge::{
    BuiltinProvider, DirectoryProvider, KnowledgeProvider, KnowledgeSnapshot, SnapshotStore,
};
use tailor_rules::{evaluate, RuleInput};
use tracing::{debug, info, warn};

pub struct ValidationEngine {
    provider: Box<dyn KnowledgeProvider>,
    store: SnapshotStore,
    config: EngineConfig,
}

impl ValidationEngine {
    pub fn new(provider: impl KnowledgeProvider + 'static, config: EngineConfig) -> Self {
        Self {
            provider: Box::new(provider),
            store: SnapshotStore::new(),
            config,
        }
    }

    /// Engine over the embedded pack with default configuration.
    pub fn builtin() -> Self {
        Self::new(BuiltinProvider, EngineConfig::default())
    }

    /// Directory provider when `data_dir` is set, otherwise the embedded pack.
    pub fn from_config(config: EngineConfig) -> Self {
        match config.data_dir.clone() {
            Some(dir) => Self::new(DirectoryProvider::new(dir), config),
            None => Self::new(BuiltinProvider, config),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Load every table. On failure the engine is left not ready.
    pub fn initialize(&self) -> Result<(), TailorError> {
        match KnowledgeSnapshot::load(self.provider.as_ref()) {
            Ok(snapshot) => {
                self.install(Arc::new(snapshot));
                Ok(())
            }
            Err(e) => {
                self.store.clear();
                warn!(
                    provider = self.provider.name(),
                    error = %e,
                    "knowledge load failed; engine not ready"
                );
                Err(e)
            }
        }
    }

    /// Load a fresh snapshot and swap it in. On failure the previous
    /// snapshot stays active.
    pub fn refresh(&self) -> Result<(), TailorError> {
        match KnowledgeSnapshot::load(self.provider.as_ref()) {
            Ok(snapshot) => {
                self.install(Arc::new(snapshot));
                Ok(())
            }
            Err(e) => {
                warn!(
                    provider = self.provider.name(),
                    error = %e,
                    kept = ?self.store.version(),
                    "knowledge refresh failed; keeping current snapshot"
                );
                Err(e)
            }
        }
    }

    /// Swap in a pre-built snapshot.
    pub fn install(&self, snapshot: Arc<KnowledgeSnapshot>) {
        let version = snapshot.version().to_string();
        let previous = self.store.replace(snapshot);
        info!(
            provider = self.provider.name(),
            version = %version,
            replaced = previous.is_some(),
            "knowledge snapshot installed"
        );
    }

    pub fn is_ready(&self) -> bool {
        self.store.is_loaded()
    }

    pub fn snapshot(&self) -> Option<Arc<KnowledgeSnapshot>> {
        self.store.current()
    }

    pub fn snapshot_version(&self) -> Option<String> {
        self.store.version()
    }

    /// Run every category and aggregate the verdict.
    pub fn validate(
        &self,
        combination: &OutfitCombination,
        context: &ValidationContext,
    ) -> Result<ValidationSummary, TailorError> {
        let start = Instant::now();
        let knowledge = self.store.current().ok_or(TailorError::EngineNotReady)?;
        let input = RuleInput::new(combination, context, &knowledge, &self.config.rules);

        let rule_results = self.evaluate_all(&input);

        let category_scores = scoring::category_scores(&rule_results);
        let overall_score = scoring::overall_score(&rule_results);
        let confidence = scoring::mean_confidence(&rule_results);

        let violations = partition(&rule_results, RuleResult::is_violation);
        let warnings = partition(&rule_results, RuleResult::is_warning);
        let suggestions = partition(&rule_results, RuleResult::is_suggestion);
        let validation_passed = violations.is_empty();

        let alternatives = if violations.is_empty() {
            Vec::new()
        } else {
            AlternativeSynthesizer::new(&knowledge, &self.config.rules).synthesize(
                combination,
                context,
                &violations,
                self.config.max_alternatives.clamp(1, MAX_ALTERNATIVES),
            )
        };
        let improvement_suggestions =
            improvement_suggestions(&violations, &warnings, self.config.max_warning_suggestions);

        let processing_time_ms = start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            rules = rule_results.len(),
            score = overall_score,
            passed = validation_passed,
            violations = violations.len(),
            elapsed_ms = processing_time_ms,
            "validation complete"
        );

        Ok(ValidationSummary {
            overall_score,
            confidence,
            validation_passed,
            category_scores,
            metadata: SummaryMetadata {
                rules_processed: rule_results.len(),
                processing_time_ms,
                knowledge_version: knowledge.version().to_string(),
                engine_version: ENGINE_VERSION.to_string(),
                validated_at: chrono::Utc::now(),
            },
            rule_results,
            violations,
            warnings,
            suggestions,
            alternatives,
            improvement_suggestions,
        })
    }

    /// Results in fixed category order however the categories were run.
    fn evaluate_all(&self, input: &RuleInput<'_>) -> Vec<RuleResult> {
        let per_category: Vec<Vec<RuleResult>> = if self.config.parallel {
            RuleCategory::ALL
                .as_slice()
                .par_iter()
                .map(|category| evaluate(*category, input))
                .collect()
        } else {
            RuleCategory::ALL
                .iter()
                .map(|category| evaluate(*category, input))
                .collect()
        };
        per_category.into_iter().flatten().collect()
    }
}

fn partition(results: &[RuleResult], keep: fn(&RuleResult) -> bool) -> Vec<RuleResult> {
    results.iter().filter(|r| keep(r)).cloned().collect()
}

/// Recommendations from every violation and the first `max_warnings`
/// warnings, first occurrence wins.
fn improvement_suggestions(
    violations: &[RuleResult],
    warnings: &[RuleResult],
    max_warnings: usize,
) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for result in violations.iter().chain(warnings.iter().take(max_warnings)) {
        if !result.recommendation.is_empty() && !out.contains(&result.recommendation) {
            out.push(result.recommendation.clone());
        }
    }
    out
}
