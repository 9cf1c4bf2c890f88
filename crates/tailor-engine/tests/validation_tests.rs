//! End-to-end validation against the built-in knowledge pack.

use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tailor_engine::{
    AccessorySlot, EngineConfig, Garment, KnowledgeProvider, OutfitCombination, RuleCategory,
    Severity, TailorError, ValidationContext, ValidationEngine,
};
use tailor_knowledge::{BuiltinProvider, KnowledgeTable, MemoryProvider, ProviderError};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn engine() -> ValidationEngine {
    init_tracing();
    let engine = ValidationEngine::builtin();
    engine.initialize().unwrap();
    engine
}

fn business() -> ValidationContext {
    ValidationContext::new()
        .with_occasion("business_formal")
        .with_season("fall")
        .with_venue("office")
}

fn sample_outfits() -> Vec<(OutfitCombination, ValidationContext)> {
    vec![
        (OutfitCombination::new("navy", "white").with_tie("burgundy"), business()),
        (OutfitCombination::new("black", "brown").with_tie("navy"), ValidationContext::new()),
        (
            OutfitCombination::new("khaki", "orange").with_tie("black"),
            ValidationContext::new().with_occasion("black_tie").with_season("winter"),
        ),
        (
            OutfitCombination::new("grey", "white")
                .with_tie("navy")
                .with_pattern(Garment::Suit, "glen_check")
                .with_pattern(Garment::Shirt, "striped")
                .with_pattern(Garment::Tie, "repp_stripe"),
            ValidationContext::new().with_season("summer").with_weather("hot"),
        ),
        (
            OutfitCombination::new("charcoal", "light_blue")
                .with_fabric(Garment::Suit, "flannel")
                .with_accessory(AccessorySlot::Shoes, "sneaker"),
            ValidationContext::new()
                .with_occasion("fictional_occasion")
                .with_season("monsoon")
                .with_venue("moon_base")
                .with_customer_profile("astronaut")
                .with_cultural_region("east_asia"),
        ),
    ]
}

// =============================================================================
// Score bounds and pass rule
// =============================================================================

#[test]
fn test_scores_stay_in_bounds() {
    let engine = engine();
    for (combination, context) in sample_outfits() {
        let summary = engine.validate(&combination, &context).unwrap();
        assert!(summary.overall_score <= 100);
        assert!((0.0..=1.0).contains(&summary.confidence));
        for score in summary.category_scores.values() {
            assert!((0.0..=100.0).contains(score));
        }
    }
}

#[test]
fn test_passed_iff_no_blocking_failure() {
    let engine = engine();
    for (combination, context) in sample_outfits() {
        let summary = engine.validate(&combination, &context).unwrap();
        let blocking = summary
            .rule_results
            .iter()
            .any(|r| !r.passed && matches!(r.severity, Severity::Critical | Severity::High));
        assert_eq!(summary.validation_passed, !blocking, "{:?}", combination);
    }
}

#[test]
fn test_partitions_follow_severity() {
    let engine = engine();
    for (combination, context) in sample_outfits() {
        let summary = engine.validate(&combination, &context).unwrap();
        assert!(summary.violations.iter().all(|r| !r.passed && r.severity.is_blocking()));
        assert!(summary.warnings.iter().all(|r| !r.passed && r.severity.is_warning()));
        assert!(summary.suggestions.iter().all(|r| r.severity == Severity::Info));
        assert_eq!(summary.metadata.rules_processed, summary.rule_results.len());
    }
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_repeated_validation_is_identical() {
    let engine = engine();
    for (combination, context) in sample_outfits() {
        let first = engine.validate(&combination, &context).unwrap();
        let second = engine.validate(&combination, &context).unwrap();
        assert_eq!(first.rule_results, second.rule_results);
        assert_eq!(first.overall_score, second.overall_score);
        assert_eq!(first.alternatives, second.alternatives);
        assert_eq!(first.metadata.knowledge_version, second.metadata.knowledge_version);
    }
}

#[test]
fn test_parallel_matches_sequential() {
    init_tracing();
    let parallel =
        ValidationEngine::new(BuiltinProvider, EngineConfig::default().with_parallel(true));
    let sequential =
        ValidationEngine::new(BuiltinProvider, EngineConfig::default().with_parallel(false));
    parallel.initialize().unwrap();
    sequential.initialize().unwrap();

    for (combination, context) in sample_outfits() {
        let a = parallel.validate(&combination, &context).unwrap();
        let b = sequential.validate(&combination, &context).unwrap();
        assert_eq!(a.rule_results, b.rule_results);

        // category order is fixed
        let order: Vec<usize> = a
            .rule_results
            .iter()
            .map(|r| RuleCategory::ALL.iter().position(|c| *c == r.category).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] <= w[1]));
    }
}

// =============================================================================
// Never-combine
// =============================================================================

#[test]
fn test_never_combine_forces_failure() {
    let engine = engine();
    let combination = OutfitCombination::new("black", "brown").with_tie("navy");
    for context in [ValidationContext::new(), business()] {
        let summary = engine.validate(&combination, &context).unwrap();
        let critical: Vec<_> = summary
            .rule_results
            .iter()
            .filter(|r| r.severity == Severity::Critical)
            .collect();
        assert_eq!(critical.len(), 1);
        assert!(!critical[0].passed);
        assert_eq!(critical[0].score_impact, -30);
        assert_eq!(critical[0].rule_id, "NC001");
        assert!(!summary.validation_passed);
    }
}

#[test]
fn test_clean_outfit_reports_pass() {
    let engine = engine();
    let combination = OutfitCombination::new("navy", "white").with_tie("burgundy");
    let summary = engine.validate(&combination, &business()).unwrap();
    assert!(summary.validation_passed);
    assert!(summary.violations.is_empty());
    assert!(summary.alternatives.is_empty());
    assert!(summary.result("NCR_PASS").unwrap().passed);
    assert!(summary.improvement_suggestions.is_empty() || !summary.warnings.is_empty());
}

// =============================================================================
// Formality consistency
// =============================================================================

#[test]
fn test_formality_range_of_three_passes() {
    // navy suit 8, white shirt 10, navy tie 7
    let engine = engine();
    let combination = OutfitCombination::new("navy", "white").with_tie("navy");
    let summary = engine.validate(&combination, &ValidationContext::new()).unwrap();
    let fc = summary.result("FC001").unwrap();
    assert!(fc.passed);
    assert_eq!(fc.severity, Severity::Success);
}

#[test]
fn test_formality_range_of_seven_is_high() {
    // navy suit 8, orange shirt 2, black tie 9
    let engine = engine();
    let combination = OutfitCombination::new("navy", "orange").with_tie("black");
    let summary = engine.validate(&combination, &ValidationContext::new()).unwrap();
    let fc = summary.result("FC001").unwrap();
    assert!(!fc.passed);
    assert_eq!(fc.severity, Severity::High);
    assert_eq!(fc.score_impact, -15);
    assert!(!summary.validation_passed);

    let alternative = summary.alternatives.iter().find(|a| a.addresses == "FC001").unwrap();
    assert_ne!(alternative.combination.shirt_color, "orange");
    assert_eq!(alternative.combination.suit_color, "navy");
}

// =============================================================================
// Pattern and texture
// =============================================================================

#[test]
fn test_three_patterns_fail_count() {
    let engine = engine();
    let combination = OutfitCombination::new("grey", "white")
        .with_tie("navy")
        .with_pattern(Garment::Suit, "glen_check")
        .with_pattern(Garment::Shirt, "gingham")
        .with_pattern(Garment::Tie, "paisley");
    let summary = engine.validate(&combination, &ValidationContext::new()).unwrap();
    let pm = summary.result("PM001").unwrap();
    assert!(!pm.passed);
    assert_eq!(pm.severity, Severity::Medium);
    assert_eq!(pm.score_impact, -12);
    assert!(summary.warnings.iter().any(|r| r.rule_id == "PM001"));
}

#[test]
fn test_silk_tie_and_patent_shoes_fail_shine() {
    let engine = engine();
    let combination = OutfitCombination::new("black", "white")
        .with_tie("black")
        .with_fabric(Garment::Tie, "silk")
        .with_accessory(AccessorySlot::Shoes, "patent_leather");
    let summary = engine.validate(&combination, &ValidationContext::new()).unwrap();
    let sl = summary.result("SL001").unwrap();
    assert!(!sl.passed);
    assert_eq!(sl.score_impact, -8);
}

// =============================================================================
// Alternatives
// =============================================================================

#[test]
fn test_alternatives_only_for_violations() {
    let engine = engine();
    for (combination, context) in sample_outfits() {
        let summary = engine.validate(&combination, &context).unwrap();
        if summary.violations.is_empty() {
            assert!(summary.alternatives.is_empty());
        } else {
            assert!((1..=3).contains(&summary.alternatives.len()));
            for alternative in &summary.alternatives {
                assert!((0.0..=1.0).contains(&alternative.confidence));
                assert!(alternative.score <= 100);
                assert!(alternative.reasoning.contains(&alternative.addresses));
            }
        }
    }
}

#[test]
fn test_never_combine_alternative_is_not_forbidden() {
    let engine = engine();
    let combination = OutfitCombination::new("black", "brown").with_tie("navy");
    let summary = engine.validate(&combination, &ValidationContext::new()).unwrap();
    let alternative = &summary.alternatives[0];
    assert_eq!(alternative.addresses, "NC001");

    let recheck = engine.validate(&alternative.combination, &ValidationContext::new()).unwrap();
    assert!(recheck.result("NCR_PASS").is_some());
}

#[test]
fn test_max_alternatives_is_respected() {
    init_tracing();
    let config = EngineConfig::from_yaml("max_alternatives: 1").unwrap();
    let engine = ValidationEngine::new(BuiltinProvider, config);
    engine.initialize().unwrap();

    // never-combine, occasion and formality violations at once
    let combination = OutfitCombination::new("black", "brown").with_tie("brown");
    let context = ValidationContext::new().with_occasion("black_tie");
    let summary = engine.validate(&combination, &context).unwrap();
    assert!(summary.violations.len() > 1);
    assert_eq!(summary.alternatives.len(), 1);
}

#[test]
fn test_overlapping_forbidden_pairings_still_get_changes() {
    let engine = engine();
    let combination = OutfitCombination::new("black", "brown").with_tie("brown");
    for context in [ValidationContext::new(), ValidationContext::new().with_occasion("black_tie")] {
        let summary = engine.validate(&combination, &context).unwrap();
        let addressed: Vec<&str> =
            summary.alternatives.iter().map(|a| a.addresses.as_str()).collect();
        assert!(addressed.contains(&"NC001") && addressed.contains(&"NC004"), "{:?}", addressed);
        for alternative in &summary.alternatives {
            assert_ne!(alternative.combination, combination, "{}", alternative.reasoning);
            assert!(alternative.confidence > 0.5);
        }
    }
}

// =============================================================================
// Degraded input
// =============================================================================

#[test]
fn test_unknown_occasion_is_informational() {
    let engine = engine();
    let combination = OutfitCombination::new("navy", "white").with_tie("burgundy");
    let context = ValidationContext::new().with_occasion("fictional_occasion");
    let summary = engine.validate(&combination, &context).unwrap();

    let mentions: Vec<_> = summary
        .rule_results
        .iter()
        .filter(|r| r.context_applied.iter().any(|c| c.contains("fictional_occasion")))
        .collect();
    assert_eq!(mentions.len(), 1);
    assert_eq!(mentions[0].severity, Severity::Info);
    assert_eq!(mentions[0].confidence, 0.5);
    assert!(mentions[0].passed);
    assert!(summary.validation_passed);
}

#[test]
fn test_unknown_values_never_error() {
    let engine = engine();
    let combination = OutfitCombination::new("mauve", "chartreuse").with_tie("puce");
    let context = ValidationContext::new()
        .with_season("monsoon")
        .with_venue("moon_base")
        .with_dress_code("space_formal")
        .with_lighting("bioluminescent")
        .with_style_preference("galactic")
        .with_industry("piracy");
    let summary = engine.validate(&combination, &context).unwrap();
    assert!(summary.overall_score <= 100);
    assert!(summary.suggestions.iter().any(|r| r.rule_id == "US001"));
    assert!(summary.suggestions.iter().all(|r| r.passed));
}

// =============================================================================
// Lifecycle
// =============================================================================

/// Serves the built-in pack until switched off.
struct SwitchableProvider {
    inner: MemoryProvider,
    broken: Arc<AtomicBool>,
}

impl KnowledgeProvider for SwitchableProvider {
    fn load(&self, table: KnowledgeTable) -> Result<Value, ProviderError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(ProviderError::NotFound(table.to_string()));
        }
        self.inner.load(table)
    }

    fn name(&self) -> &str {
        "switchable"
    }
}

#[test]
fn test_failed_refresh_keeps_previous_snapshot() {
    init_tracing();
    let broken = Arc::new(AtomicBool::new(false));
    let provider = SwitchableProvider {
        inner: MemoryProvider::from_builtin().unwrap(),
        broken: Arc::clone(&broken),
    };
    let engine = ValidationEngine::new(provider, EngineConfig::default());
    engine.initialize().unwrap();
    let version = engine.snapshot_version().unwrap();

    broken.store(true, Ordering::SeqCst);
    assert!(matches!(engine.refresh(), Err(TailorError::DataUnavailable { .. })));
    assert_eq!(engine.snapshot_version(), Some(version));

    let combination = OutfitCombination::new("navy", "white");
    assert!(engine.validate(&combination, &ValidationContext::new()).is_ok());

    // a failed initialize, unlike refresh, leaves the engine not ready
    assert!(engine.initialize().is_err());
    assert_eq!(
        engine.validate(&combination, &ValidationContext::new()).unwrap_err(),
        TailorError::EngineNotReady
    );

    broken.store(false, Ordering::SeqCst);
    engine.initialize().unwrap();
    assert!(engine.is_ready());
}

#[test]
fn test_in_flight_snapshot_survives_swap() {
    let engine = engine();
    let captured = engine.snapshot().unwrap();

    let mut provider = MemoryProvider::from_builtin().unwrap();
    if let Some(trends) = provider.table_mut(KnowledgeTable::Trends) {
        trends["trending_colors"] = serde_json::json!(["navy"]);
    }
    let replacement = tailor_knowledge::KnowledgeSnapshot::load(&provider).unwrap();
    engine.install(Arc::new(replacement));

    assert_ne!(captured.version(), engine.snapshot_version().unwrap());
    assert!(!captured.trends.trending_colors.iter().any(|c| c == "navy"));
}

#[test]
fn test_directory_provider_matches_builtin() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    for table in KnowledgeTable::ALL {
        let value = BuiltinProvider.load(table).unwrap();
        let json = serde_json::to_string_pretty(&value).unwrap();
        std::fs::write(dir.path().join(table.file_name()), json).unwrap();
    }

    let engine = ValidationEngine::from_config(EngineConfig::default().with_data_dir(dir.path()));
    engine.initialize().unwrap();
    assert_eq!(
        engine.snapshot_version().unwrap(),
        tailor_knowledge::KnowledgeSnapshot::builtin().unwrap().version()
    );

    std::fs::remove_file(dir.path().join(KnowledgeTable::Colors.file_name())).unwrap();
    match engine.refresh() {
        Err(TailorError::DataUnavailable { table, .. }) => assert_eq!(table, "colors"),
        other => panic!("unexpected {:?}", other),
    }
    assert!(engine.is_ready());
}

#[test]
fn test_disabled_rules_drop_out() {
    init_tracing();
    let config = EngineConfig::from_yaml(
        r#"
rulebook:
  rules:
    PM001: { enabled: false }
    TR001: { enabled: false }
"#,
    )
    .unwrap();
    let engine = ValidationEngine::new(BuiltinProvider, config);
    engine.initialize().unwrap();

    let combination = OutfitCombination::new("grey", "white")
        .with_tie("navy")
        .with_pattern(Garment::Suit, "glen_check")
        .with_pattern(Garment::Shirt, "gingham")
        .with_pattern(Garment::Tie, "paisley");
    let summary = engine.validate(&combination, &ValidationContext::new()).unwrap();
    assert!(summary.result("PM001").is_none());
    assert!(summary.result("TR001").is_none());
}
