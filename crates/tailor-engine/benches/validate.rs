//! Criterion benchmarks for tailor-engine.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tailor_engine::{
    AccessorySlot, EngineConfig, Garment, OutfitCombination, ValidationContext, ValidationEngine,
};
use tailor_knowledge::{BuiltinProvider, KnowledgeSnapshot};

fn full_outfit() -> (OutfitCombination, ValidationContext) {
    let combination = OutfitCombination::new("charcoal", "light_blue")
        .with_tie("burgundy")
        .with_pattern(Garment::Suit, "pinstripe")
        .with_pattern(Garment::Tie, "paisley")
        .with_fabric(Garment::Suit, "worsted_wool")
        .with_fabric(Garment::Tie, "silk")
        .with_accessory(AccessorySlot::Shoes, "oxford")
        .with_accessory(AccessorySlot::Belt, "leather");
    let context = ValidationContext::new()
        .with_occasion("business_formal")
        .with_season("fall")
        .with_venue("office")
        .with_customer_profile("classic_conservative")
        .with_industry("finance")
        .with_cultural_region("east_asia")
        .with_photography_importance("high");
    (combination, context)
}

fn bench_validate(c: &mut Criterion) {
    let (combination, context) = full_outfit();

    for parallel in [false, true] {
        let config = EngineConfig::default().with_parallel(parallel);
        let engine = ValidationEngine::new(BuiltinProvider, config);
        if engine.initialize().is_err() {
            return;
        }
        let name = if parallel { "validate_parallel" } else { "validate_sequential" };
        c.bench_function(name, |b| {
            b.iter(|| engine.validate(black_box(&combination), black_box(&context)))
        });
    }

    let engine = ValidationEngine::builtin();
    if engine.initialize().is_err() {
        return;
    }
    let violating = OutfitCombination::new("black", "brown").with_tie("brown");
    let black_tie = ValidationContext::new().with_occasion("black_tie");
    c.bench_function("validate_with_alternatives", |b| {
        b.iter(|| engine.validate(black_box(&violating), black_box(&black_tie)))
    });
}

fn bench_snapshot_load(c: &mut Criterion) {
    c.bench_function("snapshot_load_builtin", |b| {
        b.iter(|| KnowledgeSnapshot::load(black_box(&BuiltinProvider)))
    });
}

criterion_group!(benches, bench_validate, bench_snapshot_load);
criterion_main!(benches);
