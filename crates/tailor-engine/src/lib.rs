//! Tailor Engine: outfit validation
//!
//! Runs the nine rule categories over a combination and its context, then
//! aggregates the results into a single [`ValidationSummary`] with scores,
//! partitioned findings and alternative combinations.
//!
//! # Example
//!
//! ```no_run
//! use tailor_engine::{OutfitCombination, ValidationContext, ValidationEngine};
//!
//! let engine = ValidationEngine::builtin();
//! engine.initialize()?;
//!
//! let combination = OutfitCombination::new("navy", "white").with_tie("burgundy");
//! let context = ValidationContext::new().with_occasion("business_formal").with_season("fall");
//! let summary = engine.validate(&combination, &context)?;
//! println!("{} ({})", summary.overall_score, summary.validation_passed);
//! # Ok::<(), tailor_engine::TailorError>(())
//! ```

pub mod alternatives;
pub mod config;
pub mod engine;
pub mod scoring;

pub use alternatives::AlternativeSynthesizer;
pub use config::EngineConfig;
pub use engine::ValidationEngine;

pub use tailor_core::{
    Accessories, AccessorySlot, CombinationAlternative, Garment, OutfitCombination, RuleCategory,
    RuleResult, Severity, SummaryMetadata, TailorError, ValidationContext, ValidationSummary,
};
pub use tailor_knowledge::{DirectoryProvider, KnowledgeProvider, KnowledgeSnapshot, MemoryProvider};
pub use tailor_rules::{RuleBook, RuleSpec};
