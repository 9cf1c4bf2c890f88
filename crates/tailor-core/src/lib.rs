//! Tailor Core: outfit data model, rule outcomes and the unified error type
pub mod category;
pub mod context;
pub mod data_model;
pub mod error;
pub mod verdict;

pub use category::{RuleCategory, Severity};
pub use context::ValidationContext;
pub use data_model::{Accessories, AccessorySlot, Garment, OutfitCombination};
pub use error::TailorError;
pub use verdict::{CombinationAlternative, RuleResult, SummaryMetadata, ValidationSummary};

/// Version stamped into every summary's metadata.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Round to two decimal places, the precision used for scores and confidences.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
