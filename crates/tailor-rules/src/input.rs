//! Evaluation input shared by every check
use crate::rulebook::{RuleBook, RuleSpec, Tuning};
use tailor_core::{OutfitCombination, ValidationContext};
use tailor_knowledge::KnowledgeSnapshot;

/// Everything a check reads. Nothing here is mutable.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    pub combination: &'a OutfitCombination,
    pub context: &'a ValidationContext,
    pub knowledge: &'a KnowledgeSnapshot,
    pub rules: &'a RuleBook,
}

impl<'a> RuleInput<'a> {
    pub fn new(
        combination: &'a OutfitCombination,
        context: &'a ValidationContext,
        knowledge: &'a KnowledgeSnapshot,
        rules: &'a RuleBook,
    ) -> Self {
        Self {
            combination,
            context,
            knowledge,
            rules,
        }
    }

    /// `RuleSpec` for an enabled rule; disabled or unknown ids yield `None`.
    pub fn active(&self, id: &str) -> Option<&'a RuleSpec> {
        self.rules.rule(id).filter(|spec| spec.enabled)
    }

    pub fn tuning(&self) -> &'a Tuning {
        &self.rules.tuning
    }

    pub fn unrecognized_confidence(&self) -> f64 {
        self.rules.tuning.unrecognized_confidence
    }
}
