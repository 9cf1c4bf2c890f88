//! Alternative synthesis
//!
//! Each violation gets one alternative: a copy of the combination with the
//! single field most responsible for the violation changed, chosen from the
//! reference tables. Alternatives are not re-validated here; callers that
//! need a full verdict run them through the engine again.

use tailor_core::{
    AccessorySlot, CombinationAlternative, Garment, OutfitCombination, RuleResult,
    ValidationContext,
};
use tailor_knowledge::KnowledgeSnapshot;
use tailor_rules::color::replacement_colors;
use tailor_rules::{component_formality, pretty, RuleBook};

/// One proposed edit
struct Change {
    combination: OutfitCombination,
    description: String,
    /// Certainty taken from the reference tables, when they carry one
    confidence: Option<f64>,
}

impl Change {
    fn new(combination: OutfitCombination, description: String) -> Self {
        Self {
            combination,
            description,
            confidence: None,
        }
    }
}

pub struct AlternativeSynthesizer<'a> {
    knowledge: &'a KnowledgeSnapshot,
    rules: &'a RuleBook,
}

impl<'a> AlternativeSynthesizer<'a> {
    pub fn new(knowledge: &'a KnowledgeSnapshot, rules: &'a RuleBook) -> Self {
        Self { knowledge, rules }
    }

    /// Alternatives for the highest-priority violations, at most `limit`.
    /// Ties in priority keep evaluation order.
    pub fn synthesize(
        &self,
        combination: &OutfitCombination,
        context: &ValidationContext,
        violations: &[RuleResult],
        limit: usize,
    ) -> Vec<CombinationAlternative> {
        let mut ranked: Vec<&RuleResult> = violations.iter().collect();
        ranked.sort_by_key(|v| v.priority);
        ranked
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(rank, violation)| self.alternative(combination, context, violation, rank))
            .collect()
    }

    /// Always returns an alternative, even when no table offers a fix.
    pub fn alternative(
        &self,
        combination: &OutfitCombination,
        context: &ValidationContext,
        violation: &RuleResult,
        rank: usize,
    ) -> CombinationAlternative {
        let tuning = &self.rules.tuning.alternatives;
        let change = self
            .targeted(combination, context, &violation.rule_id)
            .or_else(|| self.fallback_tie(combination))
            .unwrap_or_else(|| Change {
                combination: combination.clone(),
                description: format!(
                    "No single-garment change found; revisit the {}",
                    violation.rule_name.to_lowercase()
                ),
                confidence: Some(tuning.unresolved_confidence),
            });

        let certainty = change.confidence.unwrap_or(tuning.base_confidence);
        let confidence =
            tailor_core::round2((certainty - tuning.rank_decay * rank as f64).clamp(0.05, 1.0));
        let mut improvements = vec![change.description.clone()];
        if !violation.recommendation.is_empty() && violation.recommendation != change.description {
            improvements.push(violation.recommendation.clone());
        }

        CombinationAlternative {
            combination: change.combination,
            confidence,
            reasoning: format!(
                "Addresses {} ({}): {}",
                violation.rule_name, violation.rule_id, change.description
            ),
            improvements,
            score: (confidence * 100.0).round() as u32,
            addresses: violation.rule_id.clone(),
        }
    }

    fn targeted(
        &self,
        combination: &OutfitCombination,
        context: &ValidationContext,
        rule_id: &str,
    ) -> Option<Change> {
        match rule_id {
            "CH001" | "CT001" | "MC001" => self.recolor(combination, Garment::Tie),
            "FC001" => self.formality_outlier(combination),
            "OA001" | "FL001" | "DCC001" | "TA001" | "VR001" => {
                self.resuit(combination, context, rule_id)
            }
            "PM001" | "PS001" | "SC001" => self.plain_pattern(combination),
            "SL001" | "PH001" | "TB001" => self.less_shine(combination),
            id if id.starts_with("NC") => self.never_combine(combination, id),
            _ => None,
        }
    }

    /// Replace the garment a never-combine rule names, tie first. Other
    /// forbidden pairings already in the combination are left to their own
    /// alternatives.
    fn never_combine(&self, combination: &OutfitCombination, rule_id: &str) -> Option<Change> {
        let table = &self.knowledge.never_combine;
        let named = table
            .absolute
            .iter()
            .find(|r| r.rule_id == rule_id)
            .map(|r| &r.combination)
            .or_else(|| {
                table
                    .conditional
                    .iter()
                    .find(|r| r.rule_id == rule_id)
                    .map(|r| &r.combination)
            })?;

        if named.tie.is_some() {
            self.recolor(combination, Garment::Tie)
        } else if named.shirt.is_some() {
            self.recolor(combination, Garment::Shirt)
        } else {
            let current = self.knowledge.formality.base(Garment::Suit, &combination.suit_color)?;
            self.closest_suit(combination, current, &[])
        }
    }

    fn recolor(&self, combination: &OutfitCombination, garment: Garment) -> Option<Change> {
        let (color, confidence) = replacement_colors(combination, self.knowledge, garment)
            .into_iter()
            .next()?;
        let description = match combination.color(garment) {
            Some(old) => format!("Swap the {} {} for {}", pretty(old), garment, pretty(&color)),
            None => format!("Add a {} {}", pretty(&color), garment),
        };
        let mut candidate = combination.clone();
        candidate.set_color(garment, Some(color));
        Some(Change {
            combination: candidate,
            description,
            confidence: Some(confidence),
        })
    }

    /// Pull the component farthest from the others back toward their mean.
    fn formality_outlier(&self, combination: &OutfitCombination) -> Option<Change> {
        let components = component_formality(combination, self.knowledge);
        let outlier = components.outlier()?;
        let others: Vec<f64> = components
            .present()
            .into_iter()
            .filter(|(name, _)| *name != outlier)
            .map(|(_, v)| v)
            .collect();
        let target = others.iter().sum::<f64>() / others.len().max(1) as f64;

        let garment = match outlier {
            "suit" => Garment::Suit,
            "shirt" => Garment::Shirt,
            "tie" => Garment::Tie,
            _ => return self.closest_accessory(combination, target),
        };
        let current = combination.color(garment)?;
        let (color, _) = self
            .knowledge
            .formality
            .colors_for(garment)
            .iter()
            .filter(|(color, _)| color.as_str() != current)
            .filter(|(color, _)| !self.forbidden_with(combination, garment, color))
            .min_by(|(_, a), (_, b)| (*a - target).abs().total_cmp(&(*b - target).abs()))?;

        let mut candidate = combination.clone();
        candidate.set_color(garment, Some(color.clone()));
        Some(Change::new(
            candidate,
            format!(
                "Change the {} from {} to {} to match the formality of the rest",
                garment,
                pretty(current),
                pretty(color)
            ),
        ))
    }

    fn closest_accessory(&self, combination: &OutfitCombination, target: f64) -> Option<Change> {
        let table = &self.knowledge.formality;
        // the worn accessory farthest from the target
        let (slot, style, _) = combination
            .accessory_items()
            .into_iter()
            .filter_map(|(slot, style)| {
                table
                    .accessory(slot, style)
                    .map(|v| (slot, style, (v - target).abs()))
            })
            .max_by(|a, b| a.2.total_cmp(&b.2))?;
        let replacement = self.accessory_near(slot, style, target, |_| true)?;
        Some(Change::new(
            combination.clone().with_accessory(slot, replacement.clone()),
            format!(
                "Replace the {} {} with {}",
                pretty(style),
                pretty(slot.as_str()),
                pretty(&replacement)
            ),
        ))
    }

    /// Style in `slot` closest to `target`, other than `current`.
    fn accessory_near(
        &self,
        slot: AccessorySlot,
        current: &str,
        target: f64,
        accept: impl Fn(&str) -> bool,
    ) -> Option<String> {
        self.knowledge
            .formality
            .accessories
            .get(slot.as_str())?
            .iter()
            .filter(|(style, _)| style.as_str() != current && accept(style.as_str()))
            .min_by(|(_, a), (_, b)| (*a - target).abs().total_cmp(&(*b - target).abs()))
            .map(|(style, _)| style.clone())
    }

    /// New suit color aimed at the formality the violated requirement asks for.
    fn resuit(
        &self,
        combination: &OutfitCombination,
        context: &ValidationContext,
        rule_id: &str,
    ) -> Option<Change> {
        let occasions = &self.knowledge.occasions;
        let (target, preferred) = match rule_id {
            "DCC001" => {
                let code = occasions.dress_code(context.dress_code.as_deref()?)?;
                (code.formality.midpoint(), code.suit_colors.as_slice())
            }
            "FL001" => (context.formality_required?, &[][..]),
            "VR001" => {
                let venue = self.knowledge.venues.venue(context.venue_type.as_deref()?)?;
                (venue.formality.midpoint(), venue.preferred_colors.as_slice())
            }
            _ => {
                let occasion = occasions.occasion(context.occasion.as_deref()?)?;
                (
                    occasion.range_for(context.season.as_deref()).midpoint(),
                    occasion.preferred_colors.as_slice(),
                )
            }
        };
        self.closest_suit(combination, target, preferred)
    }

    /// Suit color nearest `target`, drawn from `preferred` when any of them
    /// has a known formality.
    fn closest_suit(
        &self,
        combination: &OutfitCombination,
        target: f64,
        preferred: &[String],
    ) -> Option<Change> {
        let suits = &self.knowledge.formality.suits;
        let mut candidates: Vec<(&String, f64)> = preferred
            .iter()
            .filter_map(|color| suits.get(color).map(|v| (color, *v)))
            .collect();
        if candidates.is_empty() {
            candidates = suits.iter().map(|(color, v)| (color, *v)).collect();
        }
        let current = combination.suit_color.as_str();
        let (color, _) = candidates
            .into_iter()
            .filter(|(color, _)| color.as_str() != current)
            .filter(|(color, _)| !self.forbidden_with(combination, Garment::Suit, color))
            .min_by(|(_, a), (_, b)| (a - target).abs().total_cmp(&(b - target).abs()))?;

        let mut candidate = combination.clone();
        candidate.set_color(Garment::Suit, Some(color.clone()));
        Some(Change::new(
            candidate,
            format!(
                "Switch to a {} suit (formality {}) instead of {}",
                pretty(color),
                suits.get(color.as_str()).copied().unwrap_or(target),
                pretty(current)
            ),
        ))
    }

    /// Make the most visible patterned piece solid, starting with the tie.
    fn plain_pattern(&self, combination: &OutfitCombination) -> Option<Change> {
        let garment = [Garment::Tie, Garment::Shirt, Garment::Suit]
            .into_iter()
            .find(|g| matches!(combination.pattern(*g), Some(p) if p != "solid"))?;
        let old = combination.pattern(garment).unwrap_or_default();
        let mut candidate = combination.clone();
        candidate.set_pattern(garment, None);
        Some(Change::new(
            candidate,
            format!("Make the {} solid instead of {}", garment, pretty(old)),
        ))
    }

    /// Swap one shiny element for a matte one, accessories first.
    fn less_shine(&self, combination: &OutfitCombination) -> Option<Change> {
        let styling = &self.knowledge.styling;
        for (slot, style) in combination.accessory_items() {
            if !styling.is_shiny(style) {
                continue;
            }
            let current = self.knowledge.formality.accessory(slot, style).unwrap_or(5.0);
            let matte = self.accessory_near(slot, style, current, |s| !styling.is_shiny(s));
            if let Some(matte) = matte {
                return Some(Change::new(
                    combination.clone().with_accessory(slot, matte.clone()),
                    format!(
                        "Replace the {} {} with {}",
                        pretty(style),
                        pretty(slot.as_str()),
                        pretty(&matte)
                    ),
                ));
            }
        }
        let (garment, fabric) = combination
            .fabrics()
            .into_iter()
            .rev()
            .find(|(_, fabric)| styling.is_shiny(fabric))?;
        let mut candidate = combination.clone();
        candidate.set_fabric(garment, None);
        Some(Change::new(
            candidate,
            format!("Choose a matte {} instead of {}", garment, pretty(fabric)),
        ))
    }

    fn fallback_tie(&self, combination: &OutfitCombination) -> Option<Change> {
        let current = combination.color(Garment::Tie);
        let color = self
            .rules
            .tuning
            .alternatives
            .fallback_ties
            .iter()
            .filter(|c| Some(c.as_str()) != current)
            .find(|c| !self.forbidden_with(combination, Garment::Tie, c))?;
        let mut candidate = combination.clone();
        candidate.set_color(Garment::Tie, Some(color.clone()));
        let description = match current {
            Some(old) => format!("Try a {} tie instead of {}", pretty(color), pretty(old)),
            None => format!("Add a {} tie", pretty(color)),
        };
        Some(Change::new(candidate, description))
    }

    /// Would recoloring `garment` add a forbidden pairing not already present?
    fn forbidden_with(
        &self,
        combination: &OutfitCombination,
        garment: Garment,
        color: &str,
    ) -> bool {
        let mut candidate = combination.clone();
        candidate.set_color(garment, Some(color.to_string()));
        self.knowledge
            .never_combine
            .introduces_forbidden(combination, &candidate)
    }
}
