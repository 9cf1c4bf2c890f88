//! Formality matching
//!
//! Every garment gets a 1-10 formality from the index (base color value plus
//! pattern and fabric modifiers). The weighted overall score feeds the
//! occasion, level, dress code and time-of-day checks; the spread between
//! components feeds the consistency check.

use crate::input::RuleInput;
use crate::{accepted, join_names, pretty};
use serde::{Deserialize, Serialize};
use tailor_core::{Garment, OutfitCombination, RuleResult};
use tailor_knowledge::{FormalityRange, KnowledgeSnapshot};

/// Per-component formality. Absent tie or accessories stay `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentFormality {
    pub suit: f64,
    pub shirt: f64,
    pub tie: Option<f64>,
    pub accessories: Option<f64>,
}

impl ComponentFormality {
    /// Components that are actually worn, labelled.
    pub fn present(&self) -> Vec<(&'static str, f64)> {
        let mut present = vec![("suit", self.suit), ("shirt", self.shirt)];
        if let Some(tie) = self.tie {
            present.push(("tie", tie));
        }
        if let Some(accessories) = self.accessories {
            present.push(("accessories", accessories));
        }
        present
    }

    /// Max minus min over worn components.
    pub fn range(&self) -> f64 {
        let values: Vec<f64> = self.present().into_iter().map(|(_, v)| v).collect();
        let max = values.iter().copied().fold(f64::MIN, f64::max);
        let min = values.iter().copied().fold(f64::MAX, f64::min);
        max - min
    }

    /// The component farthest from the mean of the others.
    pub fn outlier(&self) -> Option<&'static str> {
        let present = self.present();
        present
            .iter()
            .map(|(name, value)| {
                let others: Vec<f64> = present
                    .iter()
                    .filter(|(n, _)| n != name)
                    .map(|(_, v)| *v)
                    .collect();
                let mean = others.iter().sum::<f64>() / others.len().max(1) as f64;
                (*name, (value - mean).abs())
            })
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(name, _)| name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormalityAnalysis {
    pub components: ComponentFormality,
    /// Weighted overall formality, rounded to a whole step
    pub overall: f64,
    /// 1 - range/10
    pub consistency: f64,
    pub occasion_match: Option<bool>,
    pub adjustments: Vec<String>,
}

fn garment_formality(
    combination: &OutfitCombination,
    knowledge: &KnowledgeSnapshot,
    garment: Garment,
) -> Option<f64> {
    let table = &knowledge.formality;
    let color = combination.color(garment)?;
    let base = table
        .base(garment, color)
        .unwrap_or_else(|| table.default_for(garment));
    let pattern = combination
        .pattern(garment)
        .map(|p| table.pattern_modifier(p))
        .unwrap_or(0.0);
    let fabric = combination
        .fabric(garment)
        .map(|f| table.fabric_modifier(f))
        .unwrap_or(0.0);
    Some((base + pattern + fabric).clamp(1.0, 10.0))
}

pub fn component_formality(
    combination: &OutfitCombination,
    knowledge: &KnowledgeSnapshot,
) -> ComponentFormality {
    let table = &knowledge.formality;
    let items = combination.accessory_items();
    let accessories = if items.is_empty() {
        None
    } else {
        let total: f64 = items
            .iter()
            .map(|(slot, style)| {
                table
                    .accessory(*slot, style)
                    .unwrap_or(table.defaults.accessory)
            })
            .sum();
        Some(total / items.len() as f64)
    };

    ComponentFormality {
        suit: garment_formality(combination, knowledge, Garment::Suit)
            .unwrap_or(table.defaults.suit),
        shirt: garment_formality(combination, knowledge, Garment::Shirt)
            .unwrap_or(table.defaults.shirt),
        tie: garment_formality(combination, knowledge, Garment::Tie),
        accessories,
    }
}

/// Weighted overall formality rounded to the nearest whole step.
pub fn overall_formality(input: &RuleInput<'_>, components: &ComponentFormality) -> f64 {
    let weights = &input.tuning().formality;
    let defaults = &input.knowledge.formality.defaults;
    let total = weights.suit_weight
        + weights.shirt_weight
        + weights.tie_weight
        + weights.accessory_weight;
    if total <= 0.0 {
        return components.suit.round();
    }
    let weighted = components.suit * weights.suit_weight
        + components.shirt * weights.shirt_weight
        + components.tie.unwrap_or(defaults.no_tie) * weights.tie_weight
        + components.accessories.unwrap_or(defaults.accessory) * weights.accessory_weight;
    (weighted / total).round()
}

fn occasion_range(input: &RuleInput<'_>) -> Option<(String, FormalityRange)> {
    let occasion = input
        .knowledge
        .occasions
        .occasion(input.context.occasion.as_deref()?)?;
    Some((
        occasion.name.clone(),
        occasion.range_for(input.context.season.as_deref()),
    ))
}

pub fn analyze_formality(input: &RuleInput<'_>) -> FormalityAnalysis {
    let components = component_formality(input.combination, input.knowledge);
    let overall = overall_formality(input, &components);
    let range = components.range();
    let threshold = input.active("FC001").map(|s| s.threshold_or(3.0)).unwrap_or(3.0);

    let mut adjustments = Vec::new();
    if range > threshold {
        if let Some(outlier) = components.outlier() {
            adjustments.push(format!(
                "Bring the {} closer to the formality of the rest of the outfit",
                outlier
            ));
        }
    }

    let occasion_match = occasion_range(input).map(|(name, band)| {
        if overall < band.min() {
            adjustments.push(format!(
                "Raise formality for {}: a darker suit, a white shirt or a silk tie",
                name
            ));
        } else if overall > band.max() {
            adjustments.push(format!(
                "Lower formality for {}: a lighter suit, a textured fabric or an open collar",
                name
            ));
        }
        band.contains(overall)
    });

    FormalityAnalysis {
        consistency: tailor_core::round2((1.0 - range / 10.0).max(0.0)),
        components,
        overall,
        occasion_match,
        adjustments,
    }
}

fn describe_components(components: &ComponentFormality) -> Vec<String> {
    components
        .present()
        .into_iter()
        .map(|(name, value)| format!("{}={:.1}", name, value))
        .collect()
}

pub fn consistency(input: &RuleInput<'_>, out: &mut Vec<RuleResult>) {
    let Some(spec) = input.active("FC001") else {
        return;
    };
    let components = component_formality(input.combination, input.knowledge);
    let range = components.range();
    let threshold = spec.threshold_or(3.0);

    let mut result = if range <= threshold {
        spec.pass(0.9)
            .with_message(format!("Consistent formality across garments (range {:.1})", range))
            .with_reasoning("All garments sit at a similar formality level")
            .with_recommendation("Formality levels work well together")
    } else {
        let outlier = components.outlier().unwrap_or("shirt");
        spec.fail_escalated((0.9 - range * 0.1).max(0.4), range > spec.escalation_or(5.0))
            .with_message(format!(
                "Formality mismatch: range {:.1} exceeds {:.1}",
                range, threshold
            ))
            .with_reasoning(format!(
                "The {} is far from the formality of the other garments",
                outlier
            ))
            .with_recommendation(format!(
                "Bring the {} closer to the formality of the rest of the outfit",
                outlier
            ))
    };
    for fact in describe_components(&components) {
        result = result.with_context(fact);
    }
    out.push(result);
}

pub fn occasion(input: &RuleInput<'_>, out: &mut Vec<RuleResult>) {
    let Some(name) = input.context.occasion.as_deref() else {
        return;
    };
    let Some(occasion) = input.knowledge.occasions.occasion(name) else {
        if let Some(spec) = input.active("UO001") {
            out.push(spec.unrecognized("occasion", name, input.unrecognized_confidence()));
        }
        return;
    };
    let Some(spec) = input.active("OA001") else {
        return;
    };

    let components = component_formality(input.combination, input.knowledge);
    let overall = overall_formality(input, &components);
    let band = occasion.range_for(input.context.season.as_deref());
    let distance = band.distance(overall);

    let avoided: Vec<&str> = input
        .combination
        .colors()
        .into_iter()
        .filter(|c| occasion.avoids(c))
        .collect();
    let mut issues = Vec::new();
    if distance > 0.0 {
        issues.push(format!(
            "formality {:.0} outside the {} range {}",
            overall, occasion.name, band
        ));
    }
    if !avoided.is_empty() {
        issues.push(format!("{} not suited to {}", join_names(&avoided), occasion.name));
    }
    let missing_tie = occasion.requires_tie && !input.combination.has_tie();
    if missing_tie {
        issues.push(format!("{} requires a tie", occasion.name));
    }

    let base = if distance == 0.0 {
        0.95
    } else {
        (0.95 - distance * 0.1).max(0.1)
    };
    let other_issues = issues.len() - usize::from(distance > 0.0);
    let confidence = (base - 0.1 * other_issues as f64).max(0.1);

    let mut result = if issues.is_empty() {
        spec.pass(confidence)
            .with_message(format!("Appropriate for {}", occasion.name))
            .with_reasoning(format!(
                "Overall formality {:.0} sits within {}",
                overall, band
            ))
            .with_recommendation(format!("Well suited to {}", occasion.name))
    } else {
        let mut steps = Vec::new();
        if overall < band.min() {
            steps.push("raise formality with a darker suit or crisper shirt".to_string());
        } else if overall > band.max() {
            steps.push("relax formality with lighter colors or textured fabrics".to_string());
        }
        if !avoided.is_empty() {
            steps.push(format!("replace {}", join_names(&avoided)));
        }
        if missing_tie {
            steps.push("add a tie".to_string());
        }
        let alternatives = occasion
            .preferred_colors
            .iter()
            .take(3)
            .map(|c| format!("{} suit", pretty(c)))
            .collect();
        spec.fail(confidence)
            .with_message(format!("Not appropriate for {}", occasion.name))
            .with_reasoning(issues.join("; "))
            .with_recommendation(capitalize(&steps.join(", ")))
            .with_alternatives(alternatives)
    };
    result = result
        .with_context(format!("occasion={}", name))
        .with_context(format!("formality={:.0}", overall));
    if let Some(season) = &input.context.season {
        result = result.with_context(format!("season={}", season));
    }
    out.push(result);
}

pub fn level(input: &RuleInput<'_>, out: &mut Vec<RuleResult>) {
    let Some(required) = input.context.formality_required else {
        return;
    };
    let Some(spec) = input.active("FL001") else {
        return;
    };
    if !(1.0..=10.0).contains(&required) {
        out.push(spec.unrecognized(
            "formality_required",
            &required.to_string(),
            input.unrecognized_confidence(),
        ));
        return;
    }

    let components = component_formality(input.combination, input.knowledge);
    let overall = overall_formality(input, &components);
    let diff = (overall - required).abs();

    let result = if diff <= spec.threshold_or(1.0) {
        spec.pass(0.9)
            .with_message(format!("Formality {:.0} matches the required {:.0}", overall, required))
            .with_reasoning("The outfit meets the requested formality level")
    } else {
        let direction = if overall < required { "Raise" } else { "Lower" };
        spec.fail_escalated((0.9 - diff * 0.1).max(0.5), diff > spec.escalation_or(2.0))
            .with_message(format!(
                "Formality {:.0} is {:.0} away from the required {:.0}",
                overall, diff, required
            ))
            .with_reasoning("Overall formality differs from the requested level")
            .with_recommendation(format!("{} formality by {:.0} points", direction, diff))
    };
    out.push(result.with_context(format!("formality_required={}", required)));
}

pub fn dress_code(input: &RuleInput<'_>, out: &mut Vec<RuleResult>) {
    let Some(code_name) = input.context.dress_code.as_deref() else {
        return;
    };
    let Some(spec) = input.active("DCC001") else {
        return;
    };
    let Some(code) = input.knowledge.occasions.dress_code(code_name) else {
        out.push(spec.unrecognized("dress_code", code_name, input.unrecognized_confidence()));
        return;
    };

    let combination = input.combination;
    let mut issues = Vec::new();
    if !accepted(&code.suit_colors, &combination.suit_color) {
        issues.push(format!("{} suit is not accepted", pretty(&combination.suit_color)));
    }
    if !accepted(&code.shirt_colors, &combination.shirt_color) {
        issues.push(format!("{} shirt is not accepted", pretty(&combination.shirt_color)));
    }
    match combination.tie_color.as_deref() {
        Some(tie) if !accepted(&code.tie_colors, tie) => {
            issues.push(format!("{} tie is not accepted", pretty(tie)));
        }
        None if code.requires_tie => issues.push("a tie is required".to_string()),
        _ => {}
    }
    if code.solid_only && !combination.non_solid_patterns().is_empty() {
        issues.push("only solid garments are accepted".to_string());
    }
    let avoided_fabrics: Vec<&str> = combination
        .fabrics()
        .into_iter()
        .map(|(_, f)| f)
        .filter(|f| code.avoided_fabrics.iter().any(|a| a == f))
        .collect();
    if !avoided_fabrics.is_empty() {
        issues.push(format!("{} is too casual", join_names(&avoided_fabrics)));
    }
    let components = component_formality(combination, input.knowledge);
    let overall = overall_formality(input, &components);
    if !code.formality.contains(overall) {
        issues.push(format!("formality {:.0} outside {}", overall, code.formality));
    }

    let penalty = input.tuning().formality.dress_code_penalty;
    let compliance = tailor_core::round2((1.0 - penalty * issues.len() as f64).max(0.0));
    let result = if compliance >= spec.threshold_or(0.8) {
        spec.pass(compliance.max(0.1))
            .with_message(format!(
                "Complies with {} ({}%)",
                code.name,
                (compliance * 100.0).round()
            ))
            .with_reasoning(if issues.is_empty() {
                format!("Every {} requirement is met", code.name)
            } else {
                issues.join("; ")
            })
    } else {
        spec.fail_escalated(compliance.max(0.1), compliance < spec.escalation_or(0.6))
            .with_message(format!(
                "Does not comply with {} ({}%)",
                code.name,
                (compliance * 100.0).round()
            ))
            .with_reasoning(issues.join("; "))
            .with_recommendation(format!(
                "Adjust the outfit to meet {}: {}",
                code.name,
                issues.join(", ")
            ))
    };
    out.push(result.with_context(format!("dress_code={}", code_name)));
}

pub fn time_of_day(input: &RuleInput<'_>, out: &mut Vec<RuleResult>) {
    let Some(time) = input.context.time_of_day.as_deref() else {
        return;
    };
    let Some(occasion) = input
        .context
        .occasion
        .as_deref()
        .and_then(|o| input.knowledge.occasions.occasion(o))
    else {
        return;
    };
    let Some(spec) = input.active("TA001") else {
        return;
    };
    let Some(modifiers) = input.knowledge.occasions.time_modifier(time) else {
        out.push(spec.unrecognized("time_of_day", time, input.unrecognized_confidence()));
        return;
    };

    let band = occasion.range_for(input.context.season.as_deref());
    let expected = band.midpoint() + modifiers.for_kind(occasion.kind);
    let components = component_formality(input.combination, input.knowledge);
    let overall = overall_formality(input, &components);
    let diff = (overall - expected).abs();
    let tolerance = spec.threshold_or(1.5);

    let result = if diff <= tolerance {
        spec.pass(0.85)
            .with_message(format!("Formality suits a {} {}", time, occasion.name))
            .with_reasoning(format!("Expected around {:.1}, outfit is {:.0}", expected, overall))
    } else {
        let direction = if overall < expected { "more" } else { "less" };
        spec.fail((0.85 - 0.1 * (diff - tolerance)).max(0.4))
            .with_message(format!("Formality off for a {} {}", time, occasion.name))
            .with_reasoning(format!("Expected around {:.1}, outfit is {:.0}", expected, overall))
            .with_recommendation(format!("Dress {} formally for the {}", direction, time))
    };
    out.push(result.with_context(format!("time_of_day={}", time)));
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
