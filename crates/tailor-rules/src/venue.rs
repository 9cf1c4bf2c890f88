//! Venue appropriateness: formality and palette for the setting, lighting and
//! photography
use crate::formality::{component_formality, overall_formality};
use crate::input::RuleInput;
use crate::{join_names, listed, pretty};
use tailor_core::RuleResult;
use tailor_knowledge::tables::PatternScale;

pub fn requirements(input: &RuleInput<'_>, out: &mut Vec<RuleResult>) {
    let Some(key) = input.context.venue_type.as_deref() else {
        return;
    };
    let Some(spec) = input.active("VR001") else {
        return;
    };
    let Some(venue) = input.knowledge.venues.venue(key) else {
        out.push(spec.unrecognized("venue_type", key, input.unrecognized_confidence()));
        return;
    };

    let components = component_formality(input.combination, input.knowledge);
    let overall = overall_formality(input, &components);
    let distance = venue.formality.distance(overall);

    let colors: Vec<&str> = input
        .combination
        .colors()
        .into_iter()
        .filter(|c| listed(&venue.avoided_colors, c))
        .collect();
    let fabrics: Vec<&str> = input
        .combination
        .fabrics()
        .into_iter()
        .map(|(_, f)| f)
        .filter(|f| listed(&venue.avoided_fabrics, f))
        .collect();
    let hits = colors.len() + fabrics.len();

    let mut issues = Vec::new();
    if distance > 0.0 {
        issues.push(format!("formality {} against {} expected", overall, venue.formality));
    }
    if !colors.is_empty() {
        issues.push(format!("{} is out of place", join_names(&colors)));
    }
    if !fabrics.is_empty() {
        issues.push(format!("{} does not suit the setting", join_names(&fabrics)));
    }

    let passed = distance <= spec.threshold_or(1.0) && hits == 0;
    let mut result = if passed {
        spec.pass(0.9)
            .with_message(format!("Suitable for {}", venue.name))
            .with_reasoning(if issues.is_empty() {
                format!("Formality {} fits the {} expectation", overall, venue.formality)
            } else {
                issues.join("; ")
            })
    } else {
        let confidence = (0.85 - 0.1 * distance - 0.15 * hits as f64).max(0.3);
        spec.fail(confidence)
            .with_message(format!("Not ideal for {}", venue.name))
            .with_reasoning(issues.join("; "))
            .with_recommendation(format!(
                "For {} consider {}",
                venue.name,
                join_names(&venue.preferred_colors.iter().take(3).collect::<Vec<_>>())
            ))
            .with_alternatives(venue.preferred_colors.iter().map(|c| pretty(c)).collect())
    };
    result = result.with_context(format!("venue={}", key));
    for note in &venue.notes {
        result = result.with_context(note.clone());
    }
    out.push(result);
}

/// Fails when any light source distorts a worn color's temperature.
pub fn lighting(input: &RuleInput<'_>, out: &mut Vec<RuleResult>) {
    if input.context.lighting_conditions.is_empty() {
        return;
    }
    let Some(spec) = input.active("VL001") else {
        return;
    };
    let venues = &input.knowledge.venues;
    let colors = &input.knowledge.colors;

    let mut known = Vec::new();
    for name in &input.context.lighting_conditions {
        match venues.lighting(name) {
            Some(light) => known.push(light),
            None => {
                let confidence = input.unrecognized_confidence();
                out.push(spec.unrecognized("lighting_conditions", name, confidence));
            }
        }
    }
    if known.is_empty() {
        return;
    }

    let mut affected = Vec::new();
    let mut advice = Vec::new();
    for light in &known {
        let Some(target) = light.affects else {
            continue;
        };
        let hit: Vec<&str> = input
            .combination
            .colors()
            .into_iter()
            .filter(|c| colors.temperature_of(c) == Some(target))
            .collect();
        if !hit.is_empty() {
            affected.push(format!(
                "{} under {} light",
                join_names(&hit),
                light.name.to_lowercase()
            ));
            advice.push(light.advice.clone());
        }
    }

    let names: Vec<&str> = known.iter().map(|l| l.name.as_str()).collect();
    let result = if affected.is_empty() {
        let accuracy = known.iter().map(|l| l.accuracy as f64).sum::<f64>() / known.len() as f64;
        spec.pass((accuracy / 10.0).max(0.7))
            .with_message(format!(
                "Colors hold up under {} lighting",
                join_names(&names).to_lowercase()
            ))
            .with_reasoning(known.iter().map(|l| l.advice.as_str()).collect::<Vec<_>>().join("; "))
    } else {
        spec.fail(0.6)
            .with_message("Lighting will distort part of the palette")
            .with_reasoning(affected.join("; "))
            .with_recommendation(advice.join("; "))
    };
    let lights = input.context.lighting_conditions.join(",");
    out.push(result.with_context(format!("lighting={}", lights)));
}

/// Camera readiness, assessed only when photography matters.
pub fn photography(input: &RuleInput<'_>, out: &mut Vec<RuleResult>) {
    let Some(importance) = input.context.photography_importance.as_deref() else {
        return;
    };
    let Some(spec) = input.active("PH001") else {
        return;
    };
    match importance {
        "high" => {}
        "low" | "medium" => return,
        other => {
            let confidence = input.unrecognized_confidence();
            out.push(spec.unrecognized("photography_importance", other, confidence));
            return;
        }
    }

    let styling = &input.knowledge.styling;
    let combination = input.combination;
    let mut issues = Vec::new();

    let shiny: Vec<&str> = combination
        .fabrics()
        .into_iter()
        .map(|(_, f)| f)
        .chain(combination.accessory_items().into_iter().map(|(_, s)| s))
        .filter(|m| styling.is_shiny(m))
        .collect();
    if !shiny.is_empty() {
        issues.push(format!("{} will catch the flash", join_names(&shiny)));
    }

    // fine patterns moire on camera sensors
    let micro: Vec<&str> = combination
        .non_solid_patterns()
        .into_iter()
        .map(|(_, p)| p)
        .filter(|p| styling.pattern(p).map(|i| i.scale == PatternScale::Micro).unwrap_or(false))
        .collect();
    if !micro.is_empty() {
        issues.push(format!("{} may shimmer on camera", join_names(&micro)));
    }

    let colors = combination.colors();
    if colors.contains(&"black") && colors.contains(&"white") {
        issues.push("black against white exceeds the camera's dynamic range".to_string());
    }

    let result = if issues.is_empty() {
        spec.pass(0.85)
            .with_message("Photographs well")
            .with_reasoning("Matte finishes and moderate contrast")
    } else {
        spec.fail(0.65)
            .with_message("May photograph poorly")
            .with_reasoning(issues.join("; "))
            .with_recommendation("Prefer matte fabrics, larger-scale patterns and softer contrast")
    };
    out.push(result.with_context("photography=high"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::knowledge;
    use crate::RuleBook;
    use tailor_core::{AccessorySlot, Garment, OutfitCombination, Severity, ValidationContext};

    fn run(
        check: fn(&RuleInput<'_>, &mut Vec<RuleResult>),
        combination: &OutfitCombination,
        context: &ValidationContext,
    ) -> Vec<RuleResult> {
        let knowledge = knowledge();
        let book = RuleBook::default();
        let input = RuleInput::new(combination, context, &knowledge, &book);
        let mut out = Vec::new();
        check(&input, &mut out);
        out
    }

    #[test]
    fn test_venue_fit() {
        let combo = OutfitCombination::new("navy", "white").with_tie("burgundy");
        let office = ValidationContext::default().with_venue("office");
        let r = &run(requirements, &combo, &office)[0];
        assert!(r.passed);
        assert_eq!(r.confidence, 0.9);
    }

    #[test]
    fn test_beach_rejects_black_flannel() {
        let combo = OutfitCombination::new("black", "white")
            .with_tie("black")
            .with_fabric(Garment::Suit, "flannel");
        let beach = ValidationContext::default().with_venue("beach");
        let r = &run(requirements, &combo, &beach)[0];
        assert!(!r.passed);
        assert_eq!(r.severity, Severity::Medium);
        assert!(r.reasoning.contains("flannel"));
        assert!(r.confidence >= 0.3);
    }

    #[test]
    fn test_unknown_venue() {
        let combo = OutfitCombination::new("navy", "white");
        let ctx = ValidationContext::default().with_venue("spaceship");
        let r = &run(requirements, &combo, &ctx)[0];
        assert_eq!(r.severity, Severity::Info);
        assert!(r.passed);
    }

    #[test]
    fn test_candlelight_mutes_cool_colors() {
        let combo = OutfitCombination::new("navy", "white").with_tie("navy");
        let ctx = ValidationContext::default().with_lighting("candlelight");
        let r = &run(lighting, &combo, &ctx)[0];
        assert!(!r.passed);
        assert_eq!(r.confidence, 0.6);

        let natural = ValidationContext::default().with_lighting("natural").with_lighting("fog");
        let out = run(lighting, &combo, &natural);
        assert_eq!(out.len(), 2);
        assert!(out.iter().any(|r| r.rule_id == "VL001" && r.passed && r.confidence == 1.0));
    }

    #[test]
    fn test_photography_flags_shine_and_contrast() {
        let mut combo = OutfitCombination::new("black", "white")
            .with_tie("black")
            .with_fabric(Garment::Tie, "satin");
        combo = combo.with_accessory(AccessorySlot::Shoes, "patent_leather");
        let ctx = ValidationContext::default().with_photography_importance("high");
        let r = &run(photography, &combo, &ctx)[0];
        assert!(!r.passed);
        assert!(r.reasoning.contains("satin"));
        assert!(r.reasoning.contains("dynamic range"));

        let low = ValidationContext::default().with_photography_importance("low");
        assert!(run(photography, &combo, &low).is_empty());
    }
}
