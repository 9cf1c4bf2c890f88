//! Pattern mixing: how many, at what scale, and stripe against stripe
use crate::input::RuleInput;
use crate::join_names;
use tailor_core::{Garment, RuleResult};
use tailor_knowledge::tables::{PatternInfo, PatternKind, PatternScale};

/// Non-solid patterns found in the catalogue.
fn catalogued<'a>(input: &RuleInput<'a>) -> Vec<(Garment, &'a str, PatternInfo)> {
    let styling = &input.knowledge.styling;
    input
        .combination
        .non_solid_patterns()
        .into_iter()
        .filter_map(|(g, p)| styling.pattern(p).map(|info| (g, p, info)))
        .collect()
}

/// First pair of entries sharing a scale.
fn same_scale<'a>(
    entries: &[(Garment, &'a str, PatternInfo)],
) -> Option<(Garment, Garment, PatternScale)> {
    for (i, (a, _, first)) in entries.iter().enumerate() {
        for (b, _, second) in &entries[i + 1..] {
            if first.scale == second.scale {
                return Some((*a, *b, first.scale));
            }
        }
    }
    None
}

fn scale_name(scale: PatternScale) -> &'static str {
    match scale {
        PatternScale::None => "no",
        PatternScale::Micro => "micro",
        PatternScale::Small => "small",
        PatternScale::Medium => "medium",
        PatternScale::Large => "large",
    }
}

pub fn count(input: &RuleInput<'_>, out: &mut Vec<RuleResult>) {
    let Some(spec) = input.active("PM001") else {
        return;
    };
    let patterns = input.combination.non_solid_patterns();
    let limit = spec.threshold_or(2.0) as usize;
    let names: Vec<&str> = patterns.iter().map(|(_, p)| *p).collect();

    let result = if patterns.len() <= limit {
        spec.pass(0.9)
            .with_message(match patterns.len() {
                0 => "All solids; nothing competes".to_string(),
                1 => format!("A single {} carries the interest", names[0].replace('_', " ")),
                n => format!("{} patterns, a manageable mix", n),
            })
            .with_reasoning(format!("At most {} patterns keeps the eye settled", limit))
    } else {
        spec.fail(0.5)
            .with_message(format!("{} patterns compete for attention", patterns.len()))
            .with_reasoning(format!("{} worn together", join_names(&names)))
            .with_recommendation("Keep at most two patterns and let a solid anchor the outfit")
    };
    out.push(result);
}

/// Mixed patterns should differ in scale.
pub fn scale(input: &RuleInput<'_>, out: &mut Vec<RuleResult>) {
    let Some(spec) = input.active("PS001") else {
        return;
    };
    let entries = catalogued(input);
    if entries.len() < 2 {
        return;
    }

    let result = match same_scale(&entries) {
        None => {
            let scales: Vec<&str> = entries.iter().map(|(_, _, i)| scale_name(i.scale)).collect();
            spec.pass(0.85)
                .with_message("Pattern scales are varied")
                .with_reasoning(format!("Scales: {}", scales.join(", ")))
        }
        Some((a, b, scale)) => spec
            .fail(0.4)
            .with_message(format!(
                "The {} and {} patterns share a {} scale",
                a,
                b,
                scale_name(scale)
            ))
            .with_reasoning("Patterns of the same size blur into each other")
            .with_recommendation(format!("Choose a larger or smaller pattern for the {}", b)),
    };
    out.push(result);
}

pub fn stripes(input: &RuleInput<'_>, out: &mut Vec<RuleResult>) {
    let Some(spec) = input.active("SC001") else {
        return;
    };
    let stripes: Vec<_> = catalogued(input)
        .into_iter()
        .filter(|(_, _, info)| info.kind == PatternKind::Stripe)
        .collect();
    if stripes.len() < 2 {
        return;
    }

    let clash = same_scale(&stripes);
    let result = if stripes.len() >= 3 {
        spec.fail(0.3)
            .with_message("Three striped garments")
            .with_reasoning("Stripes on every layer create a dizzying effect")
            .with_recommendation("Replace one striped piece with a solid")
    } else if let Some((a, b, scale)) = clash {
        spec.fail(0.3)
            .with_message(format!("{} and {} stripes clash", a, b))
            .with_reasoning(format!(
                "Both stripes are {} scale, which produces a vibrating effect",
                scale_name(scale)
            ))
            .with_recommendation(format!("Use a solid {} or a stripe of a different width", b))
            .with_alternatives(vec![format!("solid {}", b)])
    } else {
        spec.pass(0.9)
            .with_message("Stripes differ in width")
            .with_reasoning("Contrasting stripe widths read as deliberate")
    };
    out.push(result);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::knowledge;
    use crate::RuleBook;
    use tailor_core::{OutfitCombination, Severity, ValidationContext};

    fn run(
        check: fn(&RuleInput<'_>, &mut Vec<RuleResult>),
        combination: &OutfitCombination,
    ) -> Vec<RuleResult> {
        let knowledge = knowledge();
        let book = RuleBook::default();
        let context = ValidationContext::default();
        let input = RuleInput::new(combination, &context, &knowledge, &book);
        let mut out = Vec::new();
        check(&input, &mut out);
        out
    }

    #[test]
    fn test_pattern_count() {
        let solid = OutfitCombination::new("navy", "white").with_tie("burgundy");
        assert!(run(count, &solid)[0].passed);

        let busy = OutfitCombination::new("grey", "white")
            .with_tie("navy")
            .with_pattern(Garment::Suit, "glen_check")
            .with_pattern(Garment::Shirt, "gingham")
            .with_pattern(Garment::Tie, "paisley");
        let r = &run(count, &busy)[0];
        assert!(!r.passed);
        assert_eq!(r.severity, Severity::Medium);
        assert_eq!(r.score_impact, -12);
    }

    #[test]
    fn test_scale_needs_two_patterns() {
        let one = OutfitCombination::new("navy", "white").with_pattern(Garment::Suit, "pinstripe");
        assert!(run(scale, &one).is_empty());

        let varied = OutfitCombination::new("navy", "white")
            .with_tie("burgundy")
            .with_pattern(Garment::Shirt, "micro_check")
            .with_pattern(Garment::Tie, "paisley");
        assert!(run(scale, &varied)[0].passed);

        let same = OutfitCombination::new("navy", "white")
            .with_tie("burgundy")
            .with_pattern(Garment::Shirt, "check")
            .with_pattern(Garment::Tie, "paisley");
        assert!(!run(scale, &same)[0].passed);
    }

    #[test]
    fn test_same_width_stripes_clash() {
        let combo = OutfitCombination::new("navy", "white")
            .with_tie("burgundy")
            .with_pattern(Garment::Shirt, "striped")
            .with_pattern(Garment::Tie, "repp_stripe");
        let r = &run(stripes, &combo)[0];
        assert!(!r.passed);
        assert_eq!(r.severity, Severity::High);
        assert_eq!(r.confidence, 0.3);
        assert!(r.is_violation());
    }

    #[test]
    fn test_different_width_stripes() {
        let combo = OutfitCombination::new("navy", "white")
            .with_tie("burgundy")
            .with_pattern(Garment::Suit, "pinstripe")
            .with_pattern(Garment::Tie, "bengal_stripe");
        assert!(run(stripes, &combo)[0].passed);

        let single =
            OutfitCombination::new("navy", "white").with_pattern(Garment::Shirt, "striped");
        assert!(run(stripes, &single).is_empty());
    }
}
