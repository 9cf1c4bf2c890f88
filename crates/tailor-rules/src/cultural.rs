//! Cultural color meanings. Advisory only: the result always passes.
use crate::input::RuleInput;
use crate::{join_names, listed, pretty};
use tailor_core::RuleResult;

pub fn color_meanings(input: &RuleInput<'_>, out: &mut Vec<RuleResult>) {
    let Some(spec) = input.active("CCM001") else {
        return;
    };
    let culture = &input.knowledge.culture;
    let requested = input.context.cultural_region.as_deref();
    let region = requested.and_then(|r| culture.regions.get(r));
    let unknown_region = requested.is_some() && region.is_none();

    let mut seen: Vec<&str> = Vec::new();
    for color in input.combination.colors() {
        if !seen.contains(&color) {
            seen.push(color);
        }
    }
    let meanings: Vec<String> = seen
        .iter()
        .filter_map(|c| culture.meaning(region, c).map(|m| format!("{}: {}", pretty(c), m)))
        .collect();

    let mut caution: Vec<&str> = Vec::new();
    if let Some(region) = region {
        caution.extend(seen.iter().copied().filter(|c| listed(&region.caution_colors, c)));
    }
    let mut notes = Vec::new();
    for faith in &input.context.religious_considerations {
        match culture.religious.get(faith) {
            Some(note) => {
                notes.push(format!("{}: {}", faith, note.note));
                caution.extend(seen.iter().copied().filter(|c| listed(&note.caution_colors, c)));
            }
            None => {
                tracing::debug!(
                    rule = %spec.id,
                    value = %faith,
                    "unrecognized religious consideration"
                );
                notes.push(format!("religious_consideration={} (unrecognized)", faith));
            }
        }
    }
    caution.sort_unstable();
    caution.dedup();

    let confidence = if unknown_region {
        input.unrecognized_confidence()
    } else if !caution.is_empty() {
        0.7
    } else {
        0.8
    };
    let mut result = spec.info(confidence).with_reasoning(if meanings.is_empty() {
        "No recorded meanings for these colors".to_string()
    } else {
        meanings.join("; ")
    });
    result = match (region, unknown_region) {
        (_, true) => result.with_message(format!(
            "Unrecognized cultural region '{}'; general meanings used",
            requested.unwrap_or_default()
        )),
        (Some(region), _) if !caution.is_empty() => result
            .with_message(format!("Check {} in a {} setting", join_names(&caution), region.name))
            .with_recommendation(format!(
                "{} can carry unintended meaning here",
                join_names(&caution)
            )),
        (Some(region), _) => result.with_message(format!("No color concerns for {}", region.name)),
        (None, _) if !caution.is_empty() => result
            .with_message(format!("Check {} for the occasion", join_names(&caution)))
            .with_recommendation(format!(
                "{} can carry unintended meaning here",
                join_names(&caution)
            )),
        (None, _) => result.with_message("General color meanings"),
    };
    if let Some(r) = requested {
        result = result.with_context(format!("region={}", r));
    }
    for note in notes {
        result = result.with_context(note);
    }
    out.push(result);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::knowledge;
    use crate::RuleBook;
    use tailor_core::{OutfitCombination, Severity, ValidationContext};

    fn run(combination: &OutfitCombination, context: &ValidationContext) -> RuleResult {
        let knowledge = knowledge();
        let book = RuleBook::default();
        let input = RuleInput::new(combination, context, &knowledge, &book);
        let mut out = Vec::new();
        color_meanings(&input, &mut out);
        out.remove(0)
    }

    #[test]
    fn test_general_meanings() {
        let combo = OutfitCombination::new("navy", "white").with_tie("burgundy");
        let r = run(&combo, &ValidationContext::default());
        assert!(r.passed);
        assert_eq!(r.severity, Severity::Info);
        assert_eq!(r.score_impact, 0);
        assert_eq!(r.confidence, 0.8);
        assert!(r.reasoning.contains("navy: trust and authority"));
    }

    #[test]
    fn test_regional_caution() {
        let combo = OutfitCombination::new("charcoal", "white").with_tie("red");
        let ctx = ValidationContext::default().with_cultural_region("east_asia");
        let r = run(&combo, &ctx);
        assert!(r.passed);
        assert_eq!(r.confidence, 0.7);
        assert!(r.reasoning.contains("red: luck and celebration"));
        assert!(r.message.contains("white"));
    }

    #[test]
    fn test_religious_notes_and_unknown_region() {
        let combo = OutfitCombination::new("black", "white");
        let ctx = ValidationContext::default()
            .with_cultural_region("atlantis")
            .with_religious_consideration("hinduism");
        let r = run(&combo, &ctx);
        assert!(r.passed);
        assert_eq!(r.confidence, 0.5);
        assert!(r.context_applied.iter().any(|c| c.starts_with("hinduism:")));
    }

    #[test]
    fn test_unknown_religious_consideration_is_noted() {
        let combo = OutfitCombination::new("navy", "white");
        let ctx = ValidationContext::default()
            .with_religious_consideration("hinduism")
            .with_religious_consideration("jediism");
        let r = run(&combo, &ctx);
        assert!(r.passed);
        assert_eq!(r.severity, Severity::Info);
        assert!(r.context_applied.iter().any(|c| c.starts_with("hinduism:")));
        assert!(r
            .context_applied
            .contains(&"religious_consideration=jediism (unrecognized)".to_string()));
    }
}
