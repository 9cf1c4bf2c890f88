//! Texture compatibility: fabric weight balance and shine
use crate::input::RuleInput;
use crate::join_names;
use tailor_core::RuleResult;
use tailor_knowledge::tables::TextureClass;

fn texture_name(class: TextureClass) -> &'static str {
    match class {
        TextureClass::Smooth => "smooth",
        TextureClass::Medium => "medium",
        TextureClass::Rough => "rough",
        TextureClass::Lustrous => "lustrous",
    }
}

pub fn balance(input: &RuleInput<'_>, out: &mut Vec<RuleResult>) {
    let Some(spec) = input.active("TB001") else {
        return;
    };
    let tuning = &input.tuning().texture;
    let styling = &input.knowledge.styling;
    let classes: Vec<TextureClass> = input
        .combination
        .fabrics()
        .into_iter()
        .filter_map(|(_, f)| styling.texture(f))
        .collect();

    let has = |class: TextureClass| classes.contains(&class);
    let (score, reasoning) = if classes.len() < 2 {
        (tuning.default_balance, "Not enough fabric detail to judge texture".to_string())
    } else if has(TextureClass::Rough) && has(TextureClass::Lustrous) {
        (tuning.clash, "Rough and lustrous surfaces fight each other".to_string())
    } else if classes.iter().all(|c| *c == classes[0]) {
        (
            tuning.uniform,
            format!("Every fabric is {}; some contrast adds depth", texture_name(classes[0])),
        )
    } else {
        let names: Vec<&str> = classes.iter().map(|c| texture_name(*c)).collect();
        (tuning.contrast, format!("Textures vary: {}", names.join(", ")))
    };

    let result = if score >= spec.threshold_or(0.7) {
        spec.pass(score).with_message("Textures are balanced")
    } else {
        spec.fail(score)
            .with_message("Textures clash")
            .with_recommendation("Pair rough fabrics with matte or medium finishes")
    };
    out.push(result.with_reasoning(reasoning));
}

/// More than one shiny element reads as flashy.
pub fn shine(input: &RuleInput<'_>, out: &mut Vec<RuleResult>) {
    let Some(spec) = input.active("SL001") else {
        return;
    };
    let styling = &input.knowledge.styling;
    let shiny: Vec<&str> = input
        .combination
        .fabrics()
        .into_iter()
        .map(|(_, f)| f)
        .chain(input.combination.accessory_items().into_iter().map(|(_, s)| s))
        .filter(|m| styling.is_shiny(m))
        .collect();
    let limit = spec.threshold_or(1.0) as usize;

    let result = if shiny.len() <= limit {
        spec.pass(0.9)
            .with_message(if shiny.is_empty() {
                "Matte finishes throughout".to_string()
            } else {
                format!("{} adds a single point of shine", join_names(&shiny))
            })
            .with_reasoning("Shine is best kept to one element")
    } else {
        spec.fail(0.5)
            .with_message(format!("{} shiny elements", shiny.len()))
            .with_reasoning(format!("{} compete for light", join_names(&shiny)))
            .with_recommendation("Keep one shiny element and make the rest matte")
    };
    out.push(result);
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
    ) -> RuleResult {
        let knowledge = knowledge();
        let book = RuleBook::default();
        let context = ValidationContext::default();
        let input = RuleInput::new(combination, &context, &knowledge, &book);
        let mut out = Vec::new();
        check(&input, &mut out);
        out.remove(0)
    }

    #[test]
    fn test_texture_balance() {
        let bare = OutfitCombination::new("navy", "white");
        assert_eq!(run(balance, &bare).confidence, 0.8);

        let varied = OutfitCombination::new("navy", "white")
            .with_fabric(Garment::Suit, "flannel")
            .with_fabric(Garment::Shirt, "oxford");
        let r = run(balance, &varied);
        assert!(r.passed);
        assert_eq!(r.confidence, 0.9);

        let clash = OutfitCombination::new("charcoal", "white")
            .with_tie("black")
            .with_fabric(Garment::Suit, "tweed")
            .with_fabric(Garment::Tie, "satin");
        let r = run(balance, &clash);
        assert!(!r.passed);
        assert_eq!(r.severity, Severity::Low);
    }

    #[test]
    fn test_silk_tie_with_patent_shoes() {
        let combo = OutfitCombination::new("black", "white")
            .with_tie("black")
            .with_fabric(Garment::Tie, "silk")
            .with_accessory(AccessorySlot::Shoes, "patent_leather");
        let r = run(shine, &combo);
        assert!(!r.passed);
        assert!(r.is_warning());
        assert_eq!(r.score_impact, -8);

        let single = OutfitCombination::new("black", "white")
            .with_tie("black")
            .with_fabric(Garment::Tie, "silk");
        assert!(run(shine, &single).passed);
    }
}
