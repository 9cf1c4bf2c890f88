//! Trend alignment. Informational: results never block validation.
use crate::input::RuleInput;
use crate::{join_names, listed};
use tailor_core::RuleResult;

pub fn current(input: &RuleInput<'_>, out: &mut Vec<RuleResult>) {
    let Some(spec) = input.active("TR001") else {
        return;
    };
    let tuning = &input.tuning().trend;
    let trends = &input.knowledge.trends;
    let colors = input.combination.colors();
    let patterns: Vec<&str> = input
        .combination
        .non_solid_patterns()
        .into_iter()
        .map(|(_, p)| p)
        .collect();

    let trending: Vec<&str> = colors
        .iter()
        .copied()
        .filter(|c| listed(&trends.trending_colors, c))
        .chain(patterns.iter().copied().filter(|p| listed(&trends.trending_patterns, p)))
        .collect();
    let classic: Vec<&str> = colors
        .iter()
        .copied()
        .filter(|c| listed(&trends.classics, c))
        .collect();

    let items = (colors.len() + patterns.len()).max(1);
    let share = trending.len() as f64 / items as f64;
    let score = tailor_core::round2(tuning.base + tuning.span * share);

    let mut result = spec
        .info(score)
        .with_impact((score * 5.0).round() as i32)
        .with_message(if trending.is_empty() {
            "No current trend elements".to_string()
        } else {
            format!("On trend: {}", join_names(&trending))
        });
    result = if classic.is_empty() {
        result.with_reasoning(format!("{} of {} elements are trending", trending.len(), items))
    } else {
        result.with_reasoning(format!(
            "{} of {} elements are trending; {} never date",
            trending.len(),
            items,
            join_names(&classic)
        ))
    };
    if trending.is_empty() {
        result = result
            .with_recommendation(format!(
                "Add a current note such as {}",
                join_names(&trends.trending_colors.iter().take(2).collect::<Vec<_>>())
            ))
            .with_alternatives(trends.trending_colors.iter().take(3).cloned().collect());
    }
    out.push(result);
}

pub fn seasonal(input: &RuleInput<'_>, out: &mut Vec<RuleResult>) {
    let Some(season) = input.context.season.as_deref() else {
        return;
    };
    let Some(palette) = input.knowledge.seasons.palette_for(season) else {
        return;
    };
    let Some(spec) = input.active("ST001") else {
        return;
    };
    let tuning = &input.tuning().trend;
    let colors = input.combination.colors();
    let matches: Vec<&str> = colors
        .iter()
        .copied()
        .filter(|c| listed(&palette.trending, c))
        .collect();
    let score = tailor_core::round2(
        (matches.len() as f64 / colors.len().max(1) as f64 + tuning.seasonal_base).min(1.0),
    );

    let result = spec.info(score).with_context(format!("season={}", season));
    out.push(if matches.is_empty() {
        result
            .with_message(format!("No {} trend colors", season))
            .with_reasoning(format!("Trending this {}: {}", season, join_names(&palette.trending)))
    } else {
        result
            .with_message(format!("{} is trending this {}", join_names(&matches), season))
            .with_reasoning(format!(
                "{} of {} colors match the {} trend palette",
                matches.len(),
                colors.len(),
                season
            ))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::knowledge;
    use crate::RuleBook;
    use tailor_core::{Garment, OutfitCombination, Severity, ValidationContext};

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
    fn test_trend_score() {
        let classic = OutfitCombination::new("navy", "white").with_tie("navy");
        let r = &run(current, &classic, &ValidationContext::default())[0];
        assert_eq!(r.severity, Severity::Info);
        assert!(r.passed);
        assert_eq!(r.confidence, 0.6);
        assert_eq!(r.score_impact, 3);

        let trendy = OutfitCombination::new("olive", "white")
            .with_tie("rust")
            .with_pattern(Garment::Suit, "windowpane");
        let r = &run(current, &trendy, &ValidationContext::default())[0];
        // 3 of 4 elements trending
        assert_eq!(r.confidence, 0.9);
        assert_eq!(r.score_impact, 5);
    }

    #[test]
    fn test_seasonal_trends_need_known_season() {
        let combo = OutfitCombination::new("navy", "white");
        assert!(run(seasonal, &combo, &ValidationContext::default()).is_empty());
        let monsoon = ValidationContext::default().with_season("monsoon");
        assert!(run(seasonal, &combo, &monsoon).is_empty());

        let r = &run(seasonal, &combo, &ValidationContext::default().with_season("fall"))[0];
        assert_eq!(r.severity, Severity::Info);
        assert!(r.confidence >= 0.3 && r.confidence <= 1.0);
    }
}
