//! Seasonal appropriateness: fabrics and palette for the season, plus
//! weather and climate zone fit
use crate::input::RuleInput;
use crate::{join_names, listed, pretty};
use tailor_core::{Garment, RuleResult};

/// Season given but missing from the tables.
fn unknown_season(input: &RuleInput<'_>) -> bool {
    input
        .context
        .season
        .as_deref()
        .map(|s| !input.knowledge.seasons.is_known_season(s))
        .unwrap_or(false)
}

/// Fabric and palette checks for the season. An unknown season produces a
/// single unrecognized result and nothing else in this category.
pub fn evaluate_season(input: &RuleInput<'_>, out: &mut Vec<RuleResult>) {
    let Some(season) = input.context.season.as_deref() else {
        return;
    };
    if unknown_season(input) {
        if let Some(spec) = input.active("US001") {
            out.push(spec.unrecognized("season", season, input.unrecognized_confidence()));
        }
        return;
    }
    fabric(input, season, out);
    palette(input, season, out);
}

fn fabric(input: &RuleInput<'_>, season: &str, out: &mut Vec<RuleResult>) {
    let Some(spec) = input.active("FS001") else {
        return;
    };
    let Some(tiers) = input.knowledge.seasons.fabrics_for(season) else {
        return;
    };
    let tuning = &input.tuning().seasonal;
    let fabrics = input.combination.fabrics();
    if fabrics.is_empty() {
        out.push(
            spec.info(0.5)
                .with_message("No fabrics supplied; fabric seasonality not assessed")
                .with_reasoning(format!(
                    "Best {} fabrics: {}",
                    season,
                    join_names(&tiers.excellent)
                ))
                .with_context(format!("season={}", season)),
        );
        return;
    }

    let mut weighted = 0.0;
    let mut total_weight = 0.0;
    let mut avoided = Vec::new();
    for (garment, name) in &fabrics {
        let score = if tiers.excellent.iter().any(|f| f == name) {
            tuning.fabric_excellent
        } else if tiers.good.iter().any(|f| f == name) {
            tuning.fabric_good
        } else if tiers.avoid.iter().any(|f| f == name) {
            avoided.push(*name);
            tuning.fabric_avoid
        } else {
            tuning.fabric_unlisted
        };
        let weight = match garment {
            Garment::Suit => tuning.suit_fabric_weight,
            Garment::Shirt => tuning.shirt_fabric_weight,
            Garment::Tie => tuning.tie_fabric_weight,
        };
        weighted += score * weight;
        total_weight += weight;
    }
    let score = if total_weight > 0.0 {
        tailor_core::round2(weighted / total_weight)
    } else {
        tuning.fabric_unlisted
    };

    let mut result = if score >= spec.threshold_or(0.7) {
        spec.pass(score)
            .with_message(format!("Fabrics suit {} ({}%)", season, (score * 100.0).round()))
            .with_reasoning(format!("Fabric choices are comfortable for {}", season))
    } else {
        let reasoning = if avoided.is_empty() {
            format!("Fabric choices are not typical for {}", season)
        } else {
            format!("{} should be avoided in {}", join_names(&avoided), season)
        };
        spec.fail_escalated(score, score < spec.escalation_or(0.5))
            .with_message(format!(
                "Fabrics poorly suited to {} ({}%)",
                season,
                (score * 100.0).round()
            ))
            .with_reasoning(reasoning)
            .with_recommendation(format!(
                "Consider {} for {}",
                join_names(&tiers.excellent),
                season
            ))
            .with_alternatives(tiers.excellent.iter().take(3).map(|f| pretty(f)).collect())
    };
    result = result.with_context(format!("season={}", season));
    for (garment, name) in fabrics {
        result = result.with_context(format!("{}_fabric={}", garment, name));
    }
    out.push(result);
}

fn palette(input: &RuleInput<'_>, season: &str, out: &mut Vec<RuleResult>) {
    let Some(spec) = input.active("CS001") else {
        return;
    };
    let Some(palette) = input.knowledge.seasons.palette_for(season) else {
        return;
    };
    let tuning = &input.tuning().seasonal;
    let colors = input.combination.colors();

    let mut avoided = Vec::new();
    let total: f64 = colors
        .iter()
        .map(|color| {
            if listed(&palette.primary, color) {
                tuning.palette_primary
            } else if listed(&palette.neutral, color) {
                tuning.palette_neutral
            } else if listed(&palette.accent, color) {
                tuning.palette_accent
            } else if listed(&palette.avoid, color) {
                avoided.push(*color);
                tuning.palette_avoid
            } else {
                tuning.palette_unlisted
            }
        })
        .sum();
    let score = tailor_core::round2(total / colors.len().max(1) as f64);

    let result = if score >= spec.threshold_or(0.6) {
        spec.pass(score)
            .with_message(format!("Seasonal color appropriateness: {}%", (score * 100.0).round()))
            .with_reasoning(format!("Colors sit well in the {} palette", season))
            .with_recommendation(format!("Perfect colors for {}", season))
    } else {
        let reasoning = if avoided.is_empty() {
            format!("Few colors come from the {} palette", season)
        } else {
            format!("{} is out of place in {}", join_names(&avoided), season)
        };
        spec.fail(score)
            .with_message(format!("Seasonal color appropriateness: {}%", (score * 100.0).round()))
            .with_reasoning(reasoning)
            .with_recommendation(format!("Consider more {}-appropriate colors", season))
            .with_alternatives(palette.primary.iter().take(3).map(|c| pretty(c)).collect())
    };
    out.push(result.with_context(format!("season={}", season)));
}

pub fn weather(input: &RuleInput<'_>, out: &mut Vec<RuleResult>) {
    let Some(name) = input.context.weather_conditions.as_deref() else {
        return;
    };
    if unknown_season(input) {
        return;
    }
    let Some(spec) = input.active("WA001") else {
        return;
    };
    let Some(condition) = input.knowledge.seasons.weather.get(name) else {
        out.push(spec.unrecognized("weather_conditions", name, input.unrecognized_confidence()));
        return;
    };
    let tuning = &input.tuning().seasonal;
    let fabrics: Vec<&str> = input.combination.fabrics().into_iter().map(|(_, f)| f).collect();

    let mut problems = Vec::new();
    let fabric_score = if fabrics.is_empty() {
        tuning.weather_no_fabrics
    } else {
        let total: f64 = fabrics
            .iter()
            .map(|f| {
                if condition.prefer_fabrics.iter().any(|p| p == f) {
                    tuning.weather_prefer
                } else if condition.avoid_fabrics.iter().any(|a| a == f) {
                    problems.push(format!("{} fabric", pretty(f)));
                    tuning.weather_avoid
                } else {
                    tuning.weather_neutral
                }
            })
            .sum();
        total / fabrics.len() as f64
    };
    let avoided_colors: Vec<&str> = input
        .combination
        .colors()
        .into_iter()
        .filter(|c| condition.avoid_colors.iter().any(|a| a == c))
        .collect();
    for color in &avoided_colors {
        problems.push(format!("{} color", pretty(color)));
    }
    let score = tailor_core::round2(
        (fabric_score - tuning.weather_color_penalty * avoided_colors.len() as f64).clamp(0.1, 1.0),
    );

    let result = if score >= spec.threshold_or(0.7) {
        spec.pass(score)
            .with_message(format!("Suited to {} weather", name))
            .with_reasoning(condition.advice.clone())
    } else {
        spec.fail(score)
            .with_message(format!("Not suited to {} weather", name))
            .with_reasoning(format!("{} in {} weather", join_names(&problems), name))
            .with_recommendation(condition.advice.clone())
            .with_alternatives(
                condition
                    .prefer_fabrics
                    .iter()
                    .take(3)
                    .map(|f| pretty(f))
                    .collect(),
            )
    };
    out.push(result.with_context(format!("weather={}", name)));
}

pub fn climate_zone(input: &RuleInput<'_>, out: &mut Vec<RuleResult>) {
    let Some(name) = input.context.climate_zone.as_deref() else {
        return;
    };
    if unknown_season(input) {
        return;
    }
    let Some(spec) = input.active("CZ001") else {
        return;
    };
    let Some(zone) = input.knowledge.seasons.climate_zones.get(name) else {
        out.push(spec.unrecognized("climate_zone", name, input.unrecognized_confidence()));
        return;
    };

    let mut hits: Vec<&str> = input
        .combination
        .fabrics()
        .into_iter()
        .map(|(_, f)| f)
        .filter(|f| zone.avoid_fabrics.iter().any(|a| a == f))
        .collect();
    hits.extend(
        input
            .combination
            .colors()
            .into_iter()
            .filter(|c| zone.avoid_colors.iter().any(|a| a == c)),
    );
    let penalty = input.tuning().seasonal.climate_penalty;
    let score = tailor_core::round2((1.0 - penalty * hits.len() as f64).max(0.1));

    let result = if score >= spec.threshold_or(0.7) {
        spec.pass(score)
            .with_message(format!("Fits the {} climate", pretty(name)))
            .with_reasoning(zone.notes.clone())
    } else {
        spec.fail(score)
            .with_message(format!("Poor fit for the {} climate", pretty(name)))
            .with_reasoning(format!("{} unsuited to a {} climate", join_names(&hits), pretty(name)))
            .with_recommendation(format!("Prefer {}", join_names(&zone.favoured_fabrics)))
    };
    out.push(result.with_context(format!("climate_zone={}", name)));
}
