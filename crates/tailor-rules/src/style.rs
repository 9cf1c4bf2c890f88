//! Style consistency against customer profiles, style preferences and
//! industry norms
use crate::formality::{component_formality, overall_formality};
use crate::input::RuleInput;
use crate::{join_names, listed, pretty};
use tailor_core::RuleResult;
use tailor_knowledge::tables::StyleProfile;

/// Score plus the facts that drove it
struct ProfileFit {
    score: f64,
    avoided_colors: Vec<String>,
    avoided_patterns: Vec<String>,
    formality_gap: f64,
}

/// Patterns of worn garments, unpatterned counted as `solid`.
fn worn_patterns(input: &RuleInput<'_>) -> Vec<String> {
    input
        .combination
        .garments()
        .into_iter()
        .map(|g| input.combination.pattern(g).unwrap_or("solid").to_string())
        .collect()
}

fn fit(input: &RuleInput<'_>, profile: &StyleProfile) -> ProfileFit {
    let tuning = &input.tuning().style;
    let colors = input.combination.colors();
    let patterns = worn_patterns(input);

    let fraction = |hits: usize, of: usize| hits as f64 / of.max(1) as f64;
    let preferred_colors = colors.iter().filter(|c| listed(&profile.preferred_colors, c)).count();
    let preferred_patterns = patterns
        .iter()
        .filter(|p| listed(&profile.preferred_patterns, p))
        .count();
    let avoided_colors: Vec<String> = colors
        .iter()
        .filter(|c| listed(&profile.avoided_colors, c))
        .map(|c| c.to_string())
        .collect();
    let avoided_patterns: Vec<String> = patterns
        .iter()
        .filter(|p| listed(&profile.avoided_patterns, p))
        .cloned()
        .collect();
    let formality_gap = profile
        .formality
        .map(|band| {
            let components = component_formality(input.combination, input.knowledge);
            band.distance(overall_formality(input, &components))
        })
        .unwrap_or(0.0);

    let score = tuning.profile_base
        + tuning.preferred_color_span * fraction(preferred_colors, colors.len())
        + tuning.preferred_pattern_span * fraction(preferred_patterns, patterns.len())
        - tuning.avoided_color_penalty * avoided_colors.len() as f64
        - tuning.avoided_pattern_penalty * avoided_patterns.len() as f64
        - tuning.formality_penalty * formality_gap;

    ProfileFit {
        score: tailor_core::round2(score.clamp(0.1, 1.0)),
        avoided_colors,
        avoided_patterns,
        formality_gap,
    }
}

fn problems(fit: &ProfileFit) -> Vec<String> {
    let mut problems = Vec::new();
    if !fit.avoided_colors.is_empty() {
        problems.push(format!("avoided colors: {}", join_names(&fit.avoided_colors)));
    }
    if !fit.avoided_patterns.is_empty() {
        problems.push(format!("avoided patterns: {}", join_names(&fit.avoided_patterns)));
    }
    if fit.formality_gap > 0.0 {
        problems.push(format!(
            "formality {:.0} steps outside the expected range",
            fit.formality_gap
        ));
    }
    problems
}

fn profile_result(
    input: &RuleInput<'_>,
    rule_id: &str,
    field: &str,
    key: &str,
    profile: Option<&StyleProfile>,
    out: &mut Vec<RuleResult>,
) {
    let Some(spec) = input.active(rule_id) else {
        return;
    };
    let Some(profile) = profile else {
        out.push(spec.unrecognized(field, key, input.unrecognized_confidence()));
        return;
    };

    let fit = fit(input, profile);
    let problems = problems(&fit);
    let result = if fit.score >= spec.threshold_or(0.7) {
        spec.pass(fit.score)
            .with_message(format!(
                "Fits the {} style ({}%)",
                profile.name,
                (fit.score * 100.0).round()
            ))
            .with_reasoning(if problems.is_empty() {
                format!("Colors and patterns reflect the {} style", profile.name)
            } else {
                format!("Mostly consistent; {}", problems.join("; "))
            })
    } else {
        spec.fail(fit.score)
            .with_message(format!(
                "Weak fit for the {} style ({}%)",
                profile.name,
                (fit.score * 100.0).round()
            ))
            .with_reasoning(if problems.is_empty() {
                format!("Few elements reflect the {} style", profile.name)
            } else {
                problems.join("; ")
            })
            .with_recommendation(format!(
                "Lean on {} for a {} look",
                join_names(&profile.preferred_colors.iter().take(3).collect::<Vec<_>>()),
                profile.name
            ))
            .with_alternatives(profile.preferred_colors.iter().take(3).map(|c| pretty(c)).collect())
    };
    out.push(result.with_context(format!("{}={}", field, key)));
}

pub fn profile(input: &RuleInput<'_>, out: &mut Vec<RuleResult>) {
    let Some(key) = input.context.customer_profile.as_deref() else {
        return;
    };
    let profile = input.knowledge.styling.profiles.get(key);
    profile_result(input, "SP001", "customer_profile", key, profile, out);
}

pub fn preference(input: &RuleInput<'_>, out: &mut Vec<RuleResult>) {
    let Some(key) = input.context.style_preference.as_deref() else {
        return;
    };
    let preference = input.knowledge.styling.preferences.get(key);
    profile_result(input, "SP002", "style_preference", key, preference, out);
}

pub fn industry(input: &RuleInput<'_>, out: &mut Vec<RuleResult>) {
    let Some(key) = input.context.industry_context.as_deref() else {
        return;
    };
    let Some(spec) = input.active("IC001") else {
        return;
    };
    let styling = &input.knowledge.styling;
    let Some(norms) = styling.industries.get(key) else {
        out.push(spec.unrecognized("industry_context", key, input.unrecognized_confidence()));
        return;
    };
    let tuning = &input.tuning().style;

    let stage = input.context.career_stage.as_deref();
    let shift = stage
        .and_then(|s| styling.career_stages.get(s))
        .copied()
        .unwrap_or(0.0);
    let band = norms.formality.shifted(shift);
    let components = component_formality(input.combination, input.knowledge);
    let overall = overall_formality(input, &components);
    let gap = band.distance(overall);

    let avoided_colors: Vec<&str> = input
        .combination
        .colors()
        .into_iter()
        .filter(|c| listed(&norms.avoided_colors, c))
        .collect();
    let avoided_patterns: Vec<&str> = input
        .combination
        .non_solid_patterns()
        .into_iter()
        .map(|(_, p)| p)
        .filter(|p| listed(&norms.avoided_patterns, p))
        .collect();

    let score = tailor_core::round2(
        (tuning.industry_base
            - tuning.avoided_color_penalty * avoided_colors.len() as f64
            - tuning.avoided_pattern_penalty * avoided_patterns.len() as f64
            - tuning.formality_penalty * gap)
            .clamp(0.1, 1.0),
    );

    let mut issues = Vec::new();
    if !avoided_colors.is_empty() {
        issues.push(format!("{} reads poorly in {}", join_names(&avoided_colors), norms.name));
    }
    if !avoided_patterns.is_empty() {
        issues.push(format!("{} is unusual in {}", join_names(&avoided_patterns), norms.name));
    }
    if gap > 0.0 {
        issues.push(format!("formality {:.0} outside {}", overall, band));
    }

    let mut result = if score >= spec.threshold_or(0.7) {
        spec.pass(score)
            .with_message(format!("Fits {} norms", norms.name))
            .with_reasoning(format!("Expected formality {}", band))
    } else {
        spec.fail(score)
            .with_message(format!("Out of step with {} norms", norms.name))
            .with_reasoning(issues.join("; "))
            .with_recommendation(format!(
                "{} favours {}",
                norms.name,
                join_names(&norms.preferred_colors.iter().take(3).collect::<Vec<_>>())
            ))
    };
    result = result.with_context(format!("industry={}", key));
    if let Some(stage) = stage {
        result = result.with_context(format!("career_stage={}", stage));
    }
    out.push(result);
}
