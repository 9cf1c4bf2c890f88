//! Color harmony: forbidden pairings, harmony type, temperature mixing,
//! monochromatic schemes and WCAG contrast
use crate::input::RuleInput;
use crate::{join_names, pretty};
use serde::{Deserialize, Serialize};
use tailor_core::{Garment, OutfitCombination, RuleResult, Severity};
use tailor_knowledge::{ColorTable, KnowledgeSnapshot, Temperature};

/// Harmony schemes, in preference order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HarmonyType {
    Monochromatic,
    Complementary,
    Analogous,
    Triadic,
    Mixed,
}

impl HarmonyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HarmonyType::Monochromatic => "monochromatic",
            HarmonyType::Complementary => "complementary",
            HarmonyType::Analogous => "analogous",
            HarmonyType::Triadic => "triadic",
            HarmonyType::Mixed => "mixed",
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            HarmonyType::Monochromatic => "Monochromatic scheme creates sophisticated harmony.",
            HarmonyType::Complementary => "Complementary colors create dynamic contrast.",
            HarmonyType::Analogous => "Analogous colors create gentle harmony.",
            HarmonyType::Triadic => "Triadic colors create vibrant balance.",
            HarmonyType::Mixed => "Mixed color approach with moderate harmony.",
        }
    }
}

impl std::fmt::Display for HarmonyType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the knowledge base says about one worn color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorAnalysis {
    pub color: String,
    pub family: Option<String>,
    pub temperature: Option<Temperature>,
    pub hex: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarmonyAnalysis {
    pub harmony_type: HarmonyType,
    /// 0.0 to 1.0, context bonuses included
    pub score: f64,
    pub colors: Vec<ColorAnalysis>,
    pub improvements: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContrastRating {
    #[serde(rename = "AAA")]
    Aaa,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "A")]
    A,
    Failed,
}

impl ContrastRating {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 7.0 {
            ContrastRating::Aaa
        } else if ratio >= 4.5 {
            ContrastRating::Aa
        } else if ratio >= 3.0 {
            ContrastRating::A
        } else {
            ContrastRating::Failed
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContrastPair {
    pub ratio: f64,
    pub rating: ContrastRating,
    /// `high`, `medium` or `low`
    pub visual_impact: String,
}

/// Contrast between adjacent garments. Pairs with an unknown hex code are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContrastAnalysis {
    pub suit_shirt: Option<ContrastPair>,
    pub shirt_tie: Option<ContrastPair>,
}

/// Positions apart on the 12-step hue wheel.
fn hue_distance(a: u8, b: u8) -> u8 {
    let d = a.abs_diff(b) % 12;
    d.min(12 - d)
}

/// Classify a set of colors. Neutrals do not count toward the scheme; any
/// color missing from the table makes the scheme `Mixed`.
pub fn classify_harmony(colors: &[&str], table: &ColorTable) -> HarmonyType {
    let mut hues: Vec<u8> = Vec::new();
    for color in colors {
        match table.family_of(color) {
            None => return HarmonyType::Mixed,
            Some((_, family)) => {
                if let Some(hue) = family.hue {
                    if !hues.contains(&hue) {
                        hues.push(hue);
                    }
                }
            }
        }
    }

    match hues.len() {
        0 | 1 => HarmonyType::Monochromatic,
        2 => match hue_distance(hues[0], hues[1]) {
            d if d >= 5 => HarmonyType::Complementary,
            d if d <= 3 => HarmonyType::Analogous,
            _ => HarmonyType::Triadic,
        },
        _ => {
            let mut distances = Vec::new();
            for (i, a) in hues.iter().enumerate() {
                for b in &hues[i + 1..] {
                    distances.push(hue_distance(*a, *b));
                }
            }
            let widest = distances.iter().copied().max().unwrap_or(0);
            if widest <= 3 {
                HarmonyType::Analogous
            } else if distances.iter().all(|d| (3..=5).contains(d)) {
                HarmonyType::Triadic
            } else {
                HarmonyType::Mixed
            }
        }
    }
}

fn seasonally_appropriate(input: &RuleInput<'_>, colors: &[&str]) -> bool {
    input
        .context
        .season
        .as_deref()
        .and_then(|s| input.knowledge.seasons.palette_for(s))
        .map(|palette| colors.iter().all(|c| palette.includes(c)))
        .unwrap_or(false)
}

fn formal_occasion(input: &RuleInput<'_>) -> bool {
    input
        .context
        .occasion
        .as_deref()
        .and_then(|o| input.knowledge.occasions.occasion(o))
        .map(|o| o.formality.min() >= input.tuning().harmony.formal_occasion_min)
        .unwrap_or(false)
}

pub fn analyze_harmony(input: &RuleInput<'_>) -> HarmonyAnalysis {
    let tuning = &input.tuning().harmony;
    let table = &input.knowledge.colors;
    let colors = input.combination.colors();
    let harmony_type = classify_harmony(&colors, table);

    let mut score = match harmony_type {
        HarmonyType::Monochromatic => tuning.monochromatic,
        HarmonyType::Complementary => tuning.complementary,
        HarmonyType::Analogous => tuning.analogous,
        HarmonyType::Triadic => tuning.triadic,
        HarmonyType::Mixed => tuning.mixed,
    };
    if harmony_type == HarmonyType::Monochromatic && formal_occasion(input) {
        score += tuning.formal_monochrome_bonus;
    }
    if seasonally_appropriate(input, &colors) {
        score += tuning.seasonal_bonus;
    }
    let score = tailor_core::round2(score.min(1.0));

    let analyses: Vec<ColorAnalysis> = colors
        .iter()
        .map(|color| ColorAnalysis {
            color: color.to_string(),
            family: table.family_of(color).map(|(name, _)| name.to_string()),
            temperature: table.temperature_of(color),
            hex: table.hex_of(color).map(str::to_string),
        })
        .collect();

    let mut improvements = Vec::new();
    let threshold = input.active("CH001").map(|s| s.threshold_or(0.7)).unwrap_or(0.7);
    if score < threshold {
        improvements
            .push("Consider using colors from the same family for better harmony".to_string());
    }
    if harmony_type == HarmonyType::Mixed && score < 0.8 {
        improvements.push(
            "Try a more structured color scheme (monochromatic or complementary)".to_string(),
        );
    }
    let unknown: Vec<&str> = analyses
        .iter()
        .filter(|a| a.family.is_none())
        .map(|a| a.color.as_str())
        .collect();
    if !unknown.is_empty() {
        improvements.push(format!("No color family on record for {}", join_names(&unknown)));
    }

    HarmonyAnalysis {
        harmony_type,
        score,
        colors: analyses,
        improvements,
    }
}

/// WCAG relative luminance of a `#rrggbb` code.
fn luminance(hex: &str) -> Option<f64> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| -> Option<f64> {
        let value = u8::from_str_radix(hex.get(range)?, 16).ok()? as f64 / 255.0;
        Some(if value <= 0.03928 {
            value / 12.92
        } else {
            ((value + 0.055) / 1.055).powf(2.4)
        })
    };
    Some(0.2126 * channel(0..2)? + 0.7152 * channel(2..4)? + 0.0722 * channel(4..6)?)
}

pub fn contrast_ratio(a: &str, b: &str) -> Option<f64> {
    let (la, lb) = (luminance(a)?, luminance(b)?);
    let (light, dark) = if la >= lb { (la, lb) } else { (lb, la) };
    Some((light + 0.05) / (dark + 0.05))
}

fn contrast_pair(table: &ColorTable, a: &str, b: &str) -> Option<ContrastPair> {
    let ratio = contrast_ratio(table.hex_of(a)?, table.hex_of(b)?)?;
    let visual_impact = if ratio >= 7.0 {
        "high"
    } else if ratio >= 3.0 {
        "medium"
    } else {
        "low"
    };
    Some(ContrastPair {
        ratio: tailor_core::round2(ratio),
        rating: ContrastRating::from_ratio(ratio),
        visual_impact: visual_impact.to_string(),
    })
}

pub fn analyze_contrast(
    combination: &OutfitCombination,
    knowledge: &KnowledgeSnapshot,
) -> ContrastAnalysis {
    let table = &knowledge.colors;
    ContrastAnalysis {
        suit_shirt: contrast_pair(table, &combination.suit_color, &combination.shirt_color),
        shirt_tie: combination
            .tie_color
            .as_deref()
            .and_then(|tie| contrast_pair(table, &combination.shirt_color, tie)),
    }
}

/// Replacement colors for one garment, best first: taken from the suit's
/// pairing table, excluding the current color and any choice that would
/// add an absolute never-combine match the combination does not already have.
pub fn replacement_colors(
    combination: &OutfitCombination,
    knowledge: &KnowledgeSnapshot,
    garment: Garment,
) -> Vec<(String, f64)> {
    let pairing = knowledge.colors.pairing_for(&combination.suit_color);
    let options = match garment {
        Garment::Suit => return Vec::new(),
        Garment::Shirt => &pairing.shirts,
        Garment::Tie => &pairing.ties,
    };
    options
        .iter()
        .filter(|o| combination.color(garment) != Some(o.color.as_str()))
        .filter(|o| {
            let mut candidate = combination.clone();
            candidate.set_color(garment, Some(o.color.clone()));
            !knowledge.never_combine.introduces_forbidden(combination, &candidate)
        })
        .map(|o| (o.color.clone(), o.confidence))
        .collect()
}

fn suggestions(input: &RuleInput<'_>, garment: Garment) -> Vec<String> {
    replacement_colors(input.combination, input.knowledge, garment)
        .into_iter()
        .take(3)
        .map(|(color, _)| format!("{} {}", pretty(&color), garment))
        .collect()
}

pub fn never_combine(input: &RuleInput<'_>, out: &mut Vec<RuleResult>) {
    let Some(spec) = input.active("NCR") else {
        return;
    };
    let confidence = input.tuning().harmony.forbidden_confidence;
    let matched: Vec<_> = input
        .knowledge
        .never_combine
        .absolute_matches(input.combination)
        .collect();

    if matched.is_empty() {
        out.push(
            spec.result_as("NCR_PASS")
                .with_outcome(true, Severity::Success)
                .with_confidence(confidence)
                .with_impact(spec.pass_impact)
                .with_message("No forbidden color pairings")
                .with_reasoning(format!(
                    "Checked against {} never-combine rules",
                    input.knowledge.never_combine.absolute.len()
                )),
        );
        return;
    }

    for rule in matched {
        let garment = if rule.combination.tie.is_some() {
            Garment::Tie
        } else {
            Garment::Shirt
        };
        let alternatives = suggestions(input, garment);
        let recommendation = match alternatives.first() {
            Some(first) => format!("Replace the {} with a {}", garment, first),
            None => format!("Choose a different {} color", garment),
        };
        out.push(
            spec.result_as(&rule.rule_id)
                .with_outcome(false, spec.fail_severity)
                .with_confidence(confidence)
                .with_impact(spec.fail_impact)
                .with_message(format!("Forbidden pairing: {}", rule.combination))
                .with_reasoning(rule.reason.clone())
                .with_recommendation(recommendation)
                .with_alternatives(alternatives),
        );
    }
}

pub fn conditional_avoid(input: &RuleInput<'_>, out: &mut Vec<RuleResult>) {
    let Some(spec) = input.active("NCA") else {
        return;
    };
    let confidence = input.tuning().harmony.conditional_confidence;
    for rule in input
        .knowledge
        .never_combine
        .conditional_matches(input.combination, input.context)
    {
        let situation = input
            .context
            .occasion
            .as_deref()
            .filter(|o| rule.occasions.iter().any(|r| r == o))
            .or_else(|| input.context.season.as_deref())
            .map(pretty)
            .unwrap_or_default();
        let garment = rule
            .combination
            .garments()
            .last()
            .copied()
            .unwrap_or(Garment::Shirt);
        let mut result = spec
            .result_as(&rule.rule_id)
            .with_outcome(false, spec.fail_severity)
            .with_confidence(confidence)
            .with_impact(spec.fail_impact)
            .with_message(format!("Avoid {} for {}", rule.combination, situation))
            .with_reasoning(rule.reason.clone())
            .with_recommendation(format!("Reconsider the {} color for {}", garment, situation))
            .with_alternatives(suggestions(input, garment));
        if let Some(occasion) = &input.context.occasion {
            result = result.with_context(format!("occasion={}", occasion));
        }
        if let Some(season) = &input.context.season {
            result = result.with_context(format!("season={}", season));
        }
        out.push(result);
    }
}

pub fn harmony(input: &RuleInput<'_>, out: &mut Vec<RuleResult>) {
    let Some(spec) = input.active("CH001") else {
        return;
    };
    let analysis = analyze_harmony(input);
    let passed = analysis.score >= spec.threshold_or(0.7);
    let colors = input.combination.colors();

    let mut reasoning = format!(
        "Colors: {}. {}",
        join_names(&colors),
        analysis.harmony_type.describe()
    );
    if let Some(temperature) = analysis.colors.first().and_then(|c| c.temperature) {
        if temperature != Temperature::Neutral {
            reasoning.push_str(&format!(" Color temperature: {}.", temperature));
        }
    }

    let mut result = spec
        .verdict(passed, analysis.score)
        .with_message(format!(
            "Color harmony score: {}% ({})",
            (analysis.score * 100.0).round(),
            analysis.harmony_type
        ))
        .with_reasoning(reasoning);
    if passed {
        result = result.with_recommendation("Excellent color coordination");
    } else {
        result = result
            .with_recommendation(
                analysis
                    .improvements
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "Consider adjusting color combinations".to_string()),
            )
            .with_alternatives(suggestions(input, Garment::Tie));
    }
    out.push(result);
}

pub fn temperature(input: &RuleInput<'_>, out: &mut Vec<RuleResult>) {
    let Some(spec) = input.active("CT001") else {
        return;
    };
    let table = &input.knowledge.colors;
    let temperatures: Vec<Temperature> = input
        .combination
        .colors()
        .iter()
        .filter_map(|c| table.temperature_of(c))
        .collect();
    let warm = temperatures.contains(&Temperature::Warm);
    let cool = temperatures.contains(&Temperature::Cool);
    let neutral = temperatures.contains(&Temperature::Neutral);

    let result = match (warm && cool, neutral) {
        (true, false) => spec
            .fail(0.8)
            .with_message("Warm and cool colors clash without a neutral")
            .with_reasoning("Mixing warm and cool tones needs a neutral element to bridge them")
            .with_recommendation("Add a neutral color such as white, grey or charcoal"),
        (true, true) => spec
            .pass(0.85)
            .with_message("Warm and cool colors bridged by a neutral")
            .with_reasoning("A neutral element ties the warm and cool tones together"),
        (false, _) => spec
            .pass(0.9)
            .with_impact(0)
            .with_message("Consistent color temperature")
            .with_reasoning("Colors share a temperature family or are neutral"),
    };
    out.push(result);
}

pub fn monochromatic(input: &RuleInput<'_>, out: &mut Vec<RuleResult>) {
    let Some(spec) = input.active("MC001") else {
        return;
    };
    let tuning = &input.tuning().monochrome;
    let colors = input.combination.colors();
    let families: Vec<Option<&str>> = colors
        .iter()
        .map(|c| input.knowledge.colors.family_of(c).map(|(name, _)| name))
        .collect();
    let one_family = families.iter().all(|f| f.is_some() && *f == families[0]);
    let identical = colors.iter().all(|c| *c == colors[0]);

    let result = if one_family && !identical {
        spec.pass(0.9)
            .with_message("Monochromatic elegance with shade variation")
            .with_reasoning(format!(
                "All colors belong to the {} family with varied shades",
                families[0].unwrap_or_default()
            ))
            .with_recommendation("Shade variation keeps a monochromatic outfit interesting")
    } else if one_family {
        spec.info(tuning.identical_confidence)
            .with_weight(tuning.info_weight)
            .with_message("Monochromatic but identical shades")
            .with_reasoning("Every garment is the same shade")
            .with_recommendation("Vary the shade of the shirt or tie for depth")
    } else {
        spec.info(tuning.info_confidence)
            .with_weight(tuning.info_weight)
            .with_message("Not a monochromatic combination")
            .with_reasoning("Colors come from more than one family")
    };
    out.push(result);
}
