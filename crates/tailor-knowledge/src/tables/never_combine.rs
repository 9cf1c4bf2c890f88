//! Forbidden and situationally avoided color pairings
use super::listed;
use serde::{Deserialize, Serialize};
use tailor_core::{Garment, OutfitCombination, ValidationContext};

/// Partial combination: every color given must match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColorMatch {
    #[serde(default)]
    pub suit: Option<String>,
    #[serde(default)]
    pub shirt: Option<String>,
    #[serde(default)]
    pub tie: Option<String>,
}

impl ColorMatch {
    pub fn get(&self, garment: Garment) -> Option<&str> {
        match garment {
            Garment::Suit => self.suit.as_deref(),
            Garment::Shirt => self.shirt.as_deref(),
            Garment::Tie => self.tie.as_deref(),
        }
    }

    /// Garments the pattern constrains.
    pub fn garments(&self) -> Vec<Garment> {
        Garment::ALL
            .into_iter()
            .filter(|g| self.get(*g).is_some())
            .collect()
    }

    /// An empty pattern never matches.
    pub fn matches(&self, combination: &OutfitCombination) -> bool {
        let garments = self.garments();
        !garments.is_empty()
            && garments
                .iter()
                .all(|g| self.get(*g) == combination.color(*g))
    }
}

impl std::fmt::Display for ColorMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let parts: Vec<String> = self
            .garments()
            .into_iter()
            .filter_map(|g| self.get(g).map(|c| format!("{} {}", c, g)))
            .collect();
        write!(f, "{}", parts.join(" with "))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeverCombineRule {
    pub rule_id: String,
    pub combination: ColorMatch,
    pub reason: String,
}

/// Pairing to avoid only for the listed occasions or seasons
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionalAvoidRule {
    pub rule_id: String,
    pub combination: ColorMatch,
    #[serde(default)]
    pub occasions: Vec<String>,
    #[serde(default)]
    pub seasons: Vec<String>,
    pub reason: String,
}

impl ConditionalAvoidRule {
    pub fn applies(&self, context: &ValidationContext) -> bool {
        let occasion = context
            .occasion
            .as_deref()
            .map(|o| listed(&self.occasions, o))
            .unwrap_or(false);
        let season = context
            .season
            .as_deref()
            .map(|s| listed(&self.seasons, s))
            .unwrap_or(false);
        occasion || season
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeverCombineTable {
    pub absolute: Vec<NeverCombineRule>,
    #[serde(default)]
    pub conditional: Vec<ConditionalAvoidRule>,
}

impl NeverCombineTable {
    pub fn absolute_matches<'a>(
        &'a self,
        combination: &'a OutfitCombination,
    ) -> impl Iterator<Item = &'a NeverCombineRule> + 'a {
        self.absolute
            .iter()
            .filter(move |rule| rule.combination.matches(combination))
    }

    pub fn conditional_matches<'a>(
        &'a self,
        combination: &'a OutfitCombination,
        context: &'a ValidationContext,
    ) -> impl Iterator<Item = &'a ConditionalAvoidRule> + 'a {
        self.conditional
            .iter()
            .filter(move |rule| rule.applies(context) && rule.combination.matches(combination))
    }

    pub fn is_forbidden(&self, combination: &OutfitCombination) -> bool {
        self.absolute_matches(combination).next().is_some()
    }

    /// True when `after` matches an absolute rule that `before` does not.
    /// Pairings already present in `before` are not counted against `after`.
    pub fn introduces_forbidden(
        &self,
        before: &OutfitCombination,
        after: &OutfitCombination,
    ) -> bool {
        self.absolute_matches(after)
            .any(|rule| !rule.combination.matches(before))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> NeverCombineTable {
        serde_json::from_value(serde_json::json!({
            "absolute": [
                {
                    "rule_id": "NC001",
                    "combination": { "suit": "black", "shirt": "brown" },
                    "reason": "clash"
                },
                {
                    "rule_id": "NC009",
                    "combination": { "suit": "green", "tie": "red" },
                    "reason": "costume"
                }
            ],
            "conditional": [
                {
                    "rule_id": "NCA003",
                    "combination": { "suit": "tan" },
                    "seasons": ["winter"],
                    "reason": "off season"
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_absolute_match() {
        let rules = table();
        let combo = OutfitCombination::new("black", "brown").with_tie("navy");
        let ids: Vec<&str> = rules.absolute_matches(&combo).map(|r| r.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["NC001"]);
        assert!(rules.is_forbidden(&combo));
    }

    #[test]
    fn test_tie_rule_needs_tie() {
        let rules = table();
        assert!(!rules.is_forbidden(&OutfitCombination::new("green", "white")));
        assert!(rules.is_forbidden(&OutfitCombination::new("green", "white").with_tie("red")));
    }

    #[test]
    fn test_introduces_only_counts_new_pairings() {
        let rules = table();
        let both = OutfitCombination::new("black", "brown").with_tie("red");
        // still black with brown, but the shirt swap adds nothing new
        let shirt_swap = OutfitCombination::new("black", "white").with_tie("red");
        assert!(!rules.introduces_forbidden(&both, &both));
        assert!(!rules.introduces_forbidden(&both, &shirt_swap));

        let clean = OutfitCombination::new("navy", "white").with_tie("red");
        let green = OutfitCombination::new("green", "white").with_tie("red");
        assert!(rules.introduces_forbidden(&clean, &green));
    }

    #[test]
    fn test_empty_pattern_never_matches() {
        let pattern = ColorMatch::default();
        assert!(!pattern.matches(&OutfitCombination::new("navy", "white")));
    }

    #[test]
    fn test_conditional_needs_context() {
        let rules = table();
        let combo = OutfitCombination::new("tan", "white");
        assert_eq!(rules.conditional_matches(&combo, &ValidationContext::new()).count(), 0);
        let winter = ValidationContext::new().with_season("winter");
        assert_eq!(rules.conditional_matches(&combo, &winter).count(), 1);
    }

    #[test]
    fn test_display() {
        let pattern = ColorMatch {
            suit: Some("black".into()),
            shirt: Some("brown".into()),
            tie: None,
        };
        assert_eq!(pattern.to_string(), "black suit with brown shirt");
    }
}
