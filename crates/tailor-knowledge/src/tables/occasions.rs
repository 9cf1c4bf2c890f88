//! Occasion requirements, dress codes and time-of-day modifiers
use super::{listed, FormalityRange};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OccasionKind {
    Business,
    Social,
    Wedding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Occasion {
    pub name: String,
    pub formality: FormalityRange,
    pub kind: OccasionKind,
    #[serde(default)]
    pub requires_tie: bool,
    #[serde(default)]
    pub preferred_colors: Vec<String>,
    #[serde(default)]
    pub avoided_colors: Vec<String>,
    /// Season name to formality shift
    #[serde(default)]
    pub seasonal_modifiers: BTreeMap<String, f64>,
}

impl Occasion {
    /// Formality range after the seasonal shift, if any.
    pub fn range_for(&self, season: Option<&str>) -> FormalityRange {
        let modifier = season
            .and_then(|s| self.seasonal_modifiers.get(s))
            .copied()
            .unwrap_or(0.0);
        self.formality.shifted(modifier)
    }

    pub fn avoids(&self, color: &str) -> bool {
        listed(&self.avoided_colors, color)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DressCode {
    pub name: String,
    pub formality: FormalityRange,
    /// Empty lists accept any color.
    #[serde(default)]
    pub suit_colors: Vec<String>,
    #[serde(default)]
    pub shirt_colors: Vec<String>,
    #[serde(default)]
    pub tie_colors: Vec<String>,
    #[serde(default)]
    pub requires_tie: bool,
    #[serde(default)]
    pub solid_only: bool,
    #[serde(default)]
    pub avoided_fabrics: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeModifiers {
    pub business: f64,
    pub social: f64,
    pub wedding: f64,
}

impl TimeModifiers {
    pub fn for_kind(&self, kind: OccasionKind) -> f64 {
        match kind {
            OccasionKind::Business => self.business,
            OccasionKind::Social => self.social,
            OccasionKind::Wedding => self.wedding,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccasionTable {
    pub occasions: BTreeMap<String, Occasion>,
    #[serde(default)]
    pub dress_codes: BTreeMap<String, DressCode>,
    /// Time of day to modifiers
    #[serde(default)]
    pub time_modifiers: BTreeMap<String, TimeModifiers>,
}

impl OccasionTable {
    pub fn occasion(&self, name: &str) -> Option<&Occasion> {
        self.occasions.get(name)
    }

    pub fn dress_code(&self, name: &str) -> Option<&DressCode> {
        self.dress_codes.get(name)
    }

    pub fn time_modifier(&self, time_of_day: &str) -> Option<&TimeModifiers> {
        self.time_modifiers.get(time_of_day)
    }
}
