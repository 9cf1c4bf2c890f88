//! Formality index: base formality per garment color plus modifiers
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tailor_core::{AccessorySlot, Garment};

/// Values used when a color or style is not in the index
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormalityDefaults {
    pub suit: f64,
    pub shirt: f64,
    pub tie: f64,
    pub accessory: f64,
    /// Formality of wearing no tie at all
    pub no_tie: f64,
}

impl Default for FormalityDefaults {
    fn default() -> Self {
        Self {
            suit: 5.0,
            shirt: 5.0,
            tie: 6.0,
            accessory: 5.0,
            no_tie: 3.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormalityTable {
    pub suits: BTreeMap<String, f64>,
    pub shirts: BTreeMap<String, f64>,
    pub ties: BTreeMap<String, f64>,
    /// Additive modifier per pattern name
    #[serde(default)]
    pub patterns: BTreeMap<String, f64>,
    /// Additive modifier per fabric name
    #[serde(default)]
    pub fabrics: BTreeMap<String, f64>,
    /// Slot name to style to formality
    #[serde(default)]
    pub accessories: BTreeMap<String, BTreeMap<String, f64>>,
    #[serde(default)]
    pub defaults: FormalityDefaults,
}

impl FormalityTable {
    pub fn colors_for(&self, garment: Garment) -> &BTreeMap<String, f64> {
        match garment {
            Garment::Suit => &self.suits,
            Garment::Shirt => &self.shirts,
            Garment::Tie => &self.ties,
        }
    }

    pub fn base(&self, garment: Garment, color: &str) -> Option<f64> {
        self.colors_for(garment).get(color).copied()
    }

    pub fn default_for(&self, garment: Garment) -> f64 {
        match garment {
            Garment::Suit => self.defaults.suit,
            Garment::Shirt => self.defaults.shirt,
            Garment::Tie => self.defaults.tie,
        }
    }

    pub fn pattern_modifier(&self, pattern: &str) -> f64 {
        self.patterns.get(pattern).copied().unwrap_or(0.0)
    }

    pub fn fabric_modifier(&self, fabric: &str) -> f64 {
        self.fabrics.get(fabric).copied().unwrap_or(0.0)
    }

    pub fn accessory(&self, slot: AccessorySlot, style: &str) -> Option<f64> {
        self.accessories
            .get(slot.as_str())
            .and_then(|styles| styles.get(style))
            .copied()
    }
}
