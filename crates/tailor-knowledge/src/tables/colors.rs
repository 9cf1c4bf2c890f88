//! Color families, temperatures, hex codes and suit pairings
use super::listed;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A family of related shades. Chromatic families sit on a 12-step hue
/// wheel; neutral families carry no hue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorFamily {
    #[serde(default)]
    pub hue: Option<u8>,
    pub members: Vec<String>,
}

impl ColorFamily {
    pub fn is_neutral(&self) -> bool {
        self.hue.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temperature {
    Warm,
    Cool,
    Neutral,
}

impl std::fmt::Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Temperature::Warm => write!(f, "warm"),
            Temperature::Cool => write!(f, "cool"),
            Temperature::Neutral => write!(f, "neutral"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemperatureLists {
    #[serde(default)]
    pub warm: Vec<String>,
    #[serde(default)]
    pub cool: Vec<String>,
    #[serde(default)]
    pub neutral: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairingOption {
    pub color: String,
    pub confidence: f64,
}

/// Shirt and tie colors known to work with a suit color, best first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pairing {
    #[serde(default)]
    pub shirts: Vec<PairingOption>,
    #[serde(default)]
    pub ties: Vec<PairingOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorTable {
    pub families: BTreeMap<String, ColorFamily>,
    pub temperature: TemperatureLists,
    #[serde(default)]
    pub hex: BTreeMap<String, String>,
    #[serde(default)]
    pub pairings: BTreeMap<String, Pairing>,
    #[serde(default)]
    pub fallback_pairing: Pairing,
}

impl ColorTable {
    /// Family name and definition for a color.
    pub fn family_of(&self, color: &str) -> Option<(&str, &ColorFamily)> {
        self.families
            .iter()
            .find(|(_, family)| listed(&family.members, color))
            .map(|(name, family)| (name.as_str(), family))
    }

    pub fn is_known(&self, color: &str) -> bool {
        self.family_of(color).is_some()
    }

    /// Neutral membership wins over warm or cool.
    pub fn temperature_of(&self, color: &str) -> Option<Temperature> {
        if listed(&self.temperature.neutral, color) {
            Some(Temperature::Neutral)
        } else if listed(&self.temperature.warm, color) {
            Some(Temperature::Warm)
        } else if listed(&self.temperature.cool, color) {
            Some(Temperature::Cool)
        } else {
            None
        }
    }

    pub fn hex_of(&self, color: &str) -> Option<&str> {
        self.hex.get(color).map(String::as_str)
    }

    /// Pairings for a suit color, or the fallback pairing when unlisted.
    pub fn pairing_for(&self, suit_color: &str) -> &Pairing {
        self.pairings
            .get(suit_color)
            .unwrap_or(&self.fallback_pairing)
    }
}
