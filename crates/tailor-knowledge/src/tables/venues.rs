//! Venue requirements and lighting conditions
use super::{FormalityRange, Temperature};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    pub formality: FormalityRange,
    #[serde(default)]
    pub preferred_colors: Vec<String>,
    #[serde(default)]
    pub avoided_colors: Vec<String>,
    #[serde(default)]
    pub avoided_fabrics: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lighting {
    pub name: String,
    pub temperature: Temperature,
    /// Color rendering accuracy, 1-10
    pub accuracy: u8,
    /// Garment temperature that renders poorly under this light
    #[serde(default)]
    pub affects: Option<Temperature>,
    #[serde(default)]
    pub advice: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueTable {
    pub venues: BTreeMap<String, Venue>,
    #[serde(default)]
    pub lighting: BTreeMap<String, Lighting>,
}

impl VenueTable {
    pub fn venue(&self, name: &str) -> Option<&Venue> {
        self.venues.get(name)
    }

    pub fn lighting(&self, name: &str) -> Option<&Lighting> {
        self.lighting.get(name)
    }
}
