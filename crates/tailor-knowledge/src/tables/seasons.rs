//! Seasonal fabrics and palettes, weather conditions and climate zones
use super::listed;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FabricTiers {
    #[serde(default)]
    pub excellent: Vec<String>,
    #[serde(default)]
    pub good: Vec<String>,
    #[serde(default)]
    pub avoid: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Palette {
    #[serde(default)]
    pub primary: Vec<String>,
    #[serde(default)]
    pub accent: Vec<String>,
    #[serde(default)]
    pub neutral: Vec<String>,
    #[serde(default)]
    pub avoid: Vec<String>,
    #[serde(default)]
    pub trending: Vec<String>,
}

impl Palette {
    /// Primary, accent or neutral membership.
    pub fn includes(&self, color: &str) -> bool {
        listed(&self.primary, color) || listed(&self.accent, color) || listed(&self.neutral, color)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherCondition {
    #[serde(default)]
    pub prefer_fabrics: Vec<String>,
    #[serde(default)]
    pub avoid_fabrics: Vec<String>,
    #[serde(default)]
    pub avoid_colors: Vec<String>,
    #[serde(default)]
    pub advice: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClimateZone {
    #[serde(default)]
    pub favoured_fabrics: Vec<String>,
    #[serde(default)]
    pub avoid_fabrics: Vec<String>,
    #[serde(default)]
    pub avoid_colors: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonTable {
    pub fabrics: BTreeMap<String, FabricTiers>,
    pub palettes: BTreeMap<String, Palette>,
    #[serde(default)]
    pub weather: BTreeMap<String, WeatherCondition>,
    #[serde(default)]
    pub climate_zones: BTreeMap<String, ClimateZone>,
}

impl SeasonTable {
    /// A season is known when it has both fabric tiers and a palette.
    pub fn is_known_season(&self, season: &str) -> bool {
        self.fabrics.contains_key(season) && self.palettes.contains_key(season)
    }

    pub fn fabrics_for(&self, season: &str) -> Option<&FabricTiers> {
        self.fabrics.get(season)
    }

    pub fn palette_for(&self, season: &str) -> Option<&Palette> {
        self.palettes.get(season)
    }
}
