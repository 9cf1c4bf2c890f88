//! Cultural color meanings and religious considerations
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionCulture {
    pub name: String,
    #[serde(default)]
    pub meanings: BTreeMap<String, String>,
    #[serde(default)]
    pub caution_colors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReligiousNote {
    pub note: String,
    #[serde(default)]
    pub caution_colors: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CultureTable {
    /// Color to its general meaning
    pub general: BTreeMap<String, String>,
    #[serde(default)]
    pub regions: BTreeMap<String, RegionCulture>,
    #[serde(default)]
    pub religious: BTreeMap<String, ReligiousNote>,
}

impl CultureTable {
    /// Regional meaning first, then the general one.
    pub fn meaning<'a>(
        &'a self,
        region: Option<&'a RegionCulture>,
        color: &str,
    ) -> Option<&'a str> {
        region
            .and_then(|r| r.meanings.get(color))
            .map(String::as_str)
            .or_else(|| self.general.get(color).map(String::as_str))
    }
}
