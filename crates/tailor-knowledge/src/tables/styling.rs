//! Pattern catalogue, fabric textures, shine, style profiles and industry norms
use super::{listed, FormalityRange};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    Solid,
    Stripe,
    Check,
    Dot,
    Figure,
    Texture,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternScale {
    None,
    Micro,
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PatternInfo {
    pub kind: PatternKind,
    pub scale: PatternScale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureClass {
    Smooth,
    Medium,
    Rough,
    Lustrous,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleProfile {
    pub name: String,
    #[serde(default)]
    pub preferred_colors: Vec<String>,
    #[serde(default)]
    pub avoided_colors: Vec<String>,
    #[serde(default)]
    pub preferred_patterns: Vec<String>,
    #[serde(default)]
    pub avoided_patterns: Vec<String>,
    #[serde(default)]
    pub formality: Option<FormalityRange>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryNorms {
    pub name: String,
    pub formality: FormalityRange,
    #[serde(default)]
    pub preferred_colors: Vec<String>,
    #[serde(default)]
    pub avoided_colors: Vec<String>,
    #[serde(default)]
    pub avoided_patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StylingTable {
    pub patterns: BTreeMap<String, PatternInfo>,
    pub textures: BTreeMap<String, TextureClass>,
    /// Materials that read as shiny, matched on whole names or `_` tokens
    pub shiny_materials: Vec<String>,
    #[serde(default)]
    pub profiles: BTreeMap<String, StyleProfile>,
    #[serde(default)]
    pub preferences: BTreeMap<String, StyleProfile>,
    #[serde(default)]
    pub industries: BTreeMap<String, IndustryNorms>,
    /// Career stage to formality expectation shift
    #[serde(default)]
    pub career_stages: BTreeMap<String, f64>,
}

impl StylingTable {
    pub fn pattern(&self, name: &str) -> Option<PatternInfo> {
        self.patterns.get(name).copied()
    }

    pub fn texture(&self, fabric: &str) -> Option<TextureClass> {
        self.textures.get(fabric).copied()
    }

    /// `patent_leather` and `white_silk` are both shiny when `patent_leather`
    /// and `silk` are listed.
    pub fn is_shiny(&self, material: &str) -> bool {
        listed(&self.shiny_materials, material)
            || material.split('_').any(|token| listed(&self.shiny_materials, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shine_tokens() {
        let table = StylingTable {
            patterns: BTreeMap::new(),
            textures: BTreeMap::new(),
            shiny_materials: vec!["silk".into(), "patent_leather".into(), "satin".into()],
            profiles: BTreeMap::new(),
            preferences: BTreeMap::new(),
            industries: BTreeMap::new(),
            career_stages: BTreeMap::new(),
        };
        assert!(table.is_shiny("silk"));
        assert!(table.is_shiny("patent_leather"));
        assert!(table.is_shiny("white_silk"));
        assert!(!table.is_shiny("black_leather"));
        assert!(!table.is_shiny("wool"));
    }

    #[test]
    fn test_scale_ordering() {
        assert!(PatternScale::Micro < PatternScale::Large);
        let info: PatternInfo =
            serde_json::from_str(r#"{"kind":"stripe","scale":"small"}"#).unwrap();
        assert_eq!(info.kind, PatternKind::Stripe);
        assert_eq!(info.scale, PatternScale::Small);
    }
}
