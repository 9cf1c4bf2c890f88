//! Current trend lists
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendTable {
    #[serde(default)]
    pub trending_colors: Vec<String>,
    #[serde(default)]
    pub trending_patterns: Vec<String>,
    /// Timeless choices that never read as dated
    #[serde(default)]
    pub classics: Vec<String>,
}
