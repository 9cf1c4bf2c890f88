//! Names of the knowledge tables a snapshot requires
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnowledgeTable {
    Colors,
    NeverCombine,
    Formality,
    Occasions,
    Seasons,
    Styling,
    Venues,
    Culture,
    Trends,
}

impl KnowledgeTable {
    /// Every required table, in load and hashing order.
    pub const ALL: [KnowledgeTable; 9] = [
        KnowledgeTable::Colors,
        KnowledgeTable::NeverCombine,
        KnowledgeTable::Formality,
        KnowledgeTable::Occasions,
        KnowledgeTable::Seasons,
        KnowledgeTable::Styling,
        KnowledgeTable::Venues,
        KnowledgeTable::Culture,
        KnowledgeTable::Trends,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            KnowledgeTable::Colors => "colors",
            KnowledgeTable::NeverCombine => "never_combine",
            KnowledgeTable::Formality => "formality",
            KnowledgeTable::Occasions => "occasions",
            KnowledgeTable::Seasons => "seasons",
            KnowledgeTable::Styling => "styling",
            KnowledgeTable::Venues => "venues",
            KnowledgeTable::Culture => "culture",
            KnowledgeTable::Trends => "trends",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.name())
    }
}

impl std::fmt::Display for KnowledgeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
