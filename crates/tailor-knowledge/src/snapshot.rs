//! Immutable snapshot of every knowledge table
//!
//! A snapshot is built once from a provider and never mutated. Its version is
//! a content hash, so two snapshots with identical tables share a version.

use crate::provider::{BuiltinProvider, KnowledgeProvider};
use crate::table::KnowledgeTable;
use crate::tables::{
    ColorTable, CultureTable, FormalityTable, NeverCombineTable, OccasionTable, SeasonTable,
    StylingTable, TrendTable, VenueTable,
};
use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tailor_core::TailorError;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct KnowledgeSnapshot {
    version: String,
    pub colors: ColorTable,
    pub never_combine: NeverCombineTable,
    pub formality: FormalityTable,
    pub occasions: OccasionTable,
    pub seasons: SeasonTable,
    pub styling: StylingTable,
    pub venues: VenueTable,
    pub culture: CultureTable,
    pub trends: TrendTable,
}

static BUILTIN: OnceCell<Arc<KnowledgeSnapshot>> = OnceCell::new();

impl KnowledgeSnapshot {
    /// Load every table from the provider. The first missing or malformed
    /// table aborts the load.
    pub fn load(provider: &dyn KnowledgeProvider) -> Result<Self, TailorError> {
        let mut raw = BTreeMap::new();
        for table in KnowledgeTable::ALL {
            let value = provider
                .load(table)
                .map_err(|e| TailorError::data_unavailable(table.name(), e))?;
            debug!(provider = provider.name(), table = %table, "loaded knowledge table");
            raw.insert(table, value);
        }
        Self::from_tables(raw)
    }

    /// Build from already-loaded documents.
    pub fn from_tables(raw: BTreeMap<KnowledgeTable, Value>) -> Result<Self, TailorError> {
        let version = content_version(&raw);
        Ok(Self {
            colors: decode(&raw, KnowledgeTable::Colors)?,
            never_combine: decode(&raw, KnowledgeTable::NeverCombine)?,
            formality: decode(&raw, KnowledgeTable::Formality)?,
            occasions: decode(&raw, KnowledgeTable::Occasions)?,
            seasons: decode(&raw, KnowledgeTable::Seasons)?,
            styling: decode(&raw, KnowledgeTable::Styling)?,
            venues: decode(&raw, KnowledgeTable::Venues)?,
            culture: decode(&raw, KnowledgeTable::Culture)?,
            trends: decode(&raw, KnowledgeTable::Trends)?,
            version,
        })
    }

    /// Shared snapshot of the embedded pack, decoded once per process.
    pub fn builtin() -> Result<Arc<Self>, TailorError> {
        BUILTIN
            .get_or_try_init(|| Self::load(&BuiltinProvider).map(Arc::new))
            .map(Arc::clone)
    }

    /// `blake3:<hex>` over every table in load order
    pub fn version(&self) -> &str {
        &self.version
    }
}

fn decode<T: DeserializeOwned>(
    raw: &BTreeMap<KnowledgeTable, Value>,
    table: KnowledgeTable,
) -> Result<T, TailorError> {
    let value = raw
        .get(&table)
        .ok_or_else(|| TailorError::data_unavailable(table.name(), "table missing"))?;
    T::deserialize(value).map_err(|e| TailorError::data_unavailable(table.name(), e))
}

fn content_version(raw: &BTreeMap<KnowledgeTable, Value>) -> String {
    let mut hasher = blake3::Hasher::new();
    for (table, value) in raw {
        hasher.update(table.name().as_bytes());
        hasher.update(value.to_string().as_bytes());
    }
    format!("blake3:{}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MemoryProvider;

    #[test]
    fn test_builtin_loads() {
        let snapshot = KnowledgeSnapshot::builtin().unwrap();
        assert!(snapshot.version().starts_with("blake3:"));
        assert!(snapshot.colors.is_known("navy"));
        assert!(snapshot.occasions.occasion("business_formal").is_some());
        assert!(snapshot.seasons.is_known_season("winter"));
    }

    #[test]
    fn test_version_is_content_hash() {
        let a = KnowledgeSnapshot::load(&BuiltinProvider).unwrap();
        let b = KnowledgeSnapshot::load(&MemoryProvider::from_builtin().unwrap()).unwrap();
        assert_eq!(a.version(), b.version());

        let edited = MemoryProvider::from_builtin()
            .unwrap()
            .with_table(KnowledgeTable::Trends, serde_json::json!({ "trending_colors": ["rust"] }));
        let c = KnowledgeSnapshot::load(&edited).unwrap();
        assert_ne!(a.version(), c.version());
    }

    #[test]
    fn test_missing_table_is_data_unavailable() {
        let provider = MemoryProvider::from_builtin()
            .unwrap()
            .without(KnowledgeTable::Seasons);
        match KnowledgeSnapshot::load(&provider) {
            Err(TailorError::DataUnavailable { table, .. }) => assert_eq!(table, "seasons"),
            other => panic!("expected DataUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_corrupt_table_is_data_unavailable() {
        let provider = MemoryProvider::from_builtin()
            .unwrap()
            .with_table(KnowledgeTable::Colors, serde_json::json!({ "families": 3 }));
        match KnowledgeSnapshot::load(&provider) {
            Err(TailorError::DataUnavailable { table, .. }) => assert_eq!(table, "colors"),
            other => panic!("expected DataUnavailable, got {:?}", other),
        }
    }
}
