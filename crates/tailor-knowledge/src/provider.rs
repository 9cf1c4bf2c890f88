//! Knowledge Data Providers
//!
//! A provider turns a table name into a JSON document. Providers must be
//! idempotent: loading the same table twice yields the same document.

use crate::table::KnowledgeTable;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("table not found: {0}")]
    NotFound(String),

    #[error("io error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed json: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Source of reference tables
pub trait KnowledgeProvider: Send + Sync {
    fn load(&self, table: KnowledgeTable) -> Result<Value, ProviderError>;

    /// Name used in logs.
    fn name(&self) -> &str;
}

/// Default pack compiled into the crate
static BUILTIN_SOURCES: Lazy<HashMap<KnowledgeTable, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (KnowledgeTable::Colors, include_str!("../data/colors.json")),
        (KnowledgeTable::NeverCombine, include_str!("../data/never_combine.json")),
        (KnowledgeTable::Formality, include_str!("../data/formality.json")),
        (KnowledgeTable::Occasions, include_str!("../data/occasions.json")),
        (KnowledgeTable::Seasons, include_str!("../data/seasons.json")),
        (KnowledgeTable::Styling, include_str!("../data/styling.json")),
        (KnowledgeTable::Venues, include_str!("../data/venues.json")),
        (KnowledgeTable::Culture, include_str!("../data/culture.json")),
        (KnowledgeTable::Trends, include_str!("../data/trends.json")),
    ])
});

/// Serves the embedded default pack
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinProvider;

impl KnowledgeProvider for BuiltinProvider {
    fn load(&self, table: KnowledgeTable) -> Result<Value, ProviderError> {
        let source = BUILTIN_SOURCES
            .get(&table)
            .ok_or_else(|| ProviderError::NotFound(table.to_string()))?;
        Ok(serde_json::from_str(source)?)
    }

    fn name(&self) -> &str {
        "builtin"
    }
}

/// Reads `<dir>/<table>.json`
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    root: PathBuf,
}

impl DirectoryProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, table: KnowledgeTable) -> PathBuf {
        self.root.join(table.file_name())
    }
}

impl KnowledgeProvider for DirectoryProvider {
    fn load(&self, table: KnowledgeTable) -> Result<Value, ProviderError> {
        let path = self.path_for(table);
        let text = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ProviderError::NotFound(path.display().to_string())
            } else {
                ProviderError::Io {
                    path: path.display().to_string(),
                    source: e,
                }
            }
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    fn name(&self) -> &str {
        "directory"
    }
}

/// In-memory tables, handy for overrides and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    tables: HashMap<KnowledgeTable, Value>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the built-in pack that can then be edited.
    pub fn from_builtin() -> Result<Self, ProviderError> {
        let mut tables = HashMap::new();
        for table in KnowledgeTable::ALL {
            tables.insert(table, BuiltinProvider.load(table)?);
        }
        Ok(Self { tables })
    }

    pub fn with_table(mut self, table: KnowledgeTable, value: Value) -> Self {
        self.tables.insert(table, value);
        self
    }

    pub fn without(mut self, table: KnowledgeTable) -> Self {
        self.tables.remove(&table);
        self
    }

    pub fn table_mut(&mut self, table: KnowledgeTable) -> Option<&mut Value> {
        self.tables.get_mut(&table)
    }
}

impl KnowledgeProvider for MemoryProvider {
    fn load(&self, table: KnowledgeTable) -> Result<Value, ProviderError> {
        self.tables
            .get(&table)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(table.to_string()))
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_serves_every_table() {
        for table in KnowledgeTable::ALL {
            let value = BuiltinProvider.load(table).unwrap();
            assert!(value.is_object(), "{} is not an object", table);
        }
    }

    #[test]
    fn test_directory_provider_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("trends.json"), r#"{"trending_colors":["rust"]}"#).unwrap();
        let provider = DirectoryProvider::new(dir.path());

        let trends = provider.load(KnowledgeTable::Trends).unwrap();
        assert_eq!(trends["trending_colors"][0], "rust");

        let missing = provider.load(KnowledgeTable::Colors).unwrap_err();
        assert!(matches!(missing, ProviderError::NotFound(_)));
    }

    #[test]
    fn test_directory_provider_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("colors.json"), "{ not json").unwrap();
        let err = DirectoryProvider::new(dir.path())
            .load(KnowledgeTable::Colors)
            .unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
    }

    #[test]
    fn test_memory_provider_without() {
        let provider = MemoryProvider::from_builtin()
            .unwrap()
            .without(KnowledgeTable::Venues);
        assert!(provider.load(KnowledgeTable::Colors).is_ok());
        assert!(matches!(
            provider.load(KnowledgeTable::Venues),
            Err(ProviderError::NotFound(_))
        ));
    }
}
