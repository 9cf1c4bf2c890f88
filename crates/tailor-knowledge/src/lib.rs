//! Tailor Knowledge: reference tables behind outfit validation
//!
//! Tables are loaded through a [`KnowledgeProvider`] into an immutable
//! [`KnowledgeSnapshot`]. A [`SnapshotStore`] holds the active snapshot and
//! swaps it atomically on refresh.
pub mod provider;
pub mod snapshot;
pub mod store;
pub mod table;
pub mod tables;

pub use provider::{
    BuiltinProvider, DirectoryProvider, KnowledgeProvider, MemoryProvider, ProviderError,
};
pub use snapshot::KnowledgeSnapshot;
pub use store::SnapshotStore;
pub use table::KnowledgeTable;
pub use tables::{
    ColorTable, CultureTable, FormalityRange, FormalityTable, NeverCombineTable, OccasionTable,
    SeasonTable, StylingTable, Temperature, TrendTable, VenueTable,
};
