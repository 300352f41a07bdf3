//! Flat-file persistence for indexed channel media

pub mod records;

// Re-exports for convenience
pub use records::{JsonFileStore, MediaKind, MediaRecord, RecordStore, UpsertOutcome};
