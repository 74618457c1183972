//! Template persistence: a named key-value slot holding one JSON record per template.

/// Store trait and in-memory store.
pub mod backend;
/// Directory-backed store.
pub mod file;
/// Persisted template record.
pub mod record;
/// Named slot lifecycle.
pub mod slot;
