//! Persistence adapters

mod settings_store;

pub use settings_store::{JsonFileSettingsStore, MemorySettingsStore};
