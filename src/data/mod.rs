//! Data module - roster loading, batch derivation, queries and export

mod batch;
mod export;
mod loader;
mod processor;

pub use export::{export_file_name, export_to_path};
pub use loader::RosterLoader;
pub use processor::{BatchSelection, RosterProcessor, RosterStats, RosterView, ALL_BATCHES};
