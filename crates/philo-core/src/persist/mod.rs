//! Durable storage of the session state and the portable export format.

mod document;
mod store;

pub use document::{ExportCounters, ExportDocument, ExportMeta, FORMAT_VERSION, ImportPatch};
pub use store::{FileStore, MemoryStore, StateStore};
