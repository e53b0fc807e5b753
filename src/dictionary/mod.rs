// Dictionary module - the active key→value mapping and its boundaries
// (import/export file formats, default-source fetch with cache fallback)

mod format;
mod source;
mod store;

pub use format::{export_json, export_to_file, import_file, import_named, ExportError, ImportError};
pub use source::{DictionarySource, SourceError};
pub use store::DictionaryStore;
