// ReplacementService - user-level operations around the engine and store
//
// Implements the boundary policy: every collaborator failure (fetch, parse,
// file I/O) is caught here and converted into a transient notice, leaving the
// current dictionary untouched. The engine itself never fails on valid input.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::dictionary::{
    export_to_file, import_file, DictionarySource, DictionaryStore, ExportError, ImportError,
};
use crate::engine::ReplacementEngine;
use crate::events::{
    current_timestamp,
    dictionary_events::DictionaryUpdatedPayload,
    notice_events::{NoticeLevel, NoticePayload},
    DictionaryEventEmitter, NoticeEventEmitter, ReplacementEventEmitter,
};
use crate::util::{block_on, Settings};

/// Map ImportError to a user-facing message
fn import_user_error(error: &ImportError) -> String {
    match error {
        ImportError::UnsupportedFormat(name) => {
            format!("Unsupported file type: {} (use .json or .csv)", name)
        }
        ImportError::Malformed(msg) => format!("Could not parse dictionary: {}", msg),
        ImportError::Io(name, msg) => format!("Could not read {}: {}", name, msg),
    }
}

/// Map ExportError to a user-facing message
fn export_user_error(error: &ExportError) -> String {
    match error {
        ExportError::Serialize(msg) => format!("Could not serialize dictionary: {}", msg),
        ExportError::Io(name, msg) => format!("Could not write {}: {}", name, msg),
    }
}

/// Service tying the store, engine, and emitters together
///
/// Hosts construct one service per application, implement the emitter traits
/// for their UI layer, and call the operations below. Replacement jobs run
/// against the shared store; a dictionary reload during a job follows the
/// engine's per-chunk read semantics.
pub struct ReplacementService<R, N>
where
    R: ReplacementEventEmitter + 'static,
    N: NoticeEventEmitter + DictionaryEventEmitter + 'static,
{
    store: Arc<DictionaryStore>,
    engine: ReplacementEngine,
    replacement_emitter: Arc<R>,
    notice_emitter: Arc<N>,
    source: Option<DictionarySource>,
}

impl<R, N> ReplacementService<R, N>
where
    R: ReplacementEventEmitter + Send + Sync + 'static,
    N: NoticeEventEmitter + DictionaryEventEmitter + Send + Sync + 'static,
{
    /// Create a service over the given store and emitters
    pub fn new(
        store: Arc<DictionaryStore>,
        replacement_emitter: Arc<R>,
        notice_emitter: Arc<N>,
    ) -> Self {
        let engine = ReplacementEngine::new(Arc::clone(&store));
        Self {
            store,
            engine,
            replacement_emitter,
            notice_emitter,
            source: None,
        }
    }

    /// Add a default dictionary source (builder pattern)
    pub fn with_source(mut self, source: DictionarySource) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the engine's tokens-per-chunk size (builder pattern)
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.engine = self.engine.with_batch_size(batch_size);
        self
    }

    /// Pin the mapping for the duration of each job (builder pattern)
    pub fn with_mapping_snapshot(mut self, snapshot: bool) -> Self {
        self.engine = self.engine.with_mapping_snapshot(snapshot);
        self
    }

    /// Apply file-backed settings: batch size and default source URL
    /// (builder pattern)
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.engine = self.engine.with_batch_size(settings.batch_size);
        if let Some(url) = &settings.dictionary_url {
            match DictionarySource::with_default_cache_path(url.clone()) {
                Ok(source) => self.source = Some(source),
                Err(e) => {
                    crate::warn!("Cannot cache default dictionary: {}", e);
                }
            }
        }
        self
    }

    /// Shared dictionary store backing this service
    pub fn store(&self) -> &Arc<DictionaryStore> {
        &self.store
    }

    /// Run a replacement job over `text`
    ///
    /// Empty input is a user notice, not an error: the result is empty and
    /// no replacement events fire.
    pub async fn replace_document(&self, text: &str) -> String {
        if text.is_empty() {
            self.notify(NoticeLevel::Info, "Nothing to replace: the document is empty");
            return String::new();
        }
        self.engine
            .replace(text, self.replacement_emitter.as_ref())
            .await
    }

    /// Synchronous driver for hosts without an async context
    pub fn replace_document_blocking(&self, text: &str) -> String {
        block_on(self.replace_document(text))
    }

    /// Replace the active mapping programmatically
    pub fn load_mapping(&self, mapping: HashMap<String, String>) -> usize {
        let count = self.store.load(mapping);
        self.notice_emitter
            .emit_dictionary_updated(DictionaryUpdatedPayload {
                action: "load".to_string(),
                entry_count: count,
            });
        crate::info!("Dictionary loaded: {} entries", count);
        count
    }

    /// Import a dictionary file (.json or .csv), replacing the mapping
    ///
    /// On any failure the current dictionary is left untouched and the
    /// failure surfaces as an error notice.
    pub fn import_dictionary(&self, path: &Path) -> Result<usize, ImportError> {
        match import_file(path) {
            Ok(mapping) => {
                let count = self.store.load(mapping);
                self.notice_emitter
                    .emit_dictionary_updated(DictionaryUpdatedPayload {
                        action: "import".to_string(),
                        entry_count: count,
                    });
                self.notify(
                    NoticeLevel::Success,
                    format!("Imported {} dictionary entries", count),
                );
                crate::info!("Dictionary imported from {:?}: {} entries", path, count);
                Ok(count)
            }
            Err(e) => {
                crate::warn!("Dictionary import from {:?} failed: {}", path, e);
                self.notify(NoticeLevel::Error, import_user_error(&e));
                Err(e)
            }
        }
    }

    /// Export the active mapping as pretty-printed JSON
    pub fn export_dictionary(&self, path: &Path) -> Result<(), ExportError> {
        match export_to_file(path, &self.store.entries()) {
            Ok(()) => {
                self.notify(
                    NoticeLevel::Success,
                    format!("Exported {} dictionary entries", self.store.len()),
                );
                crate::info!("Dictionary exported to {:?}", path);
                Ok(())
            }
            Err(e) => {
                crate::warn!("Dictionary export to {:?} failed: {}", path, e);
                self.notify(NoticeLevel::Error, export_user_error(&e));
                Err(e)
            }
        }
    }

    /// Load the default mapping from the configured source
    ///
    /// Source trouble is non-fatal by design: the store ends up with
    /// whatever the source could provide, possibly the empty mapping, and
    /// the only trace of a failure is a log line.
    pub async fn load_default_dictionary(&self) -> usize {
        let mapping = match &self.source {
            Some(source) => source.load_mapping().await,
            None => {
                crate::debug!("No default dictionary source configured");
                HashMap::new()
            }
        };
        let count = self.store.load(mapping);
        self.notice_emitter
            .emit_dictionary_updated(DictionaryUpdatedPayload {
                action: "load".to_string(),
                entry_count: count,
            });
        count
    }

    fn notify(&self, level: NoticeLevel, message: impl Into<String>) {
        self.notice_emitter.emit_notice(NoticePayload {
            level,
            message: message.into(),
            timestamp: current_timestamp(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::tests::{MockNoticeEmitter, MockReplacementEmitter};
    use tempfile::TempDir;

    fn make_service() -> (
        ReplacementService<MockReplacementEmitter, MockNoticeEmitter>,
        Arc<MockReplacementEmitter>,
        Arc<MockNoticeEmitter>,
    ) {
        let store = Arc::new(DictionaryStore::new());
        let replacement_emitter = Arc::new(MockReplacementEmitter::new());
        let notice_emitter = Arc::new(MockNoticeEmitter::new());
        let service = ReplacementService::new(
            store,
            Arc::clone(&replacement_emitter),
            Arc::clone(&notice_emitter),
        );
        (service, replacement_emitter, notice_emitter)
    }

    #[tokio::test]
    async fn test_replace_document_uses_loaded_mapping() {
        let (service, _, _) = make_service();
        let mut mapping = HashMap::new();
        mapping.insert("hello".to_string(), "allo".to_string());
        service.load_mapping(mapping);

        let result = service.replace_document("hello, world!").await;
        assert_eq!(result, "allo, world!");
    }

    #[tokio::test]
    async fn test_empty_document_posts_info_notice() {
        let (service, replacement_emitter, notice_emitter) = make_service();

        let result = service.replace_document("").await;

        assert_eq!(result, "");
        let notices = notice_emitter.recorded_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Info);
        // The engine never ran, so no progress was reported
        assert!(replacement_emitter.recorded_percents().is_empty());
    }

    #[test]
    fn test_replace_document_blocking_matches_async() {
        let (service, _, _) = make_service();
        let mut mapping = HashMap::new();
        mapping.insert("a".to_string(), "b".to_string());
        service.load_mapping(mapping);

        assert_eq!(service.replace_document_blocking("a a"), "b b");
    }

    #[test]
    fn test_import_json_replaces_mapping_and_posts_success() {
        let (service, _, notice_emitter) = make_service();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dict.json");
        std::fs::write(&path, r#"{"hello": "allo", "bye": "ciao"}"#).unwrap();

        let count = service.import_dictionary(&path).unwrap();

        assert_eq!(count, 2);
        assert_eq!(service.store().lookup("bye"), Some("ciao".to_string()));
        let notices = notice_emitter.recorded_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Success);
    }

    #[test]
    fn test_import_csv_replaces_mapping() {
        let (service, _, _) = make_service();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dict.csv");
        std::fs::write(&path, "hello,allo\nbye,ciao\n").unwrap();

        let count = service.import_dictionary(&path).unwrap();
        assert_eq!(count, 2);
        assert_eq!(service.store().lookup("hello"), Some("allo".to_string()));
    }

    #[test]
    fn test_failed_import_leaves_dictionary_untouched() {
        let (service, _, notice_emitter) = make_service();
        let mut mapping = HashMap::new();
        mapping.insert("keep".to_string(), "me".to_string());
        service.load_mapping(mapping);

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = service.import_dictionary(&path);

        assert!(matches!(result, Err(ImportError::Malformed(_))));
        assert_eq!(service.store().lookup("keep"), Some("me".to_string()));
        // load_mapping emits a dictionary event, not a notice, so the only
        // notice on record is the import failure
        let notices = notice_emitter.recorded_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
    }

    #[test]
    fn test_unsupported_extension_is_rejected_without_mutation() {
        let (service, _, notice_emitter) = make_service();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dict.txt");
        std::fs::write(&path, "hello,allo").unwrap();

        let result = service.import_dictionary(&path);

        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
        assert!(service.store().is_empty());
        assert_eq!(notice_emitter.recorded_notices()[0].level, NoticeLevel::Error);
    }

    #[test]
    fn test_export_then_import_round_trips() {
        let (service, _, _) = make_service();
        let mut mapping = HashMap::new();
        mapping.insert("a".to_string(), "b".to_string());
        mapping.insert("c,d".to_string(), "e".to_string());
        service.load_mapping(mapping);

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("export.json");
        service.export_dictionary(&path).unwrap();

        service.load_mapping(HashMap::new());
        assert!(service.store().is_empty());

        let count = service.import_dictionary(&path).unwrap();
        assert_eq!(count, 2);
        assert_eq!(service.store().lookup("c,d"), Some("e".to_string()));
    }

    #[tokio::test]
    async fn test_load_default_without_source_yields_empty_mapping() {
        let (service, _, _) = make_service();
        let count = service.load_default_dictionary().await;
        assert_eq!(count, 0);
        assert!(service.store().is_empty());
    }

    #[tokio::test]
    async fn test_replacement_events_flow_through_service() {
        use std::sync::atomic::Ordering;

        let (service, replacement_emitter, _) = make_service();
        let service = service.with_batch_size(2);

        service.replace_document("one two three").await;

        assert!(replacement_emitter.started.load(Ordering::SeqCst));
        assert!(replacement_emitter.completed.load(Ordering::SeqCst));
        let percents = replacement_emitter.recorded_percents();
        assert_eq!(*percents.last().unwrap(), 100);
    }

    #[test]
    fn test_with_settings_applies_batch_size() {
        let (service, _, _) = make_service();
        let settings = Settings {
            batch_size: 7,
            dictionary_url: None,
        };
        let service = service.with_settings(&settings);
        assert_eq!(service.engine.batch_size(), 7);
    }
}
