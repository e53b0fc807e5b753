// Replacement and dictionary events for host notification
// Defines event payloads and emission traits for testability

use serde::Serialize;

/// Event names as constants for consistency
pub mod event_names {
    pub const REPLACEMENT_STARTED: &str = "replacement_started";
    pub const REPLACEMENT_PROGRESS: &str = "replacement_progress";
    pub const REPLACEMENT_COMPLETED: &str = "replacement_completed";
}

/// Dictionary-related event names
pub mod dictionary_events {
    pub const DICTIONARY_UPDATED: &str = "dictionary_updated";

    /// Payload for dictionary_updated event
    #[derive(Debug, Clone, serde::Serialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    pub struct DictionaryUpdatedPayload {
        /// Type of mutation: "load", "import", or "clear"
        pub action: String,
        /// Number of entries in the mapping after the mutation
        pub entry_count: usize,
    }
}

/// Notice-related event names
pub mod notice_events {
    pub const NOTICE_POSTED: &str = "notice_posted";

    /// Severity of a transient, auto-dismissing notice
    #[derive(Debug, Clone, Copy, serde::Serialize, PartialEq, Eq)]
    #[serde(rename_all = "snake_case")]
    pub enum NoticeLevel {
        Success,
        Info,
        Error,
    }

    /// Payload for notice_posted event
    #[derive(Debug, Clone, serde::Serialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    pub struct NoticePayload {
        /// Severity of the notice
        pub level: NoticeLevel,
        /// Human-readable message
        pub message: String,
        /// ISO 8601 timestamp when the notice was posted
        pub timestamp: String,
    }
}

/// Payload for replacement_started event
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReplacementStartedPayload {
    /// ISO 8601 timestamp when the job started
    pub timestamp: String,
}

/// Payload for replacement_progress event
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReplacementProgressPayload {
    /// Share of tokens processed, integer 0-100, non-decreasing per job
    pub percent: u8,
}

/// Payload for replacement_completed event
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReplacementCompletedPayload {
    /// Wall-clock duration of the job in milliseconds
    pub duration_ms: u64,
    /// Number of characters in the assembled output
    pub output_chars: usize,
}

/// Trait for emitting replacement job events
/// Allows mocking in tests while hosts wire in their own event system
pub trait ReplacementEventEmitter: Send + Sync {
    /// Emit replacement_started event
    fn emit_replacement_started(&self, payload: ReplacementStartedPayload);

    /// Emit replacement_progress event
    fn emit_replacement_progress(&self, payload: ReplacementProgressPayload);

    /// Emit replacement_completed event
    fn emit_replacement_completed(&self, payload: ReplacementCompletedPayload);
}

/// Trait for emitting dictionary mutation events
pub trait DictionaryEventEmitter: Send + Sync {
    /// Emit dictionary_updated event
    fn emit_dictionary_updated(&self, payload: dictionary_events::DictionaryUpdatedPayload);
}

/// Trait for emitting transient user notices
///
/// Implementations must not fail: a sink that can error internally (a channel
/// send, a webview bridge) logs and drops the event instead of surfacing the
/// failure, so a misbehaving sink can never abort a replacement job.
pub trait NoticeEventEmitter: Send + Sync {
    /// Emit notice_posted event
    fn emit_notice(&self, payload: notice_events::NoticePayload);
}

/// Emitter that discards every event, for callers without a progress sink
pub struct NoopEmitter;

impl ReplacementEventEmitter for NoopEmitter {
    fn emit_replacement_started(&self, _payload: ReplacementStartedPayload) {}
    fn emit_replacement_progress(&self, _payload: ReplacementProgressPayload) {}
    fn emit_replacement_completed(&self, _payload: ReplacementCompletedPayload) {}
}

impl DictionaryEventEmitter for NoopEmitter {
    fn emit_dictionary_updated(&self, _payload: dictionary_events::DictionaryUpdatedPayload) {}
}

impl NoticeEventEmitter for NoopEmitter {
    fn emit_notice(&self, _payload: notice_events::NoticePayload) {}
}

/// Get the current timestamp in ISO 8601 format
pub fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[cfg(test)]
#[path = "events_test.rs"]
pub(crate) mod tests;
