// Batched replacement engine - walks the token sequence in fixed-size chunks,
// substituting dictionary matches, and yields to the scheduler between chunks
// so one invocation never blocks the thread for more than a chunk's work.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::dictionary::DictionaryStore;
use crate::events::{
    current_timestamp, ReplacementCompletedPayload, ReplacementEventEmitter,
    ReplacementProgressPayload, ReplacementStartedPayload,
};

use super::tokenizer::{Token, Tokenizer};

/// Default number of tokens processed per scheduler turn
///
/// A responsiveness knob, not a correctness constant: the output is identical
/// for any batch size.
pub const DEFAULT_BATCH_SIZE: usize = 2000;

/// Transient state for one replacement invocation
///
/// The output sequence is parallel to the token sequence; when the cursor
/// reaches the end, joining the output in order yields the result document.
struct ReplacementJob {
    tokens: Vec<Token>,
    output: Vec<String>,
    cursor: usize,
}

impl ReplacementJob {
    fn new(tokens: Vec<Token>) -> Self {
        let total = tokens.len();
        Self {
            tokens,
            output: Vec::with_capacity(total),
            cursor: 0,
        }
    }

    fn total(&self) -> usize {
        self.tokens.len()
    }

    fn is_done(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    /// Process up to `batch_size` tokens against `mapping`
    fn process_chunk(&mut self, batch_size: usize, mapping: &HashMap<String, String>) {
        let end = (self.cursor + batch_size).min(self.tokens.len());
        for token in &self.tokens[self.cursor..end] {
            self.output.push(substitute(token, mapping));
        }
        self.cursor = end;
    }

    /// Share of tokens processed so far, rounded to the nearest percent
    fn percent(&self) -> u8 {
        ((self.cursor as f64 / self.tokens.len() as f64) * 100.0).round() as u8
    }

    /// Concatenate the output sequence in original order
    fn finish(self) -> String {
        self.output.concat()
    }
}

/// Apply the mapping to a single token
///
/// Separators pass through verbatim. A candidate whose trimmed text is a
/// dictionary key gets the first occurrence of that key replaced, preserving
/// any surrounding characters the token might carry (with the current
/// separator set a candidate is always exactly its trimmed key, so this is
/// observationally a full-token replace).
fn substitute(token: &Token, mapping: &HashMap<String, String>) -> String {
    if !token.is_candidate() {
        return token.text.clone();
    }
    let key = token.text.trim();
    if key.is_empty() {
        return token.text.clone();
    }
    match mapping.get(key) {
        Some(value) => token.text.replacen(key, value, 1),
        None => token.text.clone(),
    }
}

/// Engine transforming input text via the dictionary store, chunk by chunk
///
/// The engine only reads the store. By default each chunk looks up against
/// the mapping current at that moment, so a long job may observe a reload
/// between chunks; `with_mapping_snapshot(true)` pins the mapping at
/// invocation start instead.
pub struct ReplacementEngine {
    store: Arc<DictionaryStore>,
    tokenizer: Tokenizer,
    batch_size: usize,
    snapshot_mapping: bool,
}

impl ReplacementEngine {
    /// Create an engine reading from the given store
    pub fn new(store: Arc<DictionaryStore>) -> Self {
        Self {
            store,
            tokenizer: Tokenizer::new(),
            batch_size: DEFAULT_BATCH_SIZE,
            snapshot_mapping: false,
        }
    }

    /// Set the number of tokens processed per chunk (builder pattern), minimum 1
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Pin the mapping at invocation start instead of per-chunk reads
    /// (builder pattern)
    pub fn with_mapping_snapshot(mut self, snapshot: bool) -> Self {
        self.snapshot_mapping = snapshot;
        self
    }

    /// Tokens processed per scheduler turn
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Replace every dictionary key occurrence in `text`
    ///
    /// Suspends at each chunk boundary, reporting progress as an integer
    /// 0-100 after every chunk; the final report is exactly 100. Empty input
    /// resolves immediately to an empty result without emitting anything.
    /// Any string is valid input; this method has no failure states.
    pub async fn replace<E: ReplacementEventEmitter>(&self, text: &str, emitter: &E) -> String {
        if text.is_empty() {
            return String::new();
        }

        let start_time = Instant::now();
        let mut job = ReplacementJob::new(self.tokenizer.tokenize(text));

        emitter.emit_replacement_started(ReplacementStartedPayload {
            timestamp: current_timestamp(),
        });
        crate::debug!(
            "Replacement job started: {} tokens in chunks of {}",
            job.total(),
            self.batch_size
        );

        let pinned = if self.snapshot_mapping {
            Some(self.store.snapshot())
        } else {
            None
        };

        while !job.is_done() {
            let mapping = match &pinned {
                Some(mapping) => Arc::clone(mapping),
                None => self.store.snapshot(),
            };
            job.process_chunk(self.batch_size, &mapping);
            emitter.emit_replacement_progress(ReplacementProgressPayload {
                percent: job.percent(),
            });
            // Hand control back to the scheduler before the next chunk
            tokio::task::yield_now().await;
        }

        let result = job.finish();
        let duration_ms = start_time.elapsed().as_millis() as u64;
        crate::debug!("Replacement job completed in {}ms", duration_ms);
        emitter.emit_replacement_completed(ReplacementCompletedPayload {
            duration_ms,
            output_chars: result.chars().count(),
        });
        result
    }
}

#[cfg(test)]
#[path = "replacer_test.rs"]
mod tests;
