// wordswap - client-side dictionary text substitution
//
// The core is a batched replacement engine: it tokenizes a document once,
// walks the tokens in fixed-size chunks, substitutes dictionary matches, and
// yields to the scheduler between chunks so arbitrarily large documents never
// monopolize the host's thread.

pub mod dictionary;
pub mod engine;
pub mod events;
pub mod service;
pub mod util;

// Re-export log macros for use throughout the crate
pub use log::{debug, error, info, trace, warn};

pub use dictionary::{
    DictionarySource, DictionaryStore, ExportError, ImportError, SourceError,
};
pub use engine::{ReplacementEngine, Token, TokenKind, Tokenizer, DEFAULT_BATCH_SIZE};
pub use events::{
    DictionaryEventEmitter, NoopEmitter, NoticeEventEmitter, ReplacementEventEmitter,
};
pub use service::ReplacementService;
pub use util::Settings;
