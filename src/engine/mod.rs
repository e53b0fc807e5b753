// Replacement engine module - tokenization and the batched chunk loop

mod replacer;
mod tokenizer;

pub use replacer::{ReplacementEngine, DEFAULT_BATCH_SIZE};
pub use tokenizer::{Token, TokenKind, Tokenizer};
