// Tokenizer - splits text into candidate and separator tokens
//
// Split-and-keep-delimiters: separators (whitespace runs and single
// punctuation characters) become tokens of their own, so concatenating the
// sequence in order reproduces the input byte for byte.

use regex::Regex;

/// Pattern for separator tokens: a whitespace run or one punctuation character
const SEPARATOR_PATTERN: &str = r#"\s+|[.,!?;:"'()\[\]{}—–-]"#;

/// Classification of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Replaceable content: a run of non-whitespace, non-punctuation characters
    Candidate,
    /// Whitespace run or single punctuation character, passed through verbatim
    Separator,
}

/// A substring of the input, in original document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
}

impl Token {
    fn candidate(text: &str) -> Self {
        Self {
            text: text.to_string(),
            kind: TokenKind::Candidate,
        }
    }

    fn separator(text: &str) -> Self {
        Self {
            text: text.to_string(),
            kind: TokenKind::Separator,
        }
    }

    pub fn is_candidate(&self) -> bool {
        self.kind == TokenKind::Candidate
    }
}

/// Splits text on the unified separator pattern, keeping the separators
pub struct Tokenizer {
    separators: Regex,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            // The pattern is a fixed constant; it always compiles
            separators: Regex::new(SEPARATOR_PATTERN).expect("separator pattern is valid"),
        }
    }

    /// Tokenize `text` into an ordered candidate/separator sequence
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut last = 0;

        for found in self.separators.find_iter(text) {
            if found.start() > last {
                tokens.push(Token::candidate(&text[last..found.start()]));
            }
            tokens.push(Token::separator(found.as_str()));
            last = found.end();
        }
        if last < text.len() {
            tokens.push(Token::candidate(&text[last..]));
        }

        tokens
    }

    /// Reassemble a token sequence into text
    pub fn reconstruct(tokens: &[Token]) -> String {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tokenizer_test.rs"]
mod tests;
