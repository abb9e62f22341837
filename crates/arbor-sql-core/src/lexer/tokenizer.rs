//! Single-scan, delimiter-split SQL tokenizer.

use super::{Span, Token, TokenKind};

/// Errors raised while scanning the raw SQL text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexicalError {
    /// A `'` literal reached the end of input without a closing quote.
    #[error("unterminated string literal starting at byte {start}")]
    UnterminatedString {
        /// Byte offset of the opening quote.
        start: usize,
    },
}

/// Compound operators recognized as single tokens.
const COMPOUND_OPERATORS: [&str; 3] = ["<=", "<>", ">="];

/// Single-character delimiters. Each becomes its own token; everything
/// between delimiters and whitespace becomes a word token.
const DELIMITERS: [char; 11] = ['%', '(', ')', '*', '+', ',', '-', '.', '/', '<', '='];

/// Remaining delimiter not covered by [`DELIMITERS`] because it also starts
/// two of the compound operators.
const GT: char = '>';

/// A scanner over one SQL string.
///
/// The scan is context-free apart from string-literal mode: a single quote
/// toggles it, and a doubled quote inside a literal is an escaped quote,
/// detected by one character of look-ahead.
pub struct Tokenizer<'a> {
    /// The input source text.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// Start of the pending word, if one is being accumulated.
    word_start: Option<usize>,
    tokens: Vec<Token>,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            word_start: None,
            tokens: Vec::new(),
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the character after the current one without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances past the current character.
    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    /// Flushes the pending word, if any, as a token.
    fn flush_word(&mut self) {
        if let Some(start) = self.word_start.take() {
            let text = &self.input[start..self.pos];
            if !text.is_empty() {
                self.tokens.push(Token::new(
                    String::from(text),
                    TokenKind::Word,
                    Span::new(start, self.pos),
                ));
            }
        }
    }

    /// Emits a symbol token of `len` bytes starting at the current position.
    fn push_symbol(&mut self, len: usize) {
        let start = self.pos;
        let text = &self.input[start..start + len];
        self.tokens.push(Token::new(
            String::from(text),
            TokenKind::Symbol,
            Span::new(start, start + len),
        ));
        self.pos += len;
    }

    /// Scans a `'...'` literal, unescaping doubled quotes.
    fn scan_string(&mut self) -> Result<(), LexicalError> {
        let start = self.pos;
        self.advance(); // opening quote
        let mut value = String::new();

        loop {
            match self.peek() {
                Some('\'') => {
                    if self.peek_next() == Some('\'') {
                        value.push('\'');
                        self.advance();
                        self.advance();
                    } else {
                        self.advance(); // closing quote
                        break;
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
                None => return Err(LexicalError::UnterminatedString { start }),
            }
        }

        self.tokens.push(Token::new(
            value,
            TokenKind::StringLiteral,
            Span::new(start, self.pos),
        ));
        Ok(())
    }

    /// Runs the scan and returns the token sequence.
    ///
    /// # Errors
    ///
    /// Returns a [`LexicalError`] if a string literal is unterminated.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexicalError> {
        while let Some(c) = self.peek() {
            if c == '\'' {
                self.flush_word();
                self.scan_string()?;
            } else if c.is_whitespace() {
                self.flush_word();
                self.advance();
            } else if let Some(op) = COMPOUND_OPERATORS
                .iter()
                .find(|op| self.input[self.pos..].starts_with(**op))
            {
                self.flush_word();
                self.push_symbol(op.len());
            } else if c == GT || DELIMITERS.contains(&c) {
                self.flush_word();
                self.push_symbol(c.len_utf8());
            } else {
                if self.word_start.is_none() {
                    self.word_start = Some(self.pos);
                }
                self.advance();
            }
        }
        // Trailing content after the last delimiter.
        self.flush_word();

        tracing::trace!(tokens = self.tokens.len(), "tokenized statement");
        Ok(self.tokens)
    }
}

/// Tokenizes one SQL string.
///
/// # Errors
///
/// Returns a [`LexicalError`] if a string literal is unterminated.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexicalError> {
    Tokenizer::new(input).tokenize()
}
