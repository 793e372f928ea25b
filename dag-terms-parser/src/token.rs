//! # Term Parser Tokens
//!
//! Concrete token type and the token-stream contract used by the parser.
//!
//! Provides:
//! - [`TokenKind`]: the closed set of token kinds the grammar knows,
//! - [`TermToken`]: a token pairing a kind, an optional literal, and the
//!   byte span it was recognized at,
//! - [`TokenSource`]: the forward-only stream the parser pulls tokens from,
//! - [`IterTokens`]: an adapter turning any token iterator into a source.
//!
//! These are produced by the lexer (or any other tokenizer) and consumed
//! by the parser.

use crate::TermParserError;
use core::fmt;
use dag_terms::LeafKind;
use smartstring::alias::String;
use std::ops::Range;

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Atom,
    Number,
    Var,
    LeftParen,
    RightParen,
    Comma,
    /// End of input. A source keeps returning it once exhausted.
    End,
}

impl TokenKind {
    /// The leaf kind a token of this kind denotes, if any.
    #[inline]
    pub fn leaf_kind(self) -> Option<LeafKind> {
        match self {
            TokenKind::Atom => Some(LeafKind::Atom),
            TokenKind::Number => Some(LeafKind::Number),
            TokenKind::Var => Some(LeafKind::Var),
            _ => None,
        }
    }

    /// Human-readable description used in error messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Atom => "atom",
            TokenKind::Number => "number",
            TokenKind::Var => "variable",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::Comma => "','",
            TokenKind::End => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A token produced by a [`TokenSource`].
///
/// Each [`TermToken`] encapsulates:
/// - the syntactic token kind (`kind`),
/// - the literal text for atoms, numbers and variables (`literal`), and
/// - the byte range of the input it was recognized at (`span`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermToken {
    pub kind: TokenKind,
    /// Literal text; present for [`TokenKind::Atom`], [`TokenKind::Number`]
    /// and [`TokenKind::Var`].
    pub literal: Option<String>,
    /// Byte range in the input.
    pub span: Range<usize>,
}

impl TermToken {
    /// Creates a token carrying literal text.
    #[must_use]
    pub fn leaf(kind: TokenKind, literal: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            kind,
            literal: Some(literal.into()),
            span,
        }
    }

    /// Creates a punctuation token, which carries no literal.
    #[must_use]
    pub fn punct(kind: TokenKind, span: Range<usize>) -> Self {
        Self {
            kind,
            literal: None,
            span,
        }
    }

    /// Creates the end-of-input token at byte offset `at`.
    #[must_use]
    pub fn end(at: usize) -> Self {
        Self::punct(TokenKind::End, at..at)
    }
}

/// A forward-only stream of tokens.
///
/// Implementations return [`TokenKind::End`] at exhaustion rather than
/// failing, and keep returning it on further calls. Input that cannot be
/// tokenized is reported as an error, which the parser propagates as a
/// parse failure.
pub trait TokenSource {
    fn next_token(&mut self) -> Result<TermToken, TermParserError>;
}

impl<S: TokenSource + ?Sized> TokenSource for &mut S {
    #[inline]
    fn next_token(&mut self) -> Result<TermToken, TermParserError> {
        (**self).next_token()
    }
}

/// Adapts an iterator of tokens into a [`TokenSource`].
///
/// Once the iterator is exhausted the source yields [`TokenKind::End`]
/// positioned after the last token seen.
#[derive(Debug, Clone)]
pub struct IterTokens<I> {
    iter: I,
    offset: usize,
}

impl<I> IterTokens<I> {
    pub fn new(iter: I) -> Self {
        Self { iter, offset: 0 }
    }
}

impl<I: Iterator<Item = TermToken>> From<I> for IterTokens<I> {
    fn from(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<I: Iterator<Item = TermToken>> TokenSource for IterTokens<I> {
    fn next_token(&mut self) -> Result<TermToken, TermParserError> {
        match self.iter.next() {
            Some(token) => {
                self.offset = token.span.end;
                Ok(token)
            }
            None => Ok(TermToken::end(self.offset)),
        }
    }
}
