//! Lexer module.
//!
//! This module defines [`TermLexer`], the default [`TokenSource`] used by
//! [`TermParser::parse`](crate::TermParser::parse). It is built on top of
//! the [`logos`] crate and uses a declarative token definition
//! (`LogosToken`) to classify input.
//!
//! # Lexical conventions
//! - whitespace (space, tab, CR, LF, form feed) is skipped;
//! - an atom starts with a lowercase letter: `[a-z][a-zA-Z0-9_]*`;
//! - a variable starts with an uppercase letter or underscore:
//!   `[A-Z_][a-zA-Z0-9_]*`;
//! - a number is a run of decimal digits: `[0-9]+`;
//! - `(`, `)` and `,` are punctuation;
//! - anything else is an invalid token.

use crate::{TermParserError, TermToken, TokenKind, TokenSource};
use logos::Logos;

/// Raw tokens recognized by the `logos`-based lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum LogosToken {
    #[regex(r"[a-z][a-zA-Z0-9_]*")]
    Atom,

    #[regex(r"[A-Z_][a-zA-Z0-9_]*")]
    Var,

    #[regex(r"[0-9]+")]
    Number,

    #[token("(")]
    LeftParen,

    #[token(")")]
    RightParen,

    #[token(",")]
    Comma,
}

impl From<LogosToken> for TokenKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Atom => TokenKind::Atom,
            LogosToken::Var => TokenKind::Var,
            LogosToken::Number => TokenKind::Number,
            LogosToken::LeftParen => TokenKind::LeftParen,
            LogosToken::RightParen => TokenKind::RightParen,
            LogosToken::Comma => TokenKind::Comma,
        }
    }
}

/// Tokenizes one input string.
///
/// A lexer is a single forward pass over its input. After the last token
/// it returns [`TokenKind::End`] on every call.
pub struct TermLexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    exhausted: bool,
}

impl<'a> TermLexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            exhausted: false,
        }
    }

    /// The input being tokenized.
    #[inline]
    pub fn source(&self) -> &'a str {
        self.inner.source()
    }
}

impl TokenSource for TermLexer<'_> {
    fn next_token(&mut self) -> Result<TermToken, TermParserError> {
        let end = self.inner.source().len();
        if self.exhausted {
            return Ok(TermToken::end(end));
        }
        let Some(result) = self.inner.next() else {
            self.exhausted = true;
            return Ok(TermToken::end(end));
        };
        let span = self.inner.span();
        let token = match result {
            Ok(raw) => {
                let kind = TokenKind::from(raw);
                if kind.leaf_kind().is_some() {
                    TermToken::leaf(kind, self.inner.slice(), span)
                } else {
                    TermToken::punct(kind, span)
                }
            }
            Err(()) => {
                return Err(TermParserError::InvalidToken {
                    text: self.inner.slice().into(),
                    span,
                });
            }
        };
        log::trace!("token {:?}", token);
        Ok(token)
    }
}
