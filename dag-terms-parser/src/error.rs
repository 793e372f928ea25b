//! # Term Parser Error Type
//!
//! This module defines [`TermParserError`], the error enum for the term
//! parser pipeline. Every variant is a parse failure: the input does not
//! reduce to exactly one term. There is no partial result and no recovery.
//!
//! Note that empty input is *not* an error; the parser reports it as
//! `Ok(None)`.
//!
//! Conversions from [`TermError`] are derived with `#[from]`, enabling
//! propagation via the `?` operator.

use crate::TokenKind;
use dag_terms::TermError;
use smartstring::alias::String;
use std::ops::Range;
use thiserror::Error;

/// Represents all possible errors that can occur within the parser.
///
/// # Examples
/// ```rust
/// # use dag_terms_parser::{TermParser, TermParserError, TokenKind};
/// let mut parser = TermParser::default();
/// let err = parser.parse("a b").unwrap_err();
/// assert!(matches!(
///     err,
///     TermParserError::TrailingInput { found: TokenKind::Atom, .. }
/// ));
/// assert_eq!(err.span(), Some(2..3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TermParserError {
    /// The token source met text it cannot classify.
    #[error("invalid token {text:?} at {span:?}")]
    InvalidToken { text: String, span: Range<usize> },

    /// A leaf token arrived without its literal text.
    #[error("{found} token without literal at {span:?}")]
    MissingLiteral { found: TokenKind, span: Range<usize> },

    /// A token appeared where the grammar forbids it.
    #[error("expected {expected}, found {found} at {span:?}")]
    UnexpectedToken {
        expected: &'static str,
        found: TokenKind,
        span: Range<usize>,
    },

    /// A compound term was written with an empty argument list, `f()`.
    #[error("compound term without arguments at {span:?}")]
    EmptyArgs { span: Range<usize> },

    /// Tokens remain after a complete term.
    #[error("unexpected {found} after complete term at {span:?}")]
    TrailingInput { found: TokenKind, span: Range<usize> },

    /// Compound terms are nested deeper than the parser allows.
    #[error("term nested deeper than {limit} at {span:?}")]
    TooDeep { limit: usize, span: Range<usize> },

    /// Term error.
    #[error("term error {0:?}")]
    Term(#[from] TermError),
}

impl TermParserError {
    /// Byte range of the input the error refers to, when known.
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            TermParserError::InvalidToken { span, .. }
            | TermParserError::MissingLiteral { span, .. }
            | TermParserError::UnexpectedToken { span, .. }
            | TermParserError::EmptyArgs { span }
            | TermParserError::TrailingInput { span, .. }
            | TermParserError::TooDeep { span, .. } => Some(span.clone()),
            TermParserError::Term(_) => None,
        }
    }
}
