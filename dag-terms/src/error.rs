//! Defines [`TermError`], the unified error type for term operations.
//!
//! Provides descriptive error variants for handles that do not belong to
//! an interner, malformed compound shapes, and kind mismatches.

use crate::Term;
use thiserror::Error;

/// Represents all possible errors that can occur when building or
/// inspecting terms.
///
/// The interner never fails on shapes the parser hands it; these errors
/// surface only when a caller assembles terms by hand or resolves a stale
/// handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TermError {
    /// The handle was issued by another interner, or before a
    /// [`clear`](crate::Interner::clear).
    #[error("Invalid term {0:?}")]
    InvalidTerm(Term),

    /// A compound functor must be an atom.
    #[error("Invalid functor {0:?}")]
    InvalidFunctor(Term),

    /// A compound term needs at least one argument.
    #[error("Compound term without arguments")]
    MissingArgs,

    #[error("Type mismatch: expected {expected}, found {found}")]
    UnexpectedKind {
        expected: &'static str,
        found: &'static str,
    },
}
