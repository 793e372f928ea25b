//! Defines the core [`Term`] handle, its identifiers, and the structural
//! keys used to canonicalize terms.
//!
//! A `Term` never owns data. It names one canonical node stored in an
//! [`Interner`], and two handles compare equal exactly when they name the
//! same node. Equality and hashing on `Term` are therefore O(1) identity
//! operations, which is what makes the term forest a DAG.

use crate::{Interner, InternerID, TermError, View};
use core::fmt;
use smartstring::alias::String;

/// Dense integer identity of a term within one [`Interner`].
///
/// IDs start at `0` and grow by exactly one for every newly registered
/// term, independent of its kind. An ID is assigned once, when the
/// structural shape is first requested, and is never reused while the
/// interner lives (see [`Interner::clear`] for the one reset point).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TermId(pub(crate) u32);

impl TermId {
    /// Returns the ID as a table index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<TermId> for u32 {
    #[inline]
    fn from(id: TermId) -> Self {
        id.0
    }
}

impl From<TermId> for usize {
    #[inline]
    fn from(id: TermId) -> Self {
        id.index()
    }
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The kind of a leaf term. Leaves are keyed on `(kind, literal)`, so an
/// atom `x` and a variable `x` are distinct nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LeafKind {
    Atom,
    Number,
    Var,
}

/// The kind of any term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TermKind {
    Atom,
    Number,
    Var,
    Compound,
}

impl TermKind {
    /// Stable lowercase name, used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            TermKind::Atom => "atom",
            TermKind::Number => "number",
            TermKind::Var => "var",
            TermKind::Compound => "compound",
        }
    }
}

impl From<LeafKind> for TermKind {
    #[inline]
    fn from(kind: LeafKind) -> Self {
        match kind {
            LeafKind::Atom => TermKind::Atom,
            LeafKind::Number => TermKind::Number,
            LeafKind::Var => TermKind::Var,
        }
    }
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Structural key of a canonical term.
///
/// The key doubles as the node itself: the interner stores keys in an
/// insertion-ordered set, and a term's [`TermId`] is the key's position in
/// that set. Compound keys hold the handles of their functor and arguments,
/// so they are determined by child identities rather than by spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum TermKey {
    Leaf(LeafKind, String),
    Compound(Term, Box<[Term]>),
}

impl TermKey {
    #[inline]
    pub(crate) fn kind(&self) -> TermKind {
        match self {
            TermKey::Leaf(kind, _) => (*kind).into(),
            TermKey::Compound(..) => TermKind::Compound,
        }
    }
}

/// A compact, copyable handle referencing a canonical term stored in an
/// [`Interner`].
///
/// A handle carries the identifier of the interner that issued it and the
/// term's [`TermId`]. Handles are only obtained from the interner (directly
/// or through a parser); every accessor takes the interner and rejects
/// handles it did not issue with [`TermError::InvalidTerm`].
///
/// Two handles are equal iff they denote the same node. Because the
/// interner never stores two structurally equal terms, handle equality is
/// also structural equality for terms of one interner.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Term {
    pub(crate) interner_id: InternerID,
    pub(crate) id: TermId,
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Term").field(&self.id.0).finish()
    }
}

impl Term {
    /// Returns the term's identity within its interner.
    #[inline]
    pub fn id(&self) -> TermId {
        self.id
    }

    /// Returns `true` if this handle was issued by `interner` and is still
    /// valid there.
    #[inline]
    pub fn belongs_to(&self, interner: &Interner) -> bool {
        interner.key(self).is_ok()
    }

    /// Returns the kind of the term.
    #[inline]
    pub fn kind(&self, interner: &Interner) -> Result<TermKind, TermError> {
        Ok(interner.key(self)?.kind())
    }

    /// Returns the stable kind name (`"atom"`, `"number"`, `"var"`,
    /// `"compound"`).
    #[inline]
    pub fn kind_name(&self, interner: &Interner) -> Result<&'static str, TermError> {
        Ok(self.kind(interner)?.name())
    }

    #[inline]
    pub fn is_atom(&self, interner: &Interner) -> bool {
        matches!(self.kind(interner), Ok(TermKind::Atom))
    }

    #[inline]
    pub fn is_number(&self, interner: &Interner) -> bool {
        matches!(self.kind(interner), Ok(TermKind::Number))
    }

    #[inline]
    pub fn is_var(&self, interner: &Interner) -> bool {
        matches!(self.kind(interner), Ok(TermKind::Var))
    }

    #[inline]
    pub fn is_compound(&self, interner: &Interner) -> bool {
        matches!(self.kind(interner), Ok(TermKind::Compound))
    }

    /// Returns the literal text of a leaf (atom, number or variable).
    pub fn literal<'a>(&self, interner: &'a Interner) -> Result<&'a str, TermError> {
        match interner.key(self)? {
            TermKey::Leaf(_, literal) => Ok(literal.as_str()),
            TermKey::Compound(..) => Err(TermError::UnexpectedKind {
                expected: "atom, number, var",
                found: TermKind::Compound.name(),
            }),
        }
    }

    /// Returns the literal of a leaf, or the functor name of a compound
    /// term.
    pub fn name<'a>(&self, interner: &'a Interner) -> Result<&'a str, TermError> {
        match interner.key(self)? {
            TermKey::Leaf(_, literal) => Ok(literal.as_str()),
            TermKey::Compound(functor, _) => functor.literal(interner),
        }
    }

    /// Returns the functor atom of a compound term.
    pub fn functor(&self, interner: &Interner) -> Result<Term, TermError> {
        match interner.key(self)? {
            TermKey::Compound(functor, _) => Ok(*functor),
            key => Err(TermError::UnexpectedKind {
                expected: "compound",
                found: key.kind().name(),
            }),
        }
    }

    /// Returns the ordered arguments of a compound term.
    pub fn args<'a>(&self, interner: &'a Interner) -> Result<&'a [Term], TermError> {
        match interner.key(self)? {
            TermKey::Compound(_, args) => Ok(args),
            key => Err(TermError::UnexpectedKind {
                expected: "compound",
                found: key.kind().name(),
            }),
        }
    }

    /// Returns the number of arguments; leaves have arity zero.
    pub fn arity(&self, interner: &Interner) -> Result<usize, TermError> {
        match interner.key(self)? {
            TermKey::Leaf(..) => Ok(0),
            TermKey::Compound(_, args) => Ok(args.len()),
        }
    }

    /// Produce a [`View`] of this term borrowing from `interner`.
    #[inline]
    pub fn view<'a>(&self, interner: &'a Interner) -> Result<View<'a>, TermError> {
        interner.view(self)
    }
}
