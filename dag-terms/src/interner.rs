//! Defines the [`Interner`] type, which owns the canonicalization table
//! for [`Term`] values.
//!
//! Provides leaf and compound constructors that return the existing node
//! for a structural shape or register a new one, plus lookup and
//! inspection utilities for terms stored in the table.

use crate::{LeafKind, Term, TermError, TermId, TermKey, TermKind, View};
use indexmap::IndexSet;
use smartstring::alias::String;
use std::sync::atomic::{AtomicU32, Ordering};

/// The interner owns every term and guarantees that structurally equal
/// terms are one node.
///
/// ### Canonicalization
/// Each term is described by a structural key:
/// - a leaf by its kind and literal text, so `foo` the atom and `foo` the
///   variable never share a node;
/// - a compound by the identities of its functor and arguments, in order.
///
/// Keys live in an insertion-ordered set. A term's [`TermId`] is the
/// position of its key, which makes IDs dense, starting at `0`, and
/// assigned exactly once per new shape. Because a compound key is built
/// from child identities, two compounds are the same node iff their
/// children are the same nodes, and canonicalization composes bottom-up.
///
/// ### Lifetime of handles
/// Terms are created lazily and never destroyed individually. Handles
/// stay valid as long as the interner lives; [`Interner::clear`] drops the
/// whole table at once and invalidates every handle issued before it.
///
/// ```
/// # use dag_terms::Interner;
/// let mut interner = Interner::new();
/// let a = interner.atom("a");
/// let f1 = interner.func("f", [a, a]).unwrap();
/// let f2 = interner.func("f", [a, a]).unwrap();
/// assert_eq!(f1, f2);
/// assert_eq!(interner.len(), 3); // a, f, f(a, a)
/// ```
#[derive(Debug)]
pub struct Interner {
    /// Process-unique identifier, rotated by `clear()`.
    /// Every handle carries the identifier that was current when it was
    /// issued; resolving a handle checks it against this value.
    pub(crate) interner_id: InternerID,

    /// Canonicalization table. The index of a key is the term's ID.
    pub(crate) table: IndexSet<TermKey>,

    /// Number of leaf terms in `table`.
    leaves: usize,
}

/// Identifies one interner generation. No two live interners, and no
/// interner before and after a `clear()`, share an ID within a process.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InternerID(pub(crate) u32);

/// Next interner ID to hand out. `0` is never issued.
static NEXT_INTERNER_ID: AtomicU32 = AtomicU32::new(1);

impl InternerID {
    fn fresh() -> Self {
        // Wraps after 2^32 generations; only then could an ID repeat.
        InternerID(NEXT_INTERNER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InternerStats {
    pub terms: usize,
    pub leaves: usize,
    pub compounds: usize,
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

impl Interner {
    /// Create a new, empty interner with room for `terms` nodes.
    pub fn with_capacity(terms: usize) -> Self {
        Self {
            interner_id: InternerID::fresh(),
            table: IndexSet::with_capacity(terms),
            leaves: 0,
        }
    }

    /// Create a new, empty interner with default capacity.
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Returns the identifier stamped on handles issued by this interner.
    #[inline]
    pub fn id(&self) -> InternerID {
        self.interner_id
    }

    /// Number of canonical terms. This is also the ID the next new term
    /// will receive.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns stats.
    pub fn stats(&self) -> InternerStats {
        InternerStats {
            terms: self.table.len(),
            leaves: self.leaves,
            compounds: self.table.len() - self.leaves,
        }
    }

    /// Drops every term at once and starts numbering again from `0`.
    /// Handles issued before the call are rejected afterwards.
    /// Does not shrink the allocated capacity.
    pub fn clear(&mut self) {
        let old = self.interner_id;
        self.interner_id = InternerID::fresh();
        self.table.clear();
        self.leaves = 0;
        log::debug!("interner {:?} cleared, now {:?}", old, self.interner_id);
    }

    /// Return the canonical leaf of the given kind and literal, registering
    /// it on first request.
    pub fn intern_leaf(&mut self, kind: LeafKind, literal: impl AsRef<str>) -> Term {
        self.intern_key(TermKey::Leaf(kind, String::from(literal.as_ref())))
    }

    /// Return the canonical atom named `name`.
    #[inline]
    pub fn atom(&mut self, name: impl AsRef<str>) -> Term {
        self.intern_leaf(LeafKind::Atom, name)
    }

    /// Return the canonical number spelled `literal`. Numbers are kept as
    /// text; `"01"` and `"1"` are different terms.
    #[inline]
    pub fn number(&mut self, literal: impl AsRef<str>) -> Term {
        self.intern_leaf(LeafKind::Number, literal)
    }

    /// Return the canonical variable named `name`.
    #[inline]
    pub fn var(&mut self, name: impl AsRef<str>) -> Term {
        self.intern_leaf(LeafKind::Var, name)
    }

    /// Return the canonical compound term with the given functor and
    /// arguments, registering it on first request.
    ///
    /// Errors if any handle was not issued by this interner, if `functor`
    /// is not an atom, or if `args` is empty.
    pub fn intern_compound(
        &mut self,
        functor: Term,
        args: impl IntoIterator<Item = Term>,
    ) -> Result<Term, TermError> {
        let args: Box<[Term]> = args.into_iter().collect();
        self.check_compound(&functor, &args)?;
        Ok(self.intern_key(TermKey::Compound(functor, args)))
    }

    /// Construct a compound term from a functor name. The functor is
    /// interned as an atom first, so it shares its node with any
    /// standalone atom of the same name.
    #[inline]
    pub fn func(
        &mut self,
        functor: impl AsRef<str>,
        args: impl IntoIterator<Item = Term>,
    ) -> Result<Term, TermError> {
        let functor = self.atom(functor);
        self.intern_compound(functor, args)
    }

    /// Look up a leaf without registering it.
    pub fn find_leaf(&self, kind: LeafKind, literal: impl AsRef<str>) -> Option<Term> {
        let key = TermKey::Leaf(kind, String::from(literal.as_ref()));
        self.table.get_index_of(&key).map(|index| self.handle(index))
    }

    /// Look up a compound term without registering it. Returns `None` for
    /// shapes that could never be interned.
    pub fn find_compound(&self, functor: Term, args: &[Term]) -> Option<Term> {
        self.check_compound(&functor, args).ok()?;
        let key = TermKey::Compound(functor, args.into());
        self.table.get_index_of(&key).map(|index| self.handle(index))
    }

    /// Returns the handle of the term with the given ID, if it exists.
    #[inline]
    pub fn get(&self, id: TermId) -> Option<Term> {
        (id.index() < self.table.len()).then(|| self.handle(id.index()))
    }

    /// Iterates over all canonical terms in ID order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Term> + '_ {
        (0..self.table.len()).map(|index| self.handle(index))
    }

    /// Produce a [`View`] of the given `term` that borrows from this
    /// interner. See [`View`] for details.
    pub fn view<'a>(&'a self, term: &Term) -> Result<View<'a>, TermError> {
        Ok(match self.key(term)? {
            TermKey::Leaf(LeafKind::Atom, name) => View::Atom(name),
            TermKey::Leaf(LeafKind::Number, literal) => View::Number(literal),
            TermKey::Leaf(LeafKind::Var, name) => View::Var(name),
            TermKey::Compound(functor, args) => View::Compound(self, functor, args),
        })
    }

    /// Resolves a handle to its key, rejecting handles this interner did
    /// not issue.
    #[inline]
    pub(crate) fn key(&self, term: &Term) -> Result<&TermKey, TermError> {
        if term.interner_id != self.interner_id {
            return Err(TermError::InvalidTerm(*term));
        }
        self.table
            .get_index(term.id.index())
            .ok_or(TermError::InvalidTerm(*term))
    }

    #[inline]
    fn handle(&self, index: usize) -> Term {
        Term {
            interner_id: self.interner_id,
            id: TermId(index as u32),
        }
    }

    fn check_compound(&self, functor: &Term, args: &[Term]) -> Result<(), TermError> {
        if self.key(functor)?.kind() != TermKind::Atom {
            return Err(TermError::InvalidFunctor(*functor));
        }
        if args.is_empty() {
            return Err(TermError::MissingArgs);
        }
        for arg in args {
            self.key(arg)?;
        }
        Ok(())
    }

    fn intern_key(&mut self, key: TermKey) -> Term {
        match self.table.get_index_of(&key) {
            Some(index) => self.handle(index),
            None => self.assign_id(key),
        }
    }

    /// Registers a key not yet present in the table. The new term's ID is
    /// the next dense index.
    fn assign_id(&mut self, key: TermKey) -> Term {
        if matches!(key, TermKey::Leaf(..)) {
            self.leaves += 1;
        }
        let (index, inserted) = self.table.insert_full(key);
        debug_assert!(inserted);
        log::trace!(
            "interned {:?} as #{}: {:?}",
            self.interner_id,
            index,
            self.table.get_index(index)
        );
        self.handle(index)
    }
}
