//! Defines [`View`], a borrowed read-only representation of a [`Term`].
//!
//! Provides lightweight accessors for inspecting terms without allocation.

use crate::Interner;
use crate::Term;
use core::fmt;

impl fmt::Debug for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self {
            View::Atom(a) => f.debug_tuple("Atom").field(&a).finish(),
            View::Number(n) => f.debug_tuple("Number").field(&n).finish(),
            View::Var(v) => f.debug_tuple("Var").field(&v).finish(),
            View::Compound(a, fr, ts) => f
                .debug_tuple("Compound")
                .field(&fr.view(a))
                .field(&ts.iter().map(|t| t.view(a)).collect::<Vec<_>>())
                .finish(),
        }
    }
}

/// A borrowed view into the interned contents of a [`Term`].
///
/// Use [`Term::view`] to obtain a view.  Each variant of [`View`]
/// represents the decoded form of a term and borrows its data from the
/// [`Interner`].  No allocations are performed when constructing a
/// `View`.
///
/// Views compare structurally, so terms from two different interners can
/// be compared through their views. Within one interner this agrees with
/// handle equality, which is the cheap way to compare. The comparison
/// keeps its own work list and handles terms of any depth.
///
/// `Debug` formats the whole term recursively, so printing a term nested
/// tens of thousands of levels deep can overflow the stack.
#[derive(Clone, Copy)]
pub enum View<'a> {
    /// An atom name.
    Atom(&'a str),
    /// A number, kept as its literal text.
    Number(&'a str),
    /// A variable name.
    Var(&'a str),
    /// A compound term: the owning interner, the functor atom and the
    /// ordered arguments. The argument handles are owned by the interner.
    Compound(&'a Interner, &'a Term, &'a [Term]),
}

impl<'a> View<'a> {
    /// Returns the interner a compound view borrows from.
    #[inline]
    pub fn interner(&self) -> Option<&'a Interner> {
        match self {
            View::Compound(interner, _, _) => Some(*interner),
            _ => None,
        }
    }
}

impl<'a> PartialEq for View<'a> {
    fn eq(&self, other: &Self) -> bool {
        // Explicit work list; nesting depth never grows the call stack.
        let mut pending: Vec<(View<'a>, View<'a>)> = vec![(*self, *other)];
        while let Some(pair) = pending.pop() {
            match pair {
                (View::Atom(a), View::Atom(b))
                | (View::Number(a), View::Number(b))
                | (View::Var(a), View::Var(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (
                    View::Compound(interner_a, functor_a, args_a),
                    View::Compound(interner_b, functor_b, args_b),
                ) => {
                    if core::ptr::eq(interner_a, interner_b) {
                        if functor_a != functor_b || args_a != args_b {
                            return false;
                        }
                        continue;
                    }
                    if args_a.len() != args_b.len() {
                        return false;
                    }
                    let children = core::iter::once((functor_a, functor_b))
                        .chain(args_a.iter().zip(args_b.iter()));
                    for (a, b) in children {
                        // A handle that fails to resolve makes the views unequal.
                        match (a.view(interner_a), b.view(interner_b)) {
                            (Ok(a), Ok(b)) => pending.push((a, b)),
                            _ => return false,
                        }
                    }
                }
                _ => return false,
            }
        }
        true
    }
}

impl<'a> Eq for View<'a> {}
