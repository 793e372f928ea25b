//! # DAG Terms
//!
//! A hash-consed representation of first-order logic terms.
//!
//! This crate provides a compact [`Term`] handle for atoms, numbers,
//! variables and compound terms, along with the [`Interner`] that owns
//! every term.  The interner canonicalizes terms by structure: asking for a
//! term that is structurally equal to one already built returns the very
//! same node.  Shared sub-terms are stored once, so the term forest is a
//! directed acyclic graph, and equality of two terms from one interner is
//! a comparison of two small integers.
//!
//! The primary entry points are [`Interner`] (for building canonical
//! terms) and [`Term`] (the user visible handle).  Terms can be matched
//! using the [`Term::view`] method which yields a [`View`] that borrows
//! from the interner.  [`DisjointSet`] is a union-find over term IDs for
//! consumers that track variable bindings.
//!
//! ## Example
//! ```rust
//! # use dag_terms::{Interner, View};
//! let mut interner = Interner::new();
//!
//! // build some leaves
//! let x = interner.var("X");
//! let a = interner.atom("a");
//!
//! // build f(g(X), a) bottom-up
//! let gx = interner.func("g", [x]).unwrap();
//! let term = interner.func("f", [gx, a]).unwrap();
//!
//! // the same shape built again is the same node
//! let gx_again = interner.func("g", [x]).unwrap();
//! assert_eq!(gx, gx_again);
//!
//! // inspect the resulting term
//! if let Ok(View::Compound(ar, functor, args)) = term.view(&interner) {
//!     assert_eq!(functor.name(ar).unwrap(), "f");
//!     assert_eq!(args.len(), 2);
//!     assert_eq!(args[0], gx);
//! }
//! ```
//!
//! ## License
//!
//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0 or
//! (at your option) any later version (LGPL-3.0-or-later).

mod disjoint;
mod error;
mod interner;
mod term;
mod view;

pub use disjoint::DisjointSet;
pub use error::TermError;
pub use interner::{Interner, InternerID, InternerStats};
pub(crate) use term::TermKey;
pub use term::{LeafKind, Term, TermId, TermKind};
pub use view::View;
