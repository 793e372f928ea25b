//! # DAG Terms Parser
//!
//! Parses first-order logic terms written as text into canonical
//! [`dag_terms::Term`] handles.
//!
//! The grammar is small:
//!
//! ```text
//! term     ::= atom | number | variable | compound
//! compound ::= atom '(' args ')'
//! args     ::= term | term ',' args
//! ```
//!
//! The pipeline has two stages. A [`TokenSource`] (the [`TermLexer`] by
//! default) turns text into [`TermToken`]s, and the [`TermParser`] reduces
//! those tokens by recursive descent, interning every sub-term as it is
//! recognized. Because the parser owns a persistent [`dag_terms::Interner`],
//! parsing the same term twice, from any input and with any spacing,
//! yields the same node.
//!
//! ## Example
//! ```rust
//! # use dag_terms_parser::TermParser;
//! # use dag_terms::View;
//! let mut parser = TermParser::default();
//! let t = parser.parse("f(g(X), Y)").unwrap().unwrap();
//! let gx = parser.parse("g(X)").unwrap().unwrap();
//! assert_eq!(t.args(parser.interner()).unwrap()[0], gx);
//! assert_eq!(gx.args(parser.interner()).unwrap()[0].view(parser.interner()).unwrap(), View::Var("X"));
//! ```
//!
//! ## License
//!
//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0 or
//! (at your option) any later version (LGPL-3.0-or-later).

pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use error::TermParserError;
pub use lexer::TermLexer;
pub use parser::{DEFAULT_MAX_DEPTH, TermParser};
pub use token::{IterTokens, TermToken, TokenKind, TokenSource};
