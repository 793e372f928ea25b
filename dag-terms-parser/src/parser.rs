//! Parser for first-order logic terms.
//!
//! This module defines the [`TermParser`], a recursive-descent parser over
//! the grammar
//!
//! ```text
//! term     ::= atom | number | variable | compound
//! compound ::= atom '(' args ')'
//! args     ::= term | term ',' args
//! ```
//!
//! The parser consumes tokens from a [`TokenSource`] (by default the
//! [`TermLexer`]) and never allocates terms itself: every leaf and compound
//! it recognizes is handed to the [`Interner`] it owns, which returns the
//! canonical node. The interner persists across calls, so terms parsed
//! from different inputs share nodes whenever they share structure.
//!
//! An atom is tentatively a leaf. The parser looks at the next token: a
//! `(` turns the atom into the functor of a compound term, anything else is
//! pushed back into the single-token lookahead slot. This is the only
//! lookahead the grammar needs.

use crate::{TermLexer, TermParserError, TermToken, TokenKind, TokenSource};
use dag_terms::{Interner, LeafKind, Term};
use std::ops::Range;

/// Default limit on compound nesting.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Parses text into canonical terms.
///
/// A `TermParser` owns its [`Interner`], injected at construction. Repeated
/// calls to [`parse`](Self::parse) reuse that table, so structurally equal
/// terms from any number of inputs come back as identical handles.
///
/// Each call starts a fresh token session with an empty lookahead slot.
/// The parser is single-threaded state; share it across threads only
/// behind external synchronization, or give each thread its own parser.
///
/// ```
/// # use dag_terms_parser::TermParser;
/// let mut parser = TermParser::default();
/// let t1 = parser.parse("f(a,b)").unwrap().unwrap();
/// let t2 = parser.parse("f( a, b )").unwrap().unwrap();
/// assert_eq!(t1, t2);
/// assert_eq!(parser.parse("  ").unwrap(), None);
/// assert!(parser.parse("f()").is_err());
/// ```
#[derive(Debug)]
pub struct TermParser {
    /// Canonicalization table shared by all parses on this instance.
    interner: Interner,

    /// One-token pushback slot.
    lookahead: Option<TermToken>,

    /// Maximum compound nesting accepted.
    max_depth: usize,
}

impl Default for TermParser {
    fn default() -> Self {
        Self::new(Interner::new())
    }
}

impl TermParser {
    /// Creates a parser that interns into `interner`.
    pub fn new(interner: Interner) -> Self {
        Self {
            interner,
            lookahead: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum compound nesting depth. Deeper input fails with
    /// [`TermParserError::TooDeep`] instead of exhausting the stack.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[inline]
    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    #[inline]
    pub fn interner_mut(&mut self) -> &mut Interner {
        &mut self.interner
    }

    #[inline]
    pub fn into_interner(self) -> Interner {
        self.interner
    }

    /// Parses `input` as exactly one term.
    ///
    /// # Returns
    /// - `Ok(Some(term))`: the canonical term for the input;
    /// - `Ok(None)`: the input holds no tokens at all (empty or whitespace);
    /// - `Err(_)`: the input is not a single well-formed term.
    ///
    /// Sub-terms interned before a failure stay in the interner and are
    /// reused by later parses.
    pub fn parse(&mut self, input: &str) -> Result<Option<Term>, TermParserError> {
        log::debug!("parsing {:?}", input);
        self.parse_tokens(TermLexer::new(input))
    }

    /// Parses the tokens of `source` as exactly one term, with the same
    /// contract as [`parse`](Self::parse).
    pub fn parse_tokens<S: TokenSource>(
        &mut self,
        mut source: S,
    ) -> Result<Option<Term>, TermParserError> {
        self.lookahead = None;
        let result = self.parse_input(&mut source);
        self.lookahead = None;
        match &result {
            Ok(Some(term)) => log::debug!("parsed {}", term.id()),
            Ok(None) => log::debug!("empty input"),
            Err(err) => log::debug!("parse failed: {}", err),
        }
        result
    }

    fn parse_input<S: TokenSource>(
        &mut self,
        source: &mut S,
    ) -> Result<Option<Term>, TermParserError> {
        let token = self.next_token(source)?;
        if token.kind == TokenKind::End {
            return Ok(None);
        }
        self.push_back(token);

        let term = self.parse_term(source, 0)?;

        let token = self.next_token(source)?;
        if token.kind != TokenKind::End {
            return Err(TermParserError::TrailingInput {
                found: token.kind,
                span: token.span,
            });
        }
        Ok(Some(term))
    }

    /// term ::= atom | number | variable | compound
    fn parse_term<S: TokenSource>(
        &mut self,
        source: &mut S,
        depth: usize,
    ) -> Result<Term, TermParserError> {
        let token = self.next_token(source)?;
        match token.kind {
            TokenKind::Number => self.leaf(LeafKind::Number, token),
            TokenKind::Var => self.leaf(LeafKind::Var, token),
            TokenKind::Atom => {
                let atom = self.leaf(LeafKind::Atom, token)?;
                let next = self.next_token(source)?;
                if next.kind != TokenKind::LeftParen {
                    self.push_back(next);
                    return Ok(atom);
                }
                if depth >= self.max_depth {
                    return Err(TermParserError::TooDeep {
                        limit: self.max_depth,
                        span: next.span,
                    });
                }
                self.parse_compound(source, atom, next.span, depth + 1)
            }
            found => Err(TermParserError::UnexpectedToken {
                expected: "term",
                found,
                span: token.span,
            }),
        }
    }

    /// compound ::= atom '(' args ')', with the functor and `(` consumed.
    fn parse_compound<S: TokenSource>(
        &mut self,
        source: &mut S,
        functor: Term,
        open: Range<usize>,
        depth: usize,
    ) -> Result<Term, TermParserError> {
        let token = self.next_token(source)?;
        if token.kind == TokenKind::RightParen {
            return Err(TermParserError::EmptyArgs {
                span: open.start..token.span.end,
            });
        }
        self.push_back(token);

        let mut args = vec![self.parse_term(source, depth)?];
        loop {
            let token = self.next_token(source)?;
            match token.kind {
                TokenKind::Comma => args.push(self.parse_term(source, depth)?),
                TokenKind::RightParen => break,
                found => {
                    return Err(TermParserError::UnexpectedToken {
                        expected: "',' or ')'",
                        found,
                        span: token.span,
                    });
                }
            }
        }
        Ok(self.interner.intern_compound(functor, args)?)
    }

    fn leaf(&mut self, kind: LeafKind, token: TermToken) -> Result<Term, TermParserError> {
        let Some(literal) = token.literal else {
            return Err(TermParserError::MissingLiteral {
                found: token.kind,
                span: token.span,
            });
        };
        Ok(self.interner.intern_leaf(kind, literal))
    }

    /// Takes the pushed-back token if there is one, otherwise pulls from
    /// the source.
    #[inline]
    fn next_token<S: TokenSource>(&mut self, source: &mut S) -> Result<TermToken, TermParserError> {
        match self.lookahead.take() {
            Some(token) => Ok(token),
            None => source.next_token(),
        }
    }

    /// Stores `token` to be returned by the next [`next_token`](Self::next_token).
    /// Every caller has just taken a token, so the slot is always free.
    #[inline]
    fn push_back(&mut self, token: TermToken) {
        debug_assert!(self.lookahead.is_none(), "lookahead slot occupied");
        log::trace!("push back {:?}", token.kind);
        self.lookahead = Some(token);
    }
}

/// Unit tests for the [`TermParser`] implementation.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::IterTokens;
    use dag_terms::{TermError, TermId, TermKind, View};
    use proptest::prelude::*;

    fn parser() -> TermParser {
        let _ = env_logger::builder().is_test(true).try_init();
        TermParser::default()
    }

    fn parse_ok(parser: &mut TermParser, s: &str) -> Term {
        parser
            .parse(s)
            .expect("parser error")
            .expect("unexpected empty result")
    }

    #[test]
    fn single_leaves() {
        let p = &mut parser();
        let a = parse_ok(p, "a");
        let n = parse_ok(p, "42");
        let x = parse_ok(p, "X");
        assert_eq!(a.view(p.interner()).unwrap(), View::Atom("a"));
        assert_eq!(n.view(p.interner()).unwrap(), View::Number("42"));
        assert_eq!(x.view(p.interner()).unwrap(), View::Var("X"));
    }

    #[test]
    fn same_input_twice_is_same_node() {
        let p = &mut parser();
        let t1 = parse_ok(p, "f(a,b)");
        let len = p.interner().len();
        let t2 = parse_ok(p, "f(a,b)");
        assert_eq!(t1, t2);
        assert_eq!(p.interner().len(), len);
    }

    #[test]
    fn whitespace_does_not_change_identity() {
        let p = &mut parser();
        let t1 = parse_ok(p, "f(a,b)");
        let t2 = parse_ok(p, "  f( a,\n b ) ");
        assert_eq!(t1, t2);
    }

    #[test]
    fn repeated_arguments_share_one_node() {
        let p = &mut parser();
        let t = parse_ok(p, "f(a,a)");
        let args = t.args(p.interner()).unwrap();
        assert_eq!(args.len(), 2);
        assert_eq!(args[0], args[1]);
        // a, f, f(a, a)
        assert_eq!(p.interner().len(), 3);
    }

    #[test]
    fn grammar_boundary() {
        let p = &mut parser();
        assert!(matches!(
            p.parse("f()"),
            Err(TermParserError::EmptyArgs { span }) if span == (1..3)
        ));
        let t = parse_ok(p, "f(a)");
        assert_eq!(t.arity(p.interner()).unwrap(), 1);
        assert_eq!(p.parse(""), Ok(None));
        assert_eq!(p.parse(" \t\n"), Ok(None));
    }

    #[test]
    fn trailing_content_is_rejected() {
        let p = &mut parser();
        assert_eq!(
            p.parse("a b"),
            Err(TermParserError::TrailingInput {
                found: TokenKind::Atom,
                span: 2..3
            })
        );
        assert!(matches!(
            p.parse("f(a) )"),
            Err(TermParserError::TrailingInput { found: TokenKind::RightParen, .. })
        ));
        assert!(matches!(
            p.parse("X(a)"),
            Err(TermParserError::TrailingInput { found: TokenKind::LeftParen, .. })
        ));
        assert!(matches!(
            p.parse("a,"),
            Err(TermParserError::TrailingInput { found: TokenKind::Comma, .. })
        ));
    }

    #[test]
    fn malformed_structure_is_rejected() {
        let p = &mut parser();
        let cases: &[(&str, TokenKind)] = &[
            ("f(a", TokenKind::End),
            ("f(a,", TokenKind::End),
            ("f(a,)", TokenKind::RightParen),
            ("f(,a)", TokenKind::Comma),
            ("f(a b)", TokenKind::Atom),
            ("(a)", TokenKind::LeftParen),
            (")", TokenKind::RightParen),
            (",", TokenKind::Comma),
            ("f((a))", TokenKind::LeftParen),
        ];
        for &(input, kind) in cases {
            match p.parse(input) {
                Err(TermParserError::UnexpectedToken { found, .. }) => {
                    assert_eq!(found, kind, "input={input}")
                }
                other => panic!("input={input}: unexpected {other:?}"),
            }
        }
        assert!(matches!(
            p.parse("f(a) & g"),
            Err(TermParserError::InvalidToken { .. })
        ));
    }

    #[test]
    fn nested_compounds_share_with_later_parses() {
        let p = &mut parser();
        let t = parse_ok(p, "f(g(X), Y)");
        let interner = p.interner();
        assert_eq!(t.name(interner).unwrap(), "f");
        let args = t.args(interner).unwrap().to_vec();
        assert_eq!(args.len(), 2);
        assert_eq!(args[0].kind(interner).unwrap(), TermKind::Compound);
        assert_eq!(args[0].name(interner).unwrap(), "g");
        assert_eq!(args[1].view(interner).unwrap(), View::Var("Y"));

        let gx = parse_ok(p, "g(X)");
        assert_eq!(gx, args[0]);
    }

    #[test]
    fn functor_is_the_standalone_atom() {
        let p = &mut parser();
        let a = parse_ok(p, "a");
        let ab = parse_ok(p, "a(b)");
        assert!(ab.is_compound(p.interner()));
        assert_eq!(ab.functor(p.interner()).unwrap(), a);
    }

    #[test]
    fn ids_increase_across_parses() {
        let p = &mut parser();
        let first = parse_ok(p, "f(X)");
        assert_eq!(first.id().index(), 2);
        let second = parse_ok(p, "g(X, Y)");
        assert!(second.id() > first.id());
        let ids: Vec<TermId> = p.interner().iter().map(|t| t.id()).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        // f, X, f(X), g, Y, g(X, Y)
        assert_eq!(p.interner().len(), 6);
    }

    #[test]
    fn failed_parse_keeps_interned_subterms() {
        let p = &mut parser();
        assert!(p.parse("f(g(a), )").is_err());
        let ga = p.interner().len();
        assert!(ga > 0);
        let t = parse_ok(p, "g(a)");
        // g(a) was interned during the failed parse and is reused now.
        assert_eq!(p.interner().len(), ga);
        assert!(t.id().index() < ga);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "lookahead slot occupied")]
    fn second_push_back_is_a_bug() {
        let p = &mut parser();
        p.push_back(TermToken::end(0));
        p.push_back(TermToken::end(0));
    }

    #[test]
    fn pushed_back_token_comes_first() {
        let p = &mut parser();
        p.push_back(TermToken::leaf(TokenKind::Atom, "a", 0..1));
        let mut source = IterTokens::new(std::iter::empty::<TermToken>());
        assert_eq!(p.next_token(&mut source).unwrap().kind, TokenKind::Atom);
        assert_eq!(p.next_token(&mut source).unwrap().kind, TokenKind::End);
    }

    #[test]
    fn lookahead_is_reset_between_parses() {
        let p = &mut parser();
        assert!(p.parse("a b").is_err());
        let t = parse_ok(p, "c");
        assert_eq!(t.name(p.interner()).unwrap(), "c");
    }

    #[test]
    fn injected_interner_is_shared() {
        let mut interner = Interner::new();
        let fa = {
            let a = interner.atom("a");
            interner.func("f", [a]).unwrap()
        };
        let mut p = TermParser::new(interner);
        let parsed = parse_ok(&mut p, "f(a)");
        assert_eq!(parsed, fa);

        let interner = p.into_interner();
        assert_eq!(interner.len(), 3);
    }

    #[test]
    fn independent_parsers_do_not_share() {
        let p1 = &mut parser();
        let p2 = &mut parser();
        let t1 = parse_ok(p1, "f(a)");
        let t2 = parse_ok(p2, "f(a)");
        assert_ne!(t1, t2);
        assert!(!t1.belongs_to(p2.interner()));
        assert_eq!(
            t1.view(p1.interner()).unwrap(),
            t2.view(p2.interner()).unwrap()
        );
    }

    #[test]
    fn interner_reset_through_parser() {
        let p = &mut parser();
        let old = parse_ok(p, "f(a)");
        p.interner_mut().clear();
        let new = parse_ok(p, "f(a)");
        assert_eq!(new.id(), old.id());
        assert_ne!(new, old);
        assert!(matches!(
            old.view(p.interner()),
            Err(TermError::InvalidTerm(_))
        ));
    }

    #[test]
    fn depth_limit() {
        let p = &mut TermParser::default().with_max_depth(2);
        assert!(p.parse("f(g(a))").unwrap().is_some());
        assert!(matches!(
            p.parse("f(g(h(a)))"),
            Err(TermParserError::TooDeep { limit: 2, .. })
        ));

        let deep = format!("{}a{}", "f(".repeat(10_000), ")".repeat(10_000));
        let p = &mut parser();
        assert!(matches!(
            p.parse(&deep),
            Err(TermParserError::TooDeep { limit: DEFAULT_MAX_DEPTH, .. })
        ));
    }

    #[test]
    fn leaf_kinds_do_not_collide() {
        // A tokenizer may spell an atom and a number alike; the two must
        // remain distinct nodes.
        let p = &mut parser();
        let atom = p
            .parse_tokens(IterTokens::from(
                [TermToken::leaf(TokenKind::Atom, "1", 0..1)].into_iter(),
            ))
            .unwrap()
            .unwrap();
        let number = parse_ok(p, "1");
        let var = p
            .parse_tokens(IterTokens::from(
                [TermToken::leaf(TokenKind::Var, "1", 0..1)].into_iter(),
            ))
            .unwrap()
            .unwrap();
        assert_ne!(atom, number);
        assert_ne!(atom, var);
        assert_ne!(number, var);
        assert_eq!(atom.kind(p.interner()).unwrap(), TermKind::Atom);
        assert_eq!(number.kind(p.interner()).unwrap(), TermKind::Number);
        assert_eq!(var.kind(p.interner()).unwrap(), TermKind::Var);
    }

    #[test]
    fn custom_token_source() {
        let p = &mut parser();
        let tokens = vec![
            TermToken::leaf(TokenKind::Atom, "p", 0..1),
            TermToken::punct(TokenKind::LeftParen, 1..2),
            TermToken::leaf(TokenKind::Number, "7", 2..3),
            TermToken::punct(TokenKind::RightParen, 3..4),
        ];
        let t = p
            .parse_tokens(IterTokens::from(tokens.into_iter()))
            .unwrap()
            .unwrap();
        assert_eq!(t, parse_ok(p, "p(7)"));

        let missing = vec![TermToken::punct(TokenKind::Atom, 0..1)];
        assert_eq!(
            p.parse_tokens(IterTokens::from(missing.into_iter())),
            Err(TermParserError::MissingLiteral {
                found: TokenKind::Atom,
                span: 0..1
            })
        );
    }

    /// Renders a generated term in the surface syntax.
    #[derive(Debug, Clone)]
    enum Shape {
        Atom(u8),
        Number(u8),
        Var(u8),
        Compound(u8, Vec<Shape>),
    }

    impl Shape {
        fn render(&self, spaced: bool) -> String {
            let sep = if spaced { " , " } else { "," };
            match self {
                Shape::Atom(i) => format!("a{i}"),
                Shape::Number(i) => format!("{i}"),
                Shape::Var(i) => format!("V{i}"),
                Shape::Compound(f, args) => {
                    let args: Vec<String> = args.iter().map(|a| a.render(spaced)).collect();
                    format!("f{f}({})", args.join(sep))
                }
            }
        }
    }

    fn shape_strategy() -> impl Strategy<Value = Shape> {
        let leaf = prop_oneof![
            (0u8..4).prop_map(Shape::Atom),
            (0u8..4).prop_map(Shape::Number),
            (0u8..4).prop_map(Shape::Var),
        ];
        leaf.prop_recursive(4, 32, 3, |inner| {
            ((0u8..3), prop::collection::vec(inner, 1..4))
                .prop_map(|(f, args)| Shape::Compound(f, args))
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

        #[test]
        fn prop_spelling_does_not_change_identity(shape in shape_strategy()) {
            let p = &mut TermParser::default();
            let t1 = p.parse(&shape.render(false)).unwrap().unwrap();
            let len = p.interner().len();
            let t2 = p.parse(&shape.render(true)).unwrap().unwrap();
            prop_assert_eq!(t1, t2);
            prop_assert_eq!(p.interner().len(), len);
        }

        #[test]
        fn prop_distinct_nodes_are_structurally_distinct(
            shapes in prop::collection::vec(shape_strategy(), 1..6)
        ) {
            let p = &mut TermParser::default();
            for shape in &shapes {
                p.parse(&shape.render(false)).unwrap().unwrap();
            }
            let interner = p.interner();
            let all: Vec<Term> = interner.iter().collect();
            for (i, a) in all.iter().enumerate() {
                for b in &all[i + 1..] {
                    prop_assert_ne!(a.view(interner).unwrap(), b.view(interner).unwrap());
                }
            }
        }
    }
}
