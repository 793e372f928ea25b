//! Command-line interface (CLI) for the dag-terms parser.
//!
//! This binary wraps the [`TermParser`] and exposes a simple command-line
//! interface for parsing first-order terms into a shared [`Interner`].
//! Every input line is parsed as one term with the same parser, so the
//! printed IDs show which lines denote the same canonical node.
//!
//! [`TermParser`]: dag_terms_parser::TermParser
//! [`Interner`]: dag_terms::Interner

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use dag_terms::{Term, TermId, View};
use dag_terms_parser::{TermParser, TermToken};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::mem;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parses terms, one per line
    Parse {
        /// Input file with terms, or `-` for standard input
        #[arg(short, long, default_value = "-")]
        terms: String,

        /// Maximum compound nesting depth
        #[arg(long, default_value_t = dag_terms_parser::DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
    /// Prints sizes
    Sizes {},
}

fn open(path: &str) -> Result<Box<dyn BufRead>> {
    if path == "-" {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path).with_context(|| format!("cannot open {path}"))?;
    Ok(Box::new(BufReader::new(file)))
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Parse { terms, max_depth } => {
            let input = open(&terms)?;
            let mut parser = TermParser::default().with_max_depth(max_depth);
            for (lineno, line) in input.lines().enumerate() {
                let line = line.with_context(|| format!("cannot read {terms}"))?;
                let lineno = lineno + 1;
                match parser.parse(&line) {
                    Ok(Some(term)) => {
                        let interner = parser.interner();
                        println!(
                            "{lineno}: {} {} = {:?}",
                            term.id(),
                            term.kind(interner)?,
                            term.view(interner)?
                        );
                    }
                    Ok(None) => println!("{lineno}: empty"),
                    Err(err) => println!("{lineno}: error: {err}"),
                }
            }
            let stats = parser.interner().stats();
            println!(
                "terms: {}, leaves: {}, compounds: {}",
                stats.terms, stats.leaves, stats.compounds
            );
        }
        Commands::Sizes {} => {
            println!("Size of Term: {}", mem::size_of::<Term>());
            println!("Size of Option<Term>: {}", mem::size_of::<Option<Term>>());
            println!("Size of TermId: {}", mem::size_of::<TermId>());
            println!("Size of View: {}", mem::size_of::<View<'static>>());
            println!("Size of TermToken: {}", mem::size_of::<TermToken>());
            println!(
                "Size of smartstring String: {}",
                mem::size_of::<smartstring::alias::String>()
            );
            println!(
                "Size of std::string::String: {}",
                mem::size_of::<std::string::String>()
            );
        }
    }

    Ok(())
}
