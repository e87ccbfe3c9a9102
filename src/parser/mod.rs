//! Source text parser
//!
//! This module turns whitespace-separated source text into a concrete parse tree:
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`](mod@parse): Parser state, cursor helpers, and the entry point
//! - [`tree`]: Parse tree definition, traversals, and rendering
//!
//! # Parser Implementation
//!
//! Hand-written predictive recursive descent, one method per grammar rule, with
//! a single token of lookahead and no backtracking. Left recursion is avoided
//! with right-recursive closure rules, which also encode operator precedence.
//! The first unexpected token aborts the parse; there is no error recovery.

mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;
pub mod tree;

pub use lexer::{tokenize, Lexer, Token, TokenKind};
pub use parse::{parse, ParseError, Parser};
pub use tree::Node;
