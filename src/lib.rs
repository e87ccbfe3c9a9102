//! # Introduction
//!
//! rdtree recognizes a small C-like statement language and builds its concrete
//! parse tree: declarations, blocks, `if`/`else`, `while`, assignments, and
//! boolean/arithmetic expressions with the usual precedence.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → Parse tree → Renderer
//! ```
//!
//! 1. [`parser::lexer`] splits the input on whitespace and classifies every word.
//! 2. [`parser::parse`](mod@parser::parse) runs the recursive descent and returns either the whole
//!    tree or the first [`parser::ParseError`].
//! 3. [`parser::tree`] holds the owned tree with pre-order traversals and the
//!    indented text dump.
//!
//! ## Grammar
//!
//! ```text
//! program  ::= block
//! block    ::= '{' decls stmts '}'
//! decl     ::= BASIC ('[' NUM ']')* ID ';'
//! stmt     ::= loc '=' bool ';' | IF '(' bool ')' stmt [ELSE stmt]
//!            | WHILE '(' bool ')' stmt | block
//! bool     ::= join ('||' join)*              (and so on down to factor)
//! ```
//!
//! The tree keeps every grammar rule, including the closure helpers used to
//! remove left recursion.

pub mod parser;

pub use parser::{parse, Node, ParseError, Token, TokenKind};
