//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, cursor helpers, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser is a predictive recursive descent parser with one token of
//! lookahead. There is one method per grammar nonterminal:
//! - This module: Parser struct, cursor helpers, and the `program` rule
//! - `declarations`: `block`, `decls`, `decl`, `type`, `typeClosure`
//! - `statements`: `stmts`, `stmt`, `loc`, `locClosure`
//! - `expressions`: the precedence cascade from `bool` down to `factor`
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared cursor. The cursor only ever moves forward;
//! alternatives are chosen by checking the lookahead against first sets, and the
//! only failure is [`Parser::expect`] meeting a token of the wrong kind.

use crate::parser::lexer::{Lexer, Token, TokenKind};
use crate::parser::tree::Node;
use tracing::debug;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("token rejected at line {line}: got {found} with lexeme '{lexeme}', was expecting {expected}")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        lexeme: String,
        line: usize,
    },
}

impl ParseError {
    /// Line of the rejected token.
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { line, .. } => *line,
        }
    }
}

/// Recursive descent parser
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        Self::from_tokens(Lexer::new(source).tokenize())
    }

    /// Build a parser over an already tokenized stream.
    ///
    /// An `EOS` token is appended if the stream does not end with one, so the
    /// lookahead is always defined.
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eos) {
            let line = tokens.last().map_or(1, |t| t.line + 1);
            tokens.push(Token::new(TokenKind::Eos, "", line));
        }
        Self {
            tokens,
            position: 0,
        }
    }

    /// program = block
    ///
    /// The whole input must be consumed: anything after the outer block is
    /// rejected as if `EOS` had been expected there.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn parse_program(&mut self) -> Result<Node, ParseError> {
        let block = self.parse_block()?;
        self.expect(TokenKind::Eos)?;

        let program = Node::nonterminal(TokenKind::Program, vec![block]);
        debug!(nodes = program.size(), "Input accepted");
        Ok(program)
    }

    // ===== Cursor helpers =====

    /// The lookahead token.
    pub(crate) fn current(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    pub(crate) fn check_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.current().kind)
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eos)
    }

    /// Consume the lookahead. The cursor stays on `EOS` once it gets there.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.tokens[self.position].clone();
        if !self.is_at_end() {
            self.position += 1;
        }
        token
    }

    /// Consume a lookahead whose kind the caller has already checked.
    pub(crate) fn bump(&mut self) -> Node {
        Node::terminal(self.advance())
    }

    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Node, ParseError> {
        if self.check(kind) {
            Ok(self.bump())
        } else {
            let found = self.current();
            Err(ParseError::UnexpectedToken {
                expected: kind,
                found: found.kind,
                lexeme: found.lexeme.clone(),
                line: found.line,
            })
        }
    }
}

/// Tokenize and parse a complete program.
pub fn parse(source: &str) -> Result<Node, ParseError> {
    Parser::new(source).parse_program()
}
