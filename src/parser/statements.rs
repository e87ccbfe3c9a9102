//! Statement parsing implementation
//!
//! # Grammar
//!
//! ```text
//! stmts      ::= stmt stmts | ε
//! stmt       ::= loc '=' bool ';'
//!              | IF '(' bool ')' stmt [ELSE stmt]
//!              | WHILE '(' bool ')' stmt
//!              | block
//! loc        ::= ID locClosure
//! locClosure ::= '[' bool ']' locClosure | ε
//! ```
//!
//! An `else` always attaches to the closest `if` that has not yet seen one.

use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::tree::{nest_list, nest_right, Node};
use tracing::trace;

/// Tokens that can start a statement.
const STMT_FIRST: &[TokenKind] = &[
    TokenKind::LBrace,
    TokenKind::If,
    TokenKind::While,
    TokenKind::Id,
];

impl Parser {
    /// Always yields a `stmts` node; it is empty when no statement follows.
    pub(crate) fn parse_stmts(&mut self) -> Result<Node, ParseError> {
        let mut stmts = Vec::new();
        while self.check_any(STMT_FIRST) {
            stmts.push(self.parse_stmt()?);
        }
        Ok(nest_list(TokenKind::Stmts, stmts))
    }

    pub(crate) fn parse_stmt(&mut self) -> Result<Node, ParseError> {
        trace!(lookahead = %self.current(), "Parsing statement");

        let children = match self.current().kind {
            TokenKind::If => self.parse_if_statement()?,
            TokenKind::While => self.parse_while_statement()?,
            TokenKind::LBrace => vec![self.parse_block()?],
            _ => self.parse_assignment()?,
        };
        Ok(Node::nonterminal(TokenKind::Stmt, children))
    }

    /// IF '(' bool ')' stmt [ELSE stmt]
    fn parse_if_statement(&mut self) -> Result<Vec<Node>, ParseError> {
        let mut children = self.parse_guarded(TokenKind::If)?;
        if self.check(TokenKind::Else) {
            children.push(self.bump());
            children.push(self.parse_stmt()?);
        }
        Ok(children)
    }

    /// WHILE '(' bool ')' stmt
    fn parse_while_statement(&mut self) -> Result<Vec<Node>, ParseError> {
        self.parse_guarded(TokenKind::While)
    }

    /// Shared prefix of `if` and `while`: keyword, parenthesized condition, body.
    fn parse_guarded(&mut self, keyword: TokenKind) -> Result<Vec<Node>, ParseError> {
        Ok(vec![
            self.expect(keyword)?,
            self.expect(TokenKind::LParen)?,
            self.parse_bool()?,
            self.expect(TokenKind::RParen)?,
            self.parse_stmt()?,
        ])
    }

    /// loc '=' bool ';'
    fn parse_assignment(&mut self) -> Result<Vec<Node>, ParseError> {
        Ok(vec![
            self.parse_loc()?,
            self.expect(TokenKind::Assign)?,
            self.parse_bool()?,
            self.expect(TokenKind::Semicolon)?,
        ])
    }

    pub(crate) fn parse_loc(&mut self) -> Result<Node, ParseError> {
        let mut children = vec![self.expect(TokenKind::Id)?];
        children.extend(self.parse_loc_closure()?);
        Ok(Node::nonterminal(TokenKind::Loc, children))
    }

    /// Indexing: `[ bool ]` repeated.
    pub(crate) fn parse_loc_closure(&mut self) -> Result<Option<Node>, ParseError> {
        let mut indices = Vec::new();
        while self.check(TokenKind::LBracket) {
            indices.push(vec![
                self.bump(),
                self.parse_bool()?,
                self.expect(TokenKind::RBracket)?,
            ]);
        }
        Ok(nest_right(TokenKind::LocClosure, indices))
    }
}
