//! Block and declaration parsing
//!
//! # Grammar
//!
//! ```text
//! block       ::= '{' decls stmts '}'
//! decls       ::= decl decls | ε
//! decl        ::= type ID ';'
//! type        ::= BASIC typeClosure
//! typeClosure ::= '[' NUM ']' typeClosure | ε
//! ```
//!
//! Declarations must all come before the first statement of a block; once
//! `stmts` has started, a `BASIC` word can only be a syntax error.

use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::tree::{nest_list, nest_right, Node};

impl Parser {
    pub(crate) fn parse_block(&mut self) -> Result<Node, ParseError> {
        let open = self.expect(TokenKind::LBrace)?;
        let decls = self.parse_decls()?;
        let stmts = self.parse_stmts()?;
        let close = self.expect(TokenKind::RBrace)?;

        Ok(Node::nonterminal(
            TokenKind::Block,
            vec![open, decls, stmts, close],
        ))
    }

    /// Always yields a `decls` node; it is empty when no declaration follows.
    pub(crate) fn parse_decls(&mut self) -> Result<Node, ParseError> {
        let mut decls = Vec::new();
        while self.check(TokenKind::Basic) {
            decls.push(self.parse_decl()?);
        }
        Ok(nest_list(TokenKind::Decls, decls))
    }

    pub(crate) fn parse_decl(&mut self) -> Result<Node, ParseError> {
        let ty = self.parse_type()?;
        let name = self.expect(TokenKind::Id)?;
        let semi = self.expect(TokenKind::Semicolon)?;

        Ok(Node::nonterminal(TokenKind::Decl, vec![ty, name, semi]))
    }

    pub(crate) fn parse_type(&mut self) -> Result<Node, ParseError> {
        let mut children = vec![self.expect(TokenKind::Basic)?];
        children.extend(self.parse_type_closure()?);
        Ok(Node::nonterminal(TokenKind::Type, children))
    }

    /// Array dimensions: `[ NUM ]` repeated.
    pub(crate) fn parse_type_closure(&mut self) -> Result<Option<Node>, ParseError> {
        let mut dimensions = Vec::new();
        while self.check(TokenKind::LBracket) {
            dimensions.push(vec![
                self.bump(),
                self.expect(TokenKind::Num)?,
                self.expect(TokenKind::RBracket)?,
            ]);
        }
        Ok(nest_right(TokenKind::TypeClosure, dimensions))
    }
}
