//! Expression parsing implementation
//!
//! Operator precedence is encoded in the shape of the grammar rather than in a
//! table. Each level parses its operand with the next tighter level and hands
//! the rest to a right-recursive closure rule:
//!
//! ```text
//! bool     ::= join boolClosure           boolClosure     ::= '||' join boolClosure | ε
//! join     ::= equality joinClosure       joinClosure     ::= '&&' equality joinClosure | ε
//! equality ::= rel equalityClosure        equalityClosure ::= ('=='|'!=') rel equalityClosure | ε
//! rel      ::= expr [('<'|'<='|'>='|'>') expr]
//! expr     ::= term exprClosure           exprClosure     ::= ('+'|'-') term exprClosure | ε
//! term     ::= unary termClosure          termClosure     ::= ('*'|'/') unary termClosure | ε
//! unary    ::= ('!'|'-') unary | factor
//! factor   ::= '(' bool ')' | loc | NUM | REAL | TRUE | FALSE
//! ```
//!
//! Relational operators do not chain: `a < b < c` stops after `a < b`.

use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::tree::{nest_right, Node};
use tracing::trace;

const OR_OPS: &[TokenKind] = &[TokenKind::Or];
const AND_OPS: &[TokenKind] = &[TokenKind::And];
const EQUALITY_OPS: &[TokenKind] = &[TokenKind::Eq, TokenKind::Ne];
const REL_OPS: &[TokenKind] = &[TokenKind::Lt, TokenKind::Le, TokenKind::Ge, TokenKind::Gt];
const ADD_OPS: &[TokenKind] = &[TokenKind::Plus, TokenKind::Minus];
const MUL_OPS: &[TokenKind] = &[TokenKind::Star, TokenKind::Slash];
const UNARY_OPS: &[TokenKind] = &[TokenKind::Not, TokenKind::Minus];
const LITERALS: &[TokenKind] = &[
    TokenKind::Num,
    TokenKind::Real,
    TokenKind::True,
    TokenKind::False,
];

type Rule = fn(&mut Parser) -> Result<Node, ParseError>;
type Closure = fn(&mut Parser) -> Result<Option<Node>, ParseError>;

impl Parser {
    pub(crate) fn parse_bool(&mut self) -> Result<Node, ParseError> {
        self.parse_level(TokenKind::Bool, Parser::parse_join, Parser::parse_bool_closure)
    }

    pub(crate) fn parse_bool_closure(&mut self) -> Result<Option<Node>, ParseError> {
        self.parse_closure(TokenKind::BoolClosure, OR_OPS, Parser::parse_join)
    }

    pub(crate) fn parse_join(&mut self) -> Result<Node, ParseError> {
        self.parse_level(
            TokenKind::Join,
            Parser::parse_equality,
            Parser::parse_join_closure,
        )
    }

    pub(crate) fn parse_join_closure(&mut self) -> Result<Option<Node>, ParseError> {
        self.parse_closure(TokenKind::JoinClosure, AND_OPS, Parser::parse_equality)
    }

    pub(crate) fn parse_equality(&mut self) -> Result<Node, ParseError> {
        self.parse_level(
            TokenKind::Equality,
            Parser::parse_rel,
            Parser::parse_equality_closure,
        )
    }

    pub(crate) fn parse_equality_closure(&mut self) -> Result<Option<Node>, ParseError> {
        self.parse_closure(TokenKind::EqualityClosure, EQUALITY_OPS, Parser::parse_rel)
    }

    /// At most one relational operator; the right operand is a plain `expr`.
    pub(crate) fn parse_rel(&mut self) -> Result<Node, ParseError> {
        let mut children = vec![self.parse_expr()?];
        if self.check_any(REL_OPS) {
            children.push(self.bump());
            children.push(self.parse_expr()?);
        }
        Ok(Node::nonterminal(TokenKind::Rel, children))
    }

    pub(crate) fn parse_expr(&mut self) -> Result<Node, ParseError> {
        self.parse_level(TokenKind::Expr, Parser::parse_term, Parser::parse_expr_closure)
    }

    pub(crate) fn parse_expr_closure(&mut self) -> Result<Option<Node>, ParseError> {
        self.parse_closure(TokenKind::ExprClosure, ADD_OPS, Parser::parse_term)
    }

    pub(crate) fn parse_term(&mut self) -> Result<Node, ParseError> {
        self.parse_level(TokenKind::Term, Parser::parse_unary, Parser::parse_term_closure)
    }

    pub(crate) fn parse_term_closure(&mut self) -> Result<Option<Node>, ParseError> {
        self.parse_closure(TokenKind::TermClosure, MUL_OPS, Parser::parse_unary)
    }

    pub(crate) fn parse_unary(&mut self) -> Result<Node, ParseError> {
        let children = if self.check_any(UNARY_OPS) {
            vec![self.bump(), self.parse_unary()?]
        } else {
            vec![self.parse_factor()?]
        };
        Ok(Node::nonterminal(TokenKind::Unary, children))
    }

    pub(crate) fn parse_factor(&mut self) -> Result<Node, ParseError> {
        let children = if self.check(TokenKind::LParen) {
            vec![
                self.bump(),
                self.parse_bool()?,
                self.expect(TokenKind::RParen)?,
            ]
        } else if self.check_any(LITERALS) {
            vec![self.bump()]
        } else {
            vec![self.parse_loc()?]
        };
        Ok(Node::nonterminal(TokenKind::Factor, children))
    }

    // ===== Shared shapes =====

    /// `level ::= operand closure`
    fn parse_level(
        &mut self,
        kind: TokenKind,
        operand: Rule,
        closure: Closure,
    ) -> Result<Node, ParseError> {
        let mut children = vec![operand(self)?];
        children.extend(closure(self)?);
        Ok(Node::nonterminal(kind, children))
    }

    /// `closure ::= op operand closure | ε`, continued while the lookahead is in `ops`.
    fn parse_closure(
        &mut self,
        kind: TokenKind,
        ops: &[TokenKind],
        operand: Rule,
    ) -> Result<Option<Node>, ParseError> {
        let mut segments = Vec::new();
        while self.check_any(ops) {
            trace!(rule = %kind, op = %self.current(), "Closure continues");
            segments.push(vec![self.bump(), operand(self)?]);
        }
        Ok(nest_right(kind, segments))
    }
}
