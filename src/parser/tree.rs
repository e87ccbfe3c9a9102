//! Concrete parse tree
//!
//! The tree mirrors the grammar derivation exactly: every nonterminal that was
//! entered becomes a [`Node::NonTerminal`], every consumed word becomes a
//! [`Node::Terminal`]. Closure rules that derived ε leave no node behind.

use crate::parser::lexer::{Token, TokenKind};
use serde::Serialize;
use std::fmt;

/// Spaces per depth level in the rendered tree.
const INDENT: usize = 3;

/// A parse-tree node. Terminals never have children; nonterminals never carry text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Node {
    Terminal(Token),
    NonTerminal { kind: TokenKind, children: Vec<Node> },
}

impl Node {
    pub fn terminal(token: Token) -> Self {
        Node::Terminal(token)
    }

    pub fn nonterminal(kind: TokenKind, children: Vec<Node>) -> Self {
        debug_assert!(kind.is_nonterminal(), "{kind} is not a grammar rule");
        Node::NonTerminal { kind, children }
    }

    pub fn kind(&self) -> TokenKind {
        match self {
            Node::Terminal(token) => token.kind,
            Node::NonTerminal { kind, .. } => *kind,
        }
    }

    /// Literal text of a terminal; `None` for nonterminals.
    pub fn lexeme(&self) -> Option<&str> {
        match self {
            Node::Terminal(token) => Some(token.lexeme.as_str()),
            Node::NonTerminal { .. } => None,
        }
    }

    /// Source line of a terminal; `None` for nonterminals.
    pub fn line(&self) -> Option<usize> {
        match self {
            Node::Terminal(token) => Some(token.line),
            Node::NonTerminal { .. } => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Terminal(_) => &[],
            Node::NonTerminal { children, .. } => children,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Node::Terminal(_))
    }

    /// Iterate over this node and all its descendants in pre-order.
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    /// The terminal yield of the subtree, left to right.
    pub fn terminals(&self) -> impl Iterator<Item = &Token> {
        self.pre_order().filter_map(|node| match node {
            Node::Terminal(token) => Some(token),
            Node::NonTerminal { .. } => None,
        })
    }

    /// All nodes of the given kind, in pre-order.
    pub fn find_all(&self, kind: TokenKind) -> Vec<&Node> {
        self.pre_order().filter(|node| node.kind() == kind).collect()
    }

    /// Total number of nodes in the subtree, including this one.
    pub fn size(&self) -> usize {
        self.pre_order().count()
    }

    /// Indented one-line-per-node dump of the subtree.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(self, 0)];

        while let Some((node, depth)) = stack.pop() {
            out.push_str(&" ".repeat(depth * INDENT));
            out.push_str(node.kind().name());
            if let Some(lexeme) = node.lexeme().filter(|text| !text.is_empty()) {
                out.push_str(" : '");
                out.push_str(lexeme);
                out.push('\'');
            }
            out.push('\n');
            stack.extend(node.children().iter().rev().map(|child| (child, depth + 1)));
        }
        out
    }
}

/// Builds a right-recursive closure chain from its segments, left to right: each
/// segment's children are followed by the node for the remaining segments.
/// No segments means the closure derived ε.
pub(crate) fn nest_right(kind: TokenKind, segments: Vec<Vec<Node>>) -> Option<Node> {
    segments.into_iter().rev().fold(None, |rest, mut children| {
        children.extend(rest);
        Some(Node::nonterminal(kind, children))
    })
}

/// Builds a `decls`/`stmts` list node: `item rest`, ending in an empty node.
pub(crate) fn nest_list(kind: TokenKind, items: Vec<Node>) -> Node {
    items
        .into_iter()
        .rev()
        .fold(Node::nonterminal(kind, Vec::new()), |rest, item| {
            Node::nonterminal(kind, vec![item, rest])
        })
}

/// Right-nested `decls`/`stmts` chains grow one level per item, so children are
/// released from a heap worklist instead of by recursion.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = match self {
            Node::NonTerminal { children, .. } => std::mem::take(children),
            Node::Terminal(_) => return,
        };
        while let Some(mut node) = pending.pop() {
            if let Node::NonTerminal { children, .. } = &mut node {
                pending.append(children);
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Pre-order traversal over a borrowed tree.
pub struct PreOrder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}
