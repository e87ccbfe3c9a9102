//! Lexer (tokenizer) for rdtree source text
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Token boundaries are pure whitespace: every whitespace-separated word becomes
//! exactly one token, and adjacent words are never merged (`= =` is two `ASSIGN`
//! tokens, not `==`). Classification never fails; anything unrecognized is an
//! identifier and is left for the parser to reject.

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Every tag a token or a parse-tree node can carry.
///
/// Terminal kinds come first, followed by one tag per grammar nonterminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // Punctuation
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]
    LParen,    // (
    RParen,    // )
    Semicolon, // ;

    // Operators
    Assign, // =
    Eq,     // ==
    Ne,     // !=
    Lt,     // <
    Le,     // <=
    Gt,     // >
    Ge,     // >=
    And,    // &&
    Or,     // ||
    Plus,   // +
    Minus,  // -
    Star,   // *
    Slash,  // /
    Not,    // !

    // Keywords
    If,
    Else,
    While,
    Break,
    Basic,
    True,
    False,

    // Literal shapes
    Id,
    Num,
    Real,

    // End of stream
    Eos,

    // Nonterminals
    Program,
    Block,
    Decls,
    Decl,
    Type,
    TypeClosure,
    Stmts,
    Stmt,
    Loc,
    LocClosure,
    Bool,
    BoolClosure,
    Join,
    JoinClosure,
    Equality,
    EqualityClosure,
    Rel,
    Expr,
    ExprClosure,
    Term,
    TermClosure,
    Unary,
    Factor,
}

impl TokenKind {
    /// Display name used in diagnostics and in the rendered tree.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Eq => "EQ",
            TokenKind::Ne => "NE",
            TokenKind::Lt => "LT",
            TokenKind::Le => "LE",
            TokenKind::Gt => "GT",
            TokenKind::Ge => "GE",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "STAR",
            TokenKind::Slash => "SLASH",
            TokenKind::Not => "NOT",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::Break => "BREAK",
            TokenKind::Basic => "BASIC",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Id => "ID",
            TokenKind::Num => "NUM",
            TokenKind::Real => "REAL",
            TokenKind::Eos => "EOS",
            TokenKind::Program => "program",
            TokenKind::Block => "block",
            TokenKind::Decls => "decls",
            TokenKind::Decl => "decl",
            TokenKind::Type => "type",
            TokenKind::TypeClosure => "typeClosure",
            TokenKind::Stmts => "stmts",
            TokenKind::Stmt => "stmt",
            TokenKind::Loc => "loc",
            TokenKind::LocClosure => "locClosure",
            TokenKind::Bool => "bool",
            TokenKind::BoolClosure => "boolClosure",
            TokenKind::Join => "join",
            TokenKind::JoinClosure => "joinClosure",
            TokenKind::Equality => "equality",
            TokenKind::EqualityClosure => "equalityClosure",
            TokenKind::Rel => "rel",
            TokenKind::Expr => "expr",
            TokenKind::ExprClosure => "exprClosure",
            TokenKind::Term => "term",
            TokenKind::TermClosure => "termClosure",
            TokenKind::Unary => "unary",
            TokenKind::Factor => "factor",
        }
    }

    /// Returns true for tags that label grammar rules rather than input words.
    pub fn is_nonterminal(self) -> bool {
        matches!(
            self,
            TokenKind::Program
                | TokenKind::Block
                | TokenKind::Decls
                | TokenKind::Decl
                | TokenKind::Type
                | TokenKind::TypeClosure
                | TokenKind::Stmts
                | TokenKind::Stmt
                | TokenKind::Loc
                | TokenKind::LocClosure
                | TokenKind::Bool
                | TokenKind::BoolClosure
                | TokenKind::Join
                | TokenKind::JoinClosure
                | TokenKind::Equality
                | TokenKind::EqualityClosure
                | TokenKind::Rel
                | TokenKind::Expr
                | TokenKind::ExprClosure
                | TokenKind::Term
                | TokenKind::TermClosure
                | TokenKind::Unary
                | TokenKind::Factor
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed words with a dedicated kind. Checked before the numeric shapes.
const SYMBOLS: &[(&str, TokenKind)] = &[
    ("int", TokenKind::Basic),
    ("bool", TokenKind::Basic),
    ("double", TokenKind::Basic),
    ("char", TokenKind::Basic),
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("while", TokenKind::While),
    ("break", TokenKind::Break),
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("=", TokenKind::Assign),
    ("==", TokenKind::Eq),
    ("!=", TokenKind::Ne),
    ("<", TokenKind::Lt),
    ("<=", TokenKind::Le),
    (">", TokenKind::Gt),
    (">=", TokenKind::Ge),
    ("&&", TokenKind::And),
    ("||", TokenKind::Or),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Star),
    ("/", TokenKind::Slash),
    ("!", TokenKind::Not),
    ("{", TokenKind::LBrace),
    ("}", TokenKind::RBrace),
    ("[", TokenKind::LBracket),
    ("]", TokenKind::RBracket),
    ("(", TokenKind::LParen),
    (")", TokenKind::RParen),
    (";", TokenKind::Semicolon),
];

/// A single classified word of input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    /// 1-based source line.
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lexeme.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} '{}'", self.kind, self.lexeme)
        }
    }
}

/// Word-level lexer
pub struct Lexer<'a> {
    input: &'a str,
    symbols: FxHashMap<&'static str, TokenKind>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source string.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            symbols: SYMBOLS.iter().copied().collect(),
        }
    }

    /// Tokenize the entire input, terminated by a single `EOS` token on the
    /// line after the last one.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn tokenize(&self) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut line = 1;

        for text in self.input.lines() {
            for word in text.split_ascii_whitespace() {
                tokens.push(Token::new(self.classify(word), word, line));
            }
            line += 1;
        }

        tokens.push(Token::new(TokenKind::Eos, "", line));
        debug!(count = tokens.len(), lines = line - 1, "Tokenized input");
        tokens
    }

    /// Classify one word, independently of its neighbours.
    pub fn classify(&self, word: &str) -> TokenKind {
        if let Some(&kind) = self.symbols.get(word) {
            return kind;
        }
        if is_real(word) {
            return TokenKind::Real;
        }
        if is_num(word) {
            return TokenKind::Num;
        }
        TokenKind::Id
    }
}

/// Convenience wrapper around [`Lexer::tokenize`].
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).tokenize()
}

/// `digits+`
fn is_num(word: &str) -> bool {
    !word.is_empty() && word.bytes().all(|b| b.is_ascii_digit())
}

/// `digits+ '.' digits*`
fn is_real(word: &str) -> bool {
    match word.split_once('.') {
        Some((whole, fraction)) => {
            is_num(whole) && fraction.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = tokenize("{ int x ; x = 5 ; }");

        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::LBrace,
                TokenKind::Basic,
                TokenKind::Id,
                TokenKind::Semicolon,
                TokenKind::Id,
                TokenKind::Assign,
                TokenKind::Num,
                TokenKind::Semicolon,
                TokenKind::RBrace,
                TokenKind::Eos,
            ]
        );
        assert_eq!(tokens[2].lexeme, "x");
        assert_eq!(tokens[6].lexeme, "5");
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("== != <= >= && || < > ! = + - * /"),
            vec![
                TokenKind::Eq,
                TokenKind::Ne,
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Not,
                TokenKind::Assign,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Eos,
            ]
        );
    }

    #[test]
    fn test_split_operators_are_not_merged() {
        assert_eq!(
            kinds("= ="),
            vec![TokenKind::Assign, TokenKind::Assign, TokenKind::Eos]
        );
        // No whitespace means one word, and `x=1` is not a symbol.
        assert_eq!(kinds("x=1"), vec![TokenKind::Id, TokenKind::Eos]);
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("int bool double char if else while break true false"),
            vec![
                TokenKind::Basic,
                TokenKind::Basic,
                TokenKind::Basic,
                TokenKind::Basic,
                TokenKind::If,
                TokenKind::Else,
                TokenKind::While,
                TokenKind::Break,
                TokenKind::True,
                TokenKind::False,
                TokenKind::Eos,
            ]
        );
    }

    #[test]
    fn test_number_shapes() {
        assert_eq!(
            kinds("42 3.14 7. .5 1.2.3 12a"),
            vec![
                TokenKind::Num,
                TokenKind::Real,
                TokenKind::Real,
                TokenKind::Id,
                TokenKind::Id,
                TokenKind::Id,
                TokenKind::Eos,
            ]
        );
    }

    #[test]
    fn test_line_numbers_and_eos() {
        let tokens = tokenize("{\n  int x ;\n\n}");

        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 2);
        assert_eq!(tokens[3].line, 2);
        assert_eq!(tokens[4].line, 4);

        let eos = tokens.last().unwrap();
        assert_eq!(eos.kind, TokenKind::Eos);
        assert_eq!(eos.lexeme, "");
        assert_eq!(eos.line, 5);
    }

    #[test]
    fn test_empty_input() {
        let tokens = tokenize("");
        assert_eq!(tokens, vec![Token::new(TokenKind::Eos, "", 1)]);
    }

    #[test]
    fn test_only_ascii_whitespace_separates_words() {
        let tokens = tokenize("x\u{a0}y \t z\u{2003}1");

        let words: Vec<_> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(words, vec!["x\u{a0}y", "z\u{2003}1", ""]);
        assert_eq!(tokens[0].kind, TokenKind::Id);
        assert_eq!(tokens[1].kind, TokenKind::Id);
    }

    #[test]
    fn test_names_are_distinct_per_family() {
        assert_eq!(TokenKind::LBrace.name(), "LBRACE");
        assert_eq!(TokenKind::TypeClosure.name(), "typeClosure");
        assert!(TokenKind::Factor.is_nonterminal());
        assert!(!TokenKind::Eos.is_nonterminal());
        assert!(!TokenKind::Id.is_nonterminal());
    }
}
