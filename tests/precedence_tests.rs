// Operator precedence is carried by tree shape: a tighter operator ends up
// inside the operand of a looser one.

use rdtree::parser::{parse, Node, TokenKind};
use rstest::rstest;

/// The `bool` on the right-hand side of `{ x = <expr> ; }`.
fn assigned(expr: &str) -> Node {
    let source = format!("{{ x = {expr} ; }}");
    let tree = parse(&source).expect("Parsing failed");
    let stmt = tree.find_all(TokenKind::Stmt)[0].clone();
    stmt.children()[2].clone()
}

/// The nonterminal that directly holds the first terminal of kind `op`.
fn holder(tree: &Node, op: TokenKind) -> &Node {
    tree.pre_order()
        .find(|node| {
            node.children()
                .iter()
                .any(|child| child.is_terminal() && child.kind() == op)
        })
        .unwrap_or_else(|| panic!("no {op} in tree"))
}

fn contains(outer: &Node, inner: &Node) -> bool {
    outer.pre_order().any(|node| std::ptr::eq(node, inner))
}

fn depth_of(tree: &Node, op: TokenKind) -> usize {
    fn walk(node: &Node, op: TokenKind, depth: usize) -> Option<usize> {
        if node.is_terminal() && node.kind() == op {
            return Some(depth);
        }
        node.children()
            .iter()
            .find_map(|child| walk(child, op, depth + 1))
    }
    walk(tree, op, 0).unwrap_or_else(|| panic!("no {op} in tree"))
}

#[test]
fn test_multiplication_nested_under_addition() {
    let tree = assigned("1 + 2 * 3");

    let plus = holder(&tree, TokenKind::Plus);
    let star = holder(&tree, TokenKind::Star);
    assert_eq!(plus.kind(), TokenKind::ExprClosure);
    assert_eq!(star.kind(), TokenKind::TermClosure);
    assert!(contains(plus, star));

    // `2 * 3` is the term right of the `+`, one level below it.
    let term = &plus.children()[1];
    assert_eq!(term.kind(), TokenKind::Term);
    assert!(contains(term, star));
    assert!(depth_of(&tree, TokenKind::Star) > depth_of(&tree, TokenKind::Plus));
}

#[test]
fn test_left_multiplication_stays_in_first_term() {
    let tree = assigned("1 * 2 + 3");

    let plus = holder(&tree, TokenKind::Plus);
    let star = holder(&tree, TokenKind::Star);
    assert!(!contains(plus, star));

    let expr = tree.find_all(TokenKind::Expr)[0];
    let first_term = &expr.children()[0];
    assert!(contains(first_term, star));
    assert!(!contains(first_term, plus));
}

#[rstest]
#[case::mul_over_add(TokenKind::Plus, "+", TokenKind::Star, "*")]
#[case::div_over_sub(TokenKind::Minus, "-", TokenKind::Slash, "/")]
#[case::add_over_rel(TokenKind::Lt, "<", TokenKind::Plus, "+")]
#[case::sub_over_rel(TokenKind::Ge, ">=", TokenKind::Minus, "-")]
#[case::rel_over_eq(TokenKind::Eq, "==", TokenKind::Le, "<=")]
#[case::rel_over_ne(TokenKind::Ne, "!=", TokenKind::Gt, ">")]
#[case::eq_over_and(TokenKind::And, "&&", TokenKind::Eq, "==")]
#[case::and_over_or(TokenKind::Or, "||", TokenKind::And, "&&")]
fn test_tighter_operator_on_the_right_is_nested(
    #[case] loose: TokenKind,
    #[case] loose_text: &str,
    #[case] tight: TokenKind,
    #[case] tight_text: &str,
) {
    let tree = assigned(&format!("a {loose_text} b {tight_text} c"));

    let loose_node = holder(&tree, loose);
    let tight_node = holder(&tree, tight);
    assert!(contains(loose_node, tight_node));
    assert!(!contains(tight_node, loose_node));
}

#[rstest]
#[case::mul_over_add(TokenKind::Star, "*", TokenKind::Plus, "+")]
#[case::eq_over_and(TokenKind::Ne, "!=", TokenKind::And, "&&")]
#[case::and_over_or(TokenKind::And, "&&", TokenKind::Or, "||")]
fn test_tighter_operator_on_the_left_is_not_nested(
    #[case] tight: TokenKind,
    #[case] tight_text: &str,
    #[case] loose: TokenKind,
    #[case] loose_text: &str,
) {
    let tree = assigned(&format!("a {tight_text} b {loose_text} c"));

    let loose_node = holder(&tree, loose);
    let tight_node = holder(&tree, tight);
    assert!(!contains(loose_node, tight_node));
    assert!(!contains(tight_node, loose_node));
}

#[test]
fn test_full_cascade_depths() {
    let tree = assigned("a || b && c == d < e + f * g");

    let depths: Vec<_> = [
        TokenKind::Or,
        TokenKind::And,
        TokenKind::Eq,
        TokenKind::Lt,
        TokenKind::Plus,
        TokenKind::Star,
    ]
    .into_iter()
    .map(|op| depth_of(&tree, op))
    .collect();

    assert!(
        depths.windows(2).all(|pair| pair[0] < pair[1]),
        "depths not increasing: {depths:?}"
    );
}

#[test]
fn test_parentheses_override_precedence() {
    let tree = assigned("( 1 + 2 ) * 3");

    let plus = holder(&tree, TokenKind::Plus);
    let star = holder(&tree, TokenKind::Star);
    assert!(!contains(star, plus));
    assert!(depth_of(&tree, TokenKind::Plus) > depth_of(&tree, TokenKind::Star));
}

#[test]
fn test_closures_are_right_recursive() {
    let tree = assigned("a - b - c");

    let first = holder(&tree, TokenKind::Minus);
    assert_eq!(first.kind(), TokenKind::ExprClosure);
    let rest = &first.children()[2];
    assert_eq!(rest.kind(), TokenKind::ExprClosure);
    assert_eq!(rest.children()[0].kind(), TokenKind::Minus);
    assert_eq!(rest.children().len(), 2);
}
