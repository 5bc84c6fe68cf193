//! Parser tests

use crate::ast::{Node, NodeKind, Span};
use crate::error::CompileError;
use crate::parser::parse_source;

fn parse_ok(source: &str) -> Node {
    parse_source("test.lisp", source).expect("Parse should succeed")
}

fn parse_fails(source: &str) -> bool {
    parse_source("test.lisp", source).is_err()
}

fn expr_kinds(node: &Node) -> Vec<NodeKind> {
    node.exprs().map(|n| n.kind).collect()
}

#[test]
fn test_parse_empty_input() {
    let root = parse_ok("");
    assert_eq!(root.kind, NodeKind::Root);
    assert!(root.children.is_empty());
}

#[test]
fn test_parse_bare_expressions_under_root() {
    let root = parse_ok("+ 1 2");
    assert_eq!(
        expr_kinds(&root),
        vec![NodeKind::Symbol, NodeKind::Number, NodeKind::Number]
    );
    assert_eq!(root.span, Span::new(0, 5));
}

#[test]
fn test_parse_sexpr_keeps_delimiters() {
    let root = parse_ok("(+ 1)");
    let sexpr = &root.children[0];
    assert_eq!(sexpr.kind, NodeKind::SExpr);
    assert_eq!(sexpr.children.first().map(|n| n.contents.as_str()), Some("("));
    assert_eq!(sexpr.children.last().map(|n| n.contents.as_str()), Some(")"));
    assert!(sexpr.children[0].is_delimiter());
    assert_eq!(expr_kinds(sexpr), vec![NodeKind::Symbol, NodeKind::Number]);
}

#[test]
fn test_parse_qexpr() {
    let root = parse_ok("{1 2 3}");
    let qexpr = &root.children[0];
    assert_eq!(qexpr.kind, NodeKind::QExpr);
    assert_eq!(qexpr.span, Span::new(0, 7));
    assert_eq!(qexpr.exprs().count(), 3);
}

#[test]
fn test_parse_nested() {
    let root = parse_ok("eval (head {(+ 1 2) (+ 10 20)})");
    assert_eq!(expr_kinds(&root), vec![NodeKind::Symbol, NodeKind::SExpr]);
    let sexpr = root.exprs().nth(1).unwrap();
    let qexpr = sexpr.exprs().nth(1).unwrap();
    assert_eq!(qexpr.kind, NodeKind::QExpr);
    assert_eq!(expr_kinds(qexpr), vec![NodeKind::SExpr, NodeKind::SExpr]);
}

#[test]
fn test_parse_empty_containers() {
    let root = parse_ok("() {}");
    assert_eq!(expr_kinds(&root), vec![NodeKind::SExpr, NodeKind::QExpr]);
    assert_eq!(root.children[0].children.len(), 2);
}

#[test]
fn test_parse_leaf_contents_preserved() {
    let root = parse_ok("def {x} -42");
    let leaves: Vec<_> = root
        .exprs()
        .filter(|n| !n.kind.is_container())
        .map(|n| n.contents.as_str())
        .collect();
    assert_eq!(leaves, vec!["def", "-42"]);
}

#[test]
fn test_parse_unclosed_paren() {
    assert!(parse_fails("(+ 1 2"));
    assert!(parse_fails("{1 2"));
}

#[test]
fn test_parse_unexpected_close() {
    assert!(parse_fails(")"));
    assert!(parse_fails("+ 1 }"));
}

#[test]
fn test_parse_mismatched_brackets() {
    assert!(parse_fails("(1 2}"));
    assert!(parse_fails("{1 2)"));
}

#[test]
fn test_parse_error_span_points_at_token() {
    let err = parse_source("test.lisp", "(1 }").unwrap_err();
    assert!(matches!(err, CompileError::Parser { .. }));
    assert_eq!(err.span(), Some(Span::new(3, 4)));
}

#[test]
fn test_parse_eof_error_span_within_source() {
    let source = "(+ 1";
    let err = parse_source("test.lisp", source).unwrap_err();
    let span = err.span().unwrap();
    assert!(span.end <= source.len());
}

#[test]
fn test_parse_lexer_error_surfaces() {
    let err = parse_source("test.lisp", "(+ 1 ~)").unwrap_err();
    assert!(matches!(err, CompileError::Lexer { .. }));
}
