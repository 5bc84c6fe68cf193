//! Parse tree produced by the parser and consumed by the reader
//!
//! The tree is deliberately close to the surface syntax: container nodes keep
//! their bracket tokens as `Delimiter` children, and leaves keep their literal
//! text. Turning text into numbers happens later, in the reader.

mod span;

pub use span::*;

use crate::stack::with_stack;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

/// Tag of a parse tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// The whole input line; reads as an S-expression
    Root,
    Number,
    Symbol,
    /// `( ... )`
    SExpr,
    /// `{ ... }`
    QExpr,
    /// A literal bracket token inside a container
    Delimiter,
}

impl NodeKind {
    /// Short tag used when printing the tree
    pub fn tag(&self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Number => "number",
            NodeKind::Symbol => "symbol",
            NodeKind::SExpr => "sexpr",
            NodeKind::QExpr => "qexpr",
            NodeKind::Delimiter => "char",
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, NodeKind::Root | NodeKind::SExpr | NodeKind::QExpr)
    }
}

/// A node of the parse tree
///
/// Nesting depth is bounded only by the input, so dropping, printing and
/// serializing never recurse on the native stack unguarded.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    /// Literal text for leaves and delimiters, empty for containers
    pub contents: String,
    pub span: Span,
    pub children: Vec<Node>,
}

impl Node {
    pub fn leaf(kind: NodeKind, contents: impl Into<String>, span: Span) -> Self {
        Node {
            kind,
            contents: contents.into(),
            span,
            children: Vec::new(),
        }
    }

    pub fn branch(kind: NodeKind, span: Span, children: Vec<Node>) -> Self {
        Node {
            kind,
            contents: String::new(),
            span,
            children,
        }
    }

    /// Build `open expr* close` with the brackets kept as delimiter children
    pub fn bracketed(kind: NodeKind, open: Node, exprs: Vec<Node>, close: Node) -> Self {
        let span = open.span.merge(close.span);
        let mut children = Vec::with_capacity(exprs.len() + 2);
        children.push(open);
        children.extend(exprs);
        children.push(close);
        Node::branch(kind, span, children)
    }

    pub fn delimiter(text: &str, span: Span) -> Self {
        Node::leaf(NodeKind::Delimiter, text, span)
    }

    pub fn is_delimiter(&self) -> bool {
        self.kind == NodeKind::Delimiter
    }

    /// Children that are expressions, skipping bracket tokens
    pub fn exprs(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().filter(|child| !child.is_delimiter())
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{:width$}{}", "", self.kind.tag(), width = depth * 2)?;
        if !self.kind.is_container() {
            write!(f, " '{}'", self.contents)?;
        }
        writeln!(f, " @ {}", self.span)?;
        with_stack(|| {
            self.children
                .iter()
                .try_for_each(|child| child.fmt_indented(f, depth + 1))
        })
    }
}

// Flatten the subtree onto the heap instead of recursing
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// `children` is omitted for leaves
impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        with_stack(|| {
            let mut state = serializer.serialize_struct("Node", 4)?;
            state.serialize_field("kind", &self.kind)?;
            state.serialize_field("contents", &self.contents)?;
            state.serialize_field("span", &self.span)?;
            if self.children.is_empty() {
                state.skip_field("children")?;
            } else {
                state.serialize_field("children", &self.children)?;
            }
            state.end()
        })
    }
}

/// Indented tree dump, one node per line
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        // (+ 1)
        Node::branch(
            NodeKind::Root,
            Span::new(0, 5),
            vec![Node::bracketed(
                NodeKind::SExpr,
                Node::delimiter("(", Span::new(0, 1)),
                vec![
                    Node::leaf(NodeKind::Symbol, "+", Span::new(1, 2)),
                    Node::leaf(NodeKind::Number, "1", Span::new(3, 4)),
                ],
                Node::delimiter(")", Span::new(4, 5)),
            )],
        )
    }

    #[test]
    fn test_bracketed_span_covers_delimiters() {
        let root = sample();
        assert_eq!(root.children[0].span, Span::new(0, 5));
        assert_eq!(root.children[0].children.len(), 4);
    }

    #[test]
    fn test_exprs_skips_delimiters() {
        let root = sample();
        let sexpr = &root.children[0];
        let tags: Vec<_> = sexpr.exprs().map(|n| n.contents.as_str()).collect();
        assert_eq!(tags, vec!["+", "1"]);
    }

    #[test]
    fn test_display_tree() {
        let dump = sample().to_string();
        let lines: Vec<_> = dump.lines().collect();
        assert_eq!(lines[0], "root @ 0..5");
        assert_eq!(lines[1], "  sexpr @ 0..5");
        assert_eq!(lines[2], "    char '(' @ 0..1");
        assert_eq!(lines[3], "    symbol '+' @ 1..2");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_serialize_kind_lowercase() {
        let node = Node::leaf(NodeKind::QExpr, "", Span::new(0, 0));
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains("\"qexpr\""));
        assert!(!json.contains("children"));
    }

    /// Left spine of `depth` nested S-expressions around a number
    fn nested(depth: usize) -> Node {
        let mut node = Node::leaf(NodeKind::Number, "1", Span::new(depth, depth + 1));
        for level in (0..depth).rev() {
            node = Node::branch(NodeKind::SExpr, Span::new(level, 2 * depth + 1 - level), vec![node]);
        }
        node
    }

    #[test]
    fn test_serialize_nested_children() {
        let json = serde_json::to_string(&nested(2)).unwrap();
        assert_eq!(json.matches("\"children\"").count(), 2);
        assert!(json.contains("\"number\""));
    }

    #[test]
    fn test_very_deep_tree_serializes_and_drops() {
        let handle = std::thread::Builder::new()
            .stack_size(8 * 1024 * 1024)
            .spawn(|| {
                let tree = nested(100_000);
                let len = serde_json::to_string(&tree).map(|json| json.len());
                drop(tree);
                len
            })
            .unwrap();
        let len = handle.join().expect("deep tree must not overflow the stack");
        assert!(len.unwrap() > 100_000);
    }
}
