//! Parse tree to value conversion

use super::Value;
use super::error::{ErrorKind, InterpResult, RuntimeError};
use super::eval::DEFAULT_MAX_DEPTH;
use crate::ast::{Node, NodeKind};
use crate::stack::with_stack;

/// Convert a parse tree node into a value tree
///
/// The root node reads as an S-expression holding every expression on the
/// line. A number literal outside the `i64` range becomes an error value in
/// place of that number.
pub fn read(node: &Node) -> Value {
    read_with_limit(node, DEFAULT_MAX_DEPTH)
}

/// [`read`] with an explicit nesting bound
///
/// A tree nested `max_depth` levels or deeper reads as a single
/// `StackOverflow` error value, whatever it is quoted or wrapped in.
pub fn read_with_limit(node: &Node, max_depth: usize) -> Value {
    read_node(node, 0, max_depth).unwrap_or_else(|err| {
        tracing::warn!(max_depth, "reader nesting limit reached");
        Value::Err(err)
    })
}

fn read_node(node: &Node, depth: usize, max_depth: usize) -> InterpResult<Value> {
    if depth >= max_depth {
        return Err(RuntimeError::stack_overflow(max_depth));
    }
    Ok(match node.kind {
        NodeKind::Number => read_number(&node.contents),
        NodeKind::Symbol => Value::Sym(node.contents.clone()),
        NodeKind::Root | NodeKind::SExpr => Value::Sexpr(read_children(node, depth, max_depth)?),
        NodeKind::QExpr => Value::Qexpr(read_children(node, depth, max_depth)?),
        NodeKind::Delimiter => Value::Err(RuntimeError::new(
            ErrorKind::InvalidSymbol,
            format!("Invalid Symbol: unexpected '{}'", node.contents),
        )),
    })
}

fn read_number(text: &str) -> Value {
    match text.parse::<i64>() {
        Ok(n) => Value::Num(n),
        Err(_) => Value::Err(RuntimeError::invalid_number(text)),
    }
}

fn read_children(node: &Node, depth: usize, max_depth: usize) -> InterpResult<Vec<Value>> {
    with_stack(|| {
        node.exprs()
            .map(|child| read_node(child, depth + 1, max_depth))
            .collect()
    })
}
