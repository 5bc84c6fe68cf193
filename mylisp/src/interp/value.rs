//! Runtime values for the interpreter

use super::builtins::Builtin;
use super::error::{ErrorKind, RuntimeError};
use crate::stack::with_stack;
use std::fmt;

/// Runtime value
///
/// Lists own their elements, so a value is always a tree. `Clone` is a deep
/// copy and is how values leave the environment.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 64-bit signed integer
    Num(i64),
    /// Terminal error value; propagates instead of being operated on
    Err(RuntimeError),
    /// Identifier, resolved against the environment when evaluated
    Sym(String),
    /// Native operation
    Fun(Builtin),
    /// Expression list, evaluated as operator then operands
    Sexpr(Vec<Value>),
    /// Quoted list, never evaluated automatically
    Qexpr(Vec<Value>),
}

impl Value {
    pub fn sym(name: impl Into<String>) -> Self {
        Value::Sym(name.into())
    }

    pub fn error(kind: ErrorKind, message: impl Into<String>) -> Self {
        Value::Err(RuntimeError::new(kind, message))
    }

    /// The empty S-expression, used as the unit result
    pub fn unit() -> Self {
        Value::Sexpr(Vec::new())
    }

    /// Get type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Num(_) => "Number",
            Value::Err(_) => "Error",
            Value::Sym(_) => "Symbol",
            Value::Fun(_) => "Function",
            Value::Sexpr(_) => "S-Expression",
            Value::Qexpr(_) => "Q-Expression",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Err(_))
    }

    pub fn as_num(&self) -> Option<i64> {
        match self {
            Value::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// Elements of an S- or Q-expression
    pub fn cells(&self) -> Option<&[Value]> {
        match self {
            Value::Sexpr(cells) | Value::Qexpr(cells) => Some(cells),
            _ => None,
        }
    }

    /// Re-tag an S-expression as a Q-expression; other values are unchanged
    pub fn into_qexpr(self) -> Value {
        match self {
            Value::Sexpr(cells) => Value::Qexpr(cells),
            other => other,
        }
    }

    /// Re-tag a Q-expression as an S-expression; other values are unchanged
    pub fn into_sexpr(self) -> Value {
        match self {
            Value::Qexpr(cells) => Value::Sexpr(cells),
            other => other,
        }
    }
}

fn fmt_cells(f: &mut fmt::Formatter<'_>, cells: &[Value], open: char, close: char) -> fmt::Result {
    write!(f, "{open}")?;
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{cell}")?;
    }
    write!(f, "{close}")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Num(n) => write!(f, "{n}"),
            Value::Err(err) => write!(f, "Error: {err}"),
            Value::Sym(name) => write!(f, "{name}"),
            Value::Fun(_) => write!(f, "<function>"),
            Value::Sexpr(cells) => with_stack(|| fmt_cells(f, cells, '(', ')')),
            Value::Qexpr(cells) => with_stack(|| fmt_cells(f, cells, '{', '}')),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Num(n)
    }
}

impl From<RuntimeError> for Value {
    fn from(err: RuntimeError) -> Self {
        Value::Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display() {
        assert_eq!(format!("{}", Value::Num(-42)), "-42");
        assert_eq!(format!("{}", Value::sym("head")), "head");
        assert_eq!(format!("{}", Value::Fun(Builtin::Add)), "<function>");
        assert_eq!(format!("{}", Value::unit()), "()");
        assert_eq!(format!("{}", Value::Qexpr(vec![])), "{}");
    }

    #[test]
    fn test_nested_list_display() {
        let v = Value::Qexpr(vec![
            Value::Num(1),
            Value::Sexpr(vec![Value::sym("+"), Value::Num(2), Value::Num(3)]),
            Value::Qexpr(vec![Value::Num(4)]),
        ]);
        assert_eq!(v.to_string(), "{1 (+ 2 3) {4}}");
    }

    #[test]
    fn test_error_display() {
        let v = Value::error(ErrorKind::DivisionByZero, "Division by zero");
        assert_eq!(v.to_string(), "Error: Division by zero");
    }

    #[test]
    fn test_retagging() {
        let s = Value::Sexpr(vec![Value::Num(1)]);
        assert_eq!(s.clone().into_qexpr(), Value::Qexpr(vec![Value::Num(1)]));
        assert_eq!(s.clone().into_qexpr().into_sexpr(), s);
        assert_eq!(Value::Num(3).into_qexpr(), Value::Num(3));
    }

    #[test]
    fn test_clone_is_deep() {
        let original = Value::Qexpr(vec![Value::Qexpr(vec![Value::Num(1)])]);
        let mut copy = original.clone();
        if let Value::Qexpr(cells) = &mut copy {
            cells.push(Value::Num(2));
        }
        assert_eq!(original.cells().map(<[Value]>::len), Some(1));
        assert_eq!(copy.cells().map(<[Value]>::len), Some(2));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Num(0).type_name(), "Number");
        assert_eq!(Value::Sexpr(vec![]).type_name(), "S-Expression");
        assert_eq!(Value::Qexpr(vec![]).type_name(), "Q-Expression");
        assert_eq!(Value::Fun(Builtin::Head).type_name(), "Function");
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Value::from(7), Value::Num(7));
        assert!(Value::from(RuntimeError::division_by_zero()).is_error());
        assert_eq!(Value::Num(9).as_num(), Some(9));
        assert_eq!(Value::sym("x").as_num(), None);
    }
}
