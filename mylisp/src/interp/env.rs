//! Environment for symbol bindings
//!
//! A single global frame: there is no lexical nesting because there are no
//! user-defined functions to open a scope.

use super::Value;
use super::builtins::Builtin;
use super::error::RuntimeError;
use std::collections::HashMap;

/// Environment holding symbol bindings
#[derive(Debug, Clone, Default)]
pub struct Environment {
    bindings: HashMap<String, Value>,
}

impl Environment {
    /// Create an empty environment
    pub fn new() -> Self {
        Environment {
            bindings: HashMap::new(),
        }
    }

    /// Create an environment holding every builtin and nothing else
    pub fn with_builtins() -> Self {
        let mut env = Environment::new();
        env.register_builtins();
        env
    }

    /// Bind each builtin under its name
    pub fn register_builtins(&mut self) {
        for builtin in Builtin::ALL {
            self.define(builtin.name(), Value::Fun(builtin));
        }
        tracing::debug!(count = Builtin::ALL.len(), "registered builtins");
    }

    /// Bind `name`, replacing any previous binding
    ///
    /// The environment owns `value` from here on; callers that want to keep
    /// using it pass a clone.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    /// Look up a binding, returning an independent copy
    pub fn get(&self, name: &str) -> Option<Value> {
        self.bindings.get(name).cloned()
    }

    /// Look up a binding; a miss is an `UnboundSymbol` error value
    pub fn lookup(&self, name: &str) -> Value {
        self.get(name)
            .unwrap_or_else(|| Value::Err(RuntimeError::unbound_symbol(name)))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bindings sorted by name
    pub fn sorted_bindings(&self) -> Vec<(&str, &Value)> {
        let mut entries: Vec<_> = self
            .bindings
            .iter()
            .map(|(name, value)| (name.as_str(), value))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::ErrorKind;

    #[test]
    fn test_define_and_get() {
        let mut env = Environment::new();
        env.define("x", Value::Num(42));
        assert_eq!(env.get("x"), Some(Value::Num(42)));
        assert_eq!(env.get("y"), None);
    }

    #[test]
    fn test_lookup_miss_is_error_value() {
        let env = Environment::new();
        match env.lookup("nope") {
            Value::Err(err) => {
                assert_eq!(err.kind, ErrorKind::UnboundSymbol);
                assert!(err.message.contains("nope"));
            }
            other => panic!("expected error, got {other}"),
        }
    }

    #[test]
    fn test_define_overwrite() {
        let mut env = Environment::new();
        env.define("x", Value::Num(1));
        env.define("x", Value::Num(2));
        assert_eq!(env.lookup("x"), Value::Num(2));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_lookup_returns_independent_copy() {
        let mut env = Environment::new();
        env.define("xs", Value::Qexpr(vec![Value::Num(1)]));
        if let Value::Qexpr(mut cells) = env.lookup("xs") {
            cells.push(Value::Num(2));
        }
        assert_eq!(env.lookup("xs"), Value::Qexpr(vec![Value::Num(1)]));
    }

    #[test]
    fn test_with_builtins_contains_exactly_builtins() {
        let env = Environment::with_builtins();
        assert_eq!(env.len(), Builtin::ALL.len());
        for name in ["list", "head", "tail", "eval", "join", "init", "len", "def"] {
            assert!(env.contains(name), "missing {name}");
        }
        for name in ["+", "-", "*", "/", "%", "^", "min", "max"] {
            assert!(env.contains(name), "missing {name}");
        }
        assert_eq!(env.lookup("head"), Value::Fun(Builtin::Head));
    }

    #[test]
    fn test_default_is_empty() {
        assert!(Environment::default().is_empty());
    }

    #[test]
    fn test_sorted_bindings() {
        let mut env = Environment::new();
        env.define("b", Value::Num(2));
        env.define("a", Value::Num(1));
        env.define("c", Value::Num(3));
        let names: Vec<_> = env.sorted_bindings().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
