//! Expression evaluator

use super::builtins::Builtin;
use super::env::Environment;
use super::error::RuntimeError;
use super::reader::read_with_limit;
use super::value::Value;
use crate::ast::Node;
use crate::error::Result;
use crate::parser::parse_source;
use crate::stack::with_stack;

/// Default bound on evaluation nesting
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// The interpreter: one global environment plus the evaluation depth guard
pub struct Interpreter {
    env: Environment,
    /// Current evaluation depth
    depth: usize,
    max_depth: usize,
}

impl Interpreter {
    /// Create an interpreter whose environment holds every builtin
    pub fn new() -> Self {
        Interpreter::with_env(Environment::with_builtins())
    }

    /// Create an interpreter over an existing environment
    pub fn with_env(env: Environment) -> Self {
        Interpreter {
            env,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Reduce a value to normal form
    ///
    /// Total: always returns, reporting failures as `Value::Err`.
    pub fn eval(&mut self, value: Value) -> Value {
        if self.depth >= self.max_depth {
            tracing::warn!(max_depth = self.max_depth, "evaluation depth limit reached");
            return Value::Err(RuntimeError::stack_overflow(self.max_depth));
        }

        self.depth += 1;
        let result = with_stack(|| self.eval_inner(value));
        self.depth -= 1;
        result
    }

    fn eval_inner(&mut self, value: Value) -> Value {
        tracing::trace!(depth = self.depth, %value, "eval");
        match value {
            Value::Sym(name) => self.env.lookup(&name),
            Value::Sexpr(cells) => self.eval_sexpr(cells),
            // Numbers, errors, functions and quoted lists are already in normal form
            other => other,
        }
    }

    fn eval_sexpr(&mut self, cells: Vec<Value>) -> Value {
        let mut cells: Vec<Value> = cells.into_iter().map(|cell| self.eval(cell)).collect();

        // First error by position wins; everything else is dropped
        if let Some(index) = cells.iter().position(Value::is_error) {
            return cells.swap_remove(index);
        }

        match cells.len() {
            0 => Value::Sexpr(cells),
            1 => cells.swap_remove(0),
            _ => {
                let op = cells.remove(0);
                match op {
                    Value::Fun(builtin) => builtin.call(self, cells),
                    other => Value::Err(RuntimeError::invalid_symbol(other.type_name())),
                }
            }
        }
    }

    /// Read a parse tree, refusing nesting deeper than this interpreter
    /// would evaluate
    pub fn read(&self, node: &Node) -> Value {
        read_with_limit(node, self.max_depth)
    }

    /// Call a builtin by name, bypassing the environment
    ///
    /// Unlike evaluating a symbol, an unknown name here is an
    /// `UnknownFunction` error rather than an unbound symbol.
    pub fn call_builtin(&mut self, name: &str, args: Vec<Value>) -> Value {
        match Builtin::from_name(name) {
            Some(builtin) => builtin.call(self, args),
            None => Value::Err(RuntimeError::unknown_function(name)),
        }
    }

    /// Parse, read and evaluate one line of source
    ///
    /// Lexer and parser failures are returned as `Err`; everything after
    /// parsing is reported through the resulting value.
    pub fn eval_source(&mut self, source: &str) -> Result<Value> {
        let tree = parse_source("<input>", source)?;
        let value = self.read(&tree);
        Ok(self.eval(value))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
