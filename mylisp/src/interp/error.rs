//! Runtime errors for the interpreter
//!
//! A `RuntimeError` never unwinds: it is wrapped in `Value::Err` and travels
//! through evaluation like any other value.

use std::fmt;

/// Runtime error produced during reading or evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Kinds of runtime errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Numeric literal out of range, or non-number given to arithmetic
    InvalidNumber,
    /// Symbol lookup miss
    UnboundSymbol,
    /// S-expression whose first element is not a function
    InvalidSymbol,
    /// Name-based builtin dispatch with an unknown name
    UnknownFunction,
    /// Wrong number of arguments
    ArityError,
    /// Argument of the wrong variant
    TypeError,
    /// Empty Q-expression where elements are required
    EmptyList,
    DivisionByZero,
    ModuloByZero,
    /// Integer arithmetic left the i64 range
    Overflow,
    /// Evaluation nested deeper than the interpreter allows
    StackOverflow,
}

impl RuntimeError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        RuntimeError {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_number(text: &str) -> Self {
        Self::new(
            ErrorKind::InvalidNumber,
            format!("Invalid Number: '{text}' is out of range"),
        )
    }

    pub fn invalid_operand(func: &str, got: &str) -> Self {
        Self::new(
            ErrorKind::InvalidNumber,
            format!("Invalid Number: function '{func}' expects numbers, got {got}"),
        )
    }

    pub fn unbound_symbol(name: &str) -> Self {
        Self::new(ErrorKind::UnboundSymbol, format!("Unbound symbol '{name}'"))
    }

    pub fn invalid_symbol(got: &str) -> Self {
        Self::new(
            ErrorKind::InvalidSymbol,
            format!("Invalid Symbol: S-Expression starts with {got}, not a function"),
        )
    }

    pub fn unknown_function(name: &str) -> Self {
        Self::new(ErrorKind::UnknownFunction, format!("Unknown Function '{name}'"))
    }

    pub fn arity_mismatch(func: &str, expected: usize, got: usize) -> Self {
        Self::new(
            ErrorKind::ArityError,
            format!("Function '{func}' passed {got} argument(s), expected {expected}"),
        )
    }

    pub fn no_arguments(func: &str) -> Self {
        Self::new(
            ErrorKind::ArityError,
            format!("Function '{func}' passed no arguments"),
        )
    }

    pub fn def_count_mismatch(symbols: usize, values: usize) -> Self {
        Self::new(
            ErrorKind::ArityError,
            format!("Function 'def' passed {symbols} symbol(s) but {values} value(s)"),
        )
    }

    pub fn type_error(func: &str, expected: &str, got: &str) -> Self {
        Self::new(
            ErrorKind::TypeError,
            format!("Function '{func}' passed incorrect type: expected {expected}, got {got}"),
        )
    }

    pub fn empty_list(func: &str) -> Self {
        Self::new(ErrorKind::EmptyList, format!("Function '{func}' passed {{}}"))
    }

    pub fn division_by_zero() -> Self {
        Self::new(ErrorKind::DivisionByZero, "Division by zero")
    }

    pub fn modulo_by_zero() -> Self {
        Self::new(ErrorKind::ModuloByZero, "Modulo by zero")
    }

    pub fn overflow(func: &str) -> Self {
        Self::new(ErrorKind::Overflow, format!("Integer overflow in '{func}'"))
    }

    pub fn stack_overflow(limit: usize) -> Self {
        Self::new(
            ErrorKind::StackOverflow,
            format!("Stack overflow: nesting deeper than {limit} levels"),
        )
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RuntimeError {}

/// Result type for builtin implementations
pub type InterpResult<T> = Result<T, RuntimeError>;
