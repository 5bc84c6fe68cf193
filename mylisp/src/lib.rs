//! MyLisp Interpreter Library
//!
//! A small Lisp with S-expressions, quoted Q-expressions and a fixed set of
//! builtins, evaluated against a single global environment.

pub mod ast;
pub mod config;
pub mod error;
pub mod interp;
pub mod lexer;
pub mod logging;
pub mod parser;
pub mod repl;
mod stack;

pub use ast::Span;
pub use error::{CompileError, Result};
pub use interp::{Interpreter, Value};
