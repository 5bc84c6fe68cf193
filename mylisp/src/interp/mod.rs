//! Tree-walking interpreter
//!
//! Data flow: parse tree → [`read`] → [`Value`] → [`Interpreter::eval`].

mod builtins;
mod env;
mod error;
mod eval;
mod reader;
mod value;

pub use builtins::Builtin;
pub use env::Environment;
pub use error::{ErrorKind, InterpResult, RuntimeError};
pub use eval::{DEFAULT_MAX_DEPTH, Interpreter};
pub use reader::{read, read_with_limit};
pub use value::Value;
