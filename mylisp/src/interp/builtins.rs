//! Builtin functions
//!
//! Every builtin takes ownership of its evaluated argument list. Argument
//! checks run before any work is done, so a failing call never produces a
//! partial result.

use super::Interpreter;
use super::error::{InterpResult, RuntimeError};
use super::value::Value;

/// A native operation, bound in the environment under [`Builtin::name`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    List,
    Head,
    Tail,
    Init,
    Eval,
    Join,
    Len,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Min,
    Max,
    Def,
}

impl Builtin {
    /// Every builtin, in registration order
    pub const ALL: [Builtin; 16] = [
        Builtin::List,
        Builtin::Head,
        Builtin::Tail,
        Builtin::Init,
        Builtin::Eval,
        Builtin::Join,
        Builtin::Len,
        Builtin::Add,
        Builtin::Sub,
        Builtin::Mul,
        Builtin::Div,
        Builtin::Mod,
        Builtin::Pow,
        Builtin::Min,
        Builtin::Max,
        Builtin::Def,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::List => "list",
            Builtin::Head => "head",
            Builtin::Tail => "tail",
            Builtin::Init => "init",
            Builtin::Eval => "eval",
            Builtin::Join => "join",
            Builtin::Len => "len",
            Builtin::Add => "+",
            Builtin::Sub => "-",
            Builtin::Mul => "*",
            Builtin::Div => "/",
            Builtin::Mod => "%",
            Builtin::Pow => "^",
            Builtin::Min => "min",
            Builtin::Max => "max",
            Builtin::Def => "def",
        }
    }

    pub fn from_name(name: &str) -> Option<Builtin> {
        Builtin::ALL.into_iter().find(|b| b.name() == name)
    }

    fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Builtin::Add
                | Builtin::Sub
                | Builtin::Mul
                | Builtin::Div
                | Builtin::Mod
                | Builtin::Pow
                | Builtin::Min
                | Builtin::Max
        )
    }

    /// Apply the builtin; failures come back as `Value::Err`
    pub fn call(self, interp: &mut Interpreter, args: Vec<Value>) -> Value {
        tracing::trace!(builtin = self.name(), argc = args.len(), "call");
        let result = match self {
            Builtin::List => builtin_list(args),
            Builtin::Head => builtin_head(args),
            Builtin::Tail => builtin_tail(args),
            Builtin::Init => builtin_init(args),
            Builtin::Eval => builtin_eval(interp, args),
            Builtin::Join => builtin_join(args),
            Builtin::Len => builtin_len(args),
            Builtin::Def => builtin_def(interp, args),
            op => builtin_op(op, args),
        };
        result.unwrap_or_else(Value::Err)
    }
}

// ============ Argument checks ============

/// Exactly one Q-expression; returns its elements
fn single_qexpr(func: &str, mut args: Vec<Value>) -> InterpResult<Vec<Value>> {
    if args.len() != 1 {
        return Err(RuntimeError::arity_mismatch(func, 1, args.len()));
    }
    match args.swap_remove(0) {
        Value::Qexpr(cells) => Ok(cells),
        other => Err(RuntimeError::type_error(func, "Q-Expression", other.type_name())),
    }
}

/// Exactly one Q-expression with at least one element
fn non_empty_qexpr(func: &str, args: Vec<Value>) -> InterpResult<Vec<Value>> {
    let cells = single_qexpr(func, args)?;
    if cells.is_empty() {
        return Err(RuntimeError::empty_list(func));
    }
    Ok(cells)
}

// ============ List builtins ============

fn builtin_list(args: Vec<Value>) -> InterpResult<Value> {
    Ok(Value::Qexpr(args))
}

fn builtin_head(args: Vec<Value>) -> InterpResult<Value> {
    let mut cells = non_empty_qexpr("head", args)?;
    cells.truncate(1);
    Ok(Value::Qexpr(cells))
}

fn builtin_tail(args: Vec<Value>) -> InterpResult<Value> {
    let mut cells = non_empty_qexpr("tail", args)?;
    cells.remove(0);
    Ok(Value::Qexpr(cells))
}

fn builtin_init(args: Vec<Value>) -> InterpResult<Value> {
    let mut cells = non_empty_qexpr("init", args)?;
    cells.pop();
    Ok(Value::Qexpr(cells))
}

// Empty lists are rejected like head/tail/init rather than counted as 0
fn builtin_len(args: Vec<Value>) -> InterpResult<Value> {
    let cells = non_empty_qexpr("len", args)?;
    let len = i64::try_from(cells.len()).map_err(|_| RuntimeError::overflow("len"))?;
    Ok(Value::Num(len))
}

fn builtin_eval(interp: &mut Interpreter, args: Vec<Value>) -> InterpResult<Value> {
    let cells = single_qexpr("eval", args)?;
    Ok(interp.eval(Value::Sexpr(cells)))
}

fn builtin_join(args: Vec<Value>) -> InterpResult<Value> {
    if args.is_empty() {
        return Err(RuntimeError::no_arguments("join"));
    }
    if let Some(bad) = args.iter().find(|arg| !matches!(arg, Value::Qexpr(_))) {
        return Err(RuntimeError::type_error("join", "Q-Expression", bad.type_name()));
    }

    let mut joined = Vec::new();
    for arg in args {
        if let Value::Qexpr(cells) = arg {
            joined.extend(cells);
        }
    }
    Ok(Value::Qexpr(joined))
}

// ============ Binding ============

fn builtin_def(interp: &mut Interpreter, args: Vec<Value>) -> InterpResult<Value> {
    let mut args = args.into_iter();
    let symbols = match args.next() {
        Some(Value::Qexpr(cells)) => cells,
        Some(other) => {
            return Err(RuntimeError::type_error("def", "Q-Expression", other.type_name()));
        }
        None => return Err(RuntimeError::no_arguments("def")),
    };

    let names = symbols
        .into_iter()
        .map(|symbol| match symbol {
            Value::Sym(name) => Ok(name),
            other => Err(RuntimeError::type_error("def", "Symbol", other.type_name())),
        })
        .collect::<InterpResult<Vec<_>>>()?;

    let values: Vec<Value> = args.collect();
    if names.len() != values.len() {
        return Err(RuntimeError::def_count_mismatch(names.len(), values.len()));
    }

    for (name, value) in names.into_iter().zip(values) {
        tracing::debug!(%name, %value, "def");
        interp.env_mut().define(name, value);
    }
    Ok(Value::unit())
}

// ============ Arithmetic ============

fn builtin_op(op: Builtin, args: Vec<Value>) -> InterpResult<Value> {
    debug_assert!(op.is_arithmetic());
    let name = op.name();

    let mut nums = Vec::with_capacity(args.len());
    for arg in args {
        match arg {
            Value::Num(n) => nums.push(n),
            other => return Err(RuntimeError::invalid_operand(name, other.type_name())),
        }
    }

    let mut nums = nums.into_iter();
    let Some(mut acc) = nums.next() else {
        return Err(RuntimeError::no_arguments(name));
    };

    // Unary minus negates
    if op == Builtin::Sub && nums.len() == 0 {
        return acc
            .checked_neg()
            .map(Value::Num)
            .ok_or_else(|| RuntimeError::overflow(name));
    }

    for n in nums {
        acc = apply_op(op, acc, n)?;
    }
    Ok(Value::Num(acc))
}

fn apply_op(op: Builtin, x: i64, y: i64) -> InterpResult<i64> {
    let overflow = || RuntimeError::overflow(op.name());
    match op {
        Builtin::Add => x.checked_add(y).ok_or_else(overflow),
        Builtin::Sub => x.checked_sub(y).ok_or_else(overflow),
        Builtin::Mul => x.checked_mul(y).ok_or_else(overflow),
        Builtin::Div if y == 0 => Err(RuntimeError::division_by_zero()),
        Builtin::Div => x.checked_div(y).ok_or_else(overflow),
        Builtin::Mod if y == 0 => Err(RuntimeError::modulo_by_zero()),
        Builtin::Mod => x.checked_rem(y).ok_or_else(overflow),
        Builtin::Pow => int_pow(x, y),
        Builtin::Min => Ok(x.min(y)),
        Builtin::Max => Ok(x.max(y)),
        other => Err(RuntimeError::unknown_function(other.name())),
    }
}

/// Integer power
///
/// A negative exponent gives the real result truncated toward zero: 1 for a
/// base of 1, +/-1 for a base of -1, 0 otherwise. Zero to a negative power is
/// a division by zero.
fn int_pow(base: i64, exp: i64) -> InterpResult<i64> {
    let sign_of_minus_one = if exp % 2 == 0 { 1 } else { -1 };
    if exp < 0 {
        return match base {
            0 => Err(RuntimeError::division_by_zero()),
            1 => Ok(1),
            -1 => Ok(sign_of_minus_one),
            _ => Ok(0),
        };
    }
    match base {
        0 => Ok(if exp == 0 { 1 } else { 0 }),
        1 => Ok(1),
        -1 => Ok(sign_of_minus_one),
        _ => u32::try_from(exp)
            .ok()
            .and_then(|e| base.checked_pow(e))
            .ok_or_else(|| RuntimeError::overflow("^")),
    }
}
