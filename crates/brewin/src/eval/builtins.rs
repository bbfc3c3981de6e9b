//! Built-in functions: `print`, `inputi`, `inputs`
//!
//! Builtins are resolved by name before user functions and accept a
//! variable number of arguments. All I/O goes through the evaluator's host.

use crate::ast::Expr;
use crate::{EvalError, Evaluator, Value};

use super::Evaluate;

/// The builtin functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// `print(args...)`
    Print,
    /// `inputi([prompt])`
    InputI,
    /// `inputs([prompt])`
    InputS,
}

impl Builtin {
    /// Look up a builtin by name.
    pub fn lookup(name: &str) -> Option<Self> {
        match name {
            "print" => Some(Builtin::Print),
            "inputi" => Some(Builtin::InputI),
            "inputs" => Some(Builtin::InputS),
            _ => None,
        }
    }

    /// The builtin's name as called.
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Print => "print",
            Builtin::InputI => "inputi",
            Builtin::InputS => "inputs",
        }
    }
}

/// Evaluate the arguments and run a builtin.
///
/// # Errors
///
/// - `NameError` if an input builtin gets more than one argument
/// - `TypeError` if `inputi` reads something that is not an integer
/// - `FaultError` if the host has no more input
pub fn call_builtin(
    builtin: Builtin,
    args: &[Expr],
    ev: &mut Evaluator<'_>,
) -> Result<Value, EvalError> {
    match builtin {
        Builtin::Print => print(args, ev),
        Builtin::InputI | Builtin::InputS => input(builtin, args, ev),
    }
}

fn print(args: &[Expr], ev: &mut Evaluator<'_>) -> Result<Value, EvalError> {
    let mut line = String::new();
    for arg in args {
        line.push_str(&arg.eval(ev)?.to_string());
    }
    ev.host().output(&line);
    Ok(Value::Nil)
}

fn input(builtin: Builtin, args: &[Expr], ev: &mut Evaluator<'_>) -> Result<Value, EvalError> {
    if args.len() > 1 {
        return Err(EvalError::name(format!(
            "`{}` takes at most one argument, got {}",
            builtin.name(),
            args.len()
        )));
    }
    if let Some(prompt) = args.first() {
        let prompt = prompt.eval(ev)?;
        ev.host().output(&prompt.to_string());
    }

    let line = ev
        .host()
        .get_input()
        .ok_or_else(|| EvalError::fault(format!("`{}`: no more input", builtin.name())))?;

    match builtin {
        Builtin::InputI => line.trim().parse::<i64>().map(Value::Int).map_err(|_| {
            EvalError::type_error(format!("`inputi` expected an integer, got {:?}", line))
        }),
        _ => Ok(Value::from(line)),
    }
}
