//! Unary operation evaluation

use crate::ast::{Expr, UnaryOp};
use crate::error::type_name;
use crate::{EvalError, Evaluator, Value};

use super::Evaluate;

/// Evaluate `neg operand` or `!operand`.
pub fn eval_unary(op: UnaryOp, operand: &Expr, ev: &mut Evaluator<'_>) -> Result<Value, EvalError> {
    let value = operand.eval(ev)?;
    apply(op, value)
}

/// Apply a unary operator to an evaluated operand.
///
/// # Errors
///
/// - `TypeError` if `neg` gets a non-int or `!` a non-bool
/// - `FaultError` when negating `i64::MIN`
pub fn apply(op: UnaryOp, value: Value) -> Result<Value, EvalError> {
    match (op, value) {
        (UnaryOp::Neg, Value::Int(n)) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| EvalError::fault(format!("integer overflow in `neg {}`", n))),
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (op, other) => Err(EvalError::type_error(format!(
            "cannot apply `{}` to `{}`",
            op,
            type_name(&other)
        ))),
    }
}
