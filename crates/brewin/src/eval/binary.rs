//! Binary operation evaluation

use crate::ast::{BinaryOp, Expr};
use crate::error::type_name;
use crate::{EvalError, Evaluator, Value};

use super::Evaluate;

/// Evaluate `lhs op rhs`.
///
/// `&&` and `||` short-circuit; every other operator evaluates both sides,
/// left first.
pub fn eval_binary(
    op: BinaryOp,
    lhs: &Expr,
    rhs: &Expr,
    ev: &mut Evaluator<'_>,
) -> Result<Value, EvalError> {
    // Short-circuit evaluation for && and ||
    match op {
        BinaryOp::And => return eval_and(lhs, rhs, ev),
        BinaryOp::Or => return eval_or(lhs, rhs, ev),
        _ => {}
    }

    let left = lhs.eval(ev)?;
    let right = rhs.eval(ev)?;
    apply(op, left, right)
}

/// Apply a binary operator to two evaluated operands.
///
/// # Errors
///
/// - `TypeError` for operand types the operator does not accept
/// - `FaultError` for division by zero or integer overflow
pub fn apply(op: BinaryOp, left: Value, right: Value) -> Result<Value, EvalError> {
    match op {
        // Arithmetic
        BinaryOp::Add => eval_add(left, right),
        BinaryOp::Sub => checked_int(op, left, right, i64::checked_sub),
        BinaryOp::Mul => checked_int(op, left, right, i64::checked_mul),
        BinaryOp::Div => eval_div(left, right),

        // Equality
        BinaryOp::Eq => values_equal(&left, &right).map(Value::Bool),
        BinaryOp::Ne => values_equal(&left, &right).map(|eq| Value::Bool(!eq)),

        // Comparison
        BinaryOp::Lt => compare(op, left, right, |a, b| a < b),
        BinaryOp::Le => compare(op, left, right, |a, b| a <= b),
        BinaryOp::Gt => compare(op, left, right, |a, b| a > b),
        BinaryOp::Ge => compare(op, left, right, |a, b| a >= b),

        // Logical, for already-evaluated operands
        BinaryOp::And | BinaryOp::Or => match (left, right) {
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(if op == BinaryOp::And {
                a && b
            } else {
                a || b
            })),
            (left, right) => Err(operand_error(op, &left, &right)),
        },
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Short-Circuit Logical Operators
// ═══════════════════════════════════════════════════════════════════════

fn eval_and(lhs: &Expr, rhs: &Expr, ev: &mut Evaluator<'_>) -> Result<Value, EvalError> {
    match lhs.eval(ev)? {
        Value::Bool(false) => Ok(Value::Bool(false)),
        Value::Bool(true) => expect_bool(BinaryOp::And, rhs.eval(ev)?),
        other => Err(logical_operand(BinaryOp::And, &other)),
    }
}

fn eval_or(lhs: &Expr, rhs: &Expr, ev: &mut Evaluator<'_>) -> Result<Value, EvalError> {
    match lhs.eval(ev)? {
        Value::Bool(true) => Ok(Value::Bool(true)),
        Value::Bool(false) => expect_bool(BinaryOp::Or, rhs.eval(ev)?),
        other => Err(logical_operand(BinaryOp::Or, &other)),
    }
}

fn expect_bool(op: BinaryOp, value: Value) -> Result<Value, EvalError> {
    match value {
        Value::Bool(_) => Ok(value),
        other => Err(logical_operand(op, &other)),
    }
}

fn logical_operand(op: BinaryOp, value: &Value) -> EvalError {
    EvalError::type_error(format!(
        "`{}` expects `bool` operands, found `{}`",
        op,
        type_name(value)
    ))
}

// ═══════════════════════════════════════════════════════════════════════
// Arithmetic
// ═══════════════════════════════════════════════════════════════════════

fn eval_add(left: Value, right: Value) -> Result<Value, EvalError> {
    match (left, right) {
        (Value::String(a), Value::String(b)) => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(&a);
            joined.push_str(&b);
            Ok(Value::from(joined))
        }
        (left, right) => checked_int(BinaryOp::Add, left, right, i64::checked_add),
    }
}

/// Integer division truncating toward zero: `-7 / 2 == -3`.
fn eval_div(left: Value, right: Value) -> Result<Value, EvalError> {
    match (&left, &right) {
        (Value::Int(_), Value::Int(0)) => Err(EvalError::fault("division by zero")),
        _ => checked_int(BinaryOp::Div, left, right, i64::checked_div),
    }
}

fn checked_int(
    op: BinaryOp,
    left: Value,
    right: Value,
    f: fn(i64, i64) -> Option<i64>,
) -> Result<Value, EvalError> {
    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => f(*a, *b)
            .map(Value::Int)
            .ok_or_else(|| EvalError::fault(format!("integer overflow in `{} {} {}`", a, op, b))),
        _ => Err(operand_error(op, &left, &right)),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Comparison
// ═══════════════════════════════════════════════════════════════════════

fn compare(
    op: BinaryOp,
    left: Value,
    right: Value,
    f: fn(i64, i64) -> bool,
) -> Result<Value, EvalError> {
    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Bool(f(*a, *b))),
        _ => Err(operand_error(op, &left, &right)),
    }
}

/// The language's `==`.
///
/// Primitives of different types are simply unequal. Struct handles compare
/// by identity and only against `nil` or handles of the same struct type;
/// comparing a struct-like value with a primitive is a type error.
///
/// # Errors
///
/// Returns `TypeError` for the struct/primitive and cross-struct cases.
pub fn values_equal(left: &Value, right: &Value) -> Result<bool, EvalError> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok(a == b),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
        (Value::String(a), Value::String(b)) => Ok(a == b),
        (Value::Nil, Value::Nil) => Ok(true),
        (Value::Nil, Value::Object { instance, .. })
        | (Value::Object { instance, .. }, Value::Nil) => Ok(instance.is_none()),
        (
            Value::Object {
                type_name: ta,
                instance: ia,
            },
            Value::Object {
                type_name: tb,
                instance: ib,
            },
        ) => {
            if ta != tb {
                return Err(EvalError::type_error(format!(
                    "cannot compare `{}` with `{}`",
                    ta, tb
                )));
            }
            Ok(match (ia, ib) {
                (Some(a), Some(b)) => a.ptr_eq(b),
                (None, None) => true,
                _ => false,
            })
        }
        (a, b) if a.is_struct_like() || b.is_struct_like() => Err(EvalError::type_error(
            format!(
                "cannot compare `{}` with `{}`",
                type_name(a),
                type_name(b)
            ),
        )),
        _ => Ok(false),
    }
}

fn operand_error(op: BinaryOp, left: &Value, right: &Value) -> EvalError {
    EvalError::type_error(format!(
        "incompatible operand types for `{}`: `{}` and `{}`",
        op,
        type_name(left),
        type_name(right)
    ))
}
