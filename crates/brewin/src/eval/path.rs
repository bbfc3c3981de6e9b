//! Variable and dotted field reads

use crate::error::type_name;
use crate::value::StructRef;
use crate::{EvalError, Evaluator, Value};

/// Read `name` or a field chain such as `p.next.value`.
///
/// Every prefix of a chain must be a non-nil struct handle and every field
/// must exist on its struct; otherwise the read is a `FaultError`.
///
/// # Errors
///
/// - `NameError` if the root variable is not declared in the current frame
/// - `FaultError` for a nil or non-struct prefix, or a missing field
pub fn eval_path(path: &str, ev: &mut Evaluator<'_>) -> Result<Value, EvalError> {
    let mut segments = path.split('.');
    let root = segments.next().unwrap_or(path);
    let mut value = read_var(root, ev)?;
    for field in segments {
        value = read_field(&value, field, ev)?;
    }
    Ok(value)
}

/// Read a plain variable, forcing it if it is lazy.
///
/// # Errors
///
/// Returns `NameError` if no block of the current frame declares `name`.
pub fn read_var(name: &str, ev: &mut Evaluator<'_>) -> Result<Value, EvalError> {
    let binding = ev
        .env()
        .lookup(name)
        .ok_or_else(|| EvalError::name(format!("variable `{}` has not been defined", name)))?;
    ev.resolve(binding)
}

/// Read one field of a struct handle, forcing it if it is lazy.
///
/// # Errors
///
/// Returns `FaultError` if `base` is not a live struct or has no such field.
pub fn read_field(base: &Value, field: &str, ev: &mut Evaluator<'_>) -> Result<Value, EvalError> {
    let instance = struct_handle(base, field)?;
    let binding = instance.field(field).ok_or_else(|| no_such_field(instance, field))?;
    ev.resolve(binding)
}

/// The live instance behind `value`, for accessing `field`.
///
/// # Errors
///
/// Returns `FaultError` for nil, nil handles and non-struct values.
pub fn struct_handle<'v>(value: &'v Value, field: &str) -> Result<&'v StructRef, EvalError> {
    match value {
        Value::Object {
            instance: Some(instance),
            ..
        } => Ok(instance),
        Value::Object {
            type_name,
            instance: None,
        } => Err(EvalError::fault(format!(
            "cannot access field `{}` of a nil `{}`",
            field, type_name
        ))),
        Value::Nil => Err(EvalError::fault(format!(
            "cannot access field `{}` of nil",
            field
        ))),
        other => Err(EvalError::fault(format!(
            "cannot access field `{}` of a value of type `{}`",
            field,
            type_name(other)
        ))),
    }
}

pub(crate) fn no_such_field(instance: &StructRef, field: &str) -> EvalError {
    EvalError::fault(format!(
        "struct `{}` has no field `{}`",
        instance.type_name(),
        field
    ))
}
