//! Variable definition and assignment
//!
//! Assigning to a variable does not evaluate anything: the right-hand side
//! is wrapped in a thunk together with a snapshot of the current frame's
//! blocks and evaluated on first read. Field assignment (`p.f = e`) is
//! evaluated immediately, since a field is shared through every handle to
//! its instance.

use std::rc::Rc;

use crate::ast::Assign;
use crate::environment::Slot;
use crate::value::Type;
use crate::{EvalError, Evaluator};

use super::path::{eval_path, no_such_field, struct_handle};
use super::{Evaluate, Execute, Signal};

/// `var name;` or `var name: type;`
///
/// # Errors
///
/// - `NameError` if `name` is already declared in the innermost block
/// - `TypeError` if the declared type is `void` or an unknown struct
pub fn exec_var_def(
    name: &str,
    var_type: Option<&str>,
    ev: &mut Evaluator<'_>,
) -> Result<Signal, EvalError> {
    let declared = var_type
        .map(|type_name| declared_type(type_name, ev))
        .transpose()?;
    ev.env_mut().define(name, declared)?;
    Ok(Signal::Normal)
}

fn declared_type(type_name: &str, ev: &Evaluator<'_>) -> Result<Type, EvalError> {
    match Type::parse(type_name) {
        Type::Void => Err(EvalError::type_error("variables cannot be of type `void`")),
        Type::Struct(name) if ev.program().struct_type(&name).is_none() => Err(
            EvalError::type_error(format!("unknown type `{}`", name)),
        ),
        ty => Ok(ty),
    }
}

impl Execute for Assign {
    fn exec(&self, ev: &mut Evaluator<'_>) -> Result<Signal, EvalError> {
        match self.name.rsplit_once('.') {
            None => {
                let thunk = ev.env_mut().assign(&self.name, Rc::clone(&self.expr))?;
                tracing::trace!(
                    name = %self.name,
                    captured = thunk.pending().map_or(0, |work| work.captured().len()),
                    "deferred assignment"
                );
            }
            Some((base, field)) => assign_field(base, field, self, ev)?,
        }
        Ok(Signal::Normal)
    }
}

/// `base.field = expr`: evaluate the base chain and the value, then store.
fn assign_field(
    base: &str,
    field: &str,
    assignment: &Assign,
    ev: &mut Evaluator<'_>,
) -> Result<(), EvalError> {
    let target = eval_path(base, ev)?;
    let instance = struct_handle(&target, field)?;
    let binding = instance
        .field(field)
        .ok_or_else(|| no_such_field(instance, field))?;

    let value = assignment.expr.eval(ev)?;
    let value = match &binding.declared {
        Some(ty) => ty.coerce(value).map_err(|err| {
            EvalError::type_error(format!(
                "field `{}` of `{}`: {}",
                field,
                instance.type_name(),
                err.message()
            ))
        })?,
        None => value,
    };

    instance.set_field(field, Slot::Ready(value));
    Ok(())
}
