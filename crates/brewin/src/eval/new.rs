//! `new T`: default-initialized struct instances

use crate::environment::Binding;
use crate::value::{StructInstance, StructRef};
use crate::{EvalError, Evaluator, Value};

/// Build a fresh instance of struct `type_name`.
///
/// Every field starts at its type's default: `0`, `false`, `""`, or a nil
/// handle of the field's struct type.
///
/// # Errors
///
/// Returns `NameError` if no struct named `type_name` was declared.
pub fn eval_new(type_name: &str, ev: &mut Evaluator<'_>) -> Result<Value, EvalError> {
    let def = ev
        .program()
        .struct_type(type_name)
        .ok_or_else(|| EvalError::name(format!("unknown struct type `{}`", type_name)))?;

    let instance = def
        .fields
        .iter()
        .fold(StructInstance::new(def.name.clone()), |instance, (name, ty)| {
            instance.with_field(name.clone(), Binding::typed(ty.clone()))
        });

    tracing::trace!(struct_type = %def.name, "new instance");
    Ok(Value::object(StructRef::new(instance)))
}
