//! Function calls: builtin dispatch and user function invocation

use crate::ast::Call;
use crate::environment::{Binding, Block};
use crate::program::Function;
use crate::stack::ensure_sufficient_stack;
use crate::{EvalError, Evaluator, Value};

use super::builtins::{self, Builtin};
use super::{exec_stmts, Evaluate, Signal};

impl Evaluate for Call {
    fn eval(&self, ev: &mut Evaluator<'_>) -> Result<Value, EvalError> {
        if let Some(builtin) = Builtin::lookup(&self.name) {
            return builtins::call_builtin(builtin, &self.args, ev);
        }

        let function = ev
            .program()
            .function(&self.name, self.args.len())
            .ok_or_else(|| undefined_function(&self.name, self.args.len(), ev))?;

        // Arguments are evaluated eagerly, left to right, in the caller's frame.
        let args = self
            .args
            .iter()
            .map(|arg| arg.eval(ev))
            .collect::<Result<Vec<_>, _>>()?;

        invoke(ev, &function, args)
    }
}

/// Run a user function with already-evaluated arguments.
///
/// The callee gets a new frame whose bottom block holds the parameters,
/// each coerced to its declared type. The body runs in that block.
///
/// # Errors
///
/// - `TypeError` for an argument or result that does not fit its type
/// - `StackOverflow` if the call depth limit is reached
/// - `EvalError::Raise` if the body raised and nothing inside caught it
#[tracing::instrument(level = "debug", skip_all, fields(function = %function.name))]
pub fn invoke(
    ev: &mut Evaluator<'_>,
    function: &Function,
    args: Vec<Value>,
) -> Result<Value, EvalError> {
    let params = bind_params(function, args)?;

    ev.env_mut().push_frame(params)?;
    let outcome = ensure_sufficient_stack(|| exec_stmts(&function.body, ev));
    ev.env_mut().pop_frame();

    match outcome? {
        Signal::Normal | Signal::Return(None) => Ok(function.return_type.default_value()),
        Signal::Return(Some(value)) => function.return_type.coerce(value).map_err(|err| {
            EvalError::type_error(format!(
                "bad return value from `{}`: {}",
                function.name,
                err.message()
            ))
        }),
        Signal::Raise(tag) => {
            tracing::debug!(tag = %tag, "raise leaving function");
            Err(EvalError::Raise(tag))
        }
    }
}

fn bind_params(function: &Function, args: Vec<Value>) -> Result<Block, EvalError> {
    let mut params = Block::new();
    for ((name, ty), arg) in function.params.iter().zip(args) {
        let value = ty.coerce(arg).map_err(|err| {
            EvalError::type_error(format!(
                "argument `{}` of `{}`: {}",
                name,
                function.name,
                err.message()
            ))
        })?;
        params.declare(name.clone(), Binding::with_value(Some(ty.clone()), value));
    }
    Ok(params)
}

fn undefined_function(name: &str, arity: usize, ev: &Evaluator<'_>) -> EvalError {
    if ev.program().has_function_named(name) {
        EvalError::name(format!(
            "function `{}` does not take {} argument(s)",
            name, arity
        ))
    } else {
        EvalError::name(format!("function `{}` has not been defined", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::build::*;
    use crate::value::Type;
    use crate::{BufferHost, LoadedProgram};

    fn function(
        params: &[(&str, Type)],
        return_type: Type,
        body: Vec<crate::ast::Stmt>,
    ) -> Function {
        Function {
            name: "f".to_string(),
            params: params
                .iter()
                .map(|(name, ty)| (name.to_string(), ty.clone()))
                .collect(),
            return_type,
            body,
        }
    }

    fn with_evaluator(test: impl FnOnce(&mut Evaluator<'_>)) {
        let loaded = LoadedProgram::load(program(
            vec![structure("P", &[])],
            vec![func("main", &[], "void", vec![])],
        ))
        .unwrap();
        let mut host = BufferHost::new();
        let mut ev = Evaluator::new(loaded, &mut host);
        test(&mut ev);
    }

    #[test]
    fn test_missing_return_yields_default() {
        with_evaluator(|ev| {
            let f = function(&[], Type::Int, vec![]);
            assert_eq!(invoke(ev, &f, vec![]), Ok(Value::Int(0)));
            let g = function(&[], Type::String, vec![ret_void()]);
            assert_eq!(invoke(ev, &g, vec![]), Ok(Value::string("")));
        });
    }

    #[test]
    fn test_void_function_cannot_return_value() {
        with_evaluator(|ev| {
            let f = function(&[], Type::Void, vec![ret(int(1))]);
            assert!(matches!(invoke(ev, &f, vec![]), Err(EvalError::TypeError { .. })));
            assert_eq!(ev.env().call_depth(), 0);
        });
    }

    #[test]
    fn test_nil_return_becomes_typed_nil() {
        with_evaluator(|ev| {
            let f = function(&[], Type::Struct("P".into()), vec![ret(nil())]);
            let value = invoke(ev, &f, vec![]).unwrap();
            assert_eq!(value, Value::nil_of("P"));
        });
    }

    #[test]
    fn test_argument_type_mismatch() {
        with_evaluator(|ev| {
            let f = function(&[("a", Type::Int)], Type::Void, vec![]);
            assert!(matches!(
                invoke(ev, &f, vec![Value::Bool(true)]),
                Err(EvalError::TypeError { .. })
            ));
        });
    }

    #[test]
    fn test_raise_leaves_as_error() {
        with_evaluator(|ev| {
            let f = function(&[], Type::Int, vec![raise(string("E"))]);
            assert_eq!(invoke(ev, &f, vec![]), Err(EvalError::Raise("E".into())));
            assert_eq!(ev.env().call_depth(), 0);
        });
    }
}
