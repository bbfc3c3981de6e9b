//! Per-run evaluator state and the program entry point
//!
//! An [`Evaluator`] owns the environment for exactly one run of a loaded
//! program. Expression and statement evaluation (in [`crate::eval`]) borrow
//! it mutably; nothing is global.

use std::rc::Rc;

use crate::ast;
use crate::context::EvalContext;
use crate::environment::{Binding, Environment, Slot};
use crate::error::EvalError;
use crate::eval::call;
use crate::eval::Evaluate;
use crate::host::Host;
use crate::program::LoadedProgram;
use crate::stack::ensure_sufficient_stack;
use crate::value::{Thunk, Value};

/// Tree-walking evaluator for one run of a Brewin program.
///
/// # Example
///
/// ```
/// use brewin::ast::build::*;
/// use brewin::{BufferHost, Evaluator, LoadedProgram};
///
/// let program = LoadedProgram::load(program(
///     vec![],
///     vec![func("main", &[], "void", vec![print(vec![string("hi")])])],
/// ))
/// .unwrap();
///
/// let mut host = BufferHost::new();
/// Evaluator::new(program, &mut host).run().unwrap();
/// assert_eq!(host.lines(), ["hi"]);
/// ```
pub struct Evaluator<'h> {
    program: Rc<LoadedProgram>,
    env: Environment,
    host: &'h mut dyn Host,
    ctx: EvalContext,
}

impl<'h> Evaluator<'h> {
    /// Create an evaluator with the default context.
    pub fn new(program: LoadedProgram, host: &'h mut dyn Host) -> Self {
        Self::with_context(program, host, EvalContext::default())
    }

    /// Create an evaluator with a custom context.
    pub fn with_context(program: LoadedProgram, host: &'h mut dyn Host, ctx: EvalContext) -> Self {
        Self {
            program: Rc::new(program),
            env: Environment::with_max_call_depth(ctx.max_call_depth),
            host,
            ctx,
        }
    }

    /// The loaded program.
    pub fn program(&self) -> &LoadedProgram {
        &self.program
    }

    /// The active configuration.
    pub fn context(&self) -> &EvalContext {
        &self.ctx
    }

    /// The environment.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// The environment, for mutation.
    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// The host performing I/O for this run.
    pub fn host(&mut self) -> &mut (dyn Host + 'h) {
        &mut *self.host
    }

    // ═══════════════════════════════════════════════════════════════════
    // Running
    // ═══════════════════════════════════════════════════════════════════

    /// Run `main()` to completion.
    ///
    /// A fatal error is reported through [`Host::fail`] once and then
    /// returned. An exception that escapes `main` is reported as a
    /// `FaultError`.
    ///
    /// # Errors
    ///
    /// Returns the fatal error that stopped the run.
    pub fn run(&mut self) -> Result<(), EvalError> {
        let result = self.run_main();
        if let Err(err) = &result {
            tracing::debug!(kind = %err.kind(), "run failed");
            self.host.fail(err.kind(), &err.message());
        }
        result
    }

    fn run_main(&mut self) -> Result<(), EvalError> {
        let main = self
            .program
            .function("main", 0)
            .ok_or_else(|| EvalError::name("No main() function was found"))?;
        match call::invoke(self, &main, Vec::new()) {
            Ok(_) => Ok(()),
            Err(EvalError::Raise(tag)) => {
                Err(EvalError::fault(format!("unhandled exception `{}`", tag)))
            }
            Err(err) => Err(err),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Reading bindings
    // ═══════════════════════════════════════════════════════════════════

    /// Produce the value a binding holds, forcing a thunk if needed and
    /// coercing to the binding's declared type.
    ///
    /// # Errors
    ///
    /// Propagates anything forcing produces, and `TypeError` if the value
    /// does not fit the declared type.
    pub fn resolve(&mut self, binding: Binding) -> Result<Value, EvalError> {
        let value = match binding.slot {
            Slot::Ready(value) => value,
            Slot::Lazy(thunk) => self.force(&thunk)?,
        };
        match binding.declared {
            Some(ty) => ty.coerce(value),
            None => Ok(value),
        }
    }

    /// Force a thunk, evaluating its expression at most once.
    ///
    /// The expression runs in a frame rebuilt from the thunk's captured
    /// blocks. If evaluation fails or raises, the thunk stays unforced and
    /// the error propagates to the reader.
    ///
    /// # Errors
    ///
    /// Returns `NameError` if the thunk is read while it is being forced,
    /// or whatever the expression produces.
    pub fn force(&mut self, thunk: &Rc<Thunk>) -> Result<Value, EvalError> {
        if let Some(value) = thunk.cached() {
            return Ok(value);
        }
        let deferred = thunk.begin_force()?;
        tracing::trace!(expr = ?deferred.expr(), "forcing thunk");

        self.env.push_captured(deferred.captured().to_vec());
        let result = ensure_sufficient_stack(|| deferred.expr().eval(self));
        self.env.pop_frame();

        match result {
            Ok(value) => {
                thunk.finish(value.clone());
                Ok(value)
            }
            Err(err) => {
                thunk.abandon(deferred);
                Err(err)
            }
        }
    }
}

/// Load, validate and run a program against `host`.
///
/// Load-time failures are reported through the host exactly like runtime
/// ones.
///
/// # Errors
///
/// Returns the fatal error that stopped loading or running.
pub fn run_program(program: ast::Program, host: &mut dyn Host) -> Result<(), EvalError> {
    let loaded = match LoadedProgram::load(program) {
        Ok(loaded) => loaded,
        Err(err) => {
            host.fail(err.kind(), &err.message());
            return Err(err);
        }
    };
    Evaluator::new(loaded, host).run()
}

/// Like [`run_program`] with a custom context.
///
/// # Errors
///
/// Returns the fatal error that stopped loading or running.
pub fn run_program_with_context(
    program: ast::Program,
    host: &mut dyn Host,
    ctx: EvalContext,
) -> Result<(), EvalError> {
    let loaded = match LoadedProgram::load(program) {
        Ok(loaded) => loaded,
        Err(err) => {
            host.fail(err.kind(), &err.message());
            return Err(err);
        }
    };
    Evaluator::with_context(loaded, host, ctx).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::build::*;
    use crate::error::ErrorKind;
    use crate::host::BufferHost;

    fn main_only(body: Vec<ast::Stmt>) -> ast::Program {
        program(vec![], vec![func("main", &[], "void", body)])
    }

    #[test]
    fn test_force_memoizes() {
        let loaded = LoadedProgram::load(main_only(vec![])).unwrap();
        let mut host = BufferHost::new();
        let mut ev = Evaluator::new(loaded, &mut host);
        let thunk = Rc::new(Thunk::new(Rc::new(add(int(2), int(3))), Vec::new()));
        assert_eq!(ev.force(&thunk).unwrap(), Value::Int(5));
        assert!(thunk.is_forced());
        assert_eq!(ev.env().call_depth(), 0);
    }

    #[test]
    fn test_failed_force_stays_pending() {
        let loaded = LoadedProgram::load(main_only(vec![])).unwrap();
        let mut host = BufferHost::new();
        let mut ev = Evaluator::new(loaded, &mut host);
        let thunk = Rc::new(Thunk::new(Rc::new(var("missing")), Vec::new()));
        assert!(matches!(ev.force(&thunk), Err(EvalError::NameError { .. })));
        assert!(!thunk.is_forced());
        assert_eq!(ev.env().call_depth(), 0);
    }

    #[test]
    fn test_resolve_coerces_to_declared_type() {
        let loaded = LoadedProgram::load(program(
            vec![structure("P", &[])],
            vec![func("main", &[], "void", vec![])],
        ))
        .unwrap();
        let mut host = BufferHost::new();
        let mut ev = Evaluator::new(loaded, &mut host);
        let binding = Binding::with_value(Some(crate::value::Type::Struct("P".into())), Value::Nil);
        let value = ev.resolve(binding).unwrap();
        assert_eq!(crate::error::type_name(&value), "P");
    }

    #[test]
    fn test_run_reports_unhandled_raise() {
        let mut host = BufferHost::new();
        let err = run_program(main_only(vec![raise(string("oops"))]), &mut host).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fault);
        assert_eq!(host.failure().map(|(kind, _)| kind), Some(ErrorKind::Fault));
    }

    #[test]
    fn test_load_failure_is_reported() {
        let mut host = BufferHost::new();
        let err = run_program(program(vec![], vec![]), &mut host).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Name);
        assert_eq!(
            host.failure(),
            Some((ErrorKind::Name, "No main() function was found"))
        );
    }
}
