//! Statement execution

use crate::ast::Stmt;
use crate::{EvalError, Evaluator};

use super::{assign, branch, loops, try_catch, Evaluate, Execute, Signal};

impl Execute for Stmt {
    fn exec(&self, ev: &mut Evaluator<'_>) -> Result<Signal, EvalError> {
        match self {
            Stmt::VarDef { name, var_type } => assign::exec_var_def(name, var_type.as_deref(), ev),
            Stmt::Assign(assignment) => assignment.exec(ev),
            Stmt::Call(call) => {
                call.eval(ev)?;
                Ok(Signal::Normal)
            }
            Stmt::If {
                condition,
                then_body,
                else_body,
            } => branch::exec_if(condition, then_body, else_body.as_deref(), ev),
            Stmt::For {
                init,
                condition,
                update,
                body,
            } => loops::exec_for(init, condition, update, body, ev),
            Stmt::Return(None) => Ok(Signal::Return(None)),
            Stmt::Return(Some(expr)) => Ok(Signal::Return(Some(expr.eval(ev)?))),
            Stmt::Try { body, catches } => try_catch::exec_try(body, catches, ev),
            Stmt::Raise(expr) => try_catch::exec_raise(expr, ev),
        }
    }
}

/// Run statements in order in the current block.
///
/// Stops at the first statement that does not complete normally and
/// returns its signal. A raise that escaped an expression as
/// `EvalError::Raise` becomes [`Signal::Raise`] here; every other error
/// propagates.
pub fn exec_stmts(stmts: &[Stmt], ev: &mut Evaluator<'_>) -> Result<Signal, EvalError> {
    for stmt in stmts {
        let signal = match stmt.exec(ev) {
            Ok(signal) => signal,
            Err(err) => Signal::from_error(err)?,
        };
        if !signal.is_normal() {
            return Ok(signal);
        }
    }
    Ok(Signal::Normal)
}

/// Run statements in a fresh block, discarding it afterwards.
pub fn exec_block(stmts: &[Stmt], ev: &mut Evaluator<'_>) -> Result<Signal, EvalError> {
    // Push a new block for the body
    ev.env_mut().push_block();
    tracing::trace!(depth = ev.env().block_depth(), "enter block");

    let result = exec_stmts(stmts, ev);

    // Pop the block (even on error)
    ev.env_mut().pop_block();

    result
}
