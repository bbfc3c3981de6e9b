//! `try`/`catch` and `raise`

use crate::ast::{Catch, Expr, Stmt};
use crate::error::type_name;
use crate::{EvalError, Evaluator, Value};

use super::{exec_block, Evaluate, Signal};

/// `try { body } catch "tag" { handler } ...`
///
/// The body runs in its own block. If it completes with `Raise(tag)` and a
/// handler for `tag` exists, the first such handler runs in a fresh block
/// and its signal becomes the try's. Any other signal passes through.
pub fn exec_try(
    body: &[Stmt],
    catches: &[Catch],
    ev: &mut Evaluator<'_>,
) -> Result<Signal, EvalError> {
    match exec_block(body, ev)? {
        Signal::Raise(tag) => match catches.iter().find(|handler| handler.tag == tag) {
            Some(handler) => {
                tracing::debug!(tag = %tag, "caught raise");
                exec_block(&handler.body, ev)
            }
            None => Ok(Signal::Raise(tag)),
        },
        signal => Ok(signal),
    }
}

/// `raise expr;`
///
/// # Errors
///
/// Returns `TypeError` if the tag expression is not a string.
pub fn exec_raise(expr: &Expr, ev: &mut Evaluator<'_>) -> Result<Signal, EvalError> {
    match expr.eval(ev)? {
        Value::String(tag) => Ok(Signal::Raise(tag.to_string())),
        other => Err(EvalError::type_error(format!(
            "raise expects a `string` tag, found `{}`",
            type_name(&other)
        ))),
    }
}
