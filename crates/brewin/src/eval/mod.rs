//! Expression evaluation and statement execution

pub mod assign;
pub mod binary;
pub mod branch;
pub mod builtins;
pub mod call;
pub mod control;
pub mod loops;
pub mod new;
pub mod path;
pub mod stmt;
pub mod try_catch;
pub mod unary;

use crate::ast::Expr;
use crate::{EvalError, Evaluator, Value};

/// Trait for evaluating expression nodes to values.
///
/// This is the core abstraction for the tree-walking evaluator. A value
/// produced here is never lazy: any thunk met along the way is forced.
pub trait Evaluate {
    /// Evaluate this node against the evaluator's current frame.
    fn eval(&self, ev: &mut Evaluator<'_>) -> Result<Value, EvalError>;
}

/// Trait for executing statement nodes.
pub trait Execute {
    /// Run this statement and report how it completed.
    ///
    /// A raise coming out of a nested expression arrives as
    /// `Err(EvalError::Raise)` and is turned into [`Signal::Raise`] by the
    /// enclosing statement sequence.
    fn exec(&self, ev: &mut Evaluator<'_>) -> Result<Signal, EvalError>;
}

// ═══════════════════════════════════════════════════════════════════════
// Main Expression Dispatcher
// ═══════════════════════════════════════════════════════════════════════

impl Evaluate for Expr {
    fn eval(&self, ev: &mut Evaluator<'_>) -> Result<Value, EvalError> {
        match self {
            Expr::Int(n) => Ok(Value::Int(*n)),
            Expr::Str(s) => Ok(Value::string(s)),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Nil => Ok(Value::Nil),
            Expr::Var(path) => path::eval_path(path, ev),
            Expr::New(type_name) => new::eval_new(type_name, ev),
            Expr::Call(call) => call.eval(ev),
            Expr::Binary { op, lhs, rhs } => binary::eval_binary(*op, lhs, rhs, ev),
            Expr::Unary { op, operand } => unary::eval_unary(*op, operand, ev),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Convenience Functions
// ═══════════════════════════════════════════════════════════════════════

/// Evaluate an expression (convenience wrapper).
pub fn eval_expr(expr: &Expr, ev: &mut Evaluator<'_>) -> Result<Value, EvalError> {
    expr.eval(ev)
}

// Re-export for use by other modules
pub use control::Signal;
pub use stmt::{exec_block, exec_stmts};
