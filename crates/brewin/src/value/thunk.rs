//! Call-by-need thunks created by assignment

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::ast::Expr;
use crate::environment::{Block, Slot};
use crate::error::EvalError;

use super::Value;

/// Memoization state of a [`Thunk`].
#[derive(Debug)]
pub enum ThunkState {
    /// Not yet forced
    Pending(Deferred),
    /// Currently being forced; a read in this state is a cycle
    Forcing,
    /// Forced; the cached result
    Ready(Value),
}

/// The work an unforced thunk still holds: its expression and the block
/// chain visible when it was created, outermost first.
pub struct Deferred {
    expr: Rc<Expr>,
    captured: Vec<Block>,
}

impl Deferred {
    /// The wrapped expression.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// The captured block chain, outermost first.
    pub fn captured(&self) -> &[Block] {
        &self.captured
    }
}

impl Drop for Deferred {
    fn drop(&mut self) {
        // Each `x = x + 1` captures the previous thunk, so chains grow as long
        // as a loop runs. Unlink them iteratively.
        let mut blocks = std::mem::take(&mut self.captured);
        while let Some(block) = blocks.pop() {
            for binding in block.into_bindings() {
                let Slot::Lazy(thunk) = binding.slot else {
                    continue;
                };
                if let Ok(thunk) = Rc::try_unwrap(thunk) {
                    if let ThunkState::Pending(mut inner) = thunk.state.into_inner() {
                        blocks.append(&mut inner.captured);
                    }
                }
            }
        }
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("expr", &self.expr)
            .field("blocks", &self.captured.len())
            .finish()
    }
}

/// A deferred, memoized computation: an assigned-but-unevaluated expression.
///
/// The captured block chain is a copy of the binding tables of the
/// assigning frame. Thunks reachable from those tables stay shared with the
/// live environment, so forcing either copy fills the same memo slot. Once
/// forced, the expression and the captured chain are released.
pub struct Thunk {
    state: RefCell<ThunkState>,
}

impl Thunk {
    /// Create an unforced thunk.
    pub fn new(expr: Rc<Expr>, captured: Vec<Block>) -> Self {
        Self {
            state: RefCell::new(ThunkState::Pending(Deferred { expr, captured })),
        }
    }

    /// The pending work, or `None` once the thunk is forced or being forced.
    pub fn pending(&self) -> Option<Ref<'_, Deferred>> {
        Ref::filter_map(self.state.borrow(), |state| match state {
            ThunkState::Pending(deferred) => Some(deferred),
            _ => None,
        })
        .ok()
    }

    /// The memoized value, if the thunk has been forced.
    pub fn cached(&self) -> Option<Value> {
        match &*self.state.borrow() {
            ThunkState::Ready(value) => Some(value.clone()),
            _ => None,
        }
    }

    /// Whether the thunk has been forced.
    pub fn is_forced(&self) -> bool {
        matches!(&*self.state.borrow(), ThunkState::Ready(_))
    }

    /// Mark the thunk as being forced and hand over its pending work.
    ///
    /// # Errors
    ///
    /// Returns `NameError` if the thunk is already being forced: its
    /// expression reads a value that is still being defined. Returns
    /// `FaultError` if it was already forced.
    pub fn begin_force(&self) -> Result<Deferred, EvalError> {
        let mut state = self.state.borrow_mut();
        match std::mem::replace(&mut *state, ThunkState::Forcing) {
            ThunkState::Pending(deferred) => Ok(deferred),
            ThunkState::Forcing => Err(EvalError::name(
                "variable read while its own value is being computed",
            )),
            ready @ ThunkState::Ready(_) => {
                *state = ready;
                Err(EvalError::fault("thunk was already forced"))
            }
        }
    }

    /// Store the forced result.
    pub fn finish(&self, value: Value) {
        *self.state.borrow_mut() = ThunkState::Ready(value);
    }

    /// Return to `Pending` after a forcing attempt was aborted by an error
    /// or a raise, so a later read re-evaluates.
    pub fn abandon(&self, deferred: Deferred) {
        *self.state.borrow_mut() = ThunkState::Pending(deferred);
    }
}

impl fmt::Debug for Thunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Thunk")
            .field("state", &*self.state.borrow())
            .finish()
    }
}
