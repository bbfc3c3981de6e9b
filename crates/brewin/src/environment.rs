//! Runtime environment: a stack of call frames, each a stack of blocks

mod frame;

pub use frame::{Block, Frame};

use std::rc::Rc;

use crate::ast::Expr;
use crate::error::EvalError;
use crate::value::{Thunk, Type, Value};

/// What a binding currently holds.
#[derive(Debug, Clone)]
pub enum Slot {
    /// An evaluated value
    Ready(Value),

    /// An assigned-but-unevaluated expression
    Lazy(Rc<Thunk>),
}

/// A variable, parameter or struct field binding.
#[derive(Debug, Clone)]
pub struct Binding {
    /// Declared type; `None` for untyped `var x;`
    pub declared: Option<Type>,

    /// Current contents
    pub slot: Slot,
}

impl Binding {
    /// An untyped binding holding `nil`.
    pub fn untyped() -> Self {
        Self {
            declared: None,
            slot: Slot::Ready(Value::Nil),
        }
    }

    /// A typed binding holding the type's default value.
    pub fn typed(declared: Type) -> Self {
        Self {
            slot: Slot::Ready(declared.default_value()),
            declared: Some(declared),
        }
    }

    /// An untyped binding holding `value`.
    pub fn ready(value: Value) -> Self {
        Self {
            declared: None,
            slot: Slot::Ready(value),
        }
    }

    /// A typed binding holding `value`, which the caller has already coerced.
    pub fn with_value(declared: Option<Type>, value: Value) -> Self {
        Self {
            declared,
            slot: Slot::Ready(value),
        }
    }
}

/// The runtime environment managing variable bindings.
///
/// Name resolution never leaves the current frame: a callee cannot see or
/// assign its caller's variables. Within a frame, blocks are searched from
/// innermost to outermost.
///
/// # Example
///
/// ```
/// use brewin::{Block, Environment};
///
/// let mut env = Environment::new();
/// env.define("x", None).unwrap();
///
/// env.push_frame(Block::new()).unwrap();
/// assert!(env.lookup("x").is_none()); // caller's x is invisible
/// env.pop_frame();
///
/// assert!(env.lookup("x").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct Environment {
    /// Active frames; the first is the outermost (top-level) frame
    frames: Vec<Frame>,

    /// Number of call frames currently active
    calls: usize,

    /// Maximum number of active call frames
    max_call_depth: usize,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Create an environment with a single empty top-level frame.
    pub fn new() -> Self {
        Self::with_max_call_depth(1000)
    }

    /// Create an environment with a custom call depth limit.
    pub fn with_max_call_depth(max_depth: usize) -> Self {
        Self {
            frames: vec![Frame::new(Block::new())],
            calls: 0,
            max_call_depth: max_depth,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Frame Management (Call Entry/Exit)
    // ═══════════════════════════════════════════════════════════════════

    /// Enter a function activation whose bottom block is `params`.
    ///
    /// # Errors
    ///
    /// Returns `StackOverflow` if the call depth limit would be exceeded.
    pub fn push_frame(&mut self, params: Block) -> Result<(), EvalError> {
        if self.calls >= self.max_call_depth {
            return Err(EvalError::StackOverflow {
                depth: self.calls,
                max: self.max_call_depth,
            });
        }
        self.frames.push(Frame::new(params));
        self.calls += 1;
        Ok(())
    }

    /// Enter a frame rebuilt from a thunk's captured block chain.
    ///
    /// Forcing is not a call and does not count toward the call depth: a
    /// chain of assignments such as `sum = sum + i` nests one force per
    /// loop iteration.
    pub fn push_captured(&mut self, blocks: Vec<Block>) {
        self.frames.push(Frame::from_blocks(blocks));
    }

    /// Leave the current frame, discarding all of its blocks.
    ///
    /// Does nothing at the top-level frame.
    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 {
            if let Some(frame) = self.frames.pop() {
                if frame.is_call() {
                    self.calls -= 1;
                }
            }
        }
    }

    /// Number of active call frames.
    pub fn call_depth(&self) -> usize {
        self.calls
    }

    /// Number of blocks in the current frame.
    pub fn block_depth(&self) -> usize {
        self.current().depth()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Block Management (Scope Entry/Exit)
    // ═══════════════════════════════════════════════════════════════════

    /// Enter a nested block in the current frame.
    pub fn push_block(&mut self) {
        self.current_mut().push_block();
    }

    /// Leave the innermost block of the current frame.
    pub fn pop_block(&mut self) {
        self.current_mut().pop_block();
    }

    fn current(&self) -> &Frame {
        // The top-level frame is never popped.
        &self.frames[self.frames.len() - 1]
    }

    fn current_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    // ═══════════════════════════════════════════════════════════════════
    // Definition, Assignment, Lookup
    // ═══════════════════════════════════════════════════════════════════

    /// Declare `name` in the innermost block.
    ///
    /// Typed variables start at their type's default value, untyped ones
    /// at `nil`.
    ///
    /// # Errors
    ///
    /// Returns `NameError` if `name` is already declared in that block.
    pub fn define(&mut self, name: &str, declared: Option<Type>) -> Result<(), EvalError> {
        let binding = match declared {
            Some(ty) => Binding::typed(ty),
            None => Binding::untyped(),
        };
        if self.current_mut().innermost_mut().declare(name, binding) {
            Ok(())
        } else {
            Err(EvalError::name(format!(
                "variable `{}` defined more than once",
                name
            )))
        }
    }

    /// Lazily assign `expr` to `name`.
    ///
    /// The new thunk captures a snapshot of the current frame's blocks taken
    /// before the store, so `x = x + 1` reads the previous `x`.
    ///
    /// # Errors
    ///
    /// Returns `NameError` if no block of the current frame declares `name`.
    pub fn assign(&mut self, name: &str, expr: Rc<Expr>) -> Result<Rc<Thunk>, EvalError> {
        if self.current().find(name).is_none() {
            return Err(undefined(name));
        }
        let thunk = Rc::new(Thunk::new(expr, self.capture()));
        self.set_slot(name, Slot::Lazy(Rc::clone(&thunk)))?;
        Ok(thunk)
    }

    /// Overwrite the slot of an existing binding in the current frame.
    ///
    /// # Errors
    ///
    /// Returns `NameError` if no block of the current frame declares `name`.
    pub fn set_slot(&mut self, name: &str, slot: Slot) -> Result<(), EvalError> {
        match self.current_mut().find_mut(name) {
            Some(binding) => {
                binding.slot = slot;
                Ok(())
            }
            None => Err(undefined(name)),
        }
    }

    /// Find the binding for `name` in the current frame.
    ///
    /// Thunks are returned unforced; the evaluator forces them.
    pub fn lookup(&self, name: &str) -> Option<Binding> {
        self.current().find(name).cloned()
    }

    /// Check if `name` is declared in the innermost block.
    pub fn contains_in_current_block(&self, name: &str) -> bool {
        self.current()
            .blocks()
            .last()
            .map_or(false, |block| block.contains(name))
    }

    /// Snapshot of the current frame's block chain.
    pub fn capture(&self) -> Vec<Block> {
        self.current().blocks().to_vec()
    }
}

fn undefined(name: &str) -> EvalError {
    EvalError::name(format!("variable `{}` has not been defined", name))
}
