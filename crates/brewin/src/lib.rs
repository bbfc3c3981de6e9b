//! # Brewin
//!
//! A tree-walking evaluator for Brewin, a small imperative language with
//! lazy assignment, structs and exceptions.
//!
//! Programs arrive already parsed, as an [`ast::Program`], either built in
//! Rust (see [`ast::build`]) or read through a [`Frontend`] such as
//! [`JsonFrontend`]. The evaluator performs all I/O through a [`Host`].
//!
//! ## Architecture
//!
//! - **Program**: function table keyed by (name, arity) and struct table,
//!   validated once before `main` runs
//! - **Environment**: a stack of frames, one per call, each a stack of blocks
//! - **Lazy assignment**: `x = e` stores a memoized thunk that captures a
//!   snapshot of the frame's blocks; `e` runs on the first read of `x`
//! - **Signals**: statements complete with `Normal`, `Return` or `Raise`,
//!   and `try`/`catch` consumes matching raises
//!
//! ## Example
//!
//! ```
//! use brewin::ast::build::*;
//! use brewin::{run_program, BufferHost};
//!
//! let program = program(
//!     vec![],
//!     vec![func(
//!         "main",
//!         &[],
//!         "void",
//!         vec![
//!             var_def("x"),
//!             assign("x", add(int(2), int(3))),
//!             print(vec![string("x is "), var("x")]),
//!         ],
//!     )],
//! );
//!
//! let mut host = BufferHost::new();
//! run_program(program, &mut host).unwrap();
//! assert_eq!(host.lines(), ["x is 5"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod context;
pub mod environment;
pub mod error;
pub mod eval;
pub mod evaluator;
pub mod frontend;
pub mod host;
pub mod program;
pub mod stack;
pub mod value;

// Re-export main types
pub use context::EvalContext;
pub use environment::{Binding, Block, Environment, Frame, Slot};
pub use error::{ErrorKind, EvalError, Result};
pub use eval::{eval_expr, exec_block, exec_stmts, Evaluate, Execute, Signal};
pub use evaluator::{run_program, run_program_with_context, Evaluator};
pub use frontend::{Frontend, JsonFrontend, ParseError, SourceLocation};
pub use host::{BufferHost, Host, StdioHost};
pub use program::{Function, LoadedProgram, StructType};
pub use value::{Deferred, StructInstance, StructRef, Thunk, ThunkState, Type, Value};

/// Brewin version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
