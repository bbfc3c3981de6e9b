//! AST provider seam
//!
//! The evaluator never reads source text. A [`Frontend`] turns whatever the
//! outside world hands over into an [`ast::Program`](crate::ast::Program):
//!
//! ```text
//! Source → [Frontend] → Program → [LoadedProgram::load] → [Evaluator::run]
//! ```
//!
//! [`JsonFrontend`] accepts the serde JSON form of the AST, so any external
//! parser can hand programs over without linking against this crate.

use std::fmt;

use crate::ast::Program;
use crate::EvalError;

// ═══════════════════════════════════════════════════════════════════════
// ERROR TYPES
// ═══════════════════════════════════════════════════════════════════════

/// Error that occurred while producing a program.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Human-readable error message
    pub message: String,

    /// Optional source location
    pub location: Option<SourceLocation>,
}

impl ParseError {
    /// Create a new parse error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    /// Add location information to the error.
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse error: {}", self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " at {}:{}", loc.line, loc.column)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Source location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,

    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// FRONTEND TRAIT
// ═══════════════════════════════════════════════════════════════════════

/// Producer of programs for the evaluator.
pub trait Frontend {
    /// Turn source into a program.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the source is not a well-formed program.
    fn parse_program(&self, source: &str) -> Result<Program, ParseError>;

    /// Format an evaluation error for display.
    fn format_error(&self, error: &EvalError) -> String {
        format!("{}: {}", error.kind(), error.message())
    }

    /// Name of this frontend.
    fn name(&self) -> &str;

    /// File extension of the sources this frontend reads.
    fn file_extension(&self) -> &str;
}

// ═══════════════════════════════════════════════════════════════════════
// JSON FRONTEND
// ═══════════════════════════════════════════════════════════════════════

/// Frontend that reads the JSON form of the AST.
///
/// # Example
///
/// ```
/// use brewin::{Frontend, JsonFrontend};
///
/// let program = JsonFrontend
///     .parse_program(r#"{ "functions": [{ "name": "main" }] }"#)
///     .unwrap();
/// assert_eq!(program.functions[0].name, "main");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFrontend;

impl JsonFrontend {
    /// Create a new JSON frontend.
    pub fn new() -> Self {
        Self
    }
}

impl Frontend for JsonFrontend {
    fn parse_program(&self, source: &str) -> Result<Program, ParseError> {
        serde_json::from_str(source).map_err(|e| {
            ParseError::new(e.to_string()).with_location(SourceLocation::new(e.line(), e.column()))
        })
    }

    fn name(&self) -> &str {
        "JSON"
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
