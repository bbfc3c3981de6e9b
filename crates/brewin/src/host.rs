//! Host interface: where output goes, where input comes from, and who
//! hears about fatal errors.
//!
//! The evaluator owns no I/O of its own. `print` and the input builtins go
//! through a [`Host`], and a fatal error is reported through
//! [`Host::fail`] exactly once before the run stops.
//!
//! - [`StdioHost`]: stdout/stdin/stderr (default for binaries)
//! - [`BufferHost`]: scripted input and captured output (tests, embedding)

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::error::ErrorKind;

/// The collaborator that performs all I/O for an evaluation run.
pub trait Host {
    /// Write one line of program output.
    fn output(&mut self, text: &str);

    /// Read one line of input, without its trailing newline.
    ///
    /// Returns `None` when no more input is available.
    fn get_input(&mut self) -> Option<String>;

    /// Report a fatal error. The run stops after this call.
    fn fail(&mut self, kind: ErrorKind, message: &str);
}

// ═══════════════════════════════════════════════════════════════════════
// Standard streams
// ═══════════════════════════════════════════════════════════════════════

/// Host that writes to stdout, reads stdin, and reports failures on stderr.
#[derive(Debug, Default)]
pub struct StdioHost;

impl StdioHost {
    /// Create a new stdio host.
    pub fn new() -> Self {
        Self
    }
}

impl Host for StdioHost {
    fn output(&mut self, text: &str) {
        println!("{text}");
    }

    fn get_input(&mut self) -> Option<String> {
        // Make prompts visible before blocking.
        let _ = io::stdout().flush();
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\n', '\r']).to_string()),
        }
    }

    fn fail(&mut self, kind: ErrorKind, message: &str) {
        eprintln!("{kind}: {message}");
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Captured buffers
// ═══════════════════════════════════════════════════════════════════════

/// Host that captures output lines and serves input from a queue.
///
/// # Example
///
/// ```
/// use brewin::{BufferHost, Host};
///
/// let mut host = BufferHost::with_input(["42"]);
/// host.output("hello");
/// assert_eq!(host.get_input().as_deref(), Some("42"));
/// assert_eq!(host.lines(), ["hello"]);
/// ```
#[derive(Debug, Default)]
pub struct BufferHost {
    lines: Vec<String>,
    input: VecDeque<String>,
    failure: Option<(ErrorKind, String)>,
}

impl BufferHost {
    /// Create a host with no input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host whose input lines are served in order.
    pub fn with_input<I, S>(input: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: input.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Queue another input line.
    pub fn push_input(&mut self, line: impl Into<String>) {
        self.input.push_back(line.into());
    }

    /// Output lines captured so far.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Captured output joined with newlines, one per line.
    pub fn output_text(&self) -> String {
        self.lines.iter().map(|l| format!("{l}\n")).collect()
    }

    /// The reported failure, if any.
    pub fn failure(&self) -> Option<(ErrorKind, &str)> {
        self.failure
            .as_ref()
            .map(|(kind, message)| (*kind, message.as_str()))
    }

    /// Clear captured output and any recorded failure.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.failure = None;
    }
}

impl Host for BufferHost {
    fn output(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn get_input(&mut self) -> Option<String> {
        self.input.pop_front()
    }

    fn fail(&mut self, kind: ErrorKind, message: &str) {
        self.failure = Some((kind, message.to_string()));
    }
}
