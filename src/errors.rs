//! Custom error types for the simulator.
//!
//! The simulation core itself has no fallible surface; everything that
//! can go wrong lives at the edges (terminal setup, output serialization,
//! configuration flags), and is wrapped here with clear messages and a
//! stable exit code per category.

use std::error::Error;
use std::fmt;
use std::io;

/// Exit codes for the application.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Terminal setup or rendering error.
    pub const TERMINAL_ERROR: i32 = 1;
    /// Configuration error (invalid arguments).
    pub const CONFIG_ERROR: i32 = 3;
    /// Output serialization error.
    pub const OUTPUT_ERROR: i32 = 4;
    /// Unknown/unexpected error.
    pub const UNKNOWN_ERROR: i32 = 99;
}

/// Categories of errors the simulator can surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Terminal initialization, input, or rendering failures.
    Terminal,
    /// Invalid configuration or arguments.
    Config,
    /// Report serialization or write failures.
    Output,
    /// Unknown or unexpected errors.
    Unknown,
}

impl ErrorKind {
    /// Get the exit code for this error kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorKind::Terminal => exit_codes::TERMINAL_ERROR,
            ErrorKind::Config => exit_codes::CONFIG_ERROR,
            ErrorKind::Output => exit_codes::OUTPUT_ERROR,
            ErrorKind::Unknown => exit_codes::UNKNOWN_ERROR,
        }
    }

    /// Get a user-friendly description of this error kind.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorKind::Terminal => "Terminal error",
            ErrorKind::Config => "Configuration error",
            ErrorKind::Output => "Output error",
            ErrorKind::Unknown => "Unknown error",
        }
    }
}

/// A user-friendly error type for simulator operations.
#[derive(Debug)]
pub struct SimError {
    /// The kind of error.
    pub kind: ErrorKind,
    /// User-friendly error message.
    pub message: String,
    /// Optional suggestion for how to resolve the error.
    pub suggestion: Option<String>,
    /// The underlying error, if any.
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl SimError {
    /// Create a new SimError.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into(), suggestion: None, source: None }
    }

    /// Add a suggestion for how to resolve the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add the underlying error source.
    pub fn with_source(
        mut self,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        self.kind.exit_code()
    }

    /// Create a terminal error.
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Terminal, message).with_suggestion(
            "Run inside an interactive terminal, or pass --json for \
             non-interactive output.",
        )
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    /// Create an output error.
    pub fn output(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Output, message)
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.description(), self.message)?;

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }

        Ok(())
    }
}

impl Error for SimError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl From<io::Error> for SimError {
    fn from(error: io::Error) -> Self {
        SimError::terminal(error.to_string()).with_source(error)
    }
}

impl From<serde_json::Error> for SimError {
    fn from(error: serde_json::Error) -> Self {
        SimError::output(error.to_string()).with_source(error)
    }
}
