// ABOUTME: Diagnostic and evaluation error types shared by the pipeline stages

use crate::value::Value;
use thiserror::Error;

/// Problems found before evaluation, plus warnings from the declaration walk.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    #[error("Syntax Error at line {line} : {message}")]
    Syntax { line: usize, message: String },

    #[error("Shadow warning at line {line}, Declaring an already declared variable: \"{name}\"")]
    ShadowWarning { line: usize, name: String },
}

/// Append-only collector owned by the driver and threaded through the
/// lexer, the parser and the shadow pre-pass.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn syntax_error(&mut self, line: usize, message: impl Into<String>) {
        self.errors.push(Diagnostic::Syntax {
            line,
            message: message.into(),
        });
    }

    pub fn shadow_warning(&mut self, line: usize, name: impl Into<String>) {
        self.warnings.push(Diagnostic::ShadowWarning {
            line,
            name: name.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }
}

/// Errors raised while evaluating. The `Display` form is the exact text the
/// driver prints before exiting non-zero.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Fatal evaluation failure, carrying the offending value for context.
    #[error("Runtime Error : {value} at {message}")]
    Runtime { value: String, message: String },

    /// Failure without a useful value to show, mostly from builtins.
    #[error("Error : {0}")]
    Message(String),
}

impl EvalError {
    /// Runtime error with the stringified offending value.
    pub fn runtime(value: &Value, message: impl Into<String>) -> Self {
        EvalError::Runtime {
            value: value.to_string(),
            message: message.into(),
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        EvalError::Message(message.into())
    }
}
