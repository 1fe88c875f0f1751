//! Error handling for the ACC compiler
//! 
//! `CompilerError` is the error that crosses crate boundaries. Each layer
//! keeps its own precise error type and converts into this one at the edge.

use thiserror::Error;

/// Main compiler error type that encompasses all phases of compilation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilerError {
    #[error("Type error: {message}")]
    TypeError { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Unsupported operator '{op}' in function '{function}'")]
    UnsupportedOperator { op: String, function: String },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Internal compiler error: {message}")]
    InternalError { message: String },
}

impl CompilerError {
    /// Create a type error
    pub fn type_error(message: impl Into<String>) -> Self {
        CompilerError::TypeError { message: message.into() }
    }

    /// Create an invalid-input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CompilerError::InvalidInput { message: message.into() }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        CompilerError::InternalError { message: message.into() }
    }

    /// Whether this error reports a gap in compiler coverage rather than
    /// corrupted internal state or bad input.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, CompilerError::UnsupportedOperator { .. })
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for CompilerError {
    fn from(err: std::io::Error) -> Self {
        CompilerError::IoError {
            message: err.to_string(),
        }
    }
}
