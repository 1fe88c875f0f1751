//! ACIR error types
//!
//! Both kinds are compiler-correctness signals: they abort the function being
//! lowered and are never retried.

use acc_common::CompilerError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcirError {
    /// The lowering pass met an operator it has no case for.
    #[error("unsupported operator '{op}' in function '{function}'")]
    UnsupportedOperator {
        op: String,
        function: String,
    },

    /// A type or operand fell outside what the IR model admits.
    #[error("internal invariant violated: {message}")]
    InvariantViolation {
        message: String,
    },
}

impl AcirError {
    pub fn invariant(message: impl Into<String>) -> Self {
        AcirError::InvariantViolation { message: message.into() }
    }
}

impl From<AcirError> for CompilerError {
    fn from(err: AcirError) -> Self {
        match err {
            AcirError::UnsupportedOperator { op, function } => {
                CompilerError::UnsupportedOperator { op, function }
            }
            AcirError::InvariantViolation { message } => CompilerError::InternalError { message },
        }
    }
}
