//! ACC Compiler - Common Types and Utilities
//! 
//! This crate contains the error type shared by every layer of the ACC
//! compiler, from typed AST construction through ACIR lowering to the driver.

pub mod error;

pub use error::CompilerError;
