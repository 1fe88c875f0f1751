//! ACC Compiler - Frontend
//! 
//! This crate provides the side of the compiler that the IR layer consumes:
//! - Types: the first-class value types of the source language
//! - AST: the typed abstract syntax tree, type-checked at construction
//!
//! Scanning and parsing live upstream; a typed AST can also be loaded from
//! JSON for driving the middle layer directly.

pub mod ast;
pub mod types;

pub use ast::{AstFunction, AstKind, AstNode, AstOp, BinaryOp, Literal, TranslationUnit, UnaryOp};
pub use types::ValueType;
