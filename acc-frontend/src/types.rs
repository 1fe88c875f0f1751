//! Value types of the source language
//!
//! Every typed AST node carries one of these. The rules here decide the
//! result type of an operator and whether one integer type widens to another.

use acc_common::CompilerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::ast::{BinaryOp, UnaryOp};

/// First-class value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    #[default]
    Void,
    Bool,
    I32,
    I64,
}

impl ValueType {
    /// Check if this is a variant of integer (bool included)
    pub fn is_integer(&self) -> bool {
        matches!(self, ValueType::Bool | ValueType::I32 | ValueType::I64)
    }

    /// Number of bits in an integer type, 0 for anything else
    pub fn int_size(&self) -> u32 {
        match self {
            ValueType::Bool => 1,
            ValueType::I32 => 32,
            ValueType::I64 => 64,
            ValueType::Void => 0,
        }
    }

    /// Whether a value of this type can be extended to be equal to `other`.
    pub fn can_extend_to(&self, other: ValueType) -> bool {
        if *self == other {
            return true;
        }
        if !self.is_integer() || !other.is_integer() {
            return false;
        }
        self.int_size() <= other.int_size()
    }

    /// Type after applying a unary arithmetic operator to a value of this type
    pub fn unary_result(&self, op: UnaryOp) -> Result<ValueType, CompilerError> {
        if !self.is_integer() {
            return Err(CompilerError::type_error(format!(
                "operator '{op}' cannot be applied to a value of type {self}"
            )));
        }
        Ok(match op {
            UnaryOp::Neg | UnaryOp::BitNot => *self,
            UnaryOp::LogicalNot => ValueType::Bool,
        })
    }

    /// Type after applying a binary operator. Arithmetic yields the wider
    /// operand type; comparisons yield bool.
    pub fn binary_result(&self, op: BinaryOp, rhs: ValueType) -> Result<ValueType, CompilerError> {
        let wider = if self.can_extend_to(rhs) {
            rhs
        } else if rhs.can_extend_to(*self) {
            *self
        } else {
            return Err(CompilerError::type_error(format!(
                "operator '{op}' cannot combine {self} and {rhs}"
            )));
        };
        if !wider.is_integer() {
            return Err(CompilerError::type_error(format!(
                "operator '{op}' cannot be applied to values of type {wider}"
            )));
        }
        Ok(if op.is_comparison() { ValueType::Bool } else { wider })
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Void => write!(f, "void"),
            ValueType::Bool => write!(f, "bool"),
            ValueType::I32 => write!(f, "i32"),
            ValueType::I64 => write!(f, "i64"),
        }
    }
}
