//! IR Type Codes
//! 
//! A closed set of machine-level types, simpler than the AST's value types,
//! and the rules that bridge the two.

use acc_frontend::ValueType;
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::AcirError;

/// IR type code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IrType {
    Void,
    I1,   // bool
    I32,
    I64,
    /// Reserved; nothing lowers to a pointer yet.
    Ptr,
}

/// Translate an AST value type into its IR type code.
pub fn ir_type_of(value_type: ValueType) -> IrType {
    match value_type {
        ValueType::Void => IrType::Void,
        ValueType::Bool => IrType::I1,
        ValueType::I32 => IrType::I32,
        ValueType::I64 => IrType::I64,
    }
}

impl From<ValueType> for IrType {
    fn from(value_type: ValueType) -> Self {
        ir_type_of(value_type)
    }
}

impl IrType {
    /// Check if this is an integer type
    pub fn is_integer(&self) -> bool {
        matches!(self, IrType::I1 | IrType::I32 | IrType::I64)
    }

    /// Bit width of an integer type
    pub fn bit_width(&self) -> Option<u32> {
        match self {
            IrType::I1 => Some(1),
            IrType::I32 => Some(32),
            IrType::I64 => Some(64),
            IrType::Void | IrType::Ptr => None,
        }
    }

    /// Type an integer operand is widened to before unary arithmetic.
    pub fn integer_promote(&self) -> Result<IrType, AcirError> {
        match self {
            IrType::I1 | IrType::I32 => Ok(IrType::I32),
            IrType::I64 => Ok(IrType::I64),
            IrType::Void | IrType::Ptr => Err(AcirError::invariant(format!(
                "integer promotion requested on non-integer type {self}"
            ))),
        }
    }

    /// Whether `self` has fewer bits than `other`. False unless both are integers.
    pub fn is_narrower_than(&self, other: IrType) -> bool {
        match (self.bit_width(), other.bit_width()) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        }
    }
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrType::Void => write!(f, "void"),
            IrType::I1 => write!(f, "i1"),
            IrType::I32 => write!(f, "i32"),
            IrType::I64 => write!(f, "i64"),
            IrType::Ptr => write!(f, "ptr"),
        }
    }
}
