//! IR Value Identities and Payloads
//! 
//! Ids are dense indices into the arenas of the function that produced them
//! and are meaningless outside it.

use serde::{Deserialize, Serialize};
use std::fmt;
use crate::ir::IrType;

/// Value identifier: the position of an instruction in its function's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstrId(pub u32);

impl InstrId {
    /// Identity of the function's null sentinel, the void "no value" stand-in.
    /// It never indexes the arena.
    pub const NULL: InstrId = InstrId(u32::MAX);

    pub fn is_null(&self) -> bool {
        *self == InstrId::NULL
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for InstrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "$null")
        } else {
            write!(f, "${}", self.0)
        }
    }
}

/// Basic block identifier: the number of blocks in the function when it was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockId(pub u32);

impl BlockId {
    pub const ENTRY: BlockId = BlockId(0);

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Literal carried by an immediate load, typed by the instruction's IR type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Immediate {
    /// Only the null sentinel carries this
    Void,
    I1(bool),
    I32(i32),
    I64(i64),
}

impl Immediate {
    pub fn ir_type(&self) -> IrType {
        match self {
            Immediate::Void => IrType::Void,
            Immediate::I1(_) => IrType::I1,
            Immediate::I32(_) => IrType::I32,
            Immediate::I64(_) => IrType::I64,
        }
    }

    /// The zero value of an integer type
    pub fn zero(ty: IrType) -> Option<Immediate> {
        match ty {
            IrType::I1 => Some(Immediate::I1(false)),
            IrType::I32 => Some(Immediate::I32(0)),
            IrType::I64 => Some(Immediate::I64(0)),
            IrType::Void | IrType::Ptr => None,
        }
    }
}

impl fmt::Display for Immediate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Immediate::Void => write!(f, "void"),
            Immediate::I1(val) => write!(f, "{val}"),
            Immediate::I32(val) => write!(f, "{val}"),
            Immediate::I64(val) => write!(f, "{val}"),
        }
    }
}

/// One incoming edge of a phi node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhiArg {
    pub source: BlockId,  // predecessor the value flows in from
    pub value: InstrId,
}
