//! IR Operation Codes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operation code of an instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    // Loads
    Imm,    // load immediate

    // SSA
    Phi,

    // Casts
    ZExt,   // zero extend
    SExt,   // sign extend
    Trunc,  // truncate

    // Arithmetic
    Neg,
    Not,    // bitwise not
    CmpEq,  // compare equal, result is i1

    // Terminators
    Ret,
    Jmp,    // unconditional jump
    Br,     // conditional branch
}

impl Opcode {
    /// Terminators end a block and may only appear as its last instruction.
    pub fn is_terminator(&self) -> bool {
        matches!(self, Opcode::Ret | Opcode::Jmp | Opcode::Br)
    }

    pub fn is_jump(&self) -> bool {
        matches!(self, Opcode::Jmp | Opcode::Br)
    }

    pub fn is_cast(&self) -> bool {
        matches!(self, Opcode::ZExt | Opcode::SExt | Opcode::Trunc)
    }

    /// Single-operand arithmetic applied at a promoted integer type
    pub fn is_unary_arith(&self) -> bool {
        matches!(self, Opcode::Neg | Opcode::Not)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op_str = match self {
            Opcode::Imm => "imm",
            Opcode::Phi => "phi",
            Opcode::ZExt => "zext",
            Opcode::SExt => "sext",
            Opcode::Trunc => "trunc",
            Opcode::Neg => "neg",
            Opcode::Not => "not",
            Opcode::CmpEq => "eq",
            Opcode::Ret => "ret",
            Opcode::Jmp => "jmp",
            Opcode::Br => "br",
        };
        write!(f, "{op_str}")
    }
}
