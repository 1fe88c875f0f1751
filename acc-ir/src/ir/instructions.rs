//! IR Instructions
//! 
//! An instruction is the unit of computation and of value identity: the
//! value it produces is referred to by its `InstrId`.

use serde::{Deserialize, Serialize};
use std::fmt;
use crate::ir::{BlockId, Immediate, InstrId, IrType, Opcode, PhiArg};

/// Operand payload, shaped by opcode class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstrKind {
    /// $id = ty literal
    Immediate(Immediate),

    /// $id = ty phi [pred, value], ...
    Phi { incoming: Vec<PhiArg> },

    /// Casts (zext/sext/trunc) and unary arithmetic (neg/not)
    Unary { op: Opcode, operand: InstrId },

    /// Comparisons: $id = i1 eq left right
    Binary { op: Opcode, left: InstrId, right: InstrId },

    /// ret value; the value is the null sentinel for `return;`
    Return { value: InstrId },

    /// jmp target
    Jump { target: BlockId },

    /// br cond on_true on_false
    Branch { cond: InstrId, on_true: BlockId, on_false: BlockId },
}

/// IR Instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub id: InstrId,
    pub ty: IrType,
    /// Block this instruction was constructed for
    pub block: BlockId,
    pub kind: InstrKind,
}

impl Instruction {
    pub fn opcode(&self) -> Opcode {
        match &self.kind {
            InstrKind::Immediate(_) => Opcode::Imm,
            InstrKind::Phi { .. } => Opcode::Phi,
            InstrKind::Unary { op, .. } | InstrKind::Binary { op, .. } => *op,
            InstrKind::Return { .. } => Opcode::Ret,
            InstrKind::Jump { .. } => Opcode::Jmp,
            InstrKind::Branch { .. } => Opcode::Br,
        }
    }

    pub fn is_terminator(&self) -> bool {
        self.opcode().is_terminator()
    }

    /// Values this instruction reads, in operand order
    pub fn operands(&self) -> Vec<InstrId> {
        match &self.kind {
            InstrKind::Immediate(_) | InstrKind::Jump { .. } => Vec::new(),
            InstrKind::Phi { incoming } => incoming.iter().map(|arg| arg.value).collect(),
            InstrKind::Unary { operand, .. } => vec![*operand],
            InstrKind::Binary { left, right, .. } => vec![*left, *right],
            InstrKind::Return { value } => vec![*value],
            InstrKind::Branch { cond, .. } => vec![*cond],
        }
    }

    /// Blocks control may transfer to after this instruction
    pub fn targets(&self) -> Vec<BlockId> {
        match &self.kind {
            InstrKind::Jump { target } => vec![*target],
            InstrKind::Branch { on_true, on_false, .. } => vec![*on_true, *on_false],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Instruction { id, ty, kind, .. } = self;
        match kind {
            InstrKind::Immediate(Immediate::Void) => write!(f, "{id} = void;"),
            InstrKind::Immediate(imm) => write!(f, "{id} = {ty} {imm};"),
            InstrKind::Phi { incoming } => {
                write!(f, "{id} = {ty} phi ")?;
                for (i, arg) in incoming.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "[{} {}]", arg.source, arg.value)?;
                }
                write!(f, ";")
            }
            InstrKind::Unary { op, operand } => write!(f, "{id} = {ty} {op} {operand};"),
            InstrKind::Binary { op, left, right } => write!(f, "{id} = {ty} {op} {left} {right};"),
            InstrKind::Return { value } if value.is_null() => write!(f, "ret."),
            InstrKind::Return { value } => write!(f, "ret {value}."),
            InstrKind::Jump { target } => write!(f, "jmp {target}."),
            InstrKind::Branch { cond, on_true, on_false } => write!(f, "br {cond} {on_true} {on_false}."),
        }
    }
}
