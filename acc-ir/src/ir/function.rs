//! Function Definitions
//!
//! A function owns every block and instruction built for it. All
//! construction goes through the `build_*` methods, which keep the block
//! invariants: ids come from one function-wide counter, a terminator
//! completes its block, and branches record predecessor edges as they are
//! built.

use serde::{Deserialize, Serialize};
use std::fmt;
use crate::AcirError;
use crate::ir::{
    BasicBlock, BlockId, Immediate, InstrId, InstrKind, Instruction, IrType, Opcode, PhiArg,
};

/// Function in IR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    blocks: Vec<BasicBlock>,
    /// Arena of every constructed instruction; position equals id.
    instructions: Vec<Instruction>,
    null: Instruction,
    /// Instructions built for a block that was already complete.
    detached: Vec<InstrId>,
}

impl Function {
    /// Creates the function with its entry block `L0` and null sentinel.
    pub fn new(name: impl Into<String>) -> Self {
        let entry = BasicBlock::new(BlockId::ENTRY);
        let null = Instruction {
            id: InstrId::NULL,
            ty: IrType::Void,
            block: entry.id,
            kind: InstrKind::Immediate(Immediate::Void),
        };
        Self {
            name: name.into(),
            blocks: vec![entry],
            instructions: Vec::new(),
            null,
            detached: Vec::new(),
        }
    }

    pub fn entry(&self) -> BlockId {
        BlockId::ENTRY
    }

    pub fn blocks(&self) -> &[BasicBlock] {
        &self.blocks
    }

    pub fn block(&self, id: BlockId) -> Option<&BasicBlock> {
        self.blocks.get(id.index())
    }

    /// Every constructed instruction in id order, detached ones included
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Looks up an instruction; `InstrId::NULL` yields the null sentinel.
    pub fn instr(&self, id: InstrId) -> Option<&Instruction> {
        if id.is_null() {
            Some(&self.null)
        } else {
            self.instructions.get(id.index())
        }
    }

    /// The canonical "no value" operand
    pub fn null(&self) -> InstrId {
        self.null.id
    }

    pub fn null_instr(&self) -> &Instruction {
        &self.null
    }

    /// Number of value ids allocated so far
    pub fn instruction_count(&self) -> usize {
        self.instructions.len()
    }

    /// Ids constructed after their block was complete. They hold an id but
    /// appear in no block.
    pub fn detached(&self) -> &[InstrId] {
        &self.detached
    }

    /// Instructions of a block in execution order
    pub fn block_instructions(&self, block: BlockId) -> impl Iterator<Item = &Instruction> + '_ {
        self.block(block)
            .into_iter()
            .flat_map(|b| b.instructions().iter())
            .filter_map(move |id| self.instr(*id))
    }

    /// IR type of a value, failing if the id is foreign to this function.
    pub fn value_type(&self, id: InstrId) -> Result<IrType, AcirError> {
        self.instr(id)
            .map(|instr| instr.ty)
            .ok_or_else(|| self.violation(format!("{id} does not name an instruction")))
    }

    pub fn new_block(&mut self) -> BlockId {
        let id = BlockId(self.blocks.len() as u32);
        self.blocks.push(BasicBlock::new(id));
        log::debug!("{}: created block {id}", self.name);
        id
    }

    pub fn build_immediate(&mut self, block: BlockId, imm: Immediate) -> Result<InstrId, AcirError> {
        if imm == Immediate::Void {
            return Err(self.violation("void immediates are reserved for the null sentinel"));
        }
        self.insert(block, imm.ir_type(), InstrKind::Immediate(imm))
    }

    /// neg/not over an operand that is already at its promoted type
    pub fn build_unary(&mut self, block: BlockId, op: Opcode, operand: InstrId) -> Result<InstrId, AcirError> {
        if !op.is_unary_arith() {
            return Err(self.violation(format!("{op} is not a unary arithmetic opcode")));
        }
        let ty = self.value_type(operand)?;
        let promoted = ty
            .integer_promote()
            .map_err(|_| self.violation(format!("{op} applied to {operand} of type {ty}")))?;
        if promoted != ty {
            return Err(self.violation(format!(
                "{op} needs its {ty} operand {operand} extended to {promoted}"
            )));
        }
        self.insert(block, ty, InstrKind::Unary { op, operand })
    }

    /// zext/sext widen, trunc narrows
    pub fn build_cast(&mut self, block: BlockId, op: Opcode, operand: InstrId, ty: IrType) -> Result<InstrId, AcirError> {
        if !op.is_cast() {
            return Err(self.violation(format!("{op} is not a cast opcode")));
        }
        let from = self.value_type(operand)?;
        let valid = match op {
            Opcode::Trunc => ty.is_narrower_than(from),
            _ => from.is_narrower_than(ty),
        };
        if !valid {
            return Err(self.violation(format!("cannot {op} {from} to {ty}")));
        }
        self.insert(block, ty, InstrKind::Unary { op, operand })
    }

    pub fn build_compare_eq(&mut self, block: BlockId, left: InstrId, right: InstrId) -> Result<InstrId, AcirError> {
        let left_ty = self.value_type(left)?;
        let right_ty = self.value_type(right)?;
        if left_ty != right_ty || !left_ty.is_integer() {
            return Err(self.violation(format!("cannot compare {left_ty} with {right_ty}")));
        }
        self.insert(block, IrType::I1, InstrKind::Binary { op: Opcode::CmpEq, left, right })
    }

    pub fn build_return(&mut self, block: BlockId, value: InstrId) -> Result<InstrId, AcirError> {
        self.value_type(value)?;
        self.insert(block, IrType::Void, InstrKind::Return { value })
    }

    pub fn build_jump(&mut self, block: BlockId, target: BlockId) -> Result<InstrId, AcirError> {
        self.check_block(target)?;
        self.insert(block, IrType::Void, InstrKind::Jump { target })
    }

    pub fn build_branch(
        &mut self,
        block: BlockId,
        cond: InstrId,
        on_true: BlockId,
        on_false: BlockId,
    ) -> Result<InstrId, AcirError> {
        self.check_block(on_true)?;
        self.check_block(on_false)?;
        let cond_ty = self.value_type(cond)?;
        if cond_ty != IrType::I1 {
            return Err(self.violation(format!("branch condition {cond} has type {cond_ty}, expected i1")));
        }
        self.insert(block, IrType::Void, InstrKind::Branch { cond, on_true, on_false })
    }

    /// A phi with no incoming edges yet; see `add_incoming`.
    pub fn build_phi(&mut self, block: BlockId, ty: IrType) -> Result<InstrId, AcirError> {
        if ty == IrType::Void {
            return Err(self.violation("phi cannot have type void"));
        }
        self.insert(block, ty, InstrKind::Phi { incoming: Vec::new() })
    }

    /// Adds the value flowing into `phi` from `source`, which must already be
    /// a predecessor of the phi's block. The null sentinel is accepted as a
    /// placeholder value.
    pub fn add_incoming(&mut self, phi: InstrId, source: BlockId, value: InstrId) -> Result<(), AcirError> {
        self.check_block(source)?;
        let value_ty = self.value_type(value)?;
        let (phi_block, phi_ty) = match self.instr(phi) {
            Some(instr) if matches!(instr.kind, InstrKind::Phi { .. }) => (instr.block, instr.ty),
            _ => return Err(self.violation(format!("{phi} is not a phi"))),
        };
        if !value.is_null() && value_ty != phi_ty {
            return Err(self.violation(format!("{value} of type {value_ty} flows into {phi_ty} phi {phi}")));
        }
        self.check_block(phi_block)?;
        if !self.blocks[phi_block.index()].predecessors().contains(&source) {
            return Err(self.violation(format!("{source} is not a predecessor of {phi_block}")));
        }
        if let InstrKind::Phi { incoming } = &mut self.instructions[phi.index()].kind {
            incoming.push(PhiArg { source, value });
        }
        Ok(())
    }

    /// Shared constructor path: allocate the id, record the instruction, then
    /// append it unless the block is complete. Jumps and branches record
    /// their edges either way.
    fn insert(&mut self, block: BlockId, ty: IrType, kind: InstrKind) -> Result<InstrId, AcirError> {
        self.check_block(block)?;
        let id = id_at(self.instructions.len())
            .ok_or_else(|| self.violation("instruction ids exhausted"))?;
        let instr = Instruction { id, ty, block, kind };
        let is_terminator = instr.is_terminator();
        let targets = instr.targets();
        log::trace!("{}: {block} <- {instr}", self.name);
        self.instructions.push(instr);

        for target in targets {
            self.blocks[target.index()].add_predecessor(block);
        }
        if !self.blocks[block.index()].push(id) {
            log::debug!("{}: {block} is complete, dropping {id}", self.name);
            self.detached.push(id);
        } else if is_terminator {
            self.blocks[block.index()].mark_complete();
        }
        Ok(id)
    }

    fn check_block(&self, id: BlockId) -> Result<(), AcirError> {
        if id.index() < self.blocks.len() {
            Ok(())
        } else {
            Err(self.violation(format!("{id} does not name a block")))
        }
    }

    fn violation(&self, message: impl fmt::Display) -> AcirError {
        AcirError::invariant(format!("in function '{}': {message}", self.name))
    }
}

/// Id for the arena slot at `position`; `None` once ids run into the null
/// sentinel's.
pub(crate) fn id_at(position: usize) -> Option<InstrId> {
    u32::try_from(position)
        .ok()
        .filter(|raw| *raw != InstrId::NULL.0)
        .map(InstrId)
}
