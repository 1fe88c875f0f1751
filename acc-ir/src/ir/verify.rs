//! Structural checks over a finished function
//!
//! Construction already keeps these invariants; `verify` lets a consumer or a
//! test confirm them on a function it was handed.

use std::collections::HashSet;
use crate::AcirError;
use crate::ir::{BlockId, Function, InstrKind};

impl Function {
    /// Returns the first breached invariant, if any.
    pub fn verify(&self) -> Result<(), AcirError> {
        let fail = |message: String| -> Result<(), AcirError> {
            Err(AcirError::invariant(format!("in function '{}': {message}", self.name)))
        };

        for (position, instr) in self.instructions().iter().enumerate() {
            if instr.id.index() != position {
                return fail(format!("{} is stored at position {position}", instr.id));
            }
            // phi inputs may come around a back edge
            let is_phi = matches!(instr.kind, InstrKind::Phi { .. });
            for operand in instr.operands() {
                if operand.is_null() {
                    continue;
                }
                if operand.index() >= self.instructions().len() {
                    return fail(format!("{} uses unknown {operand}", instr.id));
                }
                if !is_phi && operand >= instr.id {
                    return fail(format!("{} uses {operand} before it is defined", instr.id));
                }
            }
            for target in instr.targets() {
                if self.block(target).is_none() {
                    return fail(format!("{} targets missing block {target}", instr.id));
                }
            }
        }

        for id in self.detached() {
            match self.instr(*id) {
                Some(instr) if self.block(instr.block).is_some() => {}
                _ => return fail(format!("detached {id} names no instruction of a known block")),
            }
        }

        let mut placed = HashSet::new();
        for (position, block) in self.blocks().iter().enumerate() {
            if block.id.index() != position {
                return fail(format!("{} is stored at position {position}", block.id));
            }

            let ids = block.instructions();
            for (i, id) in ids.iter().enumerate() {
                let Some(instr) = self.instructions().get(id.index()) else {
                    return fail(format!("{} holds unknown {id}", block.id));
                };
                if instr.block != block.id {
                    return fail(format!("{id} was built for {} but sits in {}", instr.block, block.id));
                }
                if !placed.insert(*id) {
                    return fail(format!("{id} appears twice"));
                }
                if i > 0 && ids[i - 1] >= *id {
                    return fail(format!("{} orders {} before {id}", block.id, ids[i - 1]));
                }
                if instr.is_terminator() && i + 1 != ids.len() {
                    return fail(format!("terminator {id} is not last in {}", block.id));
                }
                if matches!(instr.kind, InstrKind::Phi { .. })
                    && i > 0
                    && !matches!(
                        self.instructions()[ids[i - 1].index()].kind,
                        InstrKind::Phi { .. }
                    )
                {
                    return fail(format!("phi {id} follows a non-phi in {}", block.id));
                }
            }

            let ends_in_terminator = block
                .last()
                .and_then(|id| self.instr(id))
                .is_some_and(|instr| instr.is_terminator());
            if block.is_complete() != ends_in_terminator {
                return fail(format!(
                    "{} complete flag is {} but terminator present is {ends_in_terminator}",
                    block.id,
                    block.is_complete()
                ));
            }

            // dropped jumps and branches still count as edges
            let mut expected: Vec<BlockId> = self
                .instructions()
                .iter()
                .filter(|instr| instr.targets().contains(&block.id))
                .map(|instr| instr.block)
                .collect();
            let mut actual = block.predecessors().to_vec();
            expected.sort();
            expected.dedup();
            actual.sort();
            if expected != actual {
                return fail(format!(
                    "{} records predecessors {actual:?}, branches come from {expected:?}",
                    block.id
                ));
            }
        }
        Ok(())
    }
}
