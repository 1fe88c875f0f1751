//! Basic Block Management
//! 
//! A block holds the ids of its instructions in execution order. Once a
//! terminator has been appended the block is complete and accepts nothing
//! further.

use serde::{Deserialize, Serialize};
use crate::ir::{BlockId, InstrId};

/// Basic Block - a straight-line sequence ending in at most one terminator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicBlock {
    pub id: BlockId,
    instructions: Vec<InstrId>,
    complete: bool,
    predecessors: Vec<BlockId>,
}

impl BasicBlock {
    pub(crate) fn new(id: BlockId) -> Self {
        Self {
            id,
            instructions: Vec::new(),
            complete: false,
            predecessors: Vec::new(),
        }
    }

    /// Instruction ids in execution order
    pub fn instructions(&self) -> &[InstrId] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Whether the block ends in a terminator
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Blocks that branch or jump here, in the order the edges were built
    pub fn predecessors(&self) -> &[BlockId] {
        &self.predecessors
    }

    pub fn last(&self) -> Option<InstrId> {
        self.instructions.last().copied()
    }

    /// Appends unless the block is already complete. Returns whether it did.
    pub(crate) fn push(&mut self, id: InstrId) -> bool {
        if self.complete {
            return false;
        }
        self.instructions.push(id);
        true
    }

    pub(crate) fn mark_complete(&mut self) {
        self.complete = true;
    }

    pub(crate) fn add_predecessor(&mut self, pred: BlockId) {
        if !self.predecessors.contains(&pred) {
            self.predecessors.push(pred);
        }
    }
}
