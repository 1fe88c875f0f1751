//! Textual dump of ACIR
//!
//! For human inspection and test assertions only; nothing reads it back.
//!
//! ```text
//! main:
//! L0:
//!     $0 = i32 5;
//!     $1 = i32 neg $0;
//!     ret $1.
//! ```

use std::fmt;
use std::io;
use crate::ir::{BasicBlock, Function, Module};

impl Function {
    /// Writes the dump to a caller-supplied sink.
    pub fn write_to<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{self}")
    }

    fn fmt_block(&self, block: &BasicBlock, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", block.id)?;
        if !block.predecessors().is_empty() {
            write!(f, " ; preds = ")?;
            for (i, pred) in block.predecessors().iter().enumerate() {
                if i > 0 { write!(f, ", ")?; }
                write!(f, "{pred}")?;
            }
        }
        writeln!(f)?;
        for instr in self.block_instructions(block.id) {
            writeln!(f, "\t{instr}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.name)?;
        for block in self.blocks() {
            self.fmt_block(block, f)?;
        }
        Ok(())
    }
}

impl Module {
    pub fn write_to<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{self}")
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, function) in self.functions.iter().enumerate() {
            if i > 0 { writeln!(f)?; }
            write!(f, "{function}")?;
        }
        Ok(())
    }
}
