//! ACIR - the ACC intermediate representation
//! 
//! A function is an arena of instructions plus an arena of basic blocks,
//! both addressed by dense ids scoped to that function. An instruction is
//! its own value: operands refer to the producing instruction by `InstrId`.
//! 
//! ## Architecture
//! 
//! - `types` - IR type codes and the bridge from AST value types
//! - `ops` - opcodes
//! - `values` - ids, immediates and phi arguments
//! - `instructions` - IR instructions
//! - `blocks` - basic block bookkeeping
//! - `function` - function container and instruction construction
//! - `module` - a lowered translation unit
//! - `printer` - textual dump
//! - `verify` - structural invariant checks

pub use self::types::{ir_type_of, IrType};
pub use self::values::{BlockId, Immediate, InstrId, PhiArg};
pub use self::ops::Opcode;
pub use self::instructions::{InstrKind, Instruction};
pub use self::blocks::BasicBlock;
pub use self::function::Function;
pub use self::module::Module;

mod types;
mod values;
mod ops;
mod instructions;
mod blocks;
mod function;
mod module;
mod printer;
mod verify;

#[cfg(test)]
mod tests;
