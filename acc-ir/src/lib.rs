//! ACC Compiler - Intermediate Representation
//! 
//! This crate defines ACIR, the basic-block structured and typed IR that sits
//! between the typed AST and code generation, together with the pass that
//! lowers an AST function into it.
//!
//! - `ir` - the type bridge, instruction/block/function model, serializer
//!   and structural verifier
//! - `lower` - recursive AST to ACIR lowering

pub mod errors;
pub mod ir;
pub mod lower;

pub use errors::AcirError;
pub use ir::{
    ir_type_of, BasicBlock, BlockId, Function, Immediate, InstrId, InstrKind,
    Instruction, IrType, Module, Opcode, PhiArg,
};
pub use lower::{lower_function, lower_translation_unit};
