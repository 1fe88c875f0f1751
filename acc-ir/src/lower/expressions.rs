//! Expression lowering

use acc_frontend::{AstNode, Literal, UnaryOp};
use crate::AcirError;
use crate::ir::{ir_type_of, Immediate, IrType, Opcode};
use super::{FunctionLowerer, Lowered};

pub(super) fn lower_literal(lowerer: &mut FunctionLowerer, node: &AstNode, literal: &Literal) -> Result<Lowered, AcirError> {
    let imm = match (literal, ir_type_of(node.value_type)) {
        (Literal::I32(val), IrType::I32) => Immediate::I32(*val),
        (Literal::I64(val), IrType::I64) => Immediate::I64(*val),
        (_, ty) => {
            return Err(AcirError::invariant(format!(
                "in function '{}': literal {literal:?} tagged with type {ty}",
                lowerer.function.name
            )))
        }
    };
    let id = lowerer.function.build_immediate(lowerer.current, imm)?;
    Ok(Lowered::Value(id))
}

/// `-x` and `~x`, applied at the operand's promoted type. A narrower operand
/// is sign-extended first.
pub(super) fn lower_arith_unary(lowerer: &mut FunctionLowerer, op: UnaryOp, operand: &AstNode) -> Result<Lowered, AcirError> {
    let opcode = match op {
        UnaryOp::Neg => Opcode::Neg,
        UnaryOp::BitNot => Opcode::Not,
        UnaryOp::LogicalNot => {
            return Err(AcirError::invariant("logical not is not unary arithmetic"))
        }
    };

    let mut value = lowerer.lower_value(operand)?;
    let ty = lowerer.function.value_type(value)?;
    let promoted = ty.integer_promote()?;
    if ty.is_narrower_than(promoted) {
        value = lowerer.function.build_cast(lowerer.current, Opcode::SExt, value, promoted)?;
    }

    let id = lowerer.function.build_unary(lowerer.current, opcode, value)?;
    Ok(Lowered::Value(id))
}

/// `!x` is `x == 0`, with the zero taken at the operand's own type.
pub(super) fn lower_logical_not(lowerer: &mut FunctionLowerer, operand: &AstNode) -> Result<Lowered, AcirError> {
    let value = lowerer.lower_value(operand)?;
    let ty = lowerer.function.value_type(value)?;
    let zero = Immediate::zero(ty).ok_or_else(|| {
        AcirError::invariant(format!(
            "in function '{}': logical not applied to {ty} value {value}",
            lowerer.function.name
        ))
    })?;
    let zero = lowerer.function.build_immediate(lowerer.current, zero)?;

    let id = lowerer.function.build_compare_eq(lowerer.current, value, zero)?;
    Ok(Lowered::Value(id))
}
