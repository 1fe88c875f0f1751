//! Statement lowering

use acc_frontend::AstNode;
use crate::AcirError;
use super::{FunctionLowerer, Lowered};

/// `return expr;` / `return;` - the block is complete afterwards.
pub(super) fn lower_return(lowerer: &mut FunctionLowerer, value: Option<&AstNode>) -> Result<Lowered, AcirError> {
    let operand = match value {
        Some(expr) => match lowerer.lower(expr)? {
            Lowered::Value(id) => id,
            Lowered::Nothing => lowerer.function.null(),
        },
        None => lowerer.function.null(),
    };
    lowerer.function.build_return(lowerer.current, operand)?;
    Ok(Lowered::Nothing)
}

/// Statements in order, into the current block. Values of expression
/// statements are discarded.
pub(super) fn lower_block(lowerer: &mut FunctionLowerer, statements: &[AstNode]) -> Result<Lowered, AcirError> {
    for statement in statements {
        lowerer.lower(statement)?;
    }
    Ok(Lowered::Nothing)
}
