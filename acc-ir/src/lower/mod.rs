//! AST to ACIR lowering
//!
//! A single recursive descent over a typed AST function. Operands are lowered
//! before the instruction consuming them, left to right, so ids within a block
//! follow evaluation order.

mod expressions;
mod statements;

use acc_frontend::{AstFunction, AstKind, AstNode, TranslationUnit, UnaryOp};
use crate::AcirError;
use crate::ir::{BlockId, Function, InstrId, Module};

/// Lower one AST function into a fresh IR function.
///
/// No partial IR escapes on failure.
pub fn lower_function(ast: &AstFunction) -> Result<Function, AcirError> {
    log::debug!("Lowering function '{}'", ast.name);
    let mut lowerer = FunctionLowerer::new(&ast.name);
    lowerer.lower(&ast.body)?;
    let function = lowerer.finish();
    log::debug!(
        "Lowered '{}': {} blocks, {} instructions",
        function.name,
        function.blocks().len(),
        function.instruction_count()
    );
    Ok(function)
}

/// Lower every function of a translation unit, stopping at the first failure.
pub fn lower_translation_unit(unit: &TranslationUnit, module_name: &str) -> Result<Module, AcirError> {
    let mut module = Module::new(module_name);
    for function in &unit.functions {
        module.add_function(lower_function(function)?);
    }
    Ok(module)
}

/// What lowering a node produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lowered {
    Value(InstrId),
    /// Statements and void expressions
    Nothing,
}

/// Lowering state for one function: the function under construction and the
/// block instructions are currently appended to.
pub(crate) struct FunctionLowerer {
    pub function: Function,
    pub current: BlockId,
}

impl FunctionLowerer {
    pub fn new(name: &str) -> Self {
        let function = Function::new(name);
        let current = function.entry();
        Self { function, current }
    }

    pub fn lower(&mut self, node: &AstNode) -> Result<Lowered, AcirError> {
        match &node.kind {
            AstKind::Return(value) => statements::lower_return(self, value.as_deref()),
            AstKind::Block(stmts) => statements::lower_block(self, stmts),
            AstKind::Literal(literal) => expressions::lower_literal(self, node, literal),
            AstKind::Unary { op: UnaryOp::LogicalNot, operand } => {
                expressions::lower_logical_not(self, operand)
            }
            AstKind::Unary { op, operand } => expressions::lower_arith_unary(self, *op, operand),
            _ => Err(AcirError::UnsupportedOperator {
                op: node.op().to_string(),
                function: self.function.name.clone(),
            }),
        }
    }

    /// Lower a node whose result feeds an operand slot.
    pub fn lower_value(&mut self, node: &AstNode) -> Result<InstrId, AcirError> {
        match self.lower(node)? {
            Lowered::Value(id) => Ok(id),
            Lowered::Nothing => Err(AcirError::invariant(format!(
                "in function '{}': '{}' node produced no value where one is required",
                self.function.name,
                node.op()
            ))),
        }
    }

    pub fn finish(self) -> Function {
        self.function
    }
}
