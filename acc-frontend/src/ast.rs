//! Typed Abstract Syntax Tree
//!
//! Nodes are type-checked as they are built: every constructor resolves the
//! node's `ValueType` from its children and rejects ill-typed combinations.

use acc_common::CompilerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::types::ValueType;

/// Unary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    Neg,        // -x
    BitNot,     // ~x
    LogicalNot, // !x
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Neg => write!(f, "-"),
            UnaryOp::BitNot => write!(f, "~"),
            UnaryOp::LogicalNot => write!(f, "!"),
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Add, Sub, Mul, Div,
    Eq, Ne, Lt, Gt, Le, Ge,
}

impl BinaryOp {
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge
        )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op_str = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
        };
        write!(f, "{op_str}")
    }
}

/// Operator tag of an AST node, one per node kind and operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AstOp {
    Assign,
    Add, Sub, Mul, Div,
    Eq, Ne, Lt, Gt, Le, Ge,
    Literal, Var,
    Block,
    Print, If, While,
    Return,
    Neg, BitNot, LogicalNot,
}

impl fmt::Display for AstOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op_str = match self {
            AstOp::Assign => "assign",
            AstOp::Add => "add",
            AstOp::Sub => "sub",
            AstOp::Mul => "mul",
            AstOp::Div => "div",
            AstOp::Eq => "eq",
            AstOp::Ne => "ne",
            AstOp::Lt => "lt",
            AstOp::Gt => "gt",
            AstOp::Le => "le",
            AstOp::Ge => "ge",
            AstOp::Literal => "literal",
            AstOp::Var => "var",
            AstOp::Block => "block",
            AstOp::Print => "print",
            AstOp::If => "if",
            AstOp::While => "while",
            AstOp::Return => "return",
            AstOp::Neg => "neg",
            AstOp::BitNot => "bnot",
            AstOp::LogicalNot => "lnot",
        };
        write!(f, "{op_str}")
    }
}

/// Integer literal payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    I32(i32),
    I64(i64),
}

impl Literal {
    pub fn value_type(&self) -> ValueType {
        match self {
            Literal::I32(_) => ValueType::I32,
            Literal::I64(_) => ValueType::I64,
        }
    }
}

/// Node payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AstKind {
    Literal(Literal),
    Var { id: u32 },
    Assign { target: u32, value: Box<AstNode> },
    Unary { op: UnaryOp, operand: Box<AstNode> },
    Binary { op: BinaryOp, left: Box<AstNode>, right: Box<AstNode> },
    Block(Vec<AstNode>),
    Print(Box<AstNode>),
    Return(Option<Box<AstNode>>),
    If {
        cond: Box<AstNode>,
        then_branch: Box<AstNode>,
        else_branch: Option<Box<AstNode>>,
    },
    While { cond: Box<AstNode>, body: Box<AstNode> },
}

/// A typed AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstNode {
    pub kind: AstKind,
    #[serde(default)]
    pub value_type: ValueType,
}

impl AstNode {
    fn statement(kind: AstKind) -> Self {
        Self { kind, value_type: ValueType::Void }
    }

    pub fn lit_i32(value: i32) -> Self {
        Self { kind: AstKind::Literal(Literal::I32(value)), value_type: ValueType::I32 }
    }

    pub fn lit_i64(value: i64) -> Self {
        Self { kind: AstKind::Literal(Literal::I64(value)), value_type: ValueType::I64 }
    }

    /// Variable reference; the type comes from the symbol table upstream.
    pub fn var(id: u32, value_type: ValueType) -> Self {
        Self { kind: AstKind::Var { id }, value_type }
    }

    pub fn unary(op: UnaryOp, operand: AstNode) -> Result<Self, CompilerError> {
        let value_type = operand.value_type.unary_result(op)?;
        Ok(Self {
            kind: AstKind::Unary { op, operand: Box::new(operand) },
            value_type,
        })
    }

    pub fn binary(op: BinaryOp, left: AstNode, right: AstNode) -> Result<Self, CompilerError> {
        let value_type = left.value_type.binary_result(op, right.value_type)?;
        Ok(Self {
            kind: AstKind::Binary { op, left: Box::new(left), right: Box::new(right) },
            value_type,
        })
    }

    pub fn assign(target: u32, value: AstNode) -> Result<Self, CompilerError> {
        require_value(&value, "assignment")?;
        Ok(Self::statement(AstKind::Assign { target, value: Box::new(value) }))
    }

    pub fn block(statements: Vec<AstNode>) -> Self {
        Self::statement(AstKind::Block(statements))
    }

    pub fn print(value: AstNode) -> Result<Self, CompilerError> {
        require_value(&value, "print")?;
        Ok(Self::statement(AstKind::Print(Box::new(value))))
    }

    /// `return expr;` or `return;`. A return statement itself is void.
    pub fn ret(value: Option<AstNode>) -> Self {
        Self::statement(AstKind::Return(value.map(Box::new)))
    }

    pub fn if_else(cond: AstNode, then_branch: AstNode, else_branch: Option<AstNode>) -> Result<Self, CompilerError> {
        require_condition(&cond, "if")?;
        Ok(Self::statement(AstKind::If {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
        }))
    }

    pub fn while_loop(cond: AstNode, body: AstNode) -> Result<Self, CompilerError> {
        require_condition(&cond, "while")?;
        Ok(Self::statement(AstKind::While { cond: Box::new(cond), body: Box::new(body) }))
    }

    /// Operator tag of this node
    pub fn op(&self) -> AstOp {
        match &self.kind {
            AstKind::Literal(_) => AstOp::Literal,
            AstKind::Var { .. } => AstOp::Var,
            AstKind::Assign { .. } => AstOp::Assign,
            AstKind::Unary { op, .. } => match op {
                UnaryOp::Neg => AstOp::Neg,
                UnaryOp::BitNot => AstOp::BitNot,
                UnaryOp::LogicalNot => AstOp::LogicalNot,
            },
            AstKind::Binary { op, .. } => match op {
                BinaryOp::Add => AstOp::Add,
                BinaryOp::Sub => AstOp::Sub,
                BinaryOp::Mul => AstOp::Mul,
                BinaryOp::Div => AstOp::Div,
                BinaryOp::Eq => AstOp::Eq,
                BinaryOp::Ne => AstOp::Ne,
                BinaryOp::Lt => AstOp::Lt,
                BinaryOp::Gt => AstOp::Gt,
                BinaryOp::Le => AstOp::Le,
                BinaryOp::Ge => AstOp::Ge,
            },
            AstKind::Block(_) => AstOp::Block,
            AstKind::Print(_) => AstOp::Print,
            AstKind::Return(_) => AstOp::Return,
            AstKind::If { .. } => AstOp::If,
            AstKind::While { .. } => AstOp::While,
        }
    }
}

fn require_value(node: &AstNode, context: &str) -> Result<(), CompilerError> {
    if node.value_type == ValueType::Void {
        return Err(CompilerError::type_error(format!("{context} requires a value, got void")));
    }
    Ok(())
}

fn require_condition(node: &AstNode, context: &str) -> Result<(), CompilerError> {
    if !node.value_type.is_integer() {
        return Err(CompilerError::type_error(format!(
            "{context} condition must be an integer, got {}",
            node.value_type
        )));
    }
    Ok(())
}

/// A function definition: its name and the root of its statement tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstFunction {
    pub name: String,
    pub body: AstNode,
}

impl AstFunction {
    pub fn new(name: impl Into<String>, body: AstNode) -> Self {
        Self { name: name.into(), body }
    }
}

/// All functions of one source file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TranslationUnit {
    pub functions: Vec<AstFunction>,
}

impl TranslationUnit {
    /// Load a typed AST serialized as JSON.
    ///
    /// Node types in the document are taken as already resolved by the type
    /// checker; they are not re-derived here.
    pub fn from_json(source: &str) -> Result<Self, CompilerError> {
        let unit: TranslationUnit = serde_json::from_str(source)
            .map_err(|e| CompilerError::invalid_input(format!("malformed typed AST: {e}")))?;
        log::debug!("Loaded typed AST with {} functions", unit.functions.len());
        Ok(unit)
    }
}
