//! Unit tests for the IR model

use super::*;
use crate::AcirError;
use acc_frontend::ValueType;
use pretty_assertions::assert_eq;

fn lines(function: &Function, block: BlockId) -> Vec<String> {
    function.block_instructions(block).map(|i| i.to_string()).collect()
}

#[test]
fn test_type_bridge() {
    assert_eq!(ir_type_of(ValueType::Void), IrType::Void);
    assert_eq!(ir_type_of(ValueType::Bool), IrType::I1);
    assert_eq!(ir_type_of(ValueType::I32), IrType::I32);
    assert_eq!(IrType::from(ValueType::I64), IrType::I64);
}

#[test]
fn test_integer_promote() {
    assert_eq!(IrType::I1.integer_promote().unwrap(), IrType::I32);
    assert_eq!(IrType::I32.integer_promote().unwrap(), IrType::I32);
    assert_eq!(IrType::I64.integer_promote().unwrap(), IrType::I64);
    assert!(matches!(IrType::Void.integer_promote(), Err(AcirError::InvariantViolation { .. })));
    assert!(matches!(IrType::Ptr.integer_promote(), Err(AcirError::InvariantViolation { .. })));
}

#[test]
fn test_type_widths() {
    assert_eq!(IrType::I1.bit_width(), Some(1));
    assert_eq!(IrType::Ptr.bit_width(), None);
    assert!(IrType::I1.is_narrower_than(IrType::I32));
    assert!(!IrType::I64.is_narrower_than(IrType::I32));
    assert!(!IrType::Void.is_narrower_than(IrType::I32));
}

#[test]
fn test_opcode_classes() {
    assert!(Opcode::Ret.is_terminator());
    assert!(Opcode::Jmp.is_terminator());
    assert!(Opcode::Br.is_terminator());
    assert!(!Opcode::CmpEq.is_terminator());
    assert!(Opcode::Br.is_jump());
    assert!(!Opcode::Ret.is_jump());
    assert_eq!(Opcode::CmpEq.to_string(), "eq");
}

#[test]
fn test_new_function() {
    let function = Function::new("main");
    assert_eq!(function.blocks().len(), 1);
    assert_eq!(function.entry(), BlockId(0));
    assert_eq!(function.instruction_count(), 0);

    let entry = function.block(function.entry()).unwrap();
    assert!(entry.is_empty());
    assert!(!entry.is_complete());
    assert!(entry.predecessors().is_empty());

    let null = function.null_instr();
    assert_eq!(null.ty, IrType::Void);
    assert_eq!(null.kind, InstrKind::Immediate(Immediate::Void));
}

#[test]
fn test_null_sentinel_identity() {
    let function = Function::new("f");
    let first = function.instr(function.null()).unwrap();
    let second = function.instr(function.null()).unwrap();
    assert!(std::ptr::eq(first, second));
    assert!(std::ptr::eq(first, function.null_instr()));
}

#[test]
fn test_ids_are_function_global() {
    let mut function = Function::new("f");
    let entry = function.entry();
    let a = function.build_immediate(entry, Immediate::I32(1)).unwrap();
    let other = function.new_block();
    let b = function.build_immediate(other, Immediate::I32(2)).unwrap();
    let c = function.build_immediate(entry, Immediate::I64(3)).unwrap();

    assert_eq!(other, BlockId(1));
    assert_eq!((a, b, c), (InstrId(0), InstrId(1), InstrId(2)));
    assert_eq!(function.block(entry).unwrap().instructions(), &[a, c]);
    assert_eq!(function.block(other).unwrap().instructions(), &[b]);
}

#[test]
fn test_void_immediate_rejected() {
    let mut function = Function::new("f");
    let entry = function.entry();
    assert!(function.build_immediate(entry, Immediate::Void).is_err());
    assert_eq!(function.instruction_count(), 0);
}

#[test]
fn test_return_completes_block_and_drops_later_appends() {
    let mut function = Function::new("f");
    let entry = function.entry();
    let value = function.build_immediate(entry, Immediate::I32(7)).unwrap();
    function.build_return(entry, value).unwrap();
    assert!(function.block(entry).unwrap().is_complete());
    assert_eq!(function.block(entry).unwrap().len(), 2);

    let late = function.build_immediate(entry, Immediate::I32(8)).unwrap();
    let late_ret = function.build_return(entry, late).unwrap();

    assert_eq!(function.block(entry).unwrap().len(), 2);
    assert_eq!(function.detached(), &[late, late_ret]);
    // Dropped instructions still consumed ids
    assert_eq!(function.instruction_count(), 4);
    assert_eq!(lines(&function, entry), vec!["$0 = i32 7;", "ret $0."]);
    function.verify().unwrap();
}

#[test]
fn test_jump_records_predecessor() {
    let mut function = Function::new("f");
    let entry = function.entry();
    let next = function.new_block();
    function.build_jump(entry, next).unwrap();

    assert!(function.block(entry).unwrap().is_complete());
    assert_eq!(function.block(next).unwrap().predecessors(), &[entry]);
    assert!(function.block(entry).unwrap().predecessors().is_empty());
}

#[test]
fn test_dropped_jump_still_records_edge() {
    let mut function = Function::new("f");
    let entry = function.entry();
    let next = function.new_block();
    let null = function.null();
    function.build_return(entry, null).unwrap();
    let jump = function.build_jump(entry, next).unwrap();

    assert_eq!(function.detached(), &[jump]);
    assert_eq!(function.block(entry).unwrap().len(), 1);
    assert_eq!(function.block(next).unwrap().predecessors(), &[entry]);
    function.verify().unwrap();
}

#[test]
fn test_dropped_branch_records_both_edges() {
    let mut function = Function::new("f");
    let entry = function.entry();
    let then_block = function.new_block();
    let else_block = function.new_block();
    let cond = function.build_immediate(entry, Immediate::I1(false)).unwrap();
    function.build_jump(entry, then_block).unwrap();
    function.build_branch(entry, cond, then_block, else_block).unwrap();

    assert_eq!(function.block(then_block).unwrap().predecessors(), &[entry]);
    assert_eq!(function.block(else_block).unwrap().predecessors(), &[entry]);
    function.verify().unwrap();
}

#[test]
fn test_id_allocation_stops_before_null() {
    assert_eq!(super::function::id_at(0), Some(InstrId(0)));
    assert_eq!(super::function::id_at(u32::MAX as usize - 1), Some(InstrId(u32::MAX - 1)));
    assert_eq!(super::function::id_at(u32::MAX as usize), None);
    assert_eq!(super::function::id_at(usize::MAX), None);
}

#[test]
fn test_branch_to_same_block_records_one_edge() {
    let mut function = Function::new("f");
    let entry = function.entry();
    let next = function.new_block();
    let cond = function.build_immediate(entry, Immediate::I1(true)).unwrap();
    function.build_branch(entry, cond, next, next).unwrap();

    assert_eq!(function.block(next).unwrap().predecessors(), &[entry]);
    function.verify().unwrap();
}

#[test]
fn test_branch_requires_i1_condition() {
    let mut function = Function::new("f");
    let entry = function.entry();
    let then_block = function.new_block();
    let else_block = function.new_block();
    let cond = function.build_immediate(entry, Immediate::I32(1)).unwrap();

    let err = function.build_branch(entry, cond, then_block, else_block).unwrap_err();
    assert!(matches!(err, AcirError::InvariantViolation { .. }));
    assert!(!function.block(entry).unwrap().is_complete());
}

#[test]
fn test_branch_to_missing_block() {
    let mut function = Function::new("f");
    let entry = function.entry();
    let cond = function.build_immediate(entry, Immediate::I1(false)).unwrap();
    assert!(function.build_branch(entry, cond, BlockId(0), BlockId(9)).is_err());
    assert!(function.build_jump(entry, BlockId(3)).is_err());
}

#[test]
fn test_foreign_operand_rejected() {
    let mut function = Function::new("f");
    let entry = function.entry();
    let err = function.build_unary(entry, Opcode::Neg, InstrId(42)).unwrap_err();
    assert!(err.to_string().contains("$42 does not name an instruction"));
    assert!(function.build_return(entry, InstrId(0)).is_err());
}

#[test]
fn test_cast_width_checks() {
    let mut function = Function::new("f");
    let entry = function.entry();
    let flag = function.build_immediate(entry, Immediate::I1(true)).unwrap();
    let wide = function.build_immediate(entry, Immediate::I64(-1)).unwrap();

    assert!(function.build_cast(entry, Opcode::SExt, flag, IrType::I32).is_ok());
    assert!(function.build_cast(entry, Opcode::ZExt, flag, IrType::I64).is_ok());
    assert!(function.build_cast(entry, Opcode::Trunc, wide, IrType::I32).is_ok());

    assert!(function.build_cast(entry, Opcode::SExt, wide, IrType::I32).is_err());
    assert!(function.build_cast(entry, Opcode::Trunc, flag, IrType::I32).is_err());
    assert!(function.build_cast(entry, Opcode::ZExt, flag, IrType::Void).is_err());
    assert!(function.build_cast(entry, Opcode::Neg, flag, IrType::I32).is_err());
}

#[test]
fn test_unary_requires_promoted_operand() {
    let mut function = Function::new("f");
    let entry = function.entry();
    let flag = function.build_immediate(entry, Immediate::I1(true)).unwrap();
    let err = function.build_unary(entry, Opcode::Not, flag).unwrap_err();
    assert!(matches!(err, AcirError::InvariantViolation { .. }));

    let wide = function.build_cast(entry, Opcode::SExt, flag, IrType::I32).unwrap();
    let not = function.build_unary(entry, Opcode::Not, wide).unwrap();
    assert_eq!(function.instr(not).unwrap().ty, IrType::I32);
    assert!(function.build_unary(entry, Opcode::CmpEq, wide).is_err());
    assert!(function.build_unary(entry, Opcode::Neg, function.null()).is_err());
}

#[test]
fn test_compare_eq_types() {
    let mut function = Function::new("f");
    let entry = function.entry();
    let a = function.build_immediate(entry, Immediate::I32(1)).unwrap();
    let b = function.build_immediate(entry, Immediate::I64(1)).unwrap();
    assert!(function.build_compare_eq(entry, a, b).is_err());

    let c = function.build_immediate(entry, Immediate::I32(2)).unwrap();
    let eq = function.build_compare_eq(entry, a, c).unwrap();
    assert_eq!(function.instr(eq).unwrap().ty, IrType::I1);
    assert_eq!(function.instr(eq).unwrap().opcode(), Opcode::CmpEq);
}

fn diamond() -> (Function, InstrId) {
    let mut function = Function::new("select");
    let entry = function.entry();
    let then_block = function.new_block();
    let else_block = function.new_block();
    let merge = function.new_block();

    let cond = function.build_immediate(entry, Immediate::I1(true)).unwrap();
    function.build_branch(entry, cond, then_block, else_block).unwrap();

    let one = function.build_immediate(then_block, Immediate::I32(1)).unwrap();
    function.build_jump(then_block, merge).unwrap();

    let two = function.build_immediate(else_block, Immediate::I32(2)).unwrap();
    function.build_jump(else_block, merge).unwrap();

    let phi = function.build_phi(merge, IrType::I32).unwrap();
    function.add_incoming(phi, then_block, one).unwrap();
    function.add_incoming(phi, else_block, two).unwrap();
    function.build_return(merge, phi).unwrap();
    (function, phi)
}

#[test]
fn test_diamond_with_phi() {
    let (function, phi) = diamond();
    function.verify().unwrap();

    assert_eq!(function.block(BlockId(3)).unwrap().predecessors(), &[BlockId(1), BlockId(2)]);
    assert_eq!(function.block(BlockId(1)).unwrap().predecessors(), &[BlockId(0)]);
    assert_eq!(
        function.instr(phi).unwrap().operands(),
        vec![InstrId(2), InstrId(4)]
    );

    let text = function.to_string();
    assert_eq!(
        text,
        "select:\n\
         L0:\n\
         \t$0 = i1 true;\n\
         \tbr $0 L1 L2.\n\
         L1: ; preds = L0\n\
         \t$2 = i32 1;\n\
         \tjmp L3.\n\
         L2: ; preds = L0\n\
         \t$4 = i32 2;\n\
         \tjmp L3.\n\
         L3: ; preds = L1, L2\n\
         \t$6 = i32 phi [L1 $2], [L2 $4];\n\
         \tret $6.\n"
    );
}

#[test]
fn test_add_incoming_checks() {
    let mut function = Function::new("f");
    let entry = function.entry();
    let merge = function.new_block();
    let stray = function.new_block();
    let value = function.build_immediate(entry, Immediate::I32(1)).unwrap();
    let wide = function.build_immediate(entry, Immediate::I64(1)).unwrap();
    function.build_jump(entry, merge).unwrap();
    let phi = function.build_phi(merge, IrType::I32).unwrap();

    assert!(function.add_incoming(phi, stray, value).is_err());
    assert!(function.add_incoming(phi, entry, wide).is_err());
    assert!(function.add_incoming(value, entry, value).is_err());
    function.add_incoming(phi, entry, function.null()).unwrap();
    assert_eq!(function.instr(phi).unwrap().operands(), vec![InstrId::NULL]);
    assert!(function.build_phi(merge, IrType::Void).is_err());
}

#[test]
fn test_verify_detects_corruption() {
    let mut function = Function::new("f");
    let entry = function.entry();
    let value = function.build_immediate(entry, Immediate::I32(3)).unwrap();
    function.build_return(entry, value).unwrap();
    function.verify().unwrap();

    let mut doc = serde_json::to_value(&function).unwrap();
    doc["blocks"][0]["complete"] = serde_json::Value::Bool(false);
    let corrupted: Function = serde_json::from_value(doc).unwrap();

    let err = corrupted.verify().unwrap_err();
    assert!(matches!(err, AcirError::InvariantViolation { .. }));
    assert!(err.to_string().contains("complete flag"));
}

#[test]
fn test_verify_detects_missing_predecessor() {
    let mut function = Function::new("f");
    let entry = function.entry();
    let next = function.new_block();
    function.build_jump(entry, next).unwrap();

    let mut doc = serde_json::to_value(&function).unwrap();
    doc["blocks"][1]["predecessors"] = serde_json::json!([]);
    let corrupted: Function = serde_json::from_value(doc).unwrap();
    assert!(corrupted.verify().is_err());
}

#[test]
fn test_instruction_display() {
    let mut function = Function::new("f");
    let entry = function.entry();
    let a = function.build_immediate(entry, Immediate::I64(-9)).unwrap();
    let b = function.build_immediate(entry, Immediate::I64(0)).unwrap();
    let flag = function.build_compare_eq(entry, a, b).unwrap();
    let wide = function.build_cast(entry, Opcode::ZExt, flag, IrType::I64).unwrap();
    let neg = function.build_unary(entry, Opcode::Neg, wide).unwrap();
    function.build_return(entry, function.null()).unwrap();

    assert_eq!(
        lines(&function, entry),
        vec![
            "$0 = i64 -9;",
            "$1 = i64 0;",
            "$2 = i1 eq $0 $1;",
            "$3 = i64 zext $2;",
            "$4 = i64 neg $3;",
            "ret.",
        ]
    );
    assert_eq!(function.instr(neg).unwrap().operands(), vec![wide]);
    assert_eq!(function.null_instr().to_string(), "$null = void;");
}

#[test]
fn test_write_to_sink() {
    let mut function = Function::new("answer");
    let entry = function.entry();
    let value = function.build_immediate(entry, Immediate::I32(42)).unwrap();
    function.build_return(entry, value).unwrap();

    let mut out = Vec::new();
    function.write_to(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "answer:\nL0:\n\t$0 = i32 42;\n\tret $0.\n");
}

#[test]
fn test_module() {
    let mut module = Module::new("unit");
    module.add_function(Function::new("a"));
    module.add_function(Function::new("b"));

    assert!(module.get_function("b").is_some());
    assert!(module.get_function("c").is_none());
    assert_eq!(module.to_string(), "a:\nL0:\n\nb:\nL0:\n");
}

#[test]
fn test_add_incoming_on_corrupted_phi_block() {
    let mut function = Function::new("f");
    let entry = function.entry();
    let merge = function.new_block();
    function.build_jump(entry, merge).unwrap();
    let phi = function.build_phi(merge, IrType::I32).unwrap();

    let mut doc = serde_json::to_value(&function).unwrap();
    doc["instructions"][phi.index()]["block"] = serde_json::json!(7);
    let mut corrupted: Function = serde_json::from_value(doc).unwrap();

    let null = corrupted.null();
    let err = corrupted.add_incoming(phi, entry, null).unwrap_err();
    assert!(err.to_string().contains("L7 does not name a block"));
}
