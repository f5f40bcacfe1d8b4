use crate::bytecode::OpCode;
use crate::compiler::Compiler;

#[test]
fn every_compiled_chunk_ends_with_return() {
    let chunk = Compiler::compile("print 1 + 2;").expect("should compile");
    let last = chunk.get_byte(chunk.len() - 1);
    assert_eq!(OpCode::from_byte(last), Some(OpCode::Return));
}

#[test]
fn repeated_number_literals_each_get_their_own_constant_slot() {
    // Each of the 500 uses is its own `Constant` emission; the test pins the
    // observable behavior (chunk compiles, ends correctly) rather than
    // constant-pool deduplication, which this design does not perform — see
    // DESIGN.md.
    let src = "8.9;".repeat(500);
    let chunk = Compiler::compile(&src).expect("should compile");
    assert_eq!(chunk.constant_count(), 500);
}

#[test]
fn unterminated_expression_is_a_compile_error() {
    assert!(Compiler::compile("1 + ;").is_err());
}

#[test]
fn invalid_assignment_target_is_a_compile_error() {
    assert!(Compiler::compile("1 = 2;").is_err());
}

#[test]
fn errors_after_the_first_do_not_cascade_forever() {
    // Two independent syntax errors on two separate statements should each
    // be reported once, not spiral into an unbounded cascade; this is the
    // panic-mode/synchronize contract from the design.
    assert!(Compiler::compile("1 + ; 2 + ;").is_err());
}

#[test]
fn if_without_else_patches_both_jumps_to_valid_chunk_offsets() {
    let chunk = Compiler::compile("if (true) print 1;").expect("should compile");
    let mut offset = 0;
    let mut saw_jump_if_false = false;
    while offset < chunk.len() {
        let op = OpCode::from_byte(chunk.get_byte(offset)).expect("valid opcode");
        if op == OpCode::JumpIfFalse {
            let jump = chunk.get_short(offset + 1);
            let target = offset + 3 + jump as usize;
            assert!(target <= chunk.len());
            saw_jump_if_false = true;
            offset += 3;
        } else {
            offset += operand_len(op);
        }
    }
    assert!(saw_jump_if_false);
}

#[test]
fn while_loop_emits_a_backward_loop_instruction() {
    let chunk = Compiler::compile("var i = 0; while (i < 3) { i = i + 1; }").expect("should compile");
    let mut offset = 0;
    let mut saw_loop = false;
    while offset < chunk.len() {
        let op = OpCode::from_byte(chunk.get_byte(offset)).expect("valid opcode");
        if op == OpCode::Loop {
            let jump = chunk.get_short(offset + 1);
            assert!(jump as usize <= offset + 3);
            saw_loop = true;
        }
        offset += operand_len(op);
    }
    assert!(saw_loop);
}

#[test]
fn block_scoped_local_is_popped_at_scope_end() {
    let chunk = Compiler::compile("{ var a = 1; }").expect("should compile");
    let last_two = [chunk.get_byte(chunk.len() - 2), chunk.get_byte(chunk.len() - 1)];
    // Pop (for leaving the block's one local) followed by Return.
    assert_eq!(OpCode::from_byte(last_two[0]), Some(OpCode::Pop));
    assert_eq!(OpCode::from_byte(last_two[1]), Some(OpCode::Return));
}

fn operand_len(op: OpCode) -> usize {
    match op {
        OpCode::Constant
        | OpCode::GetLocal
        | OpCode::SetLocal
        | OpCode::GetGlobal
        | OpCode::DefineGlobal
        | OpCode::SetGlobal => 2,
        OpCode::Jump | OpCode::JumpIfFalse | OpCode::Loop => 3,
        _ => 1,
    }
}
