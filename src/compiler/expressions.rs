use std::rc::Rc;

use crate::bytecode::OpCode;
use crate::compiler::precedence::Precedence;
use crate::compiler::Compiler;
use crate::scanner::{Scanner, TokenType};
use crate::value::Value;

/// `NUMBER` prefix production: parses the previous token's lexeme as an
/// `f64` and emits it as a `Constant`.
pub fn number(c: &mut Compiler, _can_assign: bool) {
    let value: f64 = c.previous.lexeme.parse().expect("scanner only emits well-formed number lexemes");
    emit_constant(c, Value::Number(value));
}

/// `STRING` prefix production: strips the surrounding quotes and emits the
/// resulting string as a `Constant`.
pub fn string(c: &mut Compiler, _can_assign: bool) {
    let text = Scanner::string_value(c.previous.lexeme);
    emit_constant(c, Value::Str(Rc::from(text)));
}

/// `TRUE`/`FALSE`/`NIL` prefix production.
pub fn literal(c: &mut Compiler, _can_assign: bool) {
    match c.previous.kind {
        TokenType::TRUE => c.emit_op(OpCode::True),
        TokenType::FALSE => c.emit_op(OpCode::False),
        TokenType::NIL => c.emit_op(OpCode::Nil),
        _ => unreachable!("literal is only ever the prefix rule for TRUE/FALSE/NIL"),
    }
}

/// `(` prefix production: a grouping is transparent at the bytecode level —
/// it exists purely to let the parser recurse back down to `ASSIGNMENT`
/// precedence inside the parentheses.
pub fn grouping(c: &mut Compiler, _can_assign: bool) {
    c.expression();
    c.consume(TokenType::RIGHT_PAREN, "Expect ')' after expression.");
}

/// `IDENTIFIER` prefix production: resolves the name against locals first,
/// falling back to a global lookup/assignment if it isn't a local.
pub fn variable(c: &mut Compiler, can_assign: bool) {
    let name = c.previous.lexeme;

    if let Some(slot) = c.resolve_local(name) {
        if can_assign && c.matches(TokenType::EQUAL) {
            c.expression();
            c.emit_op_byte(OpCode::SetLocal, slot as u8);
        } else {
            c.emit_op_byte(OpCode::GetLocal, slot as u8);
        }
        return;
    }

    let idx = c.identifier_constant(name);
    if can_assign && c.matches(TokenType::EQUAL) {
        c.expression();
        c.emit_op_byte(OpCode::SetGlobal, idx);
    } else {
        c.emit_op_byte(OpCode::GetGlobal, idx);
    }
}

/// `!`/`-` prefix production.
pub fn unary(c: &mut Compiler, _can_assign: bool) {
    let operator = c.previous.kind;
    c.parse_precedence(Precedence::UNARY);

    match operator {
        TokenType::BANG => c.emit_op(OpCode::Not),
        TokenType::MINUS => c.emit_op(OpCode::Negate),
        _ => unreachable!("unary is only ever the prefix rule for '!'/'-'"),
    }
}

/// Infix production for every binary operator in the grammar. Parses its
/// right-hand operand one precedence level tighter than its own, which is
/// what makes `a - b - c` group as `(a - b) - c`.
pub fn binary(c: &mut Compiler, _can_assign: bool) {
    let operator = c.previous.kind;
    let rule_precedence = crate::compiler::precedence::get_rule(operator).precedence;
    c.parse_precedence(rule_precedence.next());

    match operator {
        TokenType::PLUS => c.emit_op(OpCode::Add),
        TokenType::MINUS => c.emit_op(OpCode::Subtract),
        TokenType::STAR => c.emit_op(OpCode::Multiply),
        TokenType::SLASH => c.emit_op(OpCode::Divide),
        TokenType::LESS => c.emit_op(OpCode::Less),
        TokenType::GREATER => c.emit_op(OpCode::Greater),
        TokenType::EQUAL_EQUAL => c.emit_op(OpCode::Equal),
        TokenType::BANG_EQUAL => {
            c.emit_op(OpCode::Equal);
            c.emit_op(OpCode::Not);
        }
        TokenType::LESS_EQUAL => {
            c.emit_op(OpCode::Greater);
            c.emit_op(OpCode::Not);
        }
        TokenType::GREATER_EQUAL => {
            c.emit_op(OpCode::Less);
            c.emit_op(OpCode::Not);
        }
        _ => unreachable!("binary is only ever the infix rule for the operators matched above"),
    }
}

/// `and` short-circuits: if the left operand is falsey, skip the right
/// operand entirely and leave the left operand's value as the result.
pub fn and_(c: &mut Compiler, _can_assign: bool) {
    let end_jump = c.emit_jump(OpCode::JumpIfFalse);
    c.emit_op(OpCode::Pop);
    c.parse_precedence(Precedence::AND);
    c.patch_jump(end_jump);
}

/// `or` short-circuits the opposite way: if the left operand is truthy,
/// skip the right operand.
pub fn or_(c: &mut Compiler, _can_assign: bool) {
    let else_jump = c.emit_jump(OpCode::JumpIfFalse);
    let end_jump = c.emit_jump(OpCode::Jump);
    c.patch_jump(else_jump);
    c.emit_op(OpCode::Pop);
    c.parse_precedence(Precedence::OR);
    c.patch_jump(end_jump);
}

fn emit_constant(c: &mut Compiler, value: Value) {
    let idx = c.make_constant(value);
    c.emit_op_byte(OpCode::Constant, idx);
}
