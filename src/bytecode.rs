use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};

/// The set of instructions supported by the virtual machine.
///
/// **NOTE:** Changing the order in which members are declared creates
/// incompatibilities between different versions of the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(u8)]
pub enum OpCode {
    Constant,
    Nil,
    True,
    False,
    Pop,
    GetLocal,
    SetLocal,
    GetGlobal,
    DefineGlobal,
    SetGlobal,
    Add,
    Subtract,
    Multiply,
    Divide,
    Less,
    Greater,
    Equal,
    Not,
    Negate,
    Print,
    Jump,
    JumpIfFalse,
    Loop,
    Return,
}

impl OpCode {
    /// Recovers an `OpCode` from its raw byte encoding.
    ///
    /// The compiler only ever writes bytes produced by `OpCode::into`, so a
    /// chunk compiled by this crate never carries a byte outside the enum's
    /// range; this still returns an `Option` instead of transmuting, since an
    /// operand byte misread as an opcode would otherwise be silently
    /// reinterpreted instead of surfacing as the compiler bug it would be.
    pub fn from_byte(byte: u8) -> Option<OpCode> {
        FromPrimitive::from_u8(byte)
    }
}

impl From<OpCode> for u8 {
    fn from(op: OpCode) -> Self {
        ToPrimitive::to_u8(&op).unwrap()
    }
}
