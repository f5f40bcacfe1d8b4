use crate::bytecode::OpCode;
use crate::value::{Value, ValueArray};

/// Contains all the necessary information about the instructions to be
/// executed: the raw bytecode, the constant pool it indexes into, and the
/// line number associated with each byte for diagnostics.
#[derive(Clone, Default)]
pub struct Chunk {
    instructions: Vec<u8>,
    lines: Vec<usize>,
    constants: ValueArray,
}

impl Chunk {
    pub fn new() -> Self {
        Self { instructions: Vec::with_capacity(8), lines: Vec::with_capacity(8), constants: ValueArray::new() }
    }

    /// Appends a raw byte, recording the line it came from. Doubling growth
    /// starting at 8 is `Vec`'s own amortized-growth behavior; no manual
    /// realloc bookkeeping is needed the way the original C `writeChunk` does.
    pub fn write_byte(&mut self, byte: u8, line: usize) {
        self.instructions.push(byte);
        self.lines.push(line);
    }

    pub fn write_op(&mut self, op: OpCode, line: usize) {
        self.write_byte(op.into(), line);
    }

    /// Splits a 16-bit value into two big-endian bytes and appends both.
    pub fn write_short(&mut self, val: u16, line: usize) {
        let bytes = val.to_be_bytes();
        self.write_byte(bytes[0], line);
        self.write_byte(bytes[1], line);
    }

    /// Appends a value to the constant pool and returns its index. Callers
    /// are responsible for keeping the pool at or below 256 entries — one
    /// byte of index — per §3.
    pub fn add_constant(&mut self, value: Value) -> usize {
        self.constants.push(value)
    }

    pub fn get_constant(&self, idx: usize) -> &Value {
        self.constants.get(idx)
    }

    pub fn constant_count(&self) -> usize {
        self.constants.len()
    }

    pub fn get_byte(&self, idx: usize) -> u8 {
        self.instructions[idx]
    }

    pub fn patch_byte(&mut self, idx: usize, byte: u8) {
        self.instructions[idx] = byte;
    }

    /// Reads the two bytes starting at `idx` as a big-endian `u16`.
    pub fn get_short(&self, idx: usize) -> u16 {
        u16::from_be_bytes([self.instructions[idx], self.instructions[idx + 1]])
    }

    pub fn get_line(&self, idx: usize) -> usize {
        self.lines[idx]
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }
}
