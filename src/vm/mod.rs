mod run;

use crate::chunk::Chunk;
use crate::compiler::Compiler;
use crate::table::Table;
use crate::value::Value;

const STACK_INITIAL_CAPACITY: usize = 256;

/// The three outcomes `interpret` can return: a clean run, a compile-time
/// failure, or a runtime failure. The CLI in `main.rs` maps these to the
/// process exit codes in the design this crate implements.
pub enum InterpretResult {
    Ok,
    CompileError,
    RuntimeError,
}

/// A runtime error: a message plus the source line it was raised at,
/// collapsed from the teacher's richer `RuntimeErrorType` taxonomy since
/// this language has exactly one kind of runtime failure.
pub struct RuntimeError {
    pub message: String,
    pub line: usize,
}

/// Executes a `Chunk` against a value stack, consulting `globals` for
/// variable lookups. Created fresh for every `interpret` call and dropped
/// at the end of it — there is no VM state that survives across calls.
pub struct VM {
    chunk: Chunk,
    ip: usize,
    stack: Vec<Value>,
    globals: Table,
}

impl VM {
    /// Compiles `source` and, if compilation succeeds, runs the resulting
    /// chunk to completion.
    pub fn interpret(source: &str) -> InterpretResult {
        let chunk = match Compiler::compile(source) {
            Ok(chunk) => chunk,
            Err(()) => return InterpretResult::CompileError,
        };

        let mut vm =
            VM { chunk, ip: 0, stack: Vec::with_capacity(STACK_INITIAL_CAPACITY), globals: Table::new() };
        vm.run()
    }

    fn push(&mut self, value: Value) {
        self.stack.push(value);
    }

    fn pop(&mut self) -> Value {
        self.stack.pop().expect("compiler only emits balanced stack effects")
    }

    /// Looks without consuming: `distance` 0 is the top of the stack.
    fn peek(&self, distance: usize) -> &Value {
        &self.stack[self.stack.len() - 1 - distance]
    }

    fn read_byte(&mut self) -> u8 {
        let byte = self.chunk.get_byte(self.ip);
        self.ip += 1;
        byte
    }

    fn read_short(&mut self) -> u16 {
        let short = self.chunk.get_short(self.ip);
        self.ip += 2;
        short
    }

    fn read_constant(&mut self) -> Value {
        let idx = self.read_byte();
        self.chunk.get_constant(idx as usize).clone()
    }

    /// The source line of the instruction just fetched — `ip` has already
    /// advanced past the opcode byte by the time a runtime error is raised.
    fn current_line(&self) -> usize {
        self.chunk.get_line(self.ip - 1)
    }

    fn runtime_error(&self, message: impl Into<String>) -> RuntimeError {
        RuntimeError { message: message.into(), line: self.current_line() }
    }
}
