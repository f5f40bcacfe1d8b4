pub mod expressions;
pub mod precedence;
mod statements;

use std::rc::Rc;

use crate::bytecode::OpCode;
use crate::chunk::Chunk;
use crate::scanner::{Scanner, Token, TokenType};
use crate::value::Value;

use precedence::{get_rule, Precedence};

const MAX_LOCALS: usize = 256;

/// A compile-time record of a named local variable. The locals array is
/// also the compile-time model of the runtime stack: a local's index in
/// this vector is the exact runtime stack slot the compiler addresses with
/// `GetLocal`/`SetLocal` — see §3 of the design this crate implements.
///
/// `depth == UNINITIALIZED` between `add_local` and the point its
/// initializer finishes compiling; `resolve_local` skips a local in that
/// state so a self-referencing initializer (`var a = a;`) resolves `a`
/// against an outer local/global instead of the not-yet-live slot.
struct Local<'a> {
    name: &'a str,
    depth: i32,
}

const UNINITIALIZED: i32 = -1;

/// Single-pass Pratt parser/compiler: it scans tokens on demand from its
/// `Scanner` and emits bytecode directly into `chunk` as it recognizes each
/// production, with no intermediate AST. Grounded on the teacher's older
/// (pre-AST) `Compiler` in `src/compiler/mod.rs`, generalized to this
/// language's reduced grammar (no functions, classes, or closures).
pub struct Compiler<'a> {
    scanner: Scanner<'a>,
    previous: Token<'a>,
    current: Token<'a>,
    had_error: bool,
    panic_mode: bool,
    chunk: Chunk,
    locals: Vec<Local<'a>>,
    scope_depth: i32,
}

impl<'a> Compiler<'a> {
    /// Compiles `source` into a `Chunk`. Returns `Ok` iff no compile errors
    /// were reported, matching `compile(source, chunk) -> ok` from the design.
    pub fn compile(source: &'a str) -> Result<Chunk, ()> {
        let mut compiler = Compiler {
            scanner: Scanner::new(source),
            previous: Token { kind: TokenType::EOF, lexeme: "", line: 0 },
            current: Token { kind: TokenType::EOF, lexeme: "", line: 0 },
            had_error: false,
            panic_mode: false,
            chunk: Chunk::new(),
            locals: Vec::with_capacity(MAX_LOCALS),
            scope_depth: 0,
        };

        compiler.advance();
        while !compiler.check(TokenType::EOF) {
            compiler.statement();
            if compiler.panic_mode {
                compiler.synchronize();
            }
        }

        compiler.emit_op(OpCode::Return);

        if compiler.had_error {
            Err(())
        } else {
            Ok(compiler.chunk)
        }
    }

    // --- token stream plumbing -------------------------------------------

    fn advance(&mut self) {
        self.previous = self.current;

        loop {
            self.current = self.scanner.scan_token();
            if self.current.kind != TokenType::ERROR {
                break;
            }
            let message = self.current.lexeme;
            self.error_at_current(message);
        }
    }

    fn check(&self, kind: TokenType) -> bool {
        self.current.kind == kind
    }

    fn matches(&mut self, kind: TokenType) -> bool {
        if !self.check(kind) {
            return false;
        }
        self.advance();
        true
    }

    fn consume(&mut self, kind: TokenType, message: &str) {
        if self.check(kind) {
            self.advance();
            return;
        }
        self.error_at_current(message);
    }

    // --- bytecode emission -------------------------------------------------

    fn emit_op(&mut self, op: OpCode) {
        self.chunk.write_op(op, self.previous.line);
    }

    fn emit_byte(&mut self, byte: u8) {
        self.chunk.write_byte(byte, self.previous.line);
    }

    fn emit_op_byte(&mut self, op: OpCode, byte: u8) {
        self.emit_op(op);
        self.emit_byte(byte);
    }

    /// Emits `op` followed by a two-byte placeholder, returning the offset of
    /// the placeholder's first byte for a later `patch_jump`.
    fn emit_jump(&mut self, op: OpCode) -> usize {
        self.emit_op(op);
        self.emit_byte(0xFF);
        self.emit_byte(0xFF);
        self.chunk.len() - 2
    }

    fn patch_jump(&mut self, offset: usize) {
        let jump = self.chunk.len() - offset - 2;
        if jump > u16::MAX as usize {
            self.error("Jump too large.");
            return;
        }
        let bytes = (jump as u16).to_be_bytes();
        self.chunk.patch_byte(offset, bytes[0]);
        self.chunk.patch_byte(offset + 1, bytes[1]);
    }

    fn emit_loop(&mut self, loop_start: usize) {
        self.emit_op(OpCode::Loop);
        let offset = self.chunk.len() - loop_start + 2;
        if offset > u16::MAX as usize {
            self.error("Loop body too large.");
            return;
        }
        self.chunk.write_short(offset as u16, self.previous.line);
    }

    /// Adds `value` to the constant pool, capping at one byte of index (256
    /// distinct constants per chunk, per §3).
    fn make_constant(&mut self, value: Value) -> u8 {
        let idx = self.chunk.add_constant(value);
        if idx > u8::MAX as usize {
            self.error("Too many constants in one chunk.");
            return 0;
        }
        idx as u8
    }

    // --- scopes and locals --------------------------------------------------

    fn begin_scope(&mut self) {
        self.scope_depth += 1;
    }

    /// Leaving a scope emits one `Pop` per local that scope declared — the
    /// compiler's static model of discarding those stack slots at runtime.
    fn end_scope(&mut self) {
        self.scope_depth -= 1;
        while let Some(local) = self.locals.last() {
            if local.depth <= self.scope_depth {
                break;
            }
            self.emit_op(OpCode::Pop);
            self.locals.pop();
        }
    }

    /// Adds a name as a string constant and returns its pool index — used for
    /// both `var` targets and bare-identifier resolution against globals.
    fn identifier_constant(&mut self, name: &str) -> u8 {
        self.make_constant(Value::Str(Rc::from(name)))
    }

    fn add_local(&mut self, name: &'a str) {
        if self.locals.len() >= MAX_LOCALS {
            self.error("Too many local variables in one scope.");
            return;
        }
        self.locals.push(Local { name, depth: UNINITIALIZED });
    }

    /// Marks the most recently added local as live at the current scope
    /// depth. Called once its initializer has finished compiling, so that
    /// `resolve_local` could not have resolved the local to its own
    /// not-yet-evaluated slot while the initializer was being compiled.
    fn mark_initialized(&mut self) {
        if let Some(local) = self.locals.last_mut() {
            local.depth = self.scope_depth;
        }
    }

    /// Resolves `name` against the locals in scope, back-to-front so that
    /// shadowing within nested blocks favors the innermost declaration. A
    /// local still mid-initialization (`depth == UNINITIALIZED`) is skipped,
    /// so a reference to it in its own initializer falls through to an outer
    /// local or global of the same name instead of indexing a stack slot
    /// that has not been pushed yet. `None` means the name is a global.
    fn resolve_local(&self, name: &str) -> Option<usize> {
        self.locals
            .iter()
            .enumerate()
            .rev()
            .find(|(_, local)| local.name == name && local.depth != UNINITIALIZED)
            .map(|(i, _)| i)
    }

    // --- Pratt parsing -------------------------------------------------------

    fn parse_precedence(&mut self, precedence: Precedence) {
        self.advance();
        let prefix = get_rule(self.previous.kind).prefix;
        let prefix = match prefix {
            Some(f) => f,
            None => {
                self.error("Expected expression.");
                return;
            }
        };

        let can_assign = precedence <= Precedence::ASSIGNMENT;
        prefix(self, can_assign);

        while precedence <= get_rule(self.current.kind).precedence {
            self.advance();
            let infix = get_rule(self.previous.kind).infix.expect("infix rule must exist for a token with precedence");
            infix(self, can_assign);
        }

        if can_assign && self.matches(TokenType::EQUAL) {
            self.error("Invalid assignment target.");
        }
    }

    fn expression(&mut self) {
        self.parse_precedence(Precedence::ASSIGNMENT);
    }

    // --- error reporting -----------------------------------------------------

    fn error_at_current(&mut self, message: &str) {
        let token = self.current;
        self.error_at(token, message);
    }

    fn error(&mut self, message: &str) {
        let token = self.previous;
        self.error_at(token, message);
    }

    fn error_at(&mut self, token: Token<'a>, message: &str) {
        if self.panic_mode {
            return;
        }
        self.panic_mode = true;
        crate::errors::report_compile_error(token.line, token.kind, token.lexeme, message);
        self.had_error = true;
    }

    /// Discards tokens until a plausible statement boundary, so one syntax
    /// error does not cascade into a wall of follow-on errors.
    fn synchronize(&mut self) {
        self.panic_mode = false;

        while self.current.kind != TokenType::EOF {
            if self.previous.kind == TokenType::SEMICOLON {
                return;
            }
            match self.current.kind {
                TokenType::CLASS
                | TokenType::FUN
                | TokenType::VAR
                | TokenType::FOR
                | TokenType::IF
                | TokenType::WHILE
                | TokenType::PRINT
                | TokenType::RETURN => return,
                _ => {}
            }
            self.advance();
        }
    }
}
