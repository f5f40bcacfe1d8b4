use crate::bytecode::OpCode;
use crate::compiler::Compiler;
use crate::scanner::TokenType;

impl<'a> Compiler<'a> {
    /// Top-level statement dispatch, driven by the current token's kind —
    /// mirrors the original design's `declaration`/`statement` split
    /// collapsed into one function, since this grammar has no function or
    /// class declarations to separate out.
    pub(super) fn statement(&mut self) {
        match self.current.kind {
            TokenType::PRINT => self.print_statement(),
            TokenType::VAR => self.var_statement(),
            TokenType::LEFT_BRACE => {
                self.advance();
                self.begin_scope();
                self.block();
                self.end_scope();
            }
            TokenType::IF => self.if_statement(),
            TokenType::WHILE => self.while_statement(),
            _ => self.expression_statement(),
        }
    }

    fn print_statement(&mut self) {
        self.advance(); // 'print'
        self.expression();
        self.emit_op(OpCode::Print);
        self.consume(TokenType::SEMICOLON, "Expect ';' after value in print statement.");
    }

    /// `var` at global scope defines a named slot in the globals table; `var`
    /// inside a block instead claims the next runtime stack slot and leaves
    /// no opcode behind to "define" it — the initializer's pushed value *is*
    /// the local, which is the design's intended reading of §4.3's local
    /// branch (see DESIGN.md for the corresponding decision).
    fn var_statement(&mut self) {
        self.advance(); // 'var'
        self.consume(TokenType::IDENTIFIER, "Expect variable name.");
        let name = self.previous.lexeme;

        if self.scope_depth == 0 {
            let idx = self.identifier_constant(name);
            if self.matches(TokenType::EQUAL) {
                self.expression();
            } else {
                self.emit_op(OpCode::Nil);
            }
            self.consume(TokenType::SEMICOLON, "Expect ';' after variable declaration.");
            self.emit_op_byte(OpCode::DefineGlobal, idx);
        } else {
            self.add_local(name);
            if self.matches(TokenType::EQUAL) {
                self.expression();
            } else {
                self.emit_op(OpCode::Nil);
            }
            self.mark_initialized();
            self.consume(TokenType::SEMICOLON, "Expect ';' after variable declaration.");
        }
    }

    fn block(&mut self) {
        while !self.check(TokenType::RIGHT_BRACE) && !self.check(TokenType::EOF) {
            self.statement();
        }
        self.consume(TokenType::RIGHT_BRACE, "Expect '}' after block.");
    }

    fn if_statement(&mut self) {
        self.advance(); // 'if'
        self.consume(TokenType::LEFT_PAREN, "Expect '(' after 'if'.");
        self.expression();
        self.consume(TokenType::RIGHT_PAREN, "Expect ')' after condition.");

        let then_jump = self.emit_jump(OpCode::JumpIfFalse);
        self.emit_op(OpCode::Pop);
        self.statement();

        let else_jump = self.emit_jump(OpCode::Jump);
        self.patch_jump(then_jump);
        self.emit_op(OpCode::Pop);

        if self.matches(TokenType::ELSE) {
            self.statement();
        }
        self.patch_jump(else_jump);
    }

    fn while_statement(&mut self) {
        self.advance(); // 'while'
        let loop_start = self.chunk.len();
        self.consume(TokenType::LEFT_PAREN, "Expect '(' after 'while'.");
        self.expression();
        self.consume(TokenType::RIGHT_PAREN, "Expect ')' after condition.");

        let exit_jump = self.emit_jump(OpCode::JumpIfFalse);
        self.emit_op(OpCode::Pop);
        self.statement();
        self.emit_loop(loop_start);

        self.patch_jump(exit_jump);
        self.emit_op(OpCode::Pop);
    }

    /// An expression used as a statement. The original source leaves the
    /// expression's value on the stack, leaking a slot per statement; this
    /// implementation instead pops it, the "cleaner design" the original
    /// design notes call out as the alternative (see DESIGN.md).
    fn expression_statement(&mut self) {
        self.expression();
        self.consume(TokenType::SEMICOLON, "Expect ';' after expression.");
        self.emit_op(OpCode::Pop);
    }
}
