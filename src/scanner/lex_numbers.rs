use super::{Scanner, Token, TokenType};

impl<'a> Scanner<'a> {
    /// Consumes a numeric literal: one or more digits, optionally followed by
    /// a `.` and more digits. Split out of `mod.rs` the way the teacher keeps
    /// number-lexing in its own file (`lex_numbers.rs`) even in the scanner
    /// that otherwise lives in a single module.
    pub(super) fn number(&mut self) -> Token<'a> {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance(); // the '.'
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        self.make_token(TokenType::NUMBER)
    }
}
