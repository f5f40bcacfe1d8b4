use crate::scanner::TokenType;

/// Writes a single compile-time diagnostic to stderr in the form
/// `[Line <n>] Error at '<lexeme>': '<message>'` (or `at end` for EOF, or
/// no location clause at all for a scanner error token, whose own message
/// already names what went wrong).
pub fn report_compile_error(line: usize, kind: TokenType, lexeme: &str, message: &str) {
    eprint!("[Line {}] Error", line);
    match kind {
        TokenType::EOF => eprint!(" at end"),
        TokenType::ERROR => {}
        _ => eprint!(" at '{}'", lexeme),
    }
    eprintln!(": '{}'", message);
}

/// Writes a single runtime diagnostic to stderr. Runtime errors carry no
/// taxonomy beyond "something went wrong at this line" — there is no catch
/// or retry, so one message is all there ever is to report.
pub fn report_runtime_error(line: usize, message: &str) {
    eprintln!("[Line {}] {}", line, message);
}
