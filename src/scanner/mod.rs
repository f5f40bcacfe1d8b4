mod lex_numbers;

/// The set of token kinds this language's grammar uses. `ERROR` and `EOF`
/// are sentinel kinds produced by the scanner itself rather than matched
/// against source text.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    LEFT_PAREN,
    RIGHT_PAREN,
    LEFT_BRACE,
    RIGHT_BRACE,
    SEMICOLON,
    EQUAL,
    LESS,
    GREATER,
    LESS_EQUAL,
    GREATER_EQUAL,
    EQUAL_EQUAL,
    BANG_EQUAL,
    BANG,
    PLUS,
    MINUS,
    STAR,
    SLASH,
    AND,
    OR,
    IDENTIFIER,
    STRING,
    NUMBER,
    VAR,
    PRINT,
    IF,
    ELSE,
    WHILE,
    TRUE,
    FALSE,
    FOR,
    FUN,
    CLASS,
    RETURN,
    NIL,
    THIS,
    SUPER,
    ERROR,
    EOF,
}

/// A token is a slice into the caller-owned source buffer plus a line
/// number; it never copies the lexeme, so the source must outlive every
/// token the scanner produces.
#[derive(Clone, Copy)]
pub struct Token<'a> {
    pub kind: TokenType,
    pub lexeme: &'a str,
    pub line: usize,
}

/// Turns source text into a stream of tokens, one at a time, on demand.
/// Mirrors the teacher's `Lexer`: a flat character buffer plus a cursor
/// pair (`start`, `current`) rather than the teacher's eager
/// tokenize-everything-up-front `find_tokens` pass — this scanner produces
/// exactly one token per `scan_token` call, as the original design calls for.
pub struct Scanner<'a> {
    source: &'a str,
    chars: Vec<char>,
    start: usize,
    current: usize,
    line: usize,
}

const KEYWORDS: &[(&str, TokenType)] = &[
    ("var", TokenType::VAR),
    ("print", TokenType::PRINT),
    ("if", TokenType::IF),
    ("else", TokenType::ELSE),
    ("while", TokenType::WHILE),
    ("true", TokenType::TRUE),
    ("false", TokenType::FALSE),
    ("and", TokenType::AND),
    ("or", TokenType::OR),
    ("for", TokenType::FOR),
    ("fun", TokenType::FUN),
    ("class", TokenType::CLASS),
    ("return", TokenType::RETURN),
    ("nil", TokenType::NIL),
    ("this", TokenType::THIS),
    ("super", TokenType::SUPER),
];

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, chars: source.chars().collect(), start: 0, current: 0, line: 1 }
    }

    pub fn scan_token(&mut self) -> Token<'a> {
        self.skip_whitespace();
        self.start = self.current;

        if self.is_at_end() {
            return self.make_token(TokenType::EOF);
        }

        let c = self.advance();

        if c.is_alphabetic() || c == '_' {
            return self.identifier();
        }
        if c.is_ascii_digit() {
            return self.number();
        }

        match c {
            '(' => self.make_token(TokenType::LEFT_PAREN),
            ')' => self.make_token(TokenType::RIGHT_PAREN),
            '{' => self.make_token(TokenType::LEFT_BRACE),
            '}' => self.make_token(TokenType::RIGHT_BRACE),
            ';' => self.make_token(TokenType::SEMICOLON),
            '+' => self.make_token(TokenType::PLUS),
            '-' => self.make_token(TokenType::MINUS),
            '*' => self.make_token(TokenType::STAR),
            '/' => self.make_token(TokenType::SLASH),
            '!' if self.matches('=') => self.make_token(TokenType::BANG_EQUAL),
            '!' => self.make_token(TokenType::BANG),
            '=' if self.matches('=') => self.make_token(TokenType::EQUAL_EQUAL),
            '=' => self.make_token(TokenType::EQUAL),
            '<' if self.matches('=') => self.make_token(TokenType::LESS_EQUAL),
            '<' => self.make_token(TokenType::LESS),
            '>' if self.matches('=') => self.make_token(TokenType::GREATER_EQUAL),
            '>' => self.make_token(TokenType::GREATER),
            '&' if self.matches('&') => self.make_token(TokenType::AND),
            '|' if self.matches('|') => self.make_token(TokenType::OR),
            '"' => self.string(),
            _ => self.error_token("Unexpected character."),
        }
    }

    fn identifier(&mut self) -> Token<'a> {
        while !self.is_at_end() && (self.peek().is_alphanumeric() || self.peek() == '_') {
            self.advance();
        }

        let lexeme = self.lexeme();
        let kind = KEYWORDS.iter().find(|(kw, _)| *kw == lexeme).map(|(_, kind)| *kind).unwrap_or(TokenType::IDENTIFIER);
        self.make_token(kind)
    }

    fn string(&mut self) -> Token<'a> {
        while !self.is_at_end() && self.peek() != '"' {
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            return self.error_token("Unterminated string");
        }

        self.advance(); // the closing quote
        self.make_token(TokenType::STRING)
    }

    /// The string literal's value, with the surrounding quotes stripped.
    pub fn string_value(lexeme: &str) -> &str {
        &lexeme[1..lexeme.len() - 1]
    }

    fn skip_whitespace(&mut self) {
        loop {
            if self.is_at_end() {
                return;
            }
            match self.peek() {
                ' ' | '\t' | '\r' => {
                    self.advance();
                }
                '\n' => {
                    self.line += 1;
                    self.advance();
                }
                '/' if self.peek_next() == '/' => {
                    while !self.is_at_end() && self.peek() != '\n' {
                        self.advance();
                    }
                }
                _ => return,
            }
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }

    fn advance(&mut self) -> char {
        let c = self.chars[self.current];
        self.current += 1;
        c
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.chars[self.current]
        }
    }

    fn peek_next(&self) -> char {
        if self.current + 1 >= self.chars.len() {
            '\0'
        } else {
            self.chars[self.current + 1]
        }
    }

    fn matches(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.chars[self.current] != expected {
            return false;
        }
        self.current += 1;
        true
    }

    /// The byte range a run of `self.chars` covers, recovered by measuring
    /// char widths — the scanner tracks positions in `char`s so multi-byte
    /// UTF-8 source still advances one token character at a time, but tokens
    /// borrow `&str` slices out of the original byte buffer.
    fn byte_offset(&self, char_idx: usize) -> usize {
        self.chars[..char_idx].iter().map(|c| c.len_utf8()).sum()
    }

    fn lexeme(&self) -> &'a str {
        let start = self.byte_offset(self.start);
        let end = self.byte_offset(self.current);
        &self.source[start..end]
    }

    fn make_token(&self, kind: TokenType) -> Token<'a> {
        Token { kind, lexeme: self.lexeme(), line: self.line }
    }

    fn error_token(&self, message: &'static str) -> Token<'a> {
        Token { kind: TokenType::ERROR, lexeme: message, line: self.line }
    }
}
